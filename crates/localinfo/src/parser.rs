//! Parsers for the single-value git outputs.

use chrono::DateTime;

use crate::ParseError;

/// Oldest root commit from `git log --max-parents=0` output (listed last)
pub fn parse_first_commit(raw: &str) -> Result<String, ParseError> {
    raw.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .ok_or(ParseError::EmptyOutput)
}

/// Committer timestamp, returned as printed once it is known to be strict ISO-8601
pub fn parse_commit_time(raw: &str) -> Result<String, ParseError> {
    let time = raw.trim();
    if time.is_empty() {
        return Err(ParseError::EmptyOutput);
    }

    DateTime::parse_from_rfc3339(time)
        .map_err(|_| ParseError::InvalidTimestamp(time.to_string()))?;

    Ok(time.to_string())
}

/// Branch names from `git branch` output, in listing order
pub fn parse_branch_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            // `*` marks the current branch, `+` one checked out in another worktree
            l.strip_prefix("* ")
                .or_else(|| l.strip_prefix("+ "))
                .unwrap_or(l)
                .to_string()
        })
        .collect()
}

/// One stash entry per line that has any non-whitespace content
pub fn count_stashes(raw: &str) -> usize {
    raw.lines().filter(|l| !l.trim().is_empty()).count()
}

pub fn parse_bool_flag(raw: &str) -> bool {
    raw.trim() == "true"
}

/// Porcelain output with nothing but whitespace means a clean tree
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_commit_single_root() {
        assert_eq!(parse_first_commit("71f5fa4\n").unwrap(), "71f5fa4");
    }

    #[test]
    fn test_first_commit_multiple_roots() {
        // log prints newest first
        assert_eq!(parse_first_commit("9c1e2d0\n71f5fa4\n").unwrap(), "71f5fa4");
    }

    #[test]
    fn test_first_commit_empty() {
        assert_eq!(parse_first_commit("\n"), Err(ParseError::EmptyOutput));
    }

    #[test]
    fn test_commit_time_verbatim() {
        assert_eq!(
            parse_commit_time("2013-12-27T05:38:34Z\n").unwrap(),
            "2013-12-27T05:38:34Z"
        );
        assert_eq!(
            parse_commit_time("2013-12-26T23:38:34-06:00").unwrap(),
            "2013-12-26T23:38:34-06:00"
        );
    }

    #[test]
    fn test_commit_time_rejects_loose_formats() {
        assert!(matches!(
            parse_commit_time("2013-12-27 05:38:34 +0000"),
            Err(ParseError::InvalidTimestamp(_))
        ));
        assert_eq!(parse_commit_time(""), Err(ParseError::EmptyOutput));
    }

    #[test]
    fn test_branch_list() {
        assert_eq!(parse_branch_list("  foo\n  bar\n"), vec!["foo", "bar"]);
        assert_eq!(parse_branch_list("\n  foo\n\n"), vec!["foo"]);
        assert_eq!(parse_branch_list("+ wt-branch\n  feature/x\n"), vec!["wt-branch", "feature/x"]);
        assert!(parse_branch_list("").is_empty());
    }

    #[test]
    fn test_count_stashes() {
        assert_eq!(count_stashes("foo\n bar\n"), 2);
        assert_eq!(count_stashes("stash@{0}: a\nstash@{1}: b\nstash@{2}: c\n\n"), 3);
        assert_eq!(count_stashes(" \n"), 0);
        assert_eq!(count_stashes(""), 0);
    }

    #[test]
    fn test_bool_flag() {
        assert!(parse_bool_flag("true\n"));
        assert!(!parse_bool_flag("false\n"));
        assert!(!parse_bool_flag(""));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("\n\n"));
        assert!(!is_blank(" M src/lib.rs\n"));
    }
}
