use serde::Serialize;

use crate::ParseError;

/// Category a changed path is counted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Untracked,
}

/// Classify a porcelain status code.
///
/// `index` is the staged column and `worktree` the unstaged one. Rules
/// apply in order: `??` is untracked, a staged `A` is added, a staged `D`
/// is deleted, anything else is modified.
pub fn classify(index: char, worktree: char) -> ChangeKind {
    match (index, worktree) {
        ('?', '?') => ChangeKind::Untracked,
        ('A', _) => ChangeKind::Added,
        ('D', _) => ChangeKind::Deleted,
        _ => ChangeKind::Modified,
    }
}

/// Number of changed paths per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub untracked: usize,
}

impl ChangeCounts {
    /// Count the entries of `git status --porcelain` output.
    pub fn from_porcelain(raw: &str) -> Result<Self, ParseError> {
        let mut counts = Self::default();

        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let mut code = line.chars();
            let (Some(index), Some(worktree)) = (code.next(), code.next()) else {
                return Err(ParseError::MalformedStatusLine(line.to_string()));
            };
            counts.record(classify(index, worktree));
        }

        Ok(counts)
    }

    pub fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Added => self.added += 1,
            ChangeKind::Modified => self.modified += 1,
            ChangeKind::Deleted => self.deleted += 1,
            ChangeKind::Untracked => self.untracked += 1,
        }
    }

    pub fn get(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Added => self.added,
            ChangeKind::Modified => self.modified,
            ChangeKind::Deleted => self.deleted,
            ChangeKind::Untracked => self.untracked,
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.modified + self.deleted + self.untracked
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify('?', '?'), ChangeKind::Untracked);
        assert_eq!(classify(' ', 'M'), ChangeKind::Modified);
        assert_eq!(classify('A', '?'), ChangeKind::Added);
        assert_eq!(classify('D', 'M'), ChangeKind::Deleted);
        assert_eq!(classify(' ', 'C'), ChangeKind::Modified);
        assert_eq!(classify(' ', 'U'), ChangeKind::Modified);
    }

    #[test]
    fn test_classify_staged_column_wins() {
        // Added in the index, deleted in the worktree
        assert_eq!(classify('A', 'D'), ChangeKind::Added);
        // Unstaged deletions are modifications of a tracked path
        assert_eq!(classify(' ', 'D'), ChangeKind::Modified);
        assert_eq!(classify('?', ' '), ChangeKind::Modified);
    }

    #[test]
    fn test_counts_fixture() {
        let raw = "?? foo\n M bar\nA? bar\nDM bar\n M bar\n C bar\n U bar\n";
        let counts = ChangeCounts::from_porcelain(raw).unwrap();

        assert_eq!(
            counts,
            ChangeCounts {
                added: 1,
                modified: 4,
                deleted: 1,
                untracked: 1,
            }
        );
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.get(ChangeKind::Modified), 4);
    }

    #[test]
    fn test_counts_empty_output() {
        let counts = ChangeCounts::from_porcelain("").unwrap();
        assert!(counts.is_clean());
    }

    #[test]
    fn test_counts_serialize_shape() {
        let counts = ChangeCounts::from_porcelain("?? new.txt\n").unwrap();
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"added": 0, "modified": 0, "deleted": 0, "untracked": 1})
        );
    }

    #[test]
    fn test_counts_malformed_line() {
        assert_eq!(
            ChangeCounts::from_porcelain("M\n"),
            Err(ParseError::MalformedStatusLine("M".to_string()))
        );
    }
}
