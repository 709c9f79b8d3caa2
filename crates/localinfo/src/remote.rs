use serde::Serialize;
use std::fmt;

use crate::ParseError;

/// Which side of a remote a `git remote -v` line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteDirection {
    Fetch,
    Push,
}

/// One configured remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteEntry {
    pub name: String,
    pub url: String,
    pub direction: RemoteDirection,
}

/// `owner/repo` of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryIdentity {
    /// Account or group path; may contain `/` for nested groups
    pub owner: String,
    pub repo: String,
}

/// Parse `git remote -v` output.
///
/// Each remote is listed once per direction; entries are deduplicated by
/// name and keep the order in which names first appear.
pub fn parse_remote_list(raw: &str) -> Result<Vec<RemoteEntry>, ParseError> {
    let mut remotes: Vec<RemoteEntry> = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(name), Some(url)) = (fields.next(), fields.next()) else {
            return Err(ParseError::MalformedRemoteLine(line.to_string()));
        };
        let direction = match fields.next() {
            None | Some("(fetch)") => RemoteDirection::Fetch,
            Some("(push)") => RemoteDirection::Push,
            Some(_) => return Err(ParseError::MalformedRemoteLine(line.to_string())),
        };

        if remotes.iter().any(|r| r.name == name) {
            continue;
        }
        remotes.push(RemoteEntry {
            name: name.to_string(),
            url: url.to_string(),
            direction,
        });
    }

    Ok(remotes)
}

/// The remote named `preferred` when present, otherwise the first one listed
pub fn select_remote<'a>(remotes: &'a [RemoteEntry], preferred: &str) -> Option<&'a RemoteEntry> {
    remotes
        .iter()
        .find(|r| r.name == preferred)
        .or_else(|| remotes.first())
}

impl RepositoryIdentity {
    /// Derive `owner/repo` from a remote URL.
    ///
    /// Accepts SCP-like (`git@host:owner/repo.git`) and URL forms
    /// (`https://host/owner/repo.git`, `ssh://git@host:22/owner/repo`).
    pub fn from_remote_url(url: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidRemoteUrl(url.to_string());
        let url = url.trim();

        let path = if let Some((_, rest)) = url.split_once("://") {
            // Drop the authority (credentials, host, port)
            rest.split_once('/').map(|(_, path)| path).ok_or_else(invalid)?
        } else if let Some((_, path)) = url.split_once(':') {
            path
        } else {
            url
        };

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path).trim_end_matches('/');

        match path.rsplit_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
