use serde::{Serialize, Serializer};

use crate::ParseError;

/// Divergence of the current branch from its upstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "magnitude")]
    pub behind: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "magnitude")]
    pub ahead: Option<u32>,
}

/// Magnitudes serialize as numeric strings, e.g. `{"behind": "5"}`
fn magnitude<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) => serializer.collect_str(n),
        None => serializer.serialize_none(),
    }
}

impl SyncStatus {
    pub fn is_in_sync(&self) -> bool {
        self.behind.is_none() && self.ahead.is_none()
    }
}

/// Result of fetching and comparing against upstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchState {
    /// True when nothing on the upstream is missing locally; local commits
    /// that are only ahead still count as fetched
    pub fetched: bool,
    pub status: SyncStatus,
}

impl From<SyncStatus> for FetchState {
    fn from(status: SyncStatus) -> Self {
        Self {
            fetched: status.behind.is_none(),
            status,
        }
    }
}

/// Parse the tracking marker of a branch header.
///
/// Reads the first non-empty line, e.g. `## main...origin/main [ahead 2, behind 5]`
/// or a bare `[behind 5]`. No marker, or `[gone]`, means nothing to report.
pub fn parse_sync_status(raw: &str) -> Result<SyncStatus, ParseError> {
    let mut status = SyncStatus::default();

    let Some(line) = raw.lines().find(|l| !l.trim().is_empty()) else {
        return Ok(status);
    };
    let Some(open) = line.rfind('[') else {
        return Ok(status);
    };
    let marker = &line[open + 1..];
    let Some(close) = marker.find(']') else {
        return Err(ParseError::InvalidDivergence(line.to_string()));
    };

    for part in marker[..close].split(',').map(str::trim) {
        if part == "gone" {
            continue;
        }

        let (direction, magnitude) = part
            .split_once(' ')
            .ok_or_else(|| ParseError::InvalidDivergence(part.to_string()))?;
        let magnitude: u32 = magnitude
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidDivergence(part.to_string()))?;

        match direction {
            "behind" => status.behind = Some(magnitude),
            "ahead" => status.ahead = Some(magnitude),
            _ => return Err(ParseError::InvalidDivergence(part.to_string())),
        }
    }

    Ok(status)
}
