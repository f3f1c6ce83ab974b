#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A dotted numeric release identifier such as `1.20.1`.
///
/// Ordering compares the numeric segments left to right, so `1.10` sorts
/// after `1.9`, and a prefix sorts before its extensions (`1.9` < `1.9.0`).
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    /// Identifier exactly as published.
    raw:      String,
    /// Parsed numeric segments.
    segments: Vec<u64>,
}

/// Error returned when a string is not a dotted numeric identifier.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("`{0}` is not a dotted numeric version")]
pub struct InvalidVersion(pub String);

impl Version {
    /// The identifier as it appears in listings and file names.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric segments of the identifier.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| InvalidVersion(s.to_string()))?;

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }
}

impl TryFrom<String> for Version {
    type Error = InvalidVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.raw
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Sorts `versions` oldest first.
pub fn sort_ascending(versions: &mut [Version]) {
    versions.sort();
}

/// Sorts `versions` newest first.
pub fn sort_descending(versions: &mut [Version]) {
    versions.sort_by(|a, b| b.cmp(a));
}
