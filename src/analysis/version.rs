//! Compatibility versions.
//!
//! An index is reproducible only if text is analyzed the same way it was when
//! the index was built. Analyzers therefore take a [`Version`] and pick the
//! stage sequence that was current at that version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StemmaError};

/// An analysis compatibility version, ordered oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Version {
    /// Original behaviour: no elision, lowercasing after French stemming,
    /// legacy stop word lists, non-preserving length filter.
    #[serde(rename = "1.0")]
    V1_0,
    /// Elision and possessive stripping, Snowball stop lists, position
    /// increments preserved across removed tokens.
    #[serde(rename = "1.5")]
    V1_5,
    /// Snowball English stemming, minimal French stemming.
    #[serde(rename = "2.0")]
    V2_0,
}

impl Version {
    /// The newest version.
    pub const LATEST: Version = Version::V2_0;

    /// Every version, oldest first.
    pub const ALL: [Version; 3] = [Version::V1_0, Version::V1_5, Version::V2_0];

    /// Whether `self` is the same as or newer than `other`.
    pub fn on_or_after(self, other: Version) -> bool {
        self >= other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Version::V1_0 => "1.0",
            Version::V1_5 => "1.5",
            Version::V2_0 => "2.0",
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::LATEST
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = StemmaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1.0" | "1" => Ok(Version::V1_0),
            "1.5" => Ok(Version::V1_5),
            "2.0" | "2" => Ok(Version::V2_0),
            "latest" => Ok(Version::LATEST),
            other => Err(StemmaError::configuration(format!(
                "unknown version '{other}', expected one of 1.0, 1.5, 2.0, latest"
            ))),
        }
    }
}
