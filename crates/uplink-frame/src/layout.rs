//! Frame layout revisions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::constants::{V1_HEADER_SIZE, V2_HEADER_SIZE};

/// The known frame shapes.
///
/// Both layouts share the first three bytes but disagree from byte 3 on, and
/// a 6+ byte frame is valid under either. The layout is therefore never
/// inferred from the frame; it has to come from whoever knows which firmware
/// the device runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutVersion {
    /// reason, power, datarate, voltage (5 bytes) + optional sensor block.
    V1,
    /// reason, power, datarate, spreading factor, voltage (6 bytes).
    V2,
}

impl LayoutVersion {
    /// All layouts, oldest first.
    pub const ALL: [LayoutVersion; 2] = [LayoutVersion::V1, LayoutVersion::V2];

    /// Minimum frame length accepted for this layout.
    pub const fn min_len(self) -> usize {
        match self {
            LayoutVersion::V1 => V1_HEADER_SIZE,
            LayoutVersion::V2 => V2_HEADER_SIZE,
        }
    }

    /// Returns the layout as a lowercase string.
    pub const fn as_str(self) -> &'static str {
        match self {
            LayoutVersion::V1 => "v1",
            LayoutVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for LayoutVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a layout name cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown layout version '{0}' (expected v1 or v2)")]
pub struct ParseLayoutError(pub String);

impl FromStr for LayoutVersion {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(LayoutVersion::V1),
            "v2" | "2" => Ok(LayoutVersion::V2),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}

impl Serialize for LayoutVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LayoutVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
