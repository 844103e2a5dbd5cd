//! Decode error and warning types.

use thiserror::Error;

use crate::constants::BATTERY_LOW_MV;
use crate::layout::LayoutVersion;

/// Fatal conditions that prevent any field from being extracted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame is shorter than the layout's minimum length.
    #[error("frame too short for layout {layout}: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Layout the frame was decoded with.
        layout: LayoutVersion,
        /// Minimum length of that layout.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },
}

/// Non-fatal conditions reported alongside the decoded fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Supply voltage is below the lowest battery threshold.
    #[error("battery critical: {millivolts} mV (below {} mV)", BATTERY_LOW_MV)]
    BatteryCritical {
        /// Measured supply voltage.
        millivolts: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_names_both_lengths() {
        let err = DecodeError::TooShort {
            layout: LayoutVersion::V2,
            expected: 6,
            actual: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("v2"));
        assert!(msg.contains("at least 6 bytes"));
        assert!(msg.contains("got 4"));
    }

    #[test]
    fn test_warning_display() {
        let warning = DecodeWarning::BatteryCritical { millivolts: 2303 };
        assert_eq!(warning.to_string(), "battery critical: 2303 mV (below 2400 mV)");
    }
}
