//! Input line parsing.
//!
//! Two line formats are accepted: a hex frame, or a JSON object shaped like
//! the input of a network server payload formatter:
//!
//! ```text
//! 00 0a 03 0c 1c
//! {"bytes":[0,10,3,12,28],"fPort":10,"device":"field-sensor-1"}
//! ```

use serde::Deserialize;

use crate::error::CliError;

/// One uplink read from the input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkInput {
    /// Frame payload.
    pub bytes: Vec<u8>,
    /// LoRaWAN port the frame arrived on, if known.
    #[serde(default)]
    pub f_port: Option<u8>,
    /// Device name used for layout lookup and metric labels.
    #[serde(default)]
    pub device: Option<String>,
}

impl UplinkInput {
    /// An uplink with no port or device.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        UplinkInput {
            bytes,
            f_port: None,
            device: None,
        }
    }
}

/// Whether a line carries no frame (blank or a `#` comment).
pub fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse a hex frame.
///
/// Whitespace, `:` and `-` separators are ignored, as is a `0x` prefix on
/// each group.
pub fn parse_hex_frame(text: &str) -> Result<Vec<u8>, CliError> {
    let digits: String = text
        .split(|c: char| c.is_whitespace() || c == ':' || c == '-')
        .map(|group| {
            group
                .strip_prefix("0x")
                .or_else(|| group.strip_prefix("0X"))
                .unwrap_or(group)
        })
        .collect();
    Ok(hex::decode(digits)?)
}

/// Parse a JSON uplink line.
pub fn parse_json_line(text: &str) -> Result<UplinkInput, CliError> {
    Ok(serde_json::from_str(text.trim())?)
}

/// Parse one input line. Returns `None` for lines that carry no frame.
pub fn parse_line(line: &str, json: bool) -> Result<Option<UplinkInput>, CliError> {
    if is_skipped(line) {
        return Ok(None);
    }
    if json {
        parse_json_line(line).map(Some)
    } else {
        parse_hex_frame(line).map(|bytes| Some(UplinkInput::from_bytes(bytes)))
    }
}
