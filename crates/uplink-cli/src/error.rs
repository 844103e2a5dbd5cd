//! Error types for the decoder command line.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or reading input.
///
/// Decoding itself never fails; short frames become records with errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input line is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid hex frame: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("no layout for device {device}: pass --layout or set default_layout")]
    NoLayout { device: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_layout_message() {
        let err = CliError::NoLayout {
            device: "sensor-7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no layout for device sensor-7: pass --layout or set default_layout"
        );
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: CliError = hex::decode("0g").unwrap_err().into();
        assert!(matches!(err, CliError::Hex(_)));
        assert!(err.to_string().starts_with("invalid hex frame"));
    }
}
