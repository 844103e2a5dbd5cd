//! Output records and formats.

use clap::ValueEnum;
use serde::Serialize;
use uplink_frame::{DecodeResult, LayoutVersion};

use crate::error::CliError;

/// How records are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Indented JSON, one object per record.
    JsonPretty,
    /// YAML documents separated by `---`.
    Yaml,
}

/// A decoded frame with the context it was decoded in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRecord {
    /// Device the frame came from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Layout the frame was decoded with.
    pub layout: LayoutVersion,
    /// The frame as lowercase hex.
    pub frame: String,
    /// Decoded fields and diagnostics, flattened into the record.
    #[serde(flatten)]
    pub result: DecodeResult,
}

impl DecodedRecord {
    /// Wrap a decode result with the frame and context it came from.
    pub fn new(
        device: Option<String>,
        layout: LayoutVersion,
        frame: &[u8],
        result: DecodeResult,
    ) -> Self {
        DecodedRecord {
            device,
            layout,
            frame: hex::encode(frame),
            result,
        }
    }
}

/// Render a record in the given format, without a trailing newline.
pub fn render(record: &DecodedRecord, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Yaml => {
            let body = serde_yaml::to_string(record)?;
            Ok(format!("---\n{}", body.trim_end()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uplink_frame::decode;

    fn record(frame: &[u8], layout: LayoutVersion) -> DecodedRecord {
        DecodedRecord::new(Some("a".to_string()), layout, frame, decode(frame, layout))
    }

    #[test]
    fn test_render_json() {
        let line = render(&record(&[0, 10, 3, 0x0C, 0x1C], LayoutVersion::V1), OutputFormat::Json)
            .unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["device"], "a");
        assert_eq!(value["layout"], "v1");
        assert_eq!(value["frame"], "000a030c1c");
        assert_eq!(value["data"]["tx_power_dbm"], 10);
        assert_eq!(value["warnings"], serde_json::json!([]));
        assert_eq!(value["errors"], serde_json::json!([]));
    }

    #[test]
    fn test_render_rejected() {
        let line = render(&record(&[1, 200], LayoutVersion::V2), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["data"], serde_json::json!({}));
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_render_pretty_and_yaml() {
        let rec = record(&[1, 200, 5, 7, 0x0A, 0x28], LayoutVersion::V2);
        let pretty = render(&rec, OutputFormat::JsonPretty).unwrap();
        assert!(pretty.contains("\n  \"layout\": \"v2\""));

        let yaml = render(&rec, OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("battery_status: Low"));
        assert!(!yaml.ends_with('\n'));
    }

    #[test]
    fn test_device_omitted_when_unknown() {
        let frame = [0, 10, 3, 0x0C, 0x1C];
        let rec = DecodedRecord::new(None, LayoutVersion::V1, &frame, decode(&frame, LayoutVersion::V1));
        let line = render(&rec, OutputFormat::Json).unwrap();
        assert!(line.starts_with("{\"layout\":\"v1\""));
    }
}
