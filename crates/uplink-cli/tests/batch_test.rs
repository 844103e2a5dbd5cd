//! Integration tests for config loading and batch decoding.

use std::fs::File;
use std::io::{BufReader, Write};

use tempfile::NamedTempFile;
use uplink_cli::output::render;
use uplink_cli::{BatchDecoder, BatchSummary, CliError, DecoderConfig, OutputFormat};
use uplink_frame::{FieldValue, LayoutVersion};

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"
default_layout: v2
devices:
  legacy-1:
    layout: v1
"#,
    );
    let config = DecoderConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.default_layout, Some(LayoutVersion::V2));
    assert_eq!(config.devices["legacy-1"].layout, LayoutVersion::V1);
    assert_eq!(config.application_port(), 10);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = DecoderConfig::load_from_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, CliError::ConfigRead { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_invalid_config_file() {
    let file = write_config("devices:\n  a:\n    layout: v9\n");
    let err = DecoderConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, CliError::ConfigParse(_)));
}

#[test]
fn test_printed_example_loads() {
    let file = write_config(&DecoderConfig::example_yaml());
    let config = DecoderConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.application_port(), 10);
    assert!(!config.devices.is_empty());
}

// ============================================================================
// Batch Tests
// ============================================================================

#[test]
fn test_mixed_device_batch() {
    let file = write_config(
        r#"
default_layout: v2
devices:
  legacy-1:
    layout: v1
"#,
    );
    let config = DecoderConfig::load_from_file(file.path()).unwrap();
    let decoder = BatchDecoder::new(config).with_json_input(true);

    let lines = [
        "# exported uplinks",
        r#"{"bytes":[4,14,0,11,184,0,215,0,200,55],"fPort":10,"device":"legacy-1"}"#,
        r#"{"bytes":[0,14,2,10,8,255],"fPort":10,"device":"new-7"}"#,
        r#"{"bytes":[0,14,2,10,8,255],"fPort":1,"device":"new-7"}"#,
        "",
        r#"{"bytes":[0,14],"fPort":10}"#,
        "not json",
    ];

    let mut records = Vec::new();
    let mut malformed = 0;
    for line in lines {
        match decoder.decode_line(line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(_) => malformed += 1,
        }
    }

    assert_eq!(records.len(), 3);
    assert_eq!(malformed, 1);

    let legacy = &records[0];
    assert_eq!(legacy.layout, LayoutVersion::V1);
    assert_eq!(
        legacy.result.data.get("tx_reason"),
        Some(&FieldValue::from("App Cycle Event"))
    );
    assert_eq!(legacy.result.data.get("humidity"), Some(&FieldValue::Int(55)));

    let modern = &records[1];
    assert_eq!(modern.layout, LayoutVersion::V2);
    assert_eq!(
        modern.result.data.get("battery_status"),
        Some(&FieldValue::from("Critical"))
    );
    assert_eq!(modern.result.warnings.len(), 1);

    let short = &records[2];
    assert!(short.result.data.is_empty());
    assert_eq!(short.result.errors.len(), 1);
}

#[test]
fn test_record_rendering_per_format() {
    let decoder = BatchDecoder::new(DecoderConfig::default()).with_layout(Some(LayoutVersion::V1));
    let record = decoder.decode_line("0x00:0a:03:0c:1c").unwrap().unwrap();

    let json = render(&record, OutputFormat::Json).unwrap();
    assert_eq!(
        json,
        r#"{"layout":"v1","frame":"000a030c1c","data":{"tx_reason":"Timer Event","tx_power_dbm":10,"datarate":"DR3/SF9/125kHz/1760bps","supply_voltage":3.1},"warnings":[],"errors":[]}"#
    );

    let yaml = render(&record, OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("tx_reason: Timer Event"));
}

#[test]
fn test_file_batch_survives_bad_line() {
    let mut input = NamedTempFile::new().unwrap();
    input
        .write_all(b"000a030c1c\n\xff\xfe\n# comment\n01c805070a28\n")
        .unwrap();
    input.flush().unwrap();

    let decoder = BatchDecoder::new(DecoderConfig::default()).with_layout(Some(LayoutVersion::V1));
    let reader = BufReader::new(File::open(input.path()).unwrap());
    let mut out = Vec::new();
    let summary = decoder.run(reader, &mut out, OutputFormat::Json).unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            decoded: 2,
            malformed: 1
        }
    );
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("\"frame\":\"01c805070a28\""));
}
