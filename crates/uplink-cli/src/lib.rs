//! # uplink-cli
//!
//! Batch decoding of uplink frames for the `uplink-decode` binary.
//!
//! [`BatchDecoder`] turns input lines into [`DecodedRecord`]s: it parses the
//! line, applies the port filter, picks the layout from the configuration and
//! records metrics. A malformed line is logged and counted; it never stops
//! the batch.

pub mod config;
pub mod error;
pub mod input;
pub mod output;

use std::io::{BufRead, Write};

use tracing::{error, warn};
use uplink_frame::{decode, LayoutVersion};
use uplink_metrics::{record_decode, MetricLabels};

pub use config::{DecoderConfig, DeviceConfig};
pub use error::CliError;
pub use input::UplinkInput;
pub use output::{DecodedRecord, OutputFormat};

/// Counts from one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records written.
    pub decoded: usize,
    /// Lines that could not be parsed or had no layout.
    pub malformed: usize,
}

/// Decodes a stream of input lines against one configuration.
#[derive(Debug, Clone)]
pub struct BatchDecoder {
    config: DecoderConfig,
    layout: Option<LayoutVersion>,
    device: Option<String>,
    json_input: bool,
}

impl BatchDecoder {
    /// Create a decoder for hex input with no overrides.
    pub fn new(config: DecoderConfig) -> Self {
        BatchDecoder {
            config,
            layout: None,
            device: None,
            json_input: false,
        }
    }

    /// Force one layout for every frame.
    pub fn with_layout(mut self, layout: Option<LayoutVersion>) -> Self {
        self.layout = layout;
        self
    }

    /// Device assumed for lines that name none.
    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device;
        self
    }

    /// Treat input lines as JSON uplink objects instead of hex.
    pub fn with_json_input(mut self, json_input: bool) -> Self {
        self.json_input = json_input;
        self
    }

    /// The configuration layouts are resolved against.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one input line.
    ///
    /// Returns `Ok(None)` for blank and comment lines and for uplinks on a
    /// port other than the application port.
    pub fn decode_line(&self, line: &str) -> Result<Option<DecodedRecord>, CliError> {
        match input::parse_line(line, self.json_input)? {
            Some(uplink) => self.decode_uplink(uplink),
            None => Ok(None),
        }
    }

    /// Decode every line of `input`, writing one rendered record per frame.
    ///
    /// Only read and write failures end the batch early.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut out: W,
        format: OutputFormat,
    ) -> Result<BatchSummary, CliError> {
        let mut summary = BatchSummary::default();
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let decoded = std::str::from_utf8(&buf)
                .map_err(CliError::from)
                .and_then(|line| self.decode_line(line));
            self.emit(decoded, line_no, &mut out, format, &mut summary)?;
        }
        out.flush()?;
        Ok(summary)
    }

    /// Decode frames given as separate strings, such as command-line arguments.
    pub fn run_frames<W: Write>(
        &self,
        frames: &[String],
        mut out: W,
        format: OutputFormat,
    ) -> Result<BatchSummary, CliError> {
        let mut summary = BatchSummary::default();
        for (index, frame) in frames.iter().enumerate() {
            let decoded = self.decode_line(frame);
            self.emit(decoded, index + 1, &mut out, format, &mut summary)?;
        }
        out.flush()?;
        Ok(summary)
    }

    fn emit<W: Write>(
        &self,
        decoded: Result<Option<DecodedRecord>, CliError>,
        line_no: usize,
        out: &mut W,
        format: OutputFormat,
        summary: &mut BatchSummary,
    ) -> Result<(), CliError> {
        match decoded {
            Ok(Some(record)) => {
                writeln!(out, "{}", output::render(&record, format)?)?;
                summary.decoded += 1;
            }
            Ok(None) => {}
            Err(err) => {
                error!(line = line_no, "{}", err);
                summary.malformed += 1;
            }
        }
        Ok(())
    }

    /// Decode one uplink.
    pub fn decode_uplink(&self, uplink: UplinkInput) -> Result<Option<DecodedRecord>, CliError> {
        let port = self.config.application_port();
        if let Some(f_port) = uplink.f_port {
            if f_port != port {
                warn!(f_port, expected = port, "skipping uplink on foreign port");
                return Ok(None);
            }
        }

        let device = uplink.device.or_else(|| self.device.clone());
        let layout = self.config.resolve_layout(self.layout, device.as_deref())?;
        let result = decode(&uplink.bytes, layout);

        let labels = MetricLabels::new(
            device.as_deref().unwrap_or(config::UNNAMED_DEVICE),
            layout,
        );
        record_decode(&labels, uplink.bytes.len(), &result);

        Ok(Some(DecodedRecord::new(
            device,
            layout,
            &uplink.bytes,
            result,
        )))
    }
}
