//! Metrics infrastructure for uplink decoding.
//!
//! This crate describes the metrics a host records while decoding uplink
//! frames. It re-exports the `metrics` crate and declares every metric as a
//! structured [`Metric`] constant, so names and units live in one place.
//!
//! The decoder itself records nothing; hosts call [`record_decode`] after
//! each frame with whatever recorder they installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use uplink_metrics::{describe_metrics, record_decode, MetricLabels};
//!
//! describe_metrics();
//!
//! let labels = MetricLabels::new("sensor-7", LayoutVersion::V2);
//! let result = decoder.decode(&frame);
//! record_decode(&labels, frame.len(), &result);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use uplink_frame::{
    DecodeResult, FieldValue, LayoutVersion, FIELD_SUPPLY_VOLTAGE, FIELD_SUPPLY_VOLTAGE_MV,
    FIELD_TEMP1,
};

/// The kind of metric (counter, gauge, or histogram).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// A monotonically increasing counter.
    Counter,
    /// A gauge that can go up and down.
    Gauge,
    /// A histogram for recording distributions.
    Histogram,
}

impl MetricKind {
    /// Returns the kind as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric declaration with its metadata.
///
/// # Example
///
/// ```rust
/// use uplink_metrics::{Metric, MetricKind};
/// use metrics::Unit;
///
/// const FRAMES: Metric = Metric::counter("uplink.example.frames")
///     .with_description("Frames seen")
///     .with_unit(Unit::Count)
///     .with_labels(&["device"]);
///
/// assert_eq!(FRAMES.name, "uplink.example.frames");
/// assert_eq!(FRAMES.kind, MetricKind::Counter);
/// ```
#[derive(Debug, Clone)]
pub struct Metric {
    /// The metric name (e.g., "uplink.frames.decoded").
    pub name: &'static str,
    /// The kind of metric (counter, gauge, histogram).
    pub kind: MetricKind,
    /// Human-readable description of the metric.
    pub description: &'static str,
    /// The unit of measurement (optional).
    pub unit: Option<Unit>,
    /// Expected label keys for this metric.
    pub labels: &'static [&'static str],
}

impl Metric {
    /// Creates a new counter metric with the given name.
    pub const fn counter(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Counter,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new gauge metric with the given name.
    pub const fn gauge(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Gauge,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Creates a new histogram metric with the given name.
    pub const fn histogram(name: &'static str) -> Self {
        Self {
            name,
            kind: MetricKind::Histogram,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Sets the description for the metric.
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the unit for the metric.
    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the expected label keys for the metric.
    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Registers this metric's description with the metrics recorder.
    ///
    /// This should be called once at startup for each metric.
    pub fn describe(&self) {
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => {
                describe_counter!(self.name, unit, self.description);
            }
            (MetricKind::Counter, None) => {
                describe_counter!(self.name, self.description);
            }
            (MetricKind::Gauge, Some(unit)) => {
                describe_gauge!(self.name, unit, self.description);
            }
            (MetricKind::Gauge, None) => {
                describe_gauge!(self.name, self.description);
            }
            (MetricKind::Histogram, Some(unit)) => {
                describe_histogram!(self.name, unit, self.description);
            }
            (MetricKind::Histogram, None) => {
                describe_histogram!(self.name, self.description);
            }
        }
    }
}

/// All metric definitions for uplink decoding.
pub mod metric_defs {
    use super::{Metric, Unit};

    /// Standard labels present on every decode metric.
    pub const STANDARD_LABELS: &[&str] = &["device", "layout"];

    /// Frames decoded into fields.
    pub const FRAMES_DECODED: Metric = Metric::counter("uplink.frames.decoded")
        .with_description("Frames decoded into fields")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Frames rejected by the length gate.
    pub const FRAMES_REJECTED: Metric = Metric::counter("uplink.frames.rejected")
        .with_description("Frames rejected by the length gate")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Warnings attached to decoded frames.
    pub const WARNINGS: Metric = Metric::counter("uplink.warnings")
        .with_description("Warnings attached to decoded frames")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Temperature channels that reported a sensor fault.
    pub const SENSOR_FAULTS: Metric = Metric::counter("uplink.sensor_faults")
        .with_description("Temperature channels that reported a sensor fault")
        .with_unit(Unit::Count)
        .with_labels(STANDARD_LABELS);

    /// Received frame size in bytes.
    pub const FRAME_SIZE: Metric = Metric::histogram("uplink.frame_size_bytes")
        .with_description("Received frame size in bytes")
        .with_unit(Unit::Bytes)
        .with_labels(STANDARD_LABELS);

    /// Reported supply voltage in millivolts.
    pub const SUPPLY_VOLTAGE: Metric = Metric::histogram("uplink.supply_voltage_mv")
        .with_description("Reported supply voltage in millivolts")
        .with_labels(STANDARD_LABELS);

    /// Most recent supply voltage per device.
    pub const LAST_SUPPLY_VOLTAGE: Metric = Metric::gauge("uplink.supply_voltage_last_mv")
        .with_description("Most recent supply voltage reported by the device in millivolts")
        .with_labels(STANDARD_LABELS);

    /// Returns a slice of all defined metrics.
    pub const ALL: &[&Metric] = &[
        &FRAMES_DECODED,
        &FRAMES_REJECTED,
        &WARNINGS,
        &SENSOR_FAULTS,
        &FRAME_SIZE,
        &SUPPLY_VOLTAGE,
        &LAST_SUPPLY_VOLTAGE,
    ];
}

/// Labels identifying the device and layout a frame was decoded for.
///
/// # Example
///
/// ```rust
/// use uplink_frame::LayoutVersion;
/// use uplink_metrics::MetricLabels;
///
/// let labels = MetricLabels::new("sensor-7", LayoutVersion::V2);
/// let label_vec = labels.to_labels();
/// assert!(label_vec.contains(&("layout", "v2".to_string())));
/// ```
#[derive(Debug, Clone)]
pub struct MetricLabels {
    /// Device name; the command line uses "(unnamed)" when the input carries none.
    pub device: String,
    /// Layout the frame was decoded with.
    pub layout: LayoutVersion,
}

impl MetricLabels {
    /// Creates labels for a device and layout.
    pub fn new(device: impl Into<String>, layout: LayoutVersion) -> Self {
        Self {
            device: device.into(),
            layout,
        }
    }

    /// Converts the labels to the metrics crate label format.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![
            ("device", self.device.clone()),
            ("layout", self.layout.to_string()),
        ]
    }
}

/// Describes all decode metrics.
///
/// Call once at startup, after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

/// Record the outcome of one decode call.
pub fn record_decode(labels: &MetricLabels, frame_len: usize, result: &DecodeResult) {
    let labels = labels.to_labels();

    metrics::histogram!(metric_defs::FRAME_SIZE.name, &labels).record(frame_len as f64);

    if !result.is_ok() {
        metrics::counter!(metric_defs::FRAMES_REJECTED.name, &labels).increment(1);
        return;
    }

    metrics::counter!(metric_defs::FRAMES_DECODED.name, &labels).increment(1);

    if !result.warnings.is_empty() {
        metrics::counter!(metric_defs::WARNINGS.name, &labels)
            .increment(result.warnings.len() as u64);
    }

    let faults = sensor_fault_count(result);
    if faults > 0 {
        metrics::counter!(metric_defs::SENSOR_FAULTS.name, &labels).increment(faults);
    }

    if let Some(mv) = supply_millivolts(result) {
        metrics::histogram!(metric_defs::SUPPLY_VOLTAGE.name, &labels).record(mv);
        metrics::gauge!(metric_defs::LAST_SUPPLY_VOLTAGE.name, &labels).set(mv);
    }
}

/// Temperature channels whose value is a fault label instead of a reading.
pub fn sensor_fault_count(result: &DecodeResult) -> u64 {
    match result.data.get(FIELD_TEMP1) {
        Some(FieldValue::Text(_)) => 1,
        _ => 0,
    }
}

/// Supply voltage in millivolts, whichever layout reported it.
pub fn supply_millivolts(result: &DecodeResult) -> Option<f64> {
    if let Some(mv) = result.data.get(FIELD_SUPPLY_VOLTAGE_MV).and_then(FieldValue::as_f64) {
        return Some(mv);
    }
    result
        .data
        .get(FIELD_SUPPLY_VOLTAGE)
        .and_then(FieldValue::as_f64)
        .map(|v| (v * 1000.0).round())
}

/// Install a Prometheus recorder and describe all metrics.
///
/// The returned handle renders the text exposition on demand.
#[cfg(feature = "prometheus")]
pub fn install_prometheus_recorder() -> Result<
    metrics_exporter_prometheus::PrometheusHandle,
    metrics_exporter_prometheus::BuildError,
> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}
