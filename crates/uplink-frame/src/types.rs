//! Typed field values carried by an uplink frame.

use std::fmt;

use crate::constants::*;
use crate::lookup::{Resolved, BANDWIDTH_KHZ_TABLE, BITRATE_BPS_TABLE, TX_REASON_TABLE};

/// Why the device transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxReason(pub u8);

impl TxReason {
    /// Raw reason code.
    pub fn code(&self) -> u8 {
        self.0
    }

    /// Label from the reason table.
    pub fn label(&self) -> Resolved<&'static str> {
        TX_REASON_TABLE.resolve(self.0)
    }
}

impl fmt::Display for TxReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// EU868 datarate index as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataRate(pub u8);

impl DataRate {
    /// Raw datarate index.
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Channel bandwidth in kHz.
    pub fn bandwidth_khz(&self) -> u16 {
        BANDWIDTH_KHZ_TABLE.resolve(self.0).value().unwrap_or(125)
    }

    /// Nominal bitrate in bit/s, 0 if the index has no entry.
    pub fn bitrate_bps(&self) -> u32 {
        BITRATE_BPS_TABLE.resolve(self.0).value().unwrap_or(0)
    }

    /// Spreading factor implied by the index (DR0 = SF12).
    ///
    /// Indices above 12 yield a negative value; nothing clamps it.
    pub fn implied_spreading_factor(&self) -> i32 {
        DR0_SPREADING_FACTOR - i32::from(self.0)
    }

    /// Short label, e.g. `DR5`.
    pub fn name(&self) -> String {
        format!("DR{}", self.0)
    }

    /// Composite label, e.g. `DR3/SF9/125kHz/1760bps`.
    pub fn describe(&self) -> String {
        format!(
            "DR{}/SF{}/{}kHz/{}bps",
            self.0,
            self.implied_spreading_factor(),
            self.bandwidth_khz(),
            self.bitrate_bps()
        )
    }
}

/// Battery health derived from the supply voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryStatus {
    /// At or above 3000 mV.
    Good,
    /// 2700 to 2999 mV.
    Medium,
    /// 2400 to 2699 mV.
    Low,
    /// Below 2400 mV.
    Critical,
}

impl BatteryStatus {
    /// Classify a supply voltage.
    pub fn from_millivolts(mv: u16) -> Self {
        if mv >= BATTERY_GOOD_MV {
            BatteryStatus::Good
        } else if mv >= BATTERY_MEDIUM_MV {
            BatteryStatus::Medium
        } else if mv >= BATTERY_LOW_MV {
            BatteryStatus::Low
        } else {
            BatteryStatus::Critical
        }
    }

    /// Returns the status label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BatteryStatus::Good => "Good",
            BatteryStatus::Medium => "Medium",
            BatteryStatus::Low => "Low",
            BatteryStatus::Critical => "Critical",
        }
    }

    /// Whether this status raises a warning.
    pub fn is_critical(&self) -> bool {
        matches!(self, BatteryStatus::Critical)
    }
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supply voltage in millivolts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SupplyVoltage(pub u16);

impl SupplyVoltage {
    /// Voltage in millivolts.
    pub fn millivolts(&self) -> u16 {
        self.0
    }

    /// Voltage in volts, rounded to 3 decimal places.
    pub fn volts(&self) -> f64 {
        round_to(f64::from(self.0) / 1000.0, 3)
    }

    /// Battery classification of this voltage.
    pub fn battery_status(&self) -> BatteryStatus {
        BatteryStatus::from_millivolts(self.0)
    }
}

/// A fault code a sensor reports in place of a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorFault {
    /// 0x8000
    UnknownError,
    /// 0x8001
    Overflow,
    /// 0x8002
    Underflow,
}

impl SensorFault {
    /// Map a raw 16-bit reading to a fault, if it is a sentinel.
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            TEMP_SENTINEL_UNKNOWN_ERROR => Some(SensorFault::UnknownError),
            TEMP_SENTINEL_OVERFLOW => Some(SensorFault::Overflow),
            TEMP_SENTINEL_UNDERFLOW => Some(SensorFault::Underflow),
            _ => None,
        }
    }

    /// Returns the fault label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorFault::UnknownError => "Unknown Error",
            SensorFault::Overflow => "Overflow",
            SensorFault::Underflow => "Underflow",
        }
    }
}

impl fmt::Display for SensorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A temperature channel that may carry a fault instead of a reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    /// Measured value in °C.
    Celsius(f64),
    /// The sensor reported a fault.
    Fault(SensorFault),
}

impl Temperature {
    /// Interpret a raw reading, honoring the fault sentinels.
    ///
    /// The raw value is unsigned, so readings below 0 °C cannot be expressed.
    pub fn from_raw(raw: u16) -> Self {
        match SensorFault::from_raw(raw) {
            Some(fault) => Temperature::Fault(fault),
            None => Temperature::Celsius(scale_temperature(raw)),
        }
    }

    /// The reading in °C, or `None` for a fault.
    pub fn celsius(&self) -> Option<f64> {
        match self {
            Temperature::Celsius(c) => Some(*c),
            Temperature::Fault(_) => None,
        }
    }
}

/// Convert raw tenths of a degree to °C, without sentinel handling.
pub fn scale_temperature(raw: u16) -> f64 {
    f64::from(raw) / TEMP_SCALE
}

/// Extended sensor block of a V1 frame.
///
/// Temperature bytes missing from a short frame read as zero; humidity is
/// `None` when its byte is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorBlock {
    /// First temperature channel (sentinel aware).
    pub temp1: Temperature,
    /// Second temperature channel in °C.
    pub temp2: f64,
    /// Relative humidity in percent.
    pub humidity: Option<u8>,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
