//! Typed uplink parsing and field rendering.
//!
//! ## Frame Format
//!
//! | Offset | V1                    | V2                      | Size |
//! |--------|-----------------------|-------------------------|------|
//! | 0      | tx reason             | tx reason               | 1    |
//! | 1      | tx power (i8, dBm)    | tx power (i8, dBm)      | 1    |
//! | 2      | datarate index        | datarate index          | 1    |
//! | 3      | supply voltage (mV)   | spreading factor        | 2/1  |
//! | 4      |                       | supply voltage (mV)     | 2    |
//! | 5      | temp1 (0.1 °C)        |                         | 2    |
//! | 7      | temp2 (0.1 °C)        |                         | 2    |
//! | 9      | humidity (%)          |                         | 1    |
//!
//! Multi-byte fields are big-endian. The V1 sensor block is present whenever
//! the frame is longer than its 5-byte header. A block cut short reads its
//! missing temperature bytes as zero and omits humidity; bytes past offset 10
//! are ignored.

use tracing::trace;

use crate::constants::*;
use crate::error::{DecodeError, DecodeWarning};
use crate::layout::LayoutVersion;
use crate::reader::FrameReader;
use crate::result::DecodeResult;
use crate::types::*;

/// A decoded uplink frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Uplink {
    /// Layout the frame was decoded with.
    pub layout: LayoutVersion,
    /// Frame length in bytes.
    pub frame_len: usize,
    /// Why the device transmitted.
    pub tx_reason: TxReason,
    /// Transmit power in dBm.
    pub tx_power_dbm: i8,
    /// Datarate the frame was sent with.
    pub datarate: DataRate,
    /// Explicit spreading factor (V2 only).
    pub spreading_factor: Option<u8>,
    /// Supply voltage.
    pub supply_voltage: SupplyVoltage,
    /// Extended sensor block (V1 only, when present).
    pub sensors: Option<SensorBlock>,
}

impl Uplink {
    /// Parse a frame with the given layout.
    ///
    /// The only failure is a frame shorter than the layout's minimum length.
    pub fn parse(frame: &[u8], layout: LayoutVersion) -> Result<Self, DecodeError> {
        let min_len = layout.min_len();
        if frame.len() < min_len {
            return Err(DecodeError::TooShort {
                layout,
                expected: min_len,
                actual: frame.len(),
            });
        }

        let mut reader = FrameReader::new(frame);
        let too_short = || DecodeError::TooShort {
            layout,
            expected: min_len,
            actual: frame.len(),
        };

        let tx_reason = TxReason(reader.read_u8().ok_or_else(too_short)?);
        let tx_power_dbm = reader.read_i8().ok_or_else(too_short)?;
        let datarate = DataRate(reader.read_u8().ok_or_else(too_short)?);
        let spreading_factor = match layout {
            LayoutVersion::V1 => None,
            LayoutVersion::V2 => Some(reader.read_u8().ok_or_else(too_short)?),
        };
        let supply_voltage = SupplyVoltage(reader.read_u16_be().ok_or_else(too_short)?);
        debug_assert_eq!(reader.position(), min_len);

        let sensors = match layout {
            LayoutVersion::V1 if reader.remaining() > 0 => Some(read_sensor_block(&mut reader)),
            _ => None,
        };
        if layout == LayoutVersion::V1 && frame.len() > V1_FULL_FRAME_SIZE {
            trace!(extra = frame.len() - V1_FULL_FRAME_SIZE, "ignoring trailing bytes");
        }

        trace!(
            %layout,
            len = frame.len(),
            reason = tx_reason.code(),
            datarate = datarate.index(),
            mv = supply_voltage.millivolts(),
            "parsed uplink"
        );

        Ok(Uplink {
            layout,
            frame_len: frame.len(),
            tx_reason,
            tx_power_dbm,
            datarate,
            spreading_factor,
            supply_voltage,
            sensors,
        })
    }

    /// Battery classification (reported by V2 frames).
    pub fn battery_status(&self) -> BatteryStatus {
        self.supply_voltage.battery_status()
    }

    /// Warnings raised by this frame, in detection order.
    pub fn warnings(&self) -> Vec<DecodeWarning> {
        let mut warnings = Vec::new();
        if self.layout == LayoutVersion::V2 && self.battery_status().is_critical() {
            warnings.push(DecodeWarning::BatteryCritical {
                millivolts: self.supply_voltage.millivolts(),
            });
        }
        warnings
    }

    /// Render the frame as named fields plus warnings.
    pub fn to_result(&self) -> DecodeResult {
        let mut result = DecodeResult::default();
        let data = &mut result.data;

        data.insert(FIELD_TX_REASON, self.tx_reason.to_string());
        if self.layout == LayoutVersion::V2 {
            data.insert(FIELD_TX_REASON_CODE, self.tx_reason.code());
        }
        data.insert(FIELD_TX_POWER_DBM, self.tx_power_dbm);

        match self.layout {
            LayoutVersion::V1 => {
                data.insert(FIELD_DATARATE, self.datarate.describe());
                data.insert(FIELD_SUPPLY_VOLTAGE, self.supply_voltage.volts());

                if let Some(block) = &self.sensors {
                    match block.temp1 {
                        Temperature::Celsius(c) => data.insert(FIELD_TEMP1, c),
                        Temperature::Fault(fault) => data.insert(FIELD_TEMP1, fault.as_str()),
                    }
                    data.insert(FIELD_TEMP2, block.temp2);
                    if let Some(humidity) = block.humidity {
                        data.insert(FIELD_HUMIDITY, humidity);
                    }
                }
            }
            LayoutVersion::V2 => {
                data.insert(FIELD_DATARATE, self.datarate.index());
                data.insert(FIELD_DATARATE_NAME, self.datarate.name());
                if let Some(sf) = self.spreading_factor {
                    data.insert(FIELD_SPREADING_FACTOR, sf);
                    data.insert(FIELD_SPREADING_FACTOR_NAME, format!("SF{}", sf));
                }
                data.insert(FIELD_SUPPLY_VOLTAGE_MV, self.supply_voltage.millivolts());
                data.insert(FIELD_SUPPLY_VOLTAGE_V, self.supply_voltage.volts());
                data.insert(FIELD_BATTERY_STATUS, self.battery_status().as_str());
            }
        }

        for warning in self.warnings() {
            result.warn(&warning);
        }
        result
    }
}

/// Read the sensor block. A short frame leaves the tail of the block
/// unfilled: temperature bytes read as zero and humidity is absent.
fn read_sensor_block(reader: &mut FrameReader<'_>) -> SensorBlock {
    let temp1 = Temperature::from_raw(reader.read_u16_be_zero_filled());
    let temp2 = scale_temperature(reader.read_u16_be_zero_filled());
    let humidity = reader.read_u8();
    SensorBlock {
        temp1,
        temp2,
        humidity,
    }
}
