//! Frame constants
//!
//! Codes, sizes, sentinels and thresholds shared by the sensor firmware and
//! this decoder.

// ============================================================================
// Transmit Reason Codes (byte 0)
// ============================================================================

/// Periodic transmit timer expired.
pub const TX_REASON_TIMER_EVENT: u8 = 0;
/// User button pressed.
pub const TX_REASON_USER_BUTTON_EVENT: u8 = 1;
/// Digital input changed.
pub const TX_REASON_INPUT_EVENT: u8 = 2;
/// Firmware update over the air.
pub const TX_REASON_FUOTA_EVENT: u8 = 3;
/// Application cycle.
pub const TX_REASON_APP_CYCLE_EVENT: u8 = 4;
/// Timeout.
pub const TX_REASON_TIMEOUT_EVENT: u8 = 5;
/// Reason not set by the firmware.
pub const TX_REASON_UNDEFINED_EVENT: u8 = 0xFF;

// ============================================================================
// Frame Sizes
// ============================================================================

/// Base header length of a V1 frame (reason, power, datarate, voltage).
pub const V1_HEADER_SIZE: usize = 5;
/// Header length of a V2 frame (adds the spreading factor byte).
pub const V2_HEADER_SIZE: usize = 6;
/// Length of the V1 extended sensor block.
pub const SENSOR_BLOCK_SIZE: usize = 5;
/// Full length of a V1 frame carrying the sensor block.
pub const V1_FULL_FRAME_SIZE: usize = V1_HEADER_SIZE + SENSOR_BLOCK_SIZE;

// ============================================================================
// Sensor Sentinels
// ============================================================================

/// Sensor reported an unspecified fault.
pub const TEMP_SENTINEL_UNKNOWN_ERROR: u16 = 0x8000;
/// Reading above the sensor's measurement range.
pub const TEMP_SENTINEL_OVERFLOW: u16 = 0x8001;
/// Reading below the sensor's measurement range.
pub const TEMP_SENTINEL_UNDERFLOW: u16 = 0x8002;

/// Raw temperature units per degree Celsius.
pub const TEMP_SCALE: f64 = 10.0;

// ============================================================================
// Battery Thresholds (inclusive lower bounds, millivolts)
// ============================================================================

/// Minimum voltage classified as "Good".
pub const BATTERY_GOOD_MV: u16 = 3000;
/// Minimum voltage classified as "Medium".
pub const BATTERY_MEDIUM_MV: u16 = 2700;
/// Minimum voltage classified as "Low". Anything below is "Critical".
pub const BATTERY_LOW_MV: u16 = 2400;

// ============================================================================
// Radio
// ============================================================================

/// Spreading factor of DR0 in the EU868 plan; each DR step lowers it by one.
pub const DR0_SPREADING_FACTOR: i32 = 12;

/// LoRaWAN application port the firmware transmits on.
pub const APPLICATION_PORT: u8 = 10;

// ============================================================================
// Field Names
// ============================================================================

/// Transmit reason label.
pub const FIELD_TX_REASON: &str = "tx_reason";
/// Raw transmit reason code (V2).
pub const FIELD_TX_REASON_CODE: &str = "tx_reason_code";
/// Transmit power in dBm.
pub const FIELD_TX_POWER_DBM: &str = "tx_power_dbm";
/// Datarate (composite string in V1, raw index in V2).
pub const FIELD_DATARATE: &str = "datarate";
/// Datarate label, e.g. "DR5" (V2).
pub const FIELD_DATARATE_NAME: &str = "datarate_name";
/// Raw spreading factor (V2).
pub const FIELD_SPREADING_FACTOR: &str = "spreading_factor";
/// Spreading factor label, e.g. "SF7" (V2).
pub const FIELD_SPREADING_FACTOR_NAME: &str = "spreading_factor_name";
/// Supply voltage in volts (V1).
pub const FIELD_SUPPLY_VOLTAGE: &str = "supply_voltage";
/// Supply voltage in millivolts (V2).
pub const FIELD_SUPPLY_VOLTAGE_MV: &str = "supply_voltage_mv";
/// Supply voltage in volts (V2).
pub const FIELD_SUPPLY_VOLTAGE_V: &str = "supply_voltage_v";
/// Battery classification (V2).
pub const FIELD_BATTERY_STATUS: &str = "battery_status";
/// First temperature channel (V1 sensor block).
pub const FIELD_TEMP1: &str = "temp1";
/// Second temperature channel (V1 sensor block).
pub const FIELD_TEMP2: &str = "temp2";
/// Relative humidity (V1 sensor block).
pub const FIELD_HUMIDITY: &str = "humidity";
