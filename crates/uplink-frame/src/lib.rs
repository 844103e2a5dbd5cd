//! Sensor Uplink Frame Decoder
//!
//! This crate decodes the fixed-layout binary payload sent by the sensor
//! firmware on its LoRaWAN application port into a structured record of
//! named fields plus diagnostics.
//!
//! # Frame Overview
//!
//! Every frame starts with the same base header; the layout revision decides
//! what follows it:
//!
//! - **V1**: 5-byte header, optionally followed by a 5-byte sensor block
//!   (two temperatures and a humidity reading)
//! - **V2**: 6-byte header with an explicit spreading-factor byte and a
//!   battery classification
//!
//! The wire format carries no version tag, so the layout must always be
//! supplied by the caller.
//!
//! # Example
//!
//! ```rust
//! use uplink_frame::{decode, FieldValue, LayoutVersion};
//!
//! let result = decode(&[0, 10, 3, 0x0C, 0x1C], LayoutVersion::V1);
//! assert!(result.errors.is_empty());
//! assert_eq!(
//!     result.data.get("datarate"),
//!     Some(&FieldValue::from("DR3/SF9/125kHz/1760bps"))
//! );
//! ```
//!
//! Callers that want typed values instead of the field map can use
//! [`Uplink::parse`] directly.

mod constants;
mod decoder;
mod error;
mod layout;
mod lookup;
mod reader;
mod result;
mod types;
mod uplink;

pub use constants::*;
pub use decoder::*;
pub use error::*;
pub use layout::*;
pub use lookup::*;
pub use reader::*;
pub use result::*;
pub use types::*;
pub use uplink::*;
