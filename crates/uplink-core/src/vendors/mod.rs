//! Vendor payload decoders.
//!
//! Each vendor module either exposes a static catalog consumed by the
//! generic engines in [`catalog`] (flag-driven, table-driven, bitfield)
//! or a `decode` function for formats that need free-form logic. The
//! [`registry`] maps format keys to decoders; everything below it is
//! pure byte manipulation with no I/O.

pub mod catalog;
pub mod common;
pub mod error;
pub mod registry;

pub mod decentlab;
pub mod elsys;
pub mod energiaburk;
pub mod fvhgeneric;
pub mod iotpetri;
pub mod lht65;
pub mod marjetas;
pub mod mcf88;
pub mod meteohelix;
pub mod milesight;
pub mod paxcounter;
pub mod sensornode;
pub mod sompasensecap;

use time::OffsetDateTime;

use crate::MeasurementMap;

/// One decoded observation.
///
/// Most formats produce a single record whose timestamp is supplied by
/// the caller later; datalogger formats (MCF88, Milesight history)
/// carry their own timestamps on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Measurement time, when the payload itself carries one.
    pub time: Option<OffsetDateTime>,
    /// Decoded measurement values keyed by field name.
    pub data: MeasurementMap,
}

impl Record {
    /// A record stamped later from the uplink metadata.
    pub fn unstamped(data: MeasurementMap) -> Self {
        Self { time: None, data }
    }

    /// A record carrying its own wire timestamp.
    pub fn stamped(time: OffsetDateTime, data: MeasurementMap) -> Self {
        Self {
            time: Some(time),
            data,
        }
    }
}
