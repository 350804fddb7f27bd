//! Uplink core library for LoRaWAN vendor payload decoding.
//!
//! This crate implements the decoding layer used by the CLI: raw uplink
//! payloads (hex string + FPort) are dispatched through a static registry
//! of vendor codecs built on shared bit/byte primitives, and the decoded
//! measurements are assembled into canonical, JSON-serializable datalines.
//! Decoding is byte-oriented and side-effect free; catalogs are immutable
//! constants, so decode calls may run concurrently without coordination.
//!
//! Invariants:
//! - Decoding is deterministic: identical payload and port yield identical
//!   output, or fail identically.
//! - A decode either fully succeeds or fails; there are no partial results.
//! - A dataline carries exactly one of `time` or `start_time`/`end_time`.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur de décodage : charges utiles brutes
//! (hexadécimal + port) -> registre de codecs par fournisseur -> lignes de
//! données canoniques. Le décodage est pur et déterministe, les catalogues
//! sont des constantes immuables. Chaque ligne de données porte soit `time`,
//! soit `start_time`/`end_time`, jamais les deux.
//!
//! # Examples
//! ```
//! use uplink_core::create_datalines;
//!
//! let lines = create_datalines(
//!     "dlmbx",
//!     "02012f000304d200010bb1",
//!     1,
//!     Some("2022-03-02T12:21:30+00:00"),
//! )?;
//! assert_eq!(lines.len(), 1);
//! # Ok::<(), uplink_core::DecodeError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub mod schema;
pub mod vendors;

pub use schema::SchemaError;
pub use vendors::error::DecodeError;
pub use vendors::registry;
pub use vendors::Record;

/// Current envelope schema version.
pub const PARSED_VERSION: &str = "1.0";

/// A decoded measurement value.
///
/// Serializes untagged, so a map of values renders as plain JSON scalars.
///
/// # Examples
/// ```
/// use uplink_core::Value;
///
/// let json = serde_json::to_string(&Value::Float(2.993)).unwrap();
/// assert_eq!(json, "2.993");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Decoded field map, keyed by measurement name.
///
/// Ordered for deterministic serialization; key order carries no meaning.
pub type MeasurementMap = BTreeMap<String, Value>;

/// Raw uplink input as delivered by the network boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPayload {
    /// Even-length string of hexadecimal digits.
    pub hex: String,
    /// LoRaWAN FPort (0-223), used as a coarse format discriminator.
    pub port: u16,
}

/// Timestamp shape of a dataline.
///
/// The two-field span form is listed first so untagged deserialization
/// prefers it when both `start_time` and `end_time` are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatalineTime {
    /// Aggregate observation covering a time range.
    Span {
        /// RFC3339 start of the covered range.
        start_time: String,
        /// RFC3339 end of the covered range.
        end_time: String,
    },
    /// Point-in-time observation; `null` when no timestamp is known.
    At { time: Option<String> },
}

/// One normalized timestamped measurement record.
///
/// # Examples
/// ```
/// use uplink_core::{Dataline, MeasurementMap, Value};
///
/// let mut data = MeasurementMap::new();
/// data.insert("wifi".to_string(), Value::Int(3));
/// let line = Dataline::at(Some("2022-03-02T12:21:30+00:00".to_string()), data);
/// let json = serde_json::to_string(&line).unwrap();
/// assert_eq!(
///     json,
///     r#"{"time":"2022-03-02T12:21:30+00:00","data":{"wifi":3}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataline {
    /// Either `time` or `start_time`/`end_time`, flattened into the object.
    #[serde(flatten)]
    pub time: DatalineTime,
    /// Decoded measurement values.
    pub data: MeasurementMap,
}

impl Dataline {
    /// Point-in-time dataline.
    pub fn at(time: Option<String>, data: MeasurementMap) -> Self {
        Self {
            time: DatalineTime::At { time },
            data,
        }
    }

    /// Range dataline covering `start_time..end_time`.
    pub fn span(start_time: String, end_time: String, data: MeasurementMap) -> Self {
        Self {
            time: DatalineTime::Span {
                start_time,
                end_time,
            },
            data,
        }
    }
}

/// Static per-device-type metadata for one measurement field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Field name as emitted by the decoder.
    pub name: String,
    /// Unit label or URI, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Batch header: covered time range plus the declared column catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// RFC3339 timestamp of the first dataline in the batch.
    pub start_time: String,
    /// RFC3339 timestamp of the last dataline in the batch.
    pub end_time: String,
    /// Declared columns keyed by ordinal.
    pub columns: BTreeMap<String, Column>,
}

/// Device identification carried in the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRef {
    /// Stable device identifier (e.g. DevEUI).
    pub device_id: String,
    /// Device hardware type.
    pub device_type: String,
    /// Format key of the codec that decoded this device's payloads.
    pub parser_module: String,
    /// Human-readable device name.
    pub name: String,
    /// Lifecycle state label (e.g. "Production").
    pub state: String,
}

/// Full parsed-message envelope handed to downstream sinks.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
///
/// use uplink_core::{DeviceRef, Header, ParsedMessage};
///
/// let message = ParsedMessage::new(
///     BTreeMap::new(),
///     DeviceRef {
///         device_id: "B8A44F1F46E1".to_string(),
///         device_type: "paxcounter".to_string(),
///         parser_module: "paxcounter".to_string(),
///         name: "lobby-counter".to_string(),
///         state: "Production".to_string(),
///     },
///     Header {
///         start_time: "2022-03-02T12:21:30+00:00".to_string(),
///         end_time: "2022-03-02T12:21:30+00:00".to_string(),
///         columns: BTreeMap::new(),
///     },
///     Vec::new(),
/// );
/// assert_eq!(message.version, uplink_core::PARSED_VERSION);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Envelope schema version.
    pub version: String,
    /// Transport metadata (receive/parse timestamps and the like).
    pub meta: BTreeMap<String, serde_json::Value>,
    /// Originating device.
    pub device: DeviceRef,
    /// Batch time range and column catalog.
    pub header: Header,
    /// Decoded datalines.
    pub data: Vec<Dataline>,
}

impl ParsedMessage {
    /// Build an envelope with the current schema version.
    pub fn new(
        meta: BTreeMap<String, serde_json::Value>,
        device: DeviceRef,
        header: Header,
        data: Vec<Dataline>,
    ) -> Self {
        Self {
            version: PARSED_VERSION.to_string(),
            meta,
            device,
            header,
            data,
        }
    }
}

/// Decode a hex payload with the named format.
///
/// # Examples
/// ```
/// use uplink_core::{decode_hex, Value};
///
/// let records = decode_hex("paxcounter", "0003", 1)?;
/// assert_eq!(records[0].data.get("wifi"), Some(&Value::Int(3)));
/// # Ok::<(), uplink_core::DecodeError>(())
/// ```
pub fn decode_hex(format: &str, hex: &str, port: u16) -> Result<Vec<Record>, DecodeError> {
    let payload = vendors::common::hex::hex_to_bytes(hex)?;
    registry::decode(format, &payload, port)
}

/// Wrap decoded records into datalines.
///
/// Records that carry their own wire timestamp keep it; the rest are
/// stamped with the caller-supplied RFC3339 time, which is validated
/// before use. With no caller time, unstamped records get a `null` time.
pub fn build_datalines(
    records: Vec<Record>,
    time_str: Option<&str>,
) -> Result<Vec<Dataline>, DecodeError> {
    if let Some(time_str) = time_str {
        OffsetDateTime::parse(time_str, &Rfc3339).map_err(|_| DecodeError::InvalidTimestamp)?;
    }
    records
        .into_iter()
        .map(|record| {
            let time = match record.time {
                Some(stamp) => Some(
                    stamp
                        .format(&Rfc3339)
                        .map_err(|_| DecodeError::InvalidTimestamp)?,
                ),
                None => time_str.map(str::to_string),
            };
            Ok(Dataline::at(time, record.data))
        })
        .collect()
}

/// Decode a hex payload and assemble the resulting datalines in one step.
pub fn create_datalines(
    format: &str,
    hex: &str,
    port: u16,
    time_str: Option<&str>,
) -> Result<Vec<Dataline>, DecodeError> {
    let records = decode_hex(format, hex, port)?;
    build_datalines(records, time_str)
}
