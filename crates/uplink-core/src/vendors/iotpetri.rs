//! IoT-Petri BLE presence counter.
//!
//! Byte 0 is a coarse battery reading; frames longer than one byte carry
//! three big-endian BLE counters.

use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

pub fn decode(payload: &[u8], _port: u16) -> Result<Vec<Record>, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let mut out = MeasurementMap::new();
    let batt = reader.read_u8()?;
    out.insert("batt".into(), Value::Int(batt as i64 * 8 + 2500));
    if !reader.is_empty() {
        out.insert("ble_count".into(), Value::Int(reader.read_u16_be()? as i64));
        out.insert("ble_new".into(), Value::Int(reader.read_u16_be()? as i64));
        out.insert("ble_stay".into(), Value::Int(reader.read_u16_be()? as i64));
    }
    Ok(vec![Record::unstamped(out)])
}
