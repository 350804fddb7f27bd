//! SenseCAP-based sauna meter.
//!
//! A measurement round arrives as three chained packages tagged 0x30,
//! 0x32 and 0x33 (the 0x32 package is one byte shorter than the others),
//! plus an occasional 0x39 battery status. Trailing bytes shorter than a
//! package are padding and are discarded.

use crate::vendors::common::reader::{i32_be, PayloadReader};
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

pub fn decode(payload: &[u8], _port: u16) -> Result<Vec<Record>, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let mut out = MeasurementMap::new();
    while reader.remaining() >= 10 {
        let id = reader.read_u8()?;
        match id {
            0x30 => {
                let body = reader.take(10)?;
                out.insert(
                    "temperature_sht_c".into(),
                    Value::Float(i32_be(&body[2..6]) as f64 / 1_000_000.0),
                );
                out.insert(
                    "humidity_sht".into(),
                    Value::Float(i32_be(&body[6..10]) as f64 / 1_000_000.0),
                );
            }
            0x32 => {
                let body = reader.take(9)?;
                out.insert(
                    "temperature_ath_c".into(),
                    Value::Float(i32_be(&body[1..5]) as f64 / 1000.0),
                );
                out.insert(
                    "humidity_ath".into(),
                    Value::Float(i32_be(&body[5..9]) as f64 / 1000.0),
                );
            }
            0x33 => {
                let body = reader.take(10)?;
                out.insert(
                    "temperature_mcp".into(),
                    Value::Float(i32_be(&body[2..6]) as f64 / 1_000_000.0),
                );
                out.insert(
                    "ref_temperature_mcp".into(),
                    Value::Float(i32_be(&body[6..10]) as f64 / 1_000_000.0),
                );
            }
            0x39 => {
                out.insert(
                    "battery_percentage".into(),
                    Value::Int(reader.read_u8()? as i64),
                );
                let padding = reader.remaining().min(9);
                reader.skip(padding)?;
            }
            id => return Err(DecodeError::UnknownField { id }),
        }
    }
    Ok(vec![Record::unstamped(out)])
}
