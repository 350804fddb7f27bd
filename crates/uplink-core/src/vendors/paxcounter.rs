//! ESP32 Paxcounter in "plain" encoder mode.
//!
//! FPort 1 carries one or two big-endian counters (wifi, optionally ble).
//! FPort 9 is the device's time-sync request and decodes to an empty map;
//! other ports are not supported.

use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

pub fn decode(payload: &[u8], port: u16) -> Result<Vec<Record>, DecodeError> {
    match port {
        1 => {
            let mut reader = PayloadReader::new(payload);
            let mut out = MeasurementMap::new();
            match payload.len() {
                2 => {
                    out.insert("wifi".into(), Value::Int(reader.read_u16_be()? as i64));
                }
                4 => {
                    out.insert("wifi".into(), Value::Int(reader.read_u16_be()? as i64));
                    out.insert("ble".into(), Value::Int(reader.read_u16_be()? as i64));
                }
                len => return Err(DecodeError::UnsupportedLength { len }),
            }
            Ok(vec![Record::unstamped(out)])
        }
        9 => Ok(vec![Record::unstamped(MeasurementMap::new())]),
        port => Err(DecodeError::UnsupportedPort { port }),
    }
}
