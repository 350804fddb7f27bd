//! Milesight EM-series sensors (EM300-TH, EM310-UDL).
//!
//! Uplinks arrive on FPort 85 as a run of channel/type tagged blocks.
//! The 0x20/0xCE block is a datalogger sample with its own epoch
//! timestamp and becomes a separate timestamped record.

use time::OffsetDateTime;

use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

pub fn decode(payload: &[u8], port: u16) -> Result<Vec<Record>, DecodeError> {
    if port != 85 {
        return Ok(vec![Record::unstamped(MeasurementMap::new())]);
    }
    let mut reader = PayloadReader::new(payload);
    let mut current = MeasurementMap::new();
    let mut history = Vec::new();
    while !reader.is_empty() {
        let channel = reader.read_u8()?;
        let kind = reader.read_u8()?;
        match (channel, kind) {
            (0x01, 0x75) => {
                current.insert("battery".into(), Value::Int(reader.read_u8()? as i64));
            }
            (0x03, 0x67) => {
                current.insert(
                    "temperature".into(),
                    Value::Float(reader.read_i16_le()? as f64 / 10.0),
                );
            }
            (0x04, 0x68) => {
                current.insert(
                    "humidity".into(),
                    Value::Float(reader.read_u8()? as f64 / 2.0),
                );
            }
            (0x03, 0x82) => {
                current.insert(
                    "distance".into(),
                    Value::Int(reader.read_u16_le()? as i64),
                );
            }
            (0x04, 0x00) => {
                current.insert("position".into(), Value::Int(reader.read_u8()? as i64));
            }
            // Alarm variants of the temperature and distance channels.
            (0x83, 0x67) => {
                current.insert(
                    "temperature".into(),
                    Value::Float(reader.read_i16_le()? as f64 / 10.0),
                );
                current.insert(
                    "temperature_abnormal".into(),
                    Value::Int(reader.read_u8()? as i64),
                );
            }
            (0x84, 0x82) => {
                current.insert(
                    "distance".into(),
                    Value::Int(reader.read_u16_le()? as i64),
                );
                current.insert(
                    "distance_alarming".into(),
                    Value::Int(reader.read_u8()? as i64),
                );
            }
            (0x20, 0xCE) => {
                let epoch = reader.read_u32_le()?;
                let time = OffsetDateTime::from_unix_timestamp(epoch as i64)
                    .map_err(|_| DecodeError::InvalidTimestamp)?;
                let mut point = MeasurementMap::new();
                point.insert(
                    "temperature".into(),
                    Value::Float(reader.read_i16_le()? as f64 / 10.0),
                );
                point.insert(
                    "humidity".into(),
                    Value::Float(reader.read_u8()? as f64 / 2.0),
                );
                reader.skip(1)?;
                history.push(Record::stamped(time, point));
            }
            (channel, _) => return Err(DecodeError::UnknownField { id: channel }),
        }
    }
    let mut records = Vec::new();
    if !current.is_empty() || history.is_empty() {
        records.push(Record::unstamped(current));
    }
    records.extend(history);
    Ok(records)
}
