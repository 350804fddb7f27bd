//! MCF88 / enginko LW12TERM temperature/humidity/pressure logger.
//!
//! An uplink starts with the 0x04 "time series" opcode and carries three
//! timestamped samples of ten bytes each: a packed calendar word, signed
//! hundredths-of-a-degree temperature, half-percent humidity and a 24-bit
//! pressure in hundredths of a hPa.

use time::{Date, Month, PrimitiveDateTime, Time};

use crate::vendors::common::bits::extract_bits;
use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

const OPCODE_TIME_SERIES: u8 = 0x04;

fn unpack_timestamp(word: u32) -> Result<PrimitiveDateTime, DecodeError> {
    let word = word as u128;
    let year = 2000 + extract_bits(word, 25, 31) as i32;
    let month = extract_bits(word, 21, 24) as u8;
    let day = extract_bits(word, 16, 20) as u8;
    let hour = extract_bits(word, 11, 15) as u8;
    let minute = extract_bits(word, 5, 10) as u8;
    let second = extract_bits(word, 0, 4) as u8 * 2;
    let month = Month::try_from(month).map_err(|_| DecodeError::InvalidTimestamp)?;
    let date =
        Date::from_calendar_date(year, month, day).map_err(|_| DecodeError::InvalidTimestamp)?;
    let time = Time::from_hms(hour, minute, second).map_err(|_| DecodeError::InvalidTimestamp)?;
    Ok(PrimitiveDateTime::new(date, time))
}

pub fn decode(payload: &[u8], _port: u16) -> Result<Vec<Record>, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let opcode = reader.read_u8()?;
    if opcode != OPCODE_TIME_SERIES {
        return Err(DecodeError::UnsupportedPrefix {
            prefix: format!("{opcode:02x}"),
        });
    }
    let mut records = Vec::with_capacity(3);
    for _ in 0..3 {
        let timestamp = unpack_timestamp(reader.read_u32_le()?)?;
        let mut out = MeasurementMap::new();
        out.insert(
            "temp".into(),
            Value::Float(reader.read_i16_le()? as f64 / 100.0),
        );
        out.insert("humi".into(), Value::Float(reader.read_u8()? as f64 / 2.0));
        let pres = reader.take(3)?;
        let pres = u32::from_le_bytes([pres[0], pres[1], pres[2], 0]);
        out.insert("pres".into(), Value::Float(pres as f64 / 100.0));
        records.push(Record::stamped(timestamp.assume_utc(), out));
    }
    Ok(records)
}
