//! "Energiaburk" family of energy-monitoring boxes.
//!
//! One format key covers several devices behind the same gateway firmware;
//! the leading bytes of the frame select the device:
//!
//! * `3a`   solar bench charge controller (floats + 32-bit counters)
//! * `09`   bare voltage logger, float volts in the last four bytes
//! * `0a00` Victron MPPT, 32-bit float telemetry
//! * `0a02` Victron MPPT + Phoenix inverter, packed 16/8-bit telemetry
//! * `0700` Davis weather station console dump
//! * `d77e` infrared vehicle counter

use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn require_len(payload: &[u8], expected: usize) -> Result<(), DecodeError> {
    if payload.len() != expected {
        return Err(DecodeError::UnsupportedLength { len: payload.len() });
    }
    Ok(())
}

/// The vehicle counter transmits its counts as decimal digits written
/// into the hex representation, so `0x0031` means 31 cars, not 49.
fn decimal_counter(bytes: &[u8]) -> Result<i64, DecodeError> {
    let mut value: i64 = 0;
    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            if nibble > 9 {
                return Err(DecodeError::MalformedHex {
                    reason: "non-decimal digit in counter field",
                });
            }
            value = value * 10 + nibble as i64;
        }
    }
    Ok(value)
}

fn decode_aurinkopenkki(payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    require_len(payload, 36)?;
    let mut reader = PayloadReader::new(payload);
    reader.skip(4)?;
    let mut out = MeasurementMap::new();
    out.insert("voltage".into(), Value::Float(reader.read_f32_le()? as f64));
    out.insert("current".into(), Value::Float(reader.read_f32_le()? as f64));
    out.insert("power".into(), Value::Float(reader.read_f32_le()? as f64));
    for name in ["runtime", "inEnergy", "outEnergy", "inmAh", "outmAh"] {
        out.insert(name.into(), Value::Int(reader.read_u32_le()? as i64));
    }
    Ok(out)
}

fn decode_voltageburk(payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    if payload.len() < 4 {
        return Err(DecodeError::Truncated {
            needed: 4,
            actual: payload.len(),
        });
    }
    let mut reader = PayloadReader::new(&payload[payload.len() - 4..]);
    let mut out = MeasurementMap::new();
    out.insert("voltage".into(), Value::Float(reader.read_f32_le()? as f64));
    Ok(out)
}

fn decode_victron(payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    require_len(payload, 48)?;
    let mut reader = PayloadReader::new(payload);
    reader.skip(4)?;
    let mut out = MeasurementMap::new();
    for name in ["mainvoltage", "panelvoltage", "panelpower", "batterycurrent"] {
        out.insert(name.into(), Value::Float(reader.read_f32_le()? as f64));
    }
    // yield/max-power history floats are not reported
    reader.skip(20)?;
    out.insert("errorcode".into(), Value::Int(reader.read_i32_le()? as i64));
    out.insert("state".into(), Value::Int(reader.read_i32_le()? as i64));
    Ok(out)
}

fn decode_victronphoenix(payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    require_len(payload, 34)?;
    let mut reader = PayloadReader::new(payload);
    reader.skip(2)?;
    let mut out = MeasurementMap::new();
    out.insert(
        "mpptmainvoltage".into(),
        Value::Int(reader.read_u16_le()? as i64),
    );
    out.insert(
        "mpptpanelvoltage".into(),
        Value::Float(reader.read_u16_le()? as f64 / 10.0),
    );
    out.insert(
        "mpptpanelpower".into(),
        Value::Int(reader.read_u16_le()? as i64),
    );
    out.insert(
        "mpptbatterycurrent".into(),
        Value::Float(reader.read_i16_le()? as f64 / 10.0),
    );
    for name in [
        "mpptyieldTotal",
        "mpptyieldToday",
        "mpptmaxPowerToday",
        "mpptyieldYesterday",
        "mpptmaxPowerYesterday",
    ] {
        out.insert(name.into(), Value::Int(reader.read_u16_le()? as i64));
    }
    out.insert("mppterrorcode".into(), Value::Int(reader.read_u8()? as i64));
    out.insert("mpptstate".into(), Value::Int(reader.read_u8()? as i64));
    for name in ["p_V", "p_AC_OUT_V", "p_AC_OUT_S"] {
        out.insert(name.into(), Value::Int(reader.read_u16_le()? as i64));
    }
    for name in ["p_AC_OUT_I", "p_WARN", "p_AR", "p_CS", "p_MODE"] {
        out.insert(name.into(), Value::Int(reader.read_u8()? as i64));
    }
    Ok(out)
}

fn decode_davisweather(payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    require_len(payload, 34)?;
    let mut reader = PayloadReader::new(payload);
    reader.skip(2)?;
    let mut out = MeasurementMap::new();
    // barometer arrives as inches of mercury x1000, temperatures as
    // tenths of a degree Fahrenheit; convert both to metric.
    let barometer = reader.read_u16_le()? as f64 / 1000.0;
    out.insert(
        "barometer".into(),
        Value::Float(round1(barometer * 33.86389)),
    );
    let in_temp = reader.read_i16_le()? as f64 / 10.0;
    out.insert(
        "in_temperature".into(),
        Value::Float(round1((in_temp - 32.0) / 1.8)),
    );
    out.insert("in_humity".into(), Value::Int(reader.read_u8()? as i64));
    reader.skip(1)?;
    let out_temp = reader.read_i16_le()? as f64 / 10.0;
    out.insert(
        "out_temperature".into(),
        Value::Float(round1((out_temp - 32.0) / 1.8)),
    );
    out.insert("windspeed".into(), Value::Int(reader.read_u8()? as i64));
    out.insert("10minwind".into(), Value::Int(reader.read_u8()? as i64));
    out.insert(
        "winddirection".into(),
        Value::Int(reader.read_u16_le()? as i64),
    );
    out.insert("out_humity".into(), Value::Int(reader.read_u8()? as i64));
    out.insert("rain".into(), Value::Int(reader.read_u16_le()? as i64));
    // UV, solar radiation and storm totals sit between rain rate and
    // the daily rain counter.
    reader.skip(7)?;
    out.insert("raintoday".into(), Value::Int(reader.read_u16_le()? as i64));
    Ok(out)
}

fn decode_ircounter(payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    reader.skip(2)?;
    let mut out = MeasurementMap::new();
    match reader.read_u8()? {
        0x07 => {
            out.insert("voltage".into(), Value::Int(reader.read_u16_be()? as i64));
            reader.skip(1)?;
            out.insert("in".into(), Value::Int(decimal_counter(reader.take(2)?)?));
            out.insert("out".into(), Value::Int(decimal_counter(reader.take(2)?)?));
        }
        0x37 => {
            out.insert("in".into(), Value::Int(decimal_counter(reader.take(2)?)?));
            out.insert("out".into(), Value::Int(decimal_counter(reader.take(2)?)?));
        }
        subtype => {
            return Err(DecodeError::UnsupportedPrefix {
                prefix: format!("d77e{subtype:02x}"),
            });
        }
    }
    Ok(out)
}

pub fn decode(payload: &[u8], _port: u16) -> Result<Vec<Record>, DecodeError> {
    let data = match payload {
        [0x3a, ..] => decode_aurinkopenkki(payload)?,
        [0x09, ..] => decode_voltageburk(payload)?,
        [0x0a, 0x00, ..] => decode_victron(payload)?,
        [0x0a, 0x02, ..] => decode_victronphoenix(payload)?,
        [0x07, 0x00, ..] => decode_davisweather(payload)?,
        [0xd7, 0x7e, ..] => decode_ircounter(payload)?,
        [] => return Err(DecodeError::Truncated { needed: 1, actual: 0 }),
        _ => {
            let prefix = payload
                .iter()
                .take(2)
                .map(|b| format!("{b:02x}"))
                .collect::<String>();
            return Err(DecodeError::UnsupportedPrefix { prefix });
        }
    };
    Ok(vec![Record::unstamped(data)])
}
