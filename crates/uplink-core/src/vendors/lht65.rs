//! Dragino LHT65 temperature/humidity sensor.
//!
//! Fixed frame: 2 bytes battery (status in the top two bits), SHT20
//! temperature and humidity, one status byte, then the external DS18B20
//! probe temperature. Temperatures are signed hundredths of a degree.

use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

pub fn decode(payload: &[u8], _port: u16) -> Result<Vec<Record>, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let mut out = MeasurementMap::new();
    let battery = reader.read_u16_be()? & 0x3fff;
    out.insert("battery_v".into(), Value::Float(battery as f64 / 1000.0));
    out.insert(
        "temperature_sht_c".into(),
        Value::Float(reader.read_i16_be()? as f64 / 100.0),
    );
    out.insert(
        "humidity_sht".into(),
        Value::Float(reader.read_u16_be()? as f64 / 10.0),
    );
    reader.skip(1)?;
    out.insert(
        "temperature_ds_c".into(),
        Value::Float(reader.read_i16_be()? as f64 / 100.0),
    );
    Ok(vec![Record::unstamped(out)])
}

#[cfg(test)]
mod tests {
    use super::decode;
    use crate::vendors::common::hex::hex_to_bytes;
    use crate::vendors::error::DecodeError;
    use crate::Value;

    #[test]
    fn full_reading() {
        let records = decode(&hex_to_bytes("cbf60a8e02ee017fff7fff").unwrap(), 2).unwrap();
        let data = &records[0].data;
        assert_eq!(data.get("battery_v"), Some(&Value::Float(3.062)));
        assert_eq!(data.get("temperature_sht_c"), Some(&Value::Float(27.02)));
        assert_eq!(data.get("humidity_sht"), Some(&Value::Float(75.0)));
        assert_eq!(data.get("temperature_ds_c"), Some(&Value::Float(327.67)));
    }

    #[test]
    fn negative_temperature() {
        // 0xf60c = -2548 in two's complement.
        let records = decode(&hex_to_bytes("cbf6f60c02ee01f60c").unwrap(), 2).unwrap();
        let data = &records[0].data;
        assert_eq!(data.get("temperature_sht_c"), Some(&Value::Float(-25.48)));
        assert_eq!(data.get("temperature_ds_c"), Some(&Value::Float(-25.48)));
    }

    #[test]
    fn truncated_frame() {
        let err = decode(&hex_to_bytes("cbf60a8e").unwrap(), 2).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }
}
