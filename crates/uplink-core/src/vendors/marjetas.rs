//! Marjetas multi-probe temperature string.
//!
//! The frame is a flat run of little-endian signed hundredths of a degree,
//! one word per probe, named temp_00, temp_01, ...

use crate::vendors::common::reader::i16_le;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

pub fn decode(payload: &[u8], _port: u16) -> Result<Vec<Record>, DecodeError> {
    if payload.len() % 2 != 0 {
        return Err(DecodeError::Truncated {
            needed: payload.len() + 1,
            actual: payload.len(),
        });
    }
    let mut out = MeasurementMap::new();
    for (i, word) in payload.chunks_exact(2).enumerate() {
        out.insert(
            format!("temp_{i:02}"),
            Value::Float(i16_le(word) as f64 / 100.0),
        );
    }
    Ok(vec![Record::unstamped(out)])
}

#[cfg(test)]
mod tests {
    use super::decode;
    use crate::vendors::common::hex::hex_to_bytes;
    use crate::vendors::error::DecodeError;
    use crate::Value;

    #[test]
    fn four_probes() {
        let records = decode(&hex_to_bytes("e80832099c08f7ff").unwrap(), 2).unwrap();
        let data = &records[0].data;
        assert_eq!(data.get("temp_00"), Some(&Value::Float(22.8)));
        assert_eq!(data.get("temp_01"), Some(&Value::Float(23.54)));
        assert_eq!(data.get("temp_02"), Some(&Value::Float(22.04)));
        assert_eq!(data.get("temp_03"), Some(&Value::Float(-0.09)));
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn odd_length_is_rejected() {
        let err = decode(&hex_to_bytes("e80832").unwrap(), 2).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { needed: 4, actual: 3 }));
    }
}
