//! Forum Virium Helsinki generic button/GPS tracker catalog.
//!
//! Every field is preceded by its id byte. Ids 80-89 are buttons 0-9.

use crate::vendors::catalog::{Emit, FieldCatalog, FieldSpec, IdSource};
use crate::vendors::common::reader::i24_le;
use crate::{MeasurementMap, Value};

const GPS_NO_FIX: u8 = 255;

fn emit_gps(chunk: &[u8], out: &mut MeasurementMap) {
    if chunk[0] == GPS_NO_FIX {
        return;
    }
    let deg = |b: &[u8]| i24_le(b) as f64 / 10f64.powi(7) * 256.0;
    out.insert("lat".to_string(), Value::Float(deg(&chunk[0..3])));
    out.insert("lon".to_string(), Value::Float(deg(&chunk[3..6])));
}

macro_rules! button {
    ($id:expr, $name:literal) => {
        FieldSpec {
            id: $id,
            size: 1,
            emit: Emit::Fields(|c, out| {
                out.insert($name.into(), Value::Int(c[0] as i64));
            }),
        }
    };
}

pub static FVH_GENERIC: FieldCatalog = FieldCatalog {
    id_source: IdSource::Leading,
    entries: &[
        FieldSpec {
            id: 10,
            size: 6,
            emit: Emit::Fields(emit_gps),
        },
        FieldSpec {
            id: 20,
            size: 4,
            emit: Emit::Fields(|c, out| {
                let epoch = i32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                out.insert("epoch".into(), Value::Int(epoch as i64));
            }),
        },
        button!(80, "button0"),
        button!(81, "button1"),
        button!(82, "button2"),
        button!(83, "button3"),
        button!(84, "button4"),
        button!(85, "button5"),
        button!(86, "button6"),
        button!(87, "button7"),
        button!(88, "button8"),
        button!(89, "button9"),
    ],
};

#[cfg(test)]
mod tests {
    use super::FVH_GENERIC;
    use crate::vendors::catalog::decode_table_driven;
    use crate::vendors::common::hex::hex_to_bytes;
    use crate::vendors::error::DecodeError;
    use crate::Value;

    fn decode(hex: &str) -> crate::MeasurementMap {
        decode_table_driven(&FVH_GENERIC, &hex_to_bytes(hex).unwrap(), 0).unwrap()
    }

    #[test]
    fn gps_epoch_and_button() {
        let out = decode("0aaae12306f20e14f5d757625001");
        assert_eq!(
            out.get("lat"),
            Some(&Value::Float(0x23e1aa as f64 / 10f64.powi(7) * 256.0))
        );
        assert_eq!(
            out.get("lon"),
            Some(&Value::Float(0x0ef206 as f64 / 10f64.powi(7) * 256.0))
        );
        assert_eq!(out.get("epoch"), Some(&Value::Int(0x625757f5)));
        assert_eq!(out.get("button0"), Some(&Value::Int(1)));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn button_values_are_raw_bytes() {
        let out = decode("0ab0e12305f20e1403d9576250aa");
        assert_eq!(out.get("button0"), Some(&Value::Int(0xaa)));
    }

    #[test]
    fn unknown_id_fails() {
        let payload = hex_to_bytes("63000000").unwrap();
        let err = decode_table_driven(&FVH_GENERIC, &payload, 0).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownField { id: 0x63 }));
    }

    #[test]
    fn whole_input_is_consumed() {
        // One GPS record plus a button; a trailing extra byte would be read
        // as an id and fail, so success implies full consumption.
        let out = decode("0aaae12306f20e145102");
        assert_eq!(out.get("button1"), Some(&Value::Int(2)));
        assert_eq!(out.len(), 3);
    }
}
