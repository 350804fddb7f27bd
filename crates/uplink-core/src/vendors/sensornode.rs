//! Digital Matter Sensornode catalog.
//!
//! The LoRaWAN port carries the first field id; every subsequent field is
//! preceded by its id byte. GPS positions carry a fix byte where 255 means
//! "no fix" and the coordinates are suppressed. Battery-used/left carry
//! their own "unknown" sentinels.

use crate::vendors::catalog::{Emit, FieldCatalog, FieldSpec, IdSource};
use crate::vendors::common::reader::{i16_le, i24_le, u16_le};
use crate::{MeasurementMap, Value};

const GPS_NO_FIX: u8 = 255;
const BATT_USED_UNKNOWN: u16 = 65535;
const BATT_LEFT_UNKNOWN: u8 = 255;

fn emit_gps(chunk: &[u8], out: &mut MeasurementMap) {
    if chunk[0] == GPS_NO_FIX {
        return;
    }
    let deg = |b: &[u8]| i24_le(b) as f64 / 10f64.powi(7) * 256.0;
    out.insert("lat".to_string(), Value::Float(deg(&chunk[0..3])));
    out.insert("lon".to_string(), Value::Float(deg(&chunk[3..6])));
}

pub static SENSORNODE: FieldCatalog = FieldCatalog {
    id_source: IdSource::Port,
    entries: &[
        // System firmware version (reset message); consumed, never emitted.
        FieldSpec {
            id: 1,
            size: 4,
            emit: Emit::Skip,
        },
        FieldSpec {
            id: 10,
            size: 6,
            emit: Emit::Fields(emit_gps),
        },
        FieldSpec {
            id: 20,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("batt".into(), Value::Float(u16_le(c) as f64 / 1000.0));
            }),
        },
        FieldSpec {
            id: 21,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("analog1".into(), Value::Float(u16_le(c) as f64 / 1000.0));
            }),
        },
        FieldSpec {
            id: 22,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("analog2".into(), Value::Float(u16_le(c) as f64 / 1000.0));
            }),
        },
        FieldSpec {
            id: 23,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("analog3".into(), Value::Float(u16_le(c) as f64 / 1000.0));
            }),
        },
        FieldSpec {
            id: 30,
            size: 1,
            emit: Emit::Fields(|c, out| {
                out.insert("digin1".into(), Value::Int(c[0] as i64));
            }),
        },
        FieldSpec {
            id: 31,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("pulse1".into(), Value::Int(u16_le(c) as i64));
            }),
        },
        FieldSpec {
            id: 32,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("pulse2".into(), Value::Int(u16_le(c) as i64));
            }),
        },
        FieldSpec {
            id: 33,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("pulse3".into(), Value::Int(u16_le(c) as i64));
            }),
        },
        FieldSpec {
            id: 40,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("temp_in".into(), Value::Float(i16_le(c) as f64 / 100.0));
            }),
        },
        FieldSpec {
            id: 41,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("temp_out1".into(), Value::Float(i16_le(c) as f64 / 100.0));
            }),
        },
        FieldSpec {
            id: 42,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("temp_out2".into(), Value::Float(i16_le(c) as f64 / 100.0));
            }),
        },
        // Combined I2C temperature & relative humidity probe.
        FieldSpec {
            id: 43,
            size: 3,
            emit: Emit::Fields(|c, out| {
                out.insert(
                    "temprh_temp".into(),
                    Value::Float(i16_le(&c[0..2]) as f64 / 100.0),
                );
                out.insert("temprh_rh".into(), Value::Float(c[2] as f64 / 2.0));
            }),
        },
        FieldSpec {
            id: 50,
            size: 2,
            emit: Emit::Fields(|c, out| {
                let raw = u16_le(c);
                if raw != BATT_USED_UNKNOWN {
                    out.insert("battused".into(), Value::Int(raw as i64));
                }
            }),
        },
        FieldSpec {
            id: 51,
            size: 1,
            emit: Emit::Fields(|c, out| {
                if c[0] != BATT_LEFT_UNKNOWN {
                    out.insert("battleft".into(), Value::Float(c[0] as f64 * 0.5));
                }
            }),
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::SENSORNODE;
    use crate::vendors::catalog::decode_table_driven;
    use crate::vendors::common::hex::hex_to_bytes;
    use crate::vendors::error::DecodeError;
    use crate::Value;

    fn decode(hex: &str, port: u16) -> crate::MeasurementMap {
        decode_table_driven(&SENSORNODE, &hex_to_bytes(hex).unwrap(), port).unwrap()
    }

    #[test]
    fn gps_only() {
        let out = decode("90e12357f20e0140010205", 10);
        assert_eq!(out.get("lat"), Some(&Value::Float(60.1985024)));
        assert_eq!(out.get("lon"), Some(&Value::Float(25.0763008)));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn gps_battery_and_temperatures() {
        let out = decode("01e32337f80e14941228ba01295701", 10);
        assert_eq!(out.get("lat"), Some(&Value::Float(60.2079488)));
        assert_eq!(out.get("lon"), Some(&Value::Float(25.1148032)));
        assert_eq!(out.get("batt"), Some(&Value::Float(4.756)));
        assert_eq!(out.get("temp_in"), Some(&Value::Float(4.42)));
        assert_eq!(out.get("temp_out1"), Some(&Value::Float(3.43)));
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn gps_no_fix_is_suppressed() {
        let out = decode("ffffffffffff2b840846299108143414", 10);
        assert_eq!(out.get("lat"), None);
        assert_eq!(out.get("lon"), None);
        assert_eq!(out.get("temprh_temp"), Some(&Value::Float(21.8)));
        assert_eq!(out.get("temprh_rh"), Some(&Value::Float(35.0)));
        assert_eq!(out.get("temp_out1"), Some(&Value::Float(21.93)));
        assert_eq!(out.get("batt"), Some(&Value::Float(5.172)));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn analog_inputs_on_port_21() {
        let out = decode("0d0016090028b30b143414", 21);
        assert_eq!(out.get("analog1"), Some(&Value::Float(0.013)));
        assert_eq!(out.get("analog2"), Some(&Value::Float(0.009)));
        assert_eq!(out.get("temp_in"), Some(&Value::Float(29.95)));
        assert_eq!(out.get("batt"), Some(&Value::Float(5.172)));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn battery_port_chain() {
        let out = decode("8c14280b09297808", 20);
        assert_eq!(out.get("batt"), Some(&Value::Float(5.26)));
        assert_eq!(out.get("temp_in"), Some(&Value::Float(23.15)));
        assert_eq!(out.get("temp_out1"), Some(&Value::Float(21.68)));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn unknown_port_id_fails() {
        let payload = hex_to_bytes("8c14").unwrap();
        let err = decode_table_driven(&SENSORNODE, &payload, 99).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownField { id: 99 }));
    }

    #[test]
    fn truncated_field_fails() {
        // Port 10 announces a 6-byte GPS record, only 3 bytes follow.
        let payload = hex_to_bytes("01e323").unwrap();
        let err = decode_table_driven(&SENSORNODE, &payload, 10).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }
}
