//! Elsys indoor sensor catalog (subset of the vendor's generic payload).
//!
//! Each reading is tagged with a leading type byte. Only the types observed
//! from deployed devices are cataloged; an uncataloged type fails the decode
//! instead of being silently swallowed.

use crate::vendors::catalog::{Emit, FieldCatalog, FieldSpec, IdSource};
use crate::vendors::common::reader::u16_be;
use crate::Value;

pub static ELSYS: FieldCatalog = FieldCatalog {
    id_source: IdSource::Leading,
    entries: &[
        FieldSpec {
            id: 0x01,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("temp".into(), Value::Float(u16_be(c) as f64 / 10.0));
            }),
        },
        FieldSpec {
            id: 0x02,
            size: 1,
            emit: Emit::Fields(|c, out| {
                out.insert("rh".into(), Value::Int(c[0] as i64));
            }),
        },
        FieldSpec {
            id: 0x04,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("light".into(), Value::Int(u16_be(c) as i64));
            }),
        },
        FieldSpec {
            id: 0x05,
            size: 1,
            emit: Emit::Fields(|c, out| {
                out.insert("motion".into(), Value::Int(c[0] as i64));
            }),
        },
        FieldSpec {
            id: 0x06,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("co2".into(), Value::Int(u16_be(c) as i64));
            }),
        },
        FieldSpec {
            id: 0x07,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("vdd".into(), Value::Float(u16_be(c) as f64 / 1000.0));
            }),
        },
        // Sound level: peak and average in one record.
        FieldSpec {
            id: 0x15,
            size: 2,
            emit: Emit::Fields(|c, out| {
                out.insert("sound_peak".into(), Value::Int(c[0] as i64));
                out.insert("sound_avg".into(), Value::Int(c[1] as i64));
            }),
        },
    ],
};
