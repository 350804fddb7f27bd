//! Decoder capability and the shared catalog engines.
//!
//! Each vendor format is one `Decoder` variant carrying immutable catalog
//! data: flag-driven sensor groups, a table of identifier-keyed fields, a
//! fixed bit layout, or a custom function for formats that fit none of the
//! three patterns. Catalogs are `&'static` constants; dispatch and decoding
//! never touch shared mutable state.

use crate::vendors::common::bits::{be_uint, extract_bits};
use crate::vendors::common::reader::PayloadReader;
use crate::vendors::error::DecodeError;
use crate::vendors::Record;
use crate::{MeasurementMap, Value};

/// A registered vendor decoder.
pub enum Decoder {
    FlagDriven(&'static FlagCatalog),
    TableDriven(&'static FieldCatalog),
    Bitfield(&'static BitLayout),
    Custom(CustomFn),
}

/// Custom decoders receive the raw bytes and the LoRaWAN port and may emit
/// multiple records, each with an optional embedded timestamp.
pub type CustomFn = fn(&[u8], u16) -> Result<Vec<Record>, DecodeError>;

impl Decoder {
    pub fn decode(&self, payload: &[u8], port: u16) -> Result<Vec<Record>, DecodeError> {
        match self {
            Decoder::FlagDriven(catalog) => {
                Ok(vec![Record::unstamped(decode_flag_driven(catalog, payload)?)])
            }
            Decoder::TableDriven(catalog) => Ok(vec![Record::unstamped(decode_table_driven(
                catalog, payload, port,
            )?)]),
            Decoder::Bitfield(layout) => {
                Ok(vec![Record::unstamped(decode_bitfield(layout, payload)?)])
            }
            Decoder::Custom(f) => f(payload, port),
        }
    }
}

/// Flag-driven layout: `[version][device_id: u16 BE][flags: u16 BE][words]`.
///
/// Flag bit `i` (LSB first) gates the `i`-th sensor group; set groups consume
/// their declared word count from the data-word stream in catalog order.
pub struct FlagCatalog {
    pub protocol_version: u8,
    /// Output field for the parsed device id, when the format exposes it.
    pub device_id_field: Option<&'static str>,
    /// Output field for the protocol version, when the format exposes it.
    pub version_field: Option<&'static str>,
    pub groups: &'static [SensorGroup],
}

pub struct SensorGroup {
    pub word_count: usize,
    pub values: &'static [ValueSpec],
}

pub struct ValueSpec {
    pub name: &'static str,
    pub unit: Option<&'static str>,
    /// Pure arithmetic over the group's raw unsigned 16-bit words.
    pub convert: fn(&[u16]) -> Value,
}

pub fn decode_flag_driven(
    catalog: &FlagCatalog,
    payload: &[u8],
) -> Result<MeasurementMap, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let version = reader.read_u8()?;
    if version != catalog.protocol_version {
        return Err(DecodeError::ProtocolVersion {
            expected: catalog.protocol_version,
            actual: version,
        });
    }
    let device_id = reader.read_u16_be()?;
    let flags = reader.read_u16_be()?;

    let mut words = Vec::with_capacity(reader.remaining() / 2);
    while reader.remaining() >= 2 {
        words.push(reader.read_u16_be()?);
    }
    if reader.remaining() != 0 {
        // Odd trailing byte cannot be part of any data word.
        return Err(DecodeError::Truncated {
            needed: payload.len() + 1,
            actual: payload.len(),
        });
    }

    let mut out = MeasurementMap::new();
    if let Some(name) = catalog.device_id_field {
        out.insert(name.to_string(), Value::Int(device_id as i64));
    }
    if let Some(name) = catalog.version_field {
        out.insert(name.to_string(), Value::Int(version as i64));
    }

    let mut cursor = 0usize;
    for (i, group) in catalog.groups.iter().enumerate() {
        if flags & (1 << i) == 0 {
            continue;
        }
        let end = cursor + group.word_count;
        if end > words.len() {
            return Err(DecodeError::Truncated {
                needed: 5 + end * 2,
                actual: payload.len(),
            });
        }
        let x = &words[cursor..end];
        cursor = end;
        for value in group.values {
            out.insert(value.name.to_string(), (value.convert)(x));
        }
    }
    Ok(out)
}

/// Where the table-driven loop finds the first field identifier.
pub enum IdSource {
    /// The LoRaWAN port is the first id; subsequent ids follow each field.
    Port,
    /// Every field is preceded by its id byte.
    Leading,
}

/// Table-driven layout: a static catalog keyed by identifier byte.
pub struct FieldCatalog {
    pub id_source: IdSource,
    pub entries: &'static [FieldSpec],
}

pub struct FieldSpec {
    pub id: u8,
    /// Exact byte length this field consumes.
    pub size: usize,
    pub emit: Emit,
}

pub enum Emit {
    /// Consume the bytes without producing output (firmware-reset records).
    Skip,
    /// Decode the consumed bytes into zero or more named fields. Emitters
    /// may suppress output on sentinel values (e.g. GPS fix byte 255).
    Fields(fn(&[u8], &mut MeasurementMap)),
}

pub fn decode_table_driven(
    catalog: &FieldCatalog,
    payload: &[u8],
    port: u16,
) -> Result<MeasurementMap, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let mut out = MeasurementMap::new();
    let mut id = match catalog.id_source {
        IdSource::Port => {
            u8::try_from(port).map_err(|_| DecodeError::UnsupportedPort { port })?
        }
        IdSource::Leading => reader.read_u8()?,
    };
    loop {
        let spec = catalog
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(DecodeError::UnknownField { id })?;
        let chunk = reader.take(spec.size)?;
        if let Emit::Fields(emit) = spec.emit {
            emit(chunk, &mut out);
        }
        if reader.remaining() == 0 {
            break;
        }
        id = reader.read_u8()?;
    }
    Ok(out)
}

/// Fixed-width bitfield layout, most significant bit first.
///
/// Fields are declared in wire order and must cover the payload exactly:
/// the sum of declared widths equals `bits`.
pub struct BitLayout {
    /// Total payload width in bits.
    pub bits: u32,
    pub fields: &'static [BitFieldSpec],
}

pub struct BitFieldSpec {
    pub name: &'static str,
    pub width: u32,
    pub emit: BitEmit,
}

pub enum BitEmit {
    /// Extracted but not emitted (type tags, reserved counters).
    Ignore,
    /// `raw * mul + add`, emitted as an integer.
    Int { mul: i64, add: i64 },
    /// `raw * scale + offset`, optionally rounded to `round` decimals.
    Linear {
        scale: f64,
        offset: f64,
        round: Option<i32>,
    },
    /// `base + raw * scale` against a previously emitted float field.
    Delta {
        base: &'static str,
        scale: f64,
        round: Option<i32>,
    },
    /// `base + raw * mul` against a previously emitted integer field.
    DeltaInt { base: &'static str, mul: i64 },
}

pub fn decode_bitfield(layout: &BitLayout, payload: &[u8]) -> Result<MeasurementMap, DecodeError> {
    if payload.len() as u32 * 8 != layout.bits {
        return Err(DecodeError::UnsupportedLength { len: payload.len() });
    }
    debug_assert_eq!(
        layout.fields.iter().map(|f| f.width).sum::<u32>(),
        layout.bits
    );

    let value = be_uint(payload);
    let mut out = MeasurementMap::new();
    let mut consumed = 0u32;
    for field in layout.fields {
        let last = layout.bits - consumed - 1;
        let first = last + 1 - field.width;
        consumed += field.width;
        let raw = extract_bits(value, first, last);
        match field.emit {
            BitEmit::Ignore => {}
            BitEmit::Int { mul, add } => {
                out.insert(field.name.to_string(), Value::Int(raw as i64 * mul + add));
            }
            BitEmit::Linear {
                scale,
                offset,
                round,
            } => {
                let v = round_to(raw as f64 * scale + offset, round);
                out.insert(field.name.to_string(), Value::Float(v));
            }
            BitEmit::Delta { base, scale, round } => {
                if let Some(Value::Float(base_v)) = out.get(base) {
                    let v = round_to(base_v + raw as f64 * scale, round);
                    out.insert(field.name.to_string(), Value::Float(v));
                }
            }
            BitEmit::DeltaInt { base, mul } => {
                if let Some(Value::Int(base_v)) = out.get(base) {
                    let v = base_v + raw as i64 * mul;
                    out.insert(field.name.to_string(), Value::Int(v));
                }
            }
        }
    }
    Ok(out)
}

fn round_to(v: f64, decimals: Option<i32>) -> f64 {
    match decimals {
        Some(d) => {
            let factor = 10f64.powi(d);
            (v * factor).round() / factor
        }
        None => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_GROUPS: [SensorGroup; 2] = [
        SensorGroup {
            word_count: 2,
            values: &[
                ValueSpec {
                    name: "a",
                    unit: None,
                    convert: |x| Value::Int(x[0] as i64),
                },
                ValueSpec {
                    name: "b",
                    unit: None,
                    convert: |x| Value::Int(x[1] as i64),
                },
            ],
        },
        SensorGroup {
            word_count: 1,
            values: &[ValueSpec {
                name: "c",
                unit: None,
                convert: |x| Value::Float(x[0] as f64 / 1000.0),
            }],
        },
    ];

    static TEST_CATALOG: FlagCatalog = FlagCatalog {
        protocol_version: 2,
        device_id_field: Some("id"),
        version_field: Some("version"),
        groups: &TEST_GROUPS,
    };

    #[test]
    fn flag_driven_populated_fields_follow_set_bits() {
        // flags 0b01: only group 0 present
        let payload = [0x02, 0x00, 0x07, 0x00, 0x01, 0x00, 0x0a, 0x00, 0x0b];
        let out = decode_flag_driven(&TEST_CATALOG, &payload).unwrap();
        assert_eq!(out.get("a"), Some(&Value::Int(10)));
        assert_eq!(out.get("b"), Some(&Value::Int(11)));
        assert_eq!(out.get("c"), None);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn flag_driven_unset_groups_consume_nothing() {
        // flags 0b10: only group 1 present, one data word
        let payload = [0x02, 0x00, 0x07, 0x00, 0x02, 0x0b, 0xb1];
        let out = decode_flag_driven(&TEST_CATALOG, &payload).unwrap();
        assert_eq!(out.get("c"), Some(&Value::Float(2.993)));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn flag_driven_version_mismatch() {
        let payload = [0x03, 0x00, 0x07, 0x00, 0x00];
        let err = decode_flag_driven(&TEST_CATALOG, &payload).unwrap_err();
        assert!(err.to_string().contains("doesn't match v2"));
    }

    #[test]
    fn flag_driven_missing_words() {
        // flags claim group 0 (two words) but only one word follows
        let payload = [0x02, 0x00, 0x07, 0x00, 0x01, 0x00, 0x0a];
        let err = decode_flag_driven(&TEST_CATALOG, &payload).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn flag_driven_odd_trailing_byte() {
        let payload = [0x02, 0x00, 0x07, 0x00, 0x01, 0x00];
        let err = decode_flag_driven(&TEST_CATALOG, &payload).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    static BIT_TEST_LAYOUT: BitLayout = BitLayout {
        bits: 16,
        fields: &[
            BitFieldSpec {
                name: "tag",
                width: 2,
                emit: BitEmit::Ignore,
            },
            BitFieldSpec {
                name: "x",
                width: 6,
                emit: BitEmit::Int { mul: 2, add: 0 },
            },
            BitFieldSpec {
                name: "y",
                width: 8,
                emit: BitEmit::Linear {
                    scale: 0.5,
                    offset: -10.0,
                    round: Some(1),
                },
            },
        ],
    };

    #[test]
    fn bitfield_extracts_msb_first() {
        // 0b01_000011_00010100 = 0x4314
        let out = decode_bitfield(&BIT_TEST_LAYOUT, &[0x43, 0x14]).unwrap();
        assert_eq!(out.get("x"), Some(&Value::Int(6)));
        assert_eq!(out.get("y"), Some(&Value::Float(0.0)));
        assert_eq!(out.get("tag"), None);
    }

    #[test]
    fn bitfield_rejects_wrong_width() {
        let err = decode_bitfield(&BIT_TEST_LAYOUT, &[0x43]).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedLength { len: 1 }));
    }

    #[test]
    fn bitfield_widths_cover_payload() {
        let total: u32 = BIT_TEST_LAYOUT.fields.iter().map(|f| f.width).sum();
        assert_eq!(total, BIT_TEST_LAYOUT.bits);
    }
}
