//! Format key to decoder mapping.

use crate::vendors::catalog::Decoder;
use crate::vendors::error::DecodeError;
use crate::vendors::{
    decentlab, elsys, energiaburk, fvhgeneric, iotpetri, lht65, marjetas, mcf88, meteohelix,
    milesight, paxcounter, sensornode, sompasensecap, Record,
};

/// Registered formats, sorted by key.
pub static FORMATS: &[(&str, Decoder)] = &[
    ("dlmbx", Decoder::FlagDriven(&decentlab::DL_MBX)),
    ("dlpm", Decoder::FlagDriven(&decentlab::DL_PM)),
    ("dlsoil", Decoder::FlagDriven(&decentlab::DL_TRS12)),
    ("dltbrg", Decoder::FlagDriven(&decentlab::DL_TBRG)),
    ("elsys", Decoder::TableDriven(&elsys::ELSYS)),
    ("energiaburk", Decoder::Custom(energiaburk::decode)),
    ("fvhgeneric", Decoder::TableDriven(&fvhgeneric::FVH_GENERIC)),
    ("iotpetri", Decoder::Custom(iotpetri::decode)),
    ("lht65", Decoder::Custom(lht65::decode)),
    ("marjetas", Decoder::Custom(marjetas::decode)),
    ("mcf88", Decoder::Custom(mcf88::decode)),
    ("meteohelix", Decoder::Bitfield(&meteohelix::METEOHELIX)),
    ("milesight", Decoder::Custom(milesight::decode)),
    ("paxcounter", Decoder::Custom(paxcounter::decode)),
    ("sensornode", Decoder::TableDriven(&sensornode::SENSORNODE)),
    ("sompasensecap", Decoder::Custom(sompasensecap::decode)),
];

/// Look up a decoder by its format key.
pub fn lookup(format: &str) -> Option<&'static Decoder> {
    FORMATS
        .binary_search_by_key(&format, |(key, _)| key)
        .ok()
        .map(|i| &FORMATS[i].1)
}

/// All registered format keys, in sorted order.
pub fn format_keys() -> impl Iterator<Item = &'static str> {
    FORMATS.iter().map(|(key, _)| *key)
}

/// Decode a payload with the named format.
pub fn decode(format: &str, payload: &[u8], port: u16) -> Result<Vec<Record>, DecodeError> {
    let decoder = lookup(format).ok_or_else(|| DecodeError::UnsupportedFormat {
        format: format.to_string(),
    })?;
    decoder.decode(payload, port)
}
