//! MeteoHelix weather station bit layout.
//!
//! The 11-byte payload is one big-endian bitfield. Min/max temperature and
//! the irradiation peak are deviations against the base reading decoded
//! just before them. The trailing rain counters are part of the layout but
//! unused by deployed stations.

use crate::vendors::catalog::{BitEmit, BitFieldSpec, BitLayout};

pub static METEOHELIX: BitLayout = BitLayout {
    bits: 88,
    fields: &[
        BitFieldSpec {
            name: "type",
            width: 2,
            emit: BitEmit::Ignore,
        },
        BitFieldSpec {
            name: "battery",
            width: 5,
            emit: BitEmit::Linear {
                scale: 0.05,
                offset: 3.0,
                round: None,
            },
        },
        BitFieldSpec {
            name: "temperature",
            width: 11,
            emit: BitEmit::Linear {
                scale: 0.1,
                offset: -100.0,
                round: Some(1),
            },
        },
        BitFieldSpec {
            name: "t_min",
            width: 6,
            emit: BitEmit::Delta {
                base: "temperature",
                scale: -0.1,
                round: Some(1),
            },
        },
        BitFieldSpec {
            name: "t_max",
            width: 6,
            emit: BitEmit::Delta {
                base: "temperature",
                scale: 0.1,
                round: Some(1),
            },
        },
        BitFieldSpec {
            name: "humidity",
            width: 9,
            emit: BitEmit::Linear {
                scale: 0.2,
                offset: 0.0,
                round: Some(1),
            },
        },
        // (raw * 5 + 50000) Pa, reported in hPa.
        BitFieldSpec {
            name: "pressure",
            width: 14,
            emit: BitEmit::Linear {
                scale: 0.05,
                offset: 500.0,
                round: None,
            },
        },
        BitFieldSpec {
            name: "irradiation",
            width: 10,
            emit: BitEmit::Int { mul: 2, add: 0 },
        },
        BitFieldSpec {
            name: "irr_max",
            width: 9,
            emit: BitEmit::DeltaInt {
                base: "irradiation",
                mul: 2,
            },
        },
        BitFieldSpec {
            name: "rain",
            width: 8,
            emit: BitEmit::Ignore,
        },
        BitFieldSpec {
            name: "rain_min_time",
            width: 8,
            emit: BitEmit::Ignore,
        },
    ],
};
