//! Decentlab sensor catalogs (protocol v2 flag-driven family).
//!
//! One catalog per product; all four share the generic flag-driven engine.
//! Conversion constants come from the vendor's published decoders and must
//! not be altered: groups not covered by sample payloads keep the published
//! constants verbatim.

use crate::vendors::catalog::{FlagCatalog, SensorGroup, ValueSpec};
use crate::Value;

/// DL-MBX ultrasonic distance / level sensor.
pub static DL_MBX: FlagCatalog = FlagCatalog {
    protocol_version: 2,
    device_id_field: Some("dl_id"),
    version_field: Some("protocol"),
    groups: &[
        SensorGroup {
            word_count: 2,
            values: &[
                ValueSpec {
                    name: "distance",
                    unit: Some("mm"),
                    convert: |x| Value::Int(x[0] as i64),
                },
                ValueSpec {
                    name: "valid_samples",
                    unit: None,
                    convert: |x| Value::Int(x[1] as i64),
                },
            ],
        },
        SensorGroup {
            word_count: 1,
            values: &[ValueSpec {
                name: "batt",
                unit: Some("V"),
                convert: |x| Value::Float(x[0] as f64 / 1000.0),
            }],
        },
    ],
};

/// DL-TBRG tipping bucket rain gauge, 0.1 mm resolution variant.
const TBRG_RESOLUTION: f64 = 0.1;

pub static DL_TBRG: FlagCatalog = FlagCatalog {
    protocol_version: 2,
    device_id_field: Some("dl_id"),
    version_field: Some("protocol"),
    groups: &[
        SensorGroup {
            word_count: 4,
            values: &[
                ValueSpec {
                    name: "precipitation",
                    unit: Some("mm"),
                    convert: |x| Value::Float(x[0] as f64 * TBRG_RESOLUTION),
                },
                ValueSpec {
                    name: "precipitation_interval",
                    unit: Some("s"),
                    convert: |x| Value::Int(x[1] as i64),
                },
                ValueSpec {
                    name: "precipitation_cumulative",
                    unit: Some("mm"),
                    // 32-bit cumulative counter from low and high words
                    convert: |x| {
                        Value::Float((x[2] as f64 + x[3] as f64 * 65536.0) * TBRG_RESOLUTION)
                    },
                },
            ],
        },
        SensorGroup {
            word_count: 1,
            values: &[ValueSpec {
                name: "battery",
                unit: Some("V"),
                convert: |x| Value::Float(x[0] as f64 / 1000.0),
            }],
        },
    ],
};

/// DL-PM particulate matter sensor. The catalog names are the published
/// ones, lowercased with `[. ]` replaced by underscores; the device id and
/// protocol version are not part of this format's output.
pub static DL_PM: FlagCatalog = FlagCatalog {
    protocol_version: 2,
    device_id_field: None,
    version_field: None,
    groups: &[
        SensorGroup {
            word_count: 1,
            values: &[ValueSpec {
                name: "battery_voltage",
                unit: Some("V"),
                convert: |x| Value::Float(x[0] as f64 / 1000.0),
            }],
        },
        SensorGroup {
            word_count: 10,
            values: &[
                ValueSpec {
                    name: "pm1_0_mass_concentration",
                    unit: Some("µg⋅m⁻³"),
                    convert: |x| Value::Float(x[0] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm2_5_mass_concentration",
                    unit: Some("µg⋅m⁻³"),
                    convert: |x| Value::Float(x[1] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm4_mass_concentration",
                    unit: Some("µg⋅m⁻³"),
                    convert: |x| Value::Float(x[2] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm10_mass_concentration",
                    unit: Some("µg⋅m⁻³"),
                    convert: |x| Value::Float(x[3] as f64 / 10.0),
                },
                ValueSpec {
                    name: "typical_particle_size",
                    unit: Some("nm"),
                    convert: |x| Value::Int(x[4] as i64),
                },
                ValueSpec {
                    name: "pm0_5_number_concentration",
                    unit: None,
                    convert: |x| Value::Float(x[5] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm1_0_number_concentration",
                    unit: None,
                    convert: |x| Value::Float(x[6] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm2_5_number_concentration",
                    unit: None,
                    convert: |x| Value::Float(x[7] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm4_number_concentration",
                    unit: None,
                    convert: |x| Value::Float(x[8] as f64 / 10.0),
                },
                ValueSpec {
                    name: "pm10_number_concentration",
                    unit: None,
                    convert: |x| Value::Float(x[9] as f64 / 10.0),
                },
            ],
        },
        SensorGroup {
            word_count: 2,
            values: &[
                ValueSpec {
                    name: "air_temperature",
                    unit: Some("°C"),
                    convert: |x| Value::Float(175.72 * x[0] as f64 / 65536.0 - 46.85),
                },
                ValueSpec {
                    name: "air_humidity",
                    unit: Some("%"),
                    convert: |x| Value::Float(125.0 * x[1] as f64 / 65536.0 - 6.0),
                },
            ],
        },
        SensorGroup {
            word_count: 1,
            values: &[ValueSpec {
                name: "barometric_pressure",
                unit: Some("Pa"),
                convert: |x| Value::Int(x[0] as i64 * 2),
            }],
        },
    ],
};

/// DL-TRS12 soil moisture, temperature and electrical conductivity sensor.
pub static DL_TRS12: FlagCatalog = FlagCatalog {
    protocol_version: 2,
    device_id_field: None,
    version_field: None,
    groups: &[
        SensorGroup {
            word_count: 3,
            values: &[
                ValueSpec {
                    name: "dielectric_permittivity",
                    unit: None,
                    convert: |x| {
                        let raw = x[0] as f64 / 10.0;
                        let root = 0.000000002887 * raw.powi(3) - 0.0000208 * raw.powi(2)
                            + 0.05276 * raw
                            - 43.39;
                        Value::Float(root * root)
                    },
                },
                ValueSpec {
                    name: "volumetric_water_content",
                    unit: Some("m³⋅m⁻³"),
                    convert: |x| Value::Float(x[0] as f64 / 10.0 * 0.0003879 - 0.6956),
                },
                ValueSpec {
                    name: "soil_temperature",
                    unit: Some("°C"),
                    convert: |x| Value::Float((x[1] as f64 - 32768.0) / 10.0),
                },
                ValueSpec {
                    name: "electrical_conductivity",
                    unit: Some("µS⋅cm⁻¹"),
                    convert: |x| Value::Int(x[2] as i64),
                },
            ],
        },
        SensorGroup {
            word_count: 1,
            values: &[ValueSpec {
                name: "battery_voltage",
                unit: Some("V"),
                convert: |x| Value::Float(x[0] as f64 / 1000.0),
            }],
        },
    ],
};
