//! Structural validation of parsed-message envelopes.
//!
//! Checks are structural only: they enforce the time-field exclusivity
//! rule and, on request, that every measurement name is declared in the
//! header's column catalog. Decoded numeric values are never
//! second-guessed here.

use thiserror::Error;

use crate::{DatalineTime, ParsedMessage};

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("data mixes 'time' and 'start_time'/'end_time' entries")]
    MixedTimeFields,
    #[error("dataline has no timestamp")]
    MissingTime,
    #[error("measurement '{name}' is not declared in header columns")]
    UndeclaredColumn { name: String },
}

/// Reject envelopes whose datalines mix or lack time fields.
///
/// Every entry in `data` must use the same time shape, and point-in-time
/// entries must actually carry a timestamp.
pub fn validate(message: &ParsedMessage) -> Result<(), SchemaError> {
    let mut saw_point = false;
    let mut saw_span = false;
    for line in &message.data {
        match &line.time {
            DatalineTime::At { time } => {
                if time.is_none() {
                    return Err(SchemaError::MissingTime);
                }
                saw_point = true;
            }
            DatalineTime::Span { .. } => saw_span = true,
        }
    }
    if saw_point && saw_span {
        return Err(SchemaError::MixedTimeFields);
    }
    Ok(())
}

/// [`validate`] plus a column-catalog check: every measurement name in
/// `data` must match a declared column name.
pub fn validate_with_columns(message: &ParsedMessage) -> Result<(), SchemaError> {
    validate(message)?;
    for line in &message.data {
        for name in line.data.keys() {
            let declared = message
                .header
                .columns
                .values()
                .any(|column| column.name == *name);
            if !declared {
                return Err(SchemaError::UndeclaredColumn { name: name.clone() });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{Column, Dataline, DeviceRef, Header, MeasurementMap, ParsedMessage, Value};

    fn message_with(data: Vec<Dataline>, columns: BTreeMap<String, Column>) -> ParsedMessage {
        ParsedMessage::new(
            BTreeMap::new(),
            DeviceRef {
                device_id: "B8A44F1F46E1".to_string(),
                device_type: "elsys".to_string(),
                parser_module: "elsys".to_string(),
                name: "room-442".to_string(),
                state: "Production".to_string(),
            },
            Header {
                start_time: "2022-03-02T12:00:00+00:00".to_string(),
                end_time: "2022-03-02T12:20:00+00:00".to_string(),
                columns,
            },
            data,
        )
    }

    fn temp_map() -> MeasurementMap {
        let mut data = MeasurementMap::new();
        data.insert("temperature".to_string(), Value::Float(21.5));
        data
    }

    #[test]
    fn uniform_point_times_pass() {
        let message = message_with(
            vec![
                Dataline::at(Some("2022-03-02T12:00:00+00:00".to_string()), temp_map()),
                Dataline::at(Some("2022-03-02T12:10:00+00:00".to_string()), temp_map()),
            ],
            BTreeMap::new(),
        );
        assert_eq!(validate(&message), Ok(()));
    }

    #[test]
    fn mixed_time_shapes_are_rejected() {
        let message = message_with(
            vec![
                Dataline::at(Some("2022-03-02T12:00:00+00:00".to_string()), temp_map()),
                Dataline::span(
                    "2022-03-02T12:00:00+00:00".to_string(),
                    "2022-03-02T12:10:00+00:00".to_string(),
                    temp_map(),
                ),
            ],
            BTreeMap::new(),
        );
        assert_eq!(validate(&message), Err(SchemaError::MixedTimeFields));
    }

    #[test]
    fn null_time_in_envelope_is_rejected() {
        let message = message_with(vec![Dataline::at(None, temp_map())], BTreeMap::new());
        assert_eq!(validate(&message), Err(SchemaError::MissingTime));
    }

    #[test]
    fn declared_columns_pass() {
        let mut columns = BTreeMap::new();
        columns.insert(
            "0".to_string(),
            Column {
                name: "temperature".to_string(),
                unit: Some("°C".to_string()),
            },
        );
        let message = message_with(
            vec![Dataline::at(
                Some("2022-03-02T12:00:00+00:00".to_string()),
                temp_map(),
            )],
            columns,
        );
        assert_eq!(validate_with_columns(&message), Ok(()));
    }

    #[test]
    fn undeclared_measurement_is_rejected() {
        let message = message_with(
            vec![Dataline::at(
                Some("2022-03-02T12:00:00+00:00".to_string()),
                temp_map(),
            )],
            BTreeMap::new(),
        );
        assert_eq!(
            validate_with_columns(&message),
            Err(SchemaError::UndeclaredColumn {
                name: "temperature".to_string()
            })
        );
    }
}
