//! `serde_json::Value` support: turning fetched records into [`LabeledValue`] trees.
//!
//! Submissions arrive from the document store as JSON. Its native timestamps
//! are serialized as two-field objects (`{"seconds", "nanoseconds"}`, or the
//! underscore-prefixed form the admin SDK writes). [`Normalizer`] recognizes
//! those objects and turns them into [`Timestamp::Epoch`] leaves; everything
//! else maps one-to-one.
//!
//! ## Arrays Are Not Searched For Timestamps By Default
//!
//! Timestamp detection descends into nested objects but not into arrays, so a
//! timestamp stored inside an array stays a keyed `{seconds, nanoseconds}`
//! value. Existing exports depend on that, so it is the default;
//! [`Normalizer::with_sequence_timestamps`] opts into converting them too.

use serde_json::{Map, Value as JsonValue};

use crate::{
    error::ShapeError,
    value::{Entries, LabeledValue, Number, Scalar, Timestamp, ValueKind},
};

const TIMESTAMP_KEYS: [(&str, &str); 2] = [("seconds", "nanoseconds"), ("_seconds", "_nanoseconds")];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normalizer {
    sequence_timestamps: bool,
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also convert timestamps found inside arrays.
    #[must_use]
    pub fn with_sequence_timestamps(mut self, enabled: bool) -> Self {
        self.sequence_timestamps = enabled;
        self
    }

    /// Converts any JSON value.
    pub fn to_labeled(&self, value: &JsonValue) -> LabeledValue {
        self.convert(value, true)
    }

    /// Converts a full record, which must be a JSON object.
    pub fn record(&self, value: &JsonValue) -> Result<Entries, ShapeError> {
        match value {
            JsonValue::Object(map) => Ok(self.entries(map, true)),
            other => Err(ShapeError::NotKeyed {
                found: json_kind(other),
            }),
        }
    }

    fn convert(&self, value: &JsonValue, detect: bool) -> LabeledValue {
        match value {
            JsonValue::Null => LabeledValue::Null,
            JsonValue::Bool(flag) => LabeledValue::bool(*flag),
            JsonValue::Number(number) => LabeledValue::Scalar(Scalar::Number(json_number(number))),
            JsonValue::String(text) => LabeledValue::text(text.as_str()),
            JsonValue::Array(items) => {
                let detect = detect && self.sequence_timestamps;
                LabeledValue::sequence(items.iter().map(|item| self.convert(item, detect)))
            }
            JsonValue::Object(map) => match detect.then(|| backend_timestamp(map)).flatten() {
                Some(timestamp) => LabeledValue::Temporal(timestamp),
                None => LabeledValue::Keyed(self.entries(map, detect)),
            },
        }
    }

    fn entries(&self, map: &Map<String, JsonValue>, detect: bool) -> Entries {
        map.iter()
            .map(|(key, value)| (key.as_str(), self.convert(value, detect)))
            .collect()
    }
}

/// Recognizes the document store's serialized timestamp.
fn backend_timestamp(map: &Map<String, JsonValue>) -> Option<Timestamp> {
    if map.len() != 2 {
        return None;
    }
    TIMESTAMP_KEYS.iter().find_map(|(seconds_key, nanos_key)| {
        let seconds = map.get(*seconds_key)?.as_i64()?;
        let nanos = map.get(*nanos_key)?.as_i64()?;
        Some(Timestamp::Epoch { seconds, nanos })
    })
}

fn json_number(number: &serde_json::Number) -> Number {
    if let Some(value) = number.as_i64() {
        Number::Int(value)
    } else if let Some(value) = number.as_u64() {
        Number::UInt(value)
    } else {
        Number::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

fn json_kind(value: &JsonValue) -> ValueKind {
    match value {
        JsonValue::Null => ValueKind::Null,
        JsonValue::Array(_) => ValueKind::Sequence,
        JsonValue::Object(_) => ValueKind::Keyed,
        _ => ValueKind::Scalar,
    }
}

/// Converts with the default [`Normalizer`].
impl crate::convert::ToLabeledValue for JsonValue {
    fn to_labeled_value(&self) -> LabeledValue {
        Normalizer::default().to_labeled(self)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn preserves_field_order() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let entries = Normalizer::new().record(&value).unwrap();
        assert_eq!(entries.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn converts_client_timestamps() {
        let value = json!({"submittedAt": {"seconds": 1_705_314_600, "nanoseconds": 0}});
        let entries = Normalizer::new().record(&value).unwrap();
        assert_eq!(
            entries.get("submittedAt"),
            Some(&LabeledValue::Temporal(Timestamp::Epoch {
                seconds: 1_705_314_600,
                nanos: 0
            }))
        );
    }

    #[test]
    fn converts_admin_sdk_timestamps_in_nested_objects() {
        let value = json!({"hours": {"openedOn": {"_seconds": 10, "_nanoseconds": 5}}});
        let labeled = Normalizer::new().to_labeled(&value);
        let opened = labeled.get("hours").and_then(|hours| hours.get("openedOn"));
        assert_eq!(
            opened,
            Some(&LabeledValue::Temporal(Timestamp::Epoch { seconds: 10, nanos: 5 }))
        );
    }

    #[test]
    fn objects_with_extra_keys_are_not_timestamps() {
        let value = json!({"seconds": 1, "nanoseconds": 2, "label": "x"});
        assert_eq!(Normalizer::new().to_labeled(&value).kind(), ValueKind::Keyed);
    }

    #[test]
    fn timestamps_inside_arrays_are_left_alone_by_default() {
        let value = json!({"holidays": [{"seconds": 1, "nanoseconds": 0}]});
        let labeled = Normalizer::new().to_labeled(&value);
        let first = &labeled.get("holidays").and_then(LabeledValue::as_sequence).unwrap()[0];
        assert_eq!(first.kind(), ValueKind::Keyed);
    }

    #[test]
    fn timestamps_inside_arrays_convert_when_enabled() {
        let value = json!({"holidays": [{"date": {"seconds": 1, "nanoseconds": 0}}]});
        let labeled = Normalizer::new().with_sequence_timestamps(true).to_labeled(&value);
        let first = &labeled.get("holidays").and_then(LabeledValue::as_sequence).unwrap()[0];
        assert_eq!(first.get("date").map(LabeledValue::kind), Some(ValueKind::Temporal));
    }

    #[test]
    fn numbers_keep_integer_form() {
        let value = json!({"seats": 40, "rating": 4.5, "big": u64::MAX});
        let labeled = Normalizer::new().to_labeled(&value);
        assert_eq!(labeled.get("seats"), Some(&LabeledValue::int(40)));
        assert_eq!(labeled.get("rating"), Some(&LabeledValue::float(4.5)));
        assert_eq!(labeled.get("big"), Some(&LabeledValue::uint(u64::MAX)));
    }

    #[test]
    fn record_requires_an_object() {
        let err = Normalizer::new().record(&json!([1, 2])).unwrap_err();
        assert_eq!(err, ShapeError::NotKeyed { found: ValueKind::Sequence });
    }
}
