//! Conversion of typed Rust values into [`LabeledValue`] trees.
//!
//! [`ToLabeledValue`] is implemented here for std types and chrono dates, and
//! behind feature flags for `time`, `uuid` and `serde_json`. Record structs
//! get it from `#[derive(Labeled)]`.
//!
//! ## Map Ordering
//!
//! `BTreeMap` entries keep their key order. `HashMap` entries are sorted by
//! key so the same map always produces the same tree.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap, VecDeque},
    hash::BuildHasher,
    marker::PhantomData,
    rc::Rc,
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::value::{Entries, LabeledValue, Number, Scalar, Timestamp};

// =============================================================================
// ToLabeledValue
// =============================================================================

/// Converts a value into the tree consumed by [`crate::TreeProjector`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into a `LabeledValue`",
    label = "this type has no `ToLabeledValue` implementation",
    note = "use `#[derive(Labeled)]` on the type definition",
    note = "or mark the field with `#[labeled(skip)]`"
)]
pub trait ToLabeledValue {
    fn to_labeled_value(&self) -> LabeledValue;
}

impl ToLabeledValue for LabeledValue {
    fn to_labeled_value(&self) -> LabeledValue {
        self.clone()
    }
}

impl ToLabeledValue for Entries {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::Keyed(self.clone())
    }
}

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_number {
    ($variant:ident as $target:ty: $($ty:ty),+ $(,)?) => {
        $(
            impl ToLabeledValue for $ty {
                fn to_labeled_value(&self) -> LabeledValue {
                    LabeledValue::Scalar(Scalar::Number(Number::$variant(<$target>::from(*self))))
                }
            }
        )+
    };
}

impl_number!(Int as i64: i8, i16, i32, i64);
impl_number!(UInt as u64: u8, u16, u32, u64);
impl_number!(Float as f64: f32, f64);

// Wider or pointer-sized integers fall back to text when they do not fit.
macro_rules! impl_wide_number {
    ($variant:ident as $target:ty: $($ty:ty),+ $(,)?) => {
        $(
            impl ToLabeledValue for $ty {
                fn to_labeled_value(&self) -> LabeledValue {
                    match <$target>::try_from(*self) {
                        Ok(value) => LabeledValue::Scalar(Scalar::Number(Number::$variant(value))),
                        Err(_) => LabeledValue::text(self.to_string()),
                    }
                }
            }
        )+
    };
}

impl_wide_number!(Int as i64: i128, isize);
impl_wide_number!(UInt as u64: u128, usize);

impl ToLabeledValue for bool {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::bool(*self)
    }
}

impl ToLabeledValue for char {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::text(self.to_string())
    }
}

impl ToLabeledValue for String {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::text(self.as_str())
    }
}

impl ToLabeledValue for str {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::text(self)
    }
}

impl ToLabeledValue for Cow<'_, str> {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::text(self.as_ref())
    }
}

impl ToLabeledValue for () {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::Null
    }
}

impl<T: ?Sized> ToLabeledValue for PhantomData<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::Null
    }
}

// =============================================================================
// Wrappers
// =============================================================================

impl<T: ToLabeledValue> ToLabeledValue for Option<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        self.as_ref()
            .map_or(LabeledValue::Null, ToLabeledValue::to_labeled_value)
    }
}

impl<T: ToLabeledValue + ?Sized> ToLabeledValue for &T {
    fn to_labeled_value(&self) -> LabeledValue {
        (**self).to_labeled_value()
    }
}

impl<T: ToLabeledValue + ?Sized> ToLabeledValue for Box<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        (**self).to_labeled_value()
    }
}

impl<T: ToLabeledValue + ?Sized> ToLabeledValue for Rc<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        (**self).to_labeled_value()
    }
}

impl<T: ToLabeledValue + ?Sized> ToLabeledValue for Arc<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        (**self).to_labeled_value()
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T: ToLabeledValue> ToLabeledValue for [T] {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::sequence(self.iter().map(ToLabeledValue::to_labeled_value))
    }
}

impl<T: ToLabeledValue, const N: usize> ToLabeledValue for [T; N] {
    fn to_labeled_value(&self) -> LabeledValue {
        self.as_slice().to_labeled_value()
    }
}

impl<T: ToLabeledValue> ToLabeledValue for Vec<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        self.as_slice().to_labeled_value()
    }
}

impl<T: ToLabeledValue> ToLabeledValue for VecDeque<T> {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::sequence(self.iter().map(ToLabeledValue::to_labeled_value))
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K, V> ToLabeledValue for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: ToLabeledValue,
{
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::keyed(
            self.iter()
                .map(|(key, value)| (AsRef::<str>::as_ref(key), value.to_labeled_value())),
        )
    }
}

impl<K, V, S> ToLabeledValue for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: ToLabeledValue,
    S: BuildHasher,
{
    fn to_labeled_value(&self) -> LabeledValue {
        let mut fields: Vec<_> = self.iter().collect();
        fields.sort_by(|(left, _), (right, _)| {
            AsRef::<str>::as_ref(*left).cmp(AsRef::<str>::as_ref(*right))
        });
        LabeledValue::keyed(
            fields
                .into_iter()
                .map(|(key, value)| (AsRef::<str>::as_ref(key), value.to_labeled_value())),
        )
    }
}

// =============================================================================
// Dates
// =============================================================================

impl<Tz: TimeZone> ToLabeledValue for DateTime<Tz> {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::instant(self.with_timezone(&Utc))
    }
}

/// Interpreted as UTC.
impl ToLabeledValue for NaiveDateTime {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::instant(self.and_utc())
    }
}

/// Midnight UTC on that day.
impl ToLabeledValue for NaiveDate {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::instant(self.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl ToLabeledValue for Timestamp {
    fn to_labeled_value(&self) -> LabeledValue {
        LabeledValue::Temporal(self.clone())
    }
}

#[cfg(feature = "time")]
mod time_impls {
    use super::{LabeledValue, Timestamp, ToLabeledValue};

    /// Kept as an epoch pair; out-of-range instants surface when formatted.
    impl ToLabeledValue for time::OffsetDateTime {
        fn to_labeled_value(&self) -> LabeledValue {
            LabeledValue::Temporal(Timestamp::Epoch {
                seconds: self.unix_timestamp(),
                nanos: i64::from(self.nanosecond()),
            })
        }
    }
}

#[cfg(feature = "uuid")]
mod uuid_impls {
    use super::{LabeledValue, ToLabeledValue};

    impl ToLabeledValue for uuid::Uuid {
        fn to_labeled_value(&self) -> LabeledValue {
            LabeledValue::text(self.hyphenated().to_string())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn numbers_keep_their_family() {
        assert_eq!(7u8.to_labeled_value(), LabeledValue::uint(7));
        assert_eq!((-7i16).to_labeled_value(), LabeledValue::int(-7));
        assert_eq!(1.5f32.to_labeled_value(), LabeledValue::float(1.5));
    }

    #[test]
    fn oversized_integers_become_text() {
        let huge = u128::from(u64::MAX) + 1;
        assert_eq!(
            huge.to_labeled_value(),
            LabeledValue::text("18446744073709551616")
        );
        assert_eq!(12usize.to_labeled_value(), LabeledValue::uint(12));
    }

    #[test]
    fn option_none_is_null() {
        let missing: Option<String> = None;
        assert!(missing.to_labeled_value().is_null());
        assert_eq!(Some("x").to_labeled_value(), LabeledValue::text("x"));
    }

    #[test]
    fn vec_becomes_sequence() {
        let tags = vec!["vegan".to_owned(), "halal".to_owned()];
        assert_eq!(
            tags.to_labeled_value(),
            LabeledValue::sequence([LabeledValue::text("vegan"), LabeledValue::text("halal")])
        );
    }

    #[test]
    fn hash_map_keys_are_sorted() {
        let mut hours = HashMap::new();
        hours.insert("tuesday".to_owned(), "9-5");
        hours.insert("monday".to_owned(), "closed");
        let value = hours.to_labeled_value();
        let keys: Vec<_> = value.as_keyed().unwrap().keys().collect();
        assert_eq!(keys, ["monday", "tuesday"]);
    }

    #[test]
    fn dates_become_instants() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            date.to_labeled_value(),
            LabeledValue::instant(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuid_is_hyphenated_text() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            id.to_labeled_value(),
            LabeledValue::text("00000000-0000-0000-0000-000000000000")
        );
    }

    #[cfg(feature = "time")]
    #[test]
    fn offset_date_time_is_an_epoch_pair() {
        let instant = time::OffsetDateTime::UNIX_EPOCH;
        assert_eq!(
            instant.to_labeled_value(),
            LabeledValue::Temporal(Timestamp::Epoch {
                seconds: 0,
                nanos: 0
            })
        );
    }
}
