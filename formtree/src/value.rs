//! The recursive input tree consumed by the projector.
//!
//! This module provides:
//!
//! - [`LabeledValue`]: the closed sum type every traversal branches on
//! - [`Scalar`] and [`Number`]: leaf payloads with their natural string forms
//! - [`Timestamp`]: temporal leaves, resolved lazily so malformed input stays
//!   local to the leaf that carries it
//! - [`Entries`]: an insertion-ordered mapping with unique keys

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, Utc};

use crate::{config::Locale, error::FormatError};

// =============================================================================
// ValueKind
// =============================================================================

/// The variant of a [`LabeledValue`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub enum ValueKind {
    Null,
    Scalar,
    Temporal,
    Sequence,
    Keyed,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::Temporal => "temporal",
            Self::Sequence => "sequence",
            Self::Keyed => "keyed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Scalar and Number
// =============================================================================

/// A numeric leaf.
///
/// Integers keep their exact representation; floats print the way a
/// submitted form shows them (`5` rather than `5.0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_nan() => f.write_str("NaN"),
            Self::Float(value) if value.is_infinite() => {
                f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Negative zero prints as `0`.
            Self::Float(value) if value == 0.0 => f.write_str("0"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// A non-temporal leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl fmt::Display for Scalar {
    /// Writes the natural string form: text verbatim, numbers via [`Number`],
    /// booleans as `true`/`false`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => fmt::Display::fmt(number, f),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

// =============================================================================
// Timestamp
// =============================================================================

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A temporal leaf.
///
/// Only [`Timestamp::Instant`] is known to be valid up front. The other two
/// shapes are checked when formatted, and a failure is reported as a
/// [`FormatError`] for this leaf alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Timestamp {
    /// An already-resolved instant.
    Instant(DateTime<Utc>),
    /// The document store's native shape: seconds and nanoseconds since the
    /// Unix epoch.
    Epoch { seconds: i64, nanos: i64 },
    /// An RFC 3339 string that has not been parsed yet.
    Text(String),
}

impl Timestamp {
    /// Resolves the timestamp to a UTC instant.
    pub fn resolve(&self) -> Result<DateTime<Utc>, FormatError> {
        match self {
            Self::Instant(instant) => Ok(*instant),
            Self::Epoch { seconds, nanos } => {
                let out_of_range = || FormatError::TimestampOutOfRange {
                    seconds: *seconds,
                    nanos: *nanos,
                };
                if !(0..NANOS_PER_SECOND).contains(nanos) {
                    return Err(out_of_range());
                }
                let nanos = u32::try_from(*nanos).map_err(|_| out_of_range())?;
                DateTime::from_timestamp(*seconds, nanos).ok_or_else(out_of_range)
            }
            Self::Text(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|_| FormatError::InvalidTimestamp { raw: raw.clone() }),
        }
    }

    /// Formats the timestamp with the locale's date-time pattern and offset.
    pub fn format(&self, locale: &Locale) -> Result<String, FormatError> {
        let instant = self.resolve()?;
        format_instant(instant, locale.offset(), locale.date_time_format())
    }
}

fn format_instant(
    instant: DateTime<Utc>,
    offset: FixedOffset,
    pattern: &str,
) -> Result<String, FormatError> {
    let mut out = String::new();
    // chrono reports unknown specifiers as a formatting error rather than
    // at construction time.
    write!(out, "{}", instant.with_timezone(&offset).format(pattern)).map_err(|_| {
        FormatError::DatePattern {
            pattern: pattern.to_owned(),
        }
    })?;
    Ok(out)
}

// =============================================================================
// Entries
// =============================================================================

/// An insertion-ordered mapping from field name to value.
///
/// Keys are unique: inserting an existing key replaces its value in place,
/// keeping the original position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entries {
    fields: Vec<(String, LabeledValue)>,
}

impl Entries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a field, returning the previous value if the key existed.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: LabeledValue,
    ) -> Option<LabeledValue> {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`Entries::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: LabeledValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&LabeledValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabeledValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, LabeledValue)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, LabeledValue)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (key, value) in iter {
            entries.insert(key, value);
        }
        entries
    }
}

impl IntoIterator for Entries {
    type Item = (String, LabeledValue);
    type IntoIter = std::vec::IntoIter<(String, LabeledValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

// =============================================================================
// LabeledValue
// =============================================================================

/// A node of a submitted document.
///
/// Trees are owned, so they are finite and acyclic by construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LabeledValue {
    #[default]
    Null,
    Scalar(Scalar),
    Temporal(Timestamp),
    Sequence(Vec<LabeledValue>),
    Keyed(Entries),
}

impl LabeledValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Self::Scalar(Scalar::Number(Number::Int(value)))
    }

    pub fn uint(value: u64) -> Self {
        Self::Scalar(Scalar::Number(Number::UInt(value)))
    }

    pub fn float(value: f64) -> Self {
        Self::Scalar(Scalar::Number(Number::Float(value)))
    }

    pub fn instant(value: DateTime<Utc>) -> Self {
        Self::Temporal(Timestamp::Instant(value))
    }

    pub fn sequence<I: IntoIterator<Item = LabeledValue>>(items: I) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    pub fn keyed<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, LabeledValue)>,
    {
        Self::Keyed(entries.into_iter().collect())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Temporal(_) => ValueKind::Temporal,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Keyed(_) => ValueKind::Keyed,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value holds further values (a sequence or a mapping).
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Keyed(_))
    }

    pub fn as_keyed(&self) -> Option<&Entries> {
        match self {
            Self::Keyed(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[LabeledValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field when this value is keyed.
    pub fn get(&self, key: &str) -> Option<&LabeledValue> {
        self.as_keyed().and_then(|entries| entries.get(key))
    }
}

impl From<Entries> for LabeledValue {
    fn from(entries: Entries) -> Self {
        Self::Keyed(entries)
    }
}

impl From<Scalar> for LabeledValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Timestamp> for LabeledValue {
    fn from(timestamp: Timestamp) -> Self {
        Self::Temporal(timestamp)
    }
}

// =============================================================================
// Tests
// =============================================================================
