//! Errors raised while projecting a tree.
//!
//! - [`FormatError`] belongs to one leaf. The projector captures it in place
//!   (an invalid node or cell) and keeps walking the siblings.
//! - [`ShapeError`] is returned to the caller when the input cannot be
//!   projected at all.

use std::fmt;

use crate::value::ValueKind;

// =============================================================================
// FormatError
// =============================================================================

/// A leaf whose declared kind does not match its content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "camelCase"))]
pub enum FormatError {
    /// A temporal leaf holding text that is not RFC 3339.
    InvalidTimestamp { raw: String },
    /// A temporal leaf whose seconds/nanoseconds pair is not a valid instant.
    TimestampOutOfRange { seconds: i64, nanos: i64 },
    /// The locale's date pattern contains an unknown specifier.
    DatePattern { pattern: String },
    /// A sequence element that does not fit the branch chosen for its sequence.
    MixedSequence {
        index: usize,
        expected: ValueKind,
        found: ValueKind,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp { raw } => write!(f, "invalid timestamp {raw:?}"),
            Self::TimestampOutOfRange { seconds, nanos } => {
                write!(f, "timestamp out of range ({seconds}s, {nanos}ns)")
            }
            Self::DatePattern { pattern } => write!(f, "unsupported date pattern {pattern:?}"),
            Self::MixedSequence {
                index,
                expected,
                found,
            } => write!(
                f,
                "sequence element {} is {found}, expected {expected}",
                index + 1
            ),
        }
    }
}

impl std::error::Error for FormatError {}

// =============================================================================
// ShapeError
// =============================================================================

/// The root handed to flattening is not a keyed mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeError {
    NotKeyed { found: ValueKind },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotKeyed { found } => {
                write!(f, "expected a keyed record at the root, found {found}")
            }
        }
    }
}

impl std::error::Error for ShapeError {}
