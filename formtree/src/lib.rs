//! Display projection and tabular flattening for nested form submissions.
//!
//! A submitted onboarding form is an arbitrarily nested document. This crate
//! walks such a document, modeled as a [`LabeledValue`] tree, and produces two
//! views of it:
//!
//! - **Projection** ([`TreeProjector::project`]): a labeled [`DisplayNode`]
//!   tree with humanized labels, used by the submission detail view.
//! - **Flattening** ([`TreeProjector::flatten`]): ordered [`FlatRow`]s whose
//!   paths encode the nesting (`menu > items [2] > price`), used for the
//!   two-column PDF export.
//!
//! What this crate does:
//! - skips `null` values and configured metadata fields at every depth
//! - formats dates, booleans and empty lists through an injectable [`Locale`]
//! - reports malformed leaves in place instead of failing the whole walk
//! - converts JSON records (feature `json`) and typed structs
//!   (`#[derive(Labeled)]`) into trees
//!
//! What it does not do:
//! - perform I/O or logging
//! - lay out pages or draw tables
//!
//! # Example
//!
//! ```rust
//! use formtree::{LabeledValue, TreeProjector};
//!
//! let record = LabeledValue::keyed([
//!     ("id", LabeledValue::text("abc123")),
//!     ("businessName", LabeledValue::text("Casa Luna")),
//!     ("location", LabeledValue::keyed([("city", LabeledValue::text("Austin"))])),
//!     ("sameMenuForAll", LabeledValue::bool(true)),
//! ]);
//!
//! let projector = TreeProjector::default();
//! let rows = projector.flatten(&record, "").unwrap();
//! let pairs: Vec<_> = rows.iter().map(|row| row.as_pair()).collect();
//! assert_eq!(
//!     pairs,
//!     [
//!         ("businessName", "Casa Luna"),
//!         ("location > city", "Austin"),
//!         ("sameMenuForAll", "true"),
//!     ]
//! );
//!
//! let nodes = projector.project(&LabeledValue::bool(true), "sameMenuForAll", 0);
//! assert_eq!(nodes[0].label(), "Same Menu For All");
//! assert_eq!(nodes[0].text(), Some("Yes"));
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::return_self_not_must_use
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use formtree_derive::Labeled;

#[allow(unused_extern_crates)]
extern crate self as formtree;

// Module declarations
pub mod config;
mod convert;
mod display;
mod error;
mod export;
#[cfg(feature = "json")]
pub mod json;
mod label;
mod projector;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing")]
pub mod tracing;
mod value;

// Re-exports from config module
pub use config::{
    DEFAULT_EXCLUDED_FIELDS, EnGb, EnUs, ExclusionSet, Locale, LocaleProfile,
    MixedSequencePolicy, ProjectorConfig,
};
pub use convert::ToLabeledValue;
pub use display::{DisplayNode, ListEntry, NodeContent};
pub use error::{FormatError, ShapeError};
pub use export::{EXPORT_HEADER, ExportTable, FlatRow, PATH_SEPARATOR, export_file_name};
#[cfg(feature = "json")]
pub use json::Normalizer;
pub use label::humanize;
pub use projector::TreeProjector;
pub use value::{Entries, LabeledValue, Number, Scalar, Timestamp, ValueKind};
