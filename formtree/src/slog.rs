//! Adapters for emitting projections through `slog`.
//!
//! [`FlatRow`] logs as a single `path: value` string. [`ExportTable`] and
//! [`DisplayNode`] log as nested JSON through `slog`'s nested-value support.
//! Serialization failures become placeholder strings instead of logging
//! errors.
//!
//! ```ignore
//! info!(logger, "exported submission"; "table" => &table);
//! ```

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    display::DisplayNode,
    export::{ExportTable, FlatRow},
};

fn emit_json<T: Serialize>(
    value: &T,
    record: &Record<'_>,
    key: Key,
    serializer: &mut dyn Serializer,
) -> SlogResult {
    let json = serde_json::to_value(value).unwrap_or_else(|err| {
        JsonValue::String(format!("Failed to serialize projection: {err}"))
    });
    SlogValue::serialize(&slog::Serde(json), record, key, serializer)
}

impl SlogValue for FlatRow {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_arguments(key, &format_args!("{self}"))
    }
}

impl SlogValue for ExportTable {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_json(self, record, key, serializer)
    }
}

impl SlogValue for DisplayNode {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_json(self, record, key, serializer)
    }
}
