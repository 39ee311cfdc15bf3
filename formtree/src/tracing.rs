//! Adapters for emitting projections through `tracing`.
//!
//! The engine never logs on its own. Callers that want to record what an
//! export or a detail view contained wrap the output with
//! [`TracingProjectionExt::tracing_display`], which yields a
//! `tracing::field::DisplayValue` usable as an event field.
//!
//! ```ignore
//! use formtree::tracing::TracingProjectionExt;
//!
//! let table = projector.export_table(&record);
//! tracing::debug!(rows = table.len(), table = %table.tracing_display(), "exported submission");
//! ```

use tracing::field::{DisplayValue, display};

use crate::{
    display::DisplayNode,
    export::{ExportTable, FlatRow},
};

/// Extension trait for logging projection output as display strings.
pub trait TracingProjectionExt {
    /// Renders the value once and wraps it for a `tracing` field.
    fn tracing_display(&self) -> DisplayValue<String>;
}

impl TracingProjectionExt for DisplayNode {
    fn tracing_display(&self) -> DisplayValue<String> {
        display(self.to_string().trim_end().to_owned())
    }
}

impl TracingProjectionExt for FlatRow {
    fn tracing_display(&self) -> DisplayValue<String> {
        display(self.to_string())
    }
}

/// Rows are joined with `"; "` so the field stays on one line.
impl TracingProjectionExt for [FlatRow] {
    fn tracing_display(&self) -> DisplayValue<String> {
        let text = self
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        display(text)
    }
}

impl TracingProjectionExt for ExportTable {
    fn tracing_display(&self) -> DisplayValue<String> {
        self.rows().tracing_display()
    }
}
