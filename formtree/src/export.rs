//! Export-mode output: flattened rows and the two-column table built from them.
//!
//! - [`FlatRow`]: one `(path, value)` cell pair
//! - [`ExportTable`]: rows under the fixed `Field | Value` header
//! - [`export_file_name`]: the download name derived from a business name

use std::fmt;

use crate::error::FormatError;

/// Separator between keys in a row path.
pub const PATH_SEPARATOR: &str = " > ";

/// Header row of every export table.
pub const EXPORT_HEADER: [&str; 2] = ["Field", "Value"];

const FALLBACK_FILE_STEM: &str = "submission";

// =============================================================================
// FlatRow
// =============================================================================

/// One flattened leaf.
///
/// When the leaf failed to format, `value` holds the locale's invalid marker
/// and `error` says why.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FlatRow {
    path: String,
    value: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    error: Option<FormatError>,
}

impl FlatRow {
    pub(crate) fn new(path: String, value: String) -> Self {
        Self {
            path,
            value,
            error: None,
        }
    }

    pub(crate) fn invalid(path: String, marker: String, error: FormatError) -> Self {
        Self {
            path,
            value: marker,
            error: Some(error),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&FormatError> {
        self.error.as_ref()
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    /// The row as a `(path, value)` pair of borrowed strings.
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.path, &self.value)
    }
}

impl fmt::Display for FlatRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.value)
    }
}

// =============================================================================
// Paths
// =============================================================================

/// `prefix > key`, or just `key` at the root.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{key}")
    }
}

/// `path [n]` for the element at 0-based `index`.
pub(crate) fn indexed_path(path: &str, index: usize) -> String {
    format!("{path} [{}]", index + 1)
}

// =============================================================================
// ExportTable
// =============================================================================

/// Flattened rows under the fixed [`EXPORT_HEADER`].
///
/// `Display` writes tab-separated lines, header first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ExportTable {
    rows: Vec<FlatRow>,
}

impl ExportTable {
    pub fn new(rows: Vec<FlatRow>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> [&'static str; 2] {
        EXPORT_HEADER
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that carry a formatting error.
    pub fn invalid_rows(&self) -> impl Iterator<Item = &FlatRow> {
        self.rows.iter().filter(|row| row.is_invalid())
    }

    pub fn into_rows(self) -> Vec<FlatRow> {
        self.rows
    }
}

impl fmt::Display for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [field, value] = EXPORT_HEADER;
        writeln!(f, "{field}\t{value}")?;
        for row in &self.rows {
            writeln!(f, "{}\t{}", row.path, row.value)?;
        }
        Ok(())
    }
}

impl FromIterator<FlatRow> for ExportTable {
    fn from_iter<I: IntoIterator<Item = FlatRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// File naming
// =============================================================================

/// PDF file name for a submission: whitespace runs become `_`.
///
/// ```rust
/// assert_eq!(formtree::export_file_name("Casa  Luna Grill"), "Casa_Luna_Grill.pdf");
/// assert_eq!(formtree::export_file_name("   "), "submission.pdf");
/// ```
pub fn export_file_name(business_name: &str) -> String {
    let stem = business_name.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        format!("{FALLBACK_FILE_STEM}.pdf")
    } else {
        format!("{stem}.pdf")
    }
}
