//! The traversal engine behind both the detail view and the PDF export.
//!
//! [`TreeProjector`] walks a [`LabeledValue`] tree depth-first in insertion
//! order and produces one of two projections:
//!
//! - [`TreeProjector::project`]: a [`DisplayNode`] tree that keeps the nesting
//! - [`TreeProjector::flatten`]: [`FlatRow`]s whose paths encode the nesting
//!
//! Both walks share the same skipping rules. `Null` values and fields named in
//! the [`ExclusionSet`](crate::ExclusionSet) contribute nothing at any depth.
//! A leaf that fails to format is written as an invalid node or row in place,
//! and the walk carries on with its siblings.
//!
//! The projector holds only read-only configuration, so one instance can be
//! shared across threads and reused; the same input always yields the same
//! output.

use crate::{
    config::{Locale, MixedSequencePolicy, ProjectorConfig},
    display::{DisplayNode, ListEntry, NodeContent},
    error::{FormatError, ShapeError},
    export::{ExportTable, FlatRow, indexed_path, join_path},
    label::humanize,
    value::{Entries, LabeledValue, Scalar, Timestamp, ValueKind},
};

#[derive(Clone, Debug, Default)]
pub struct TreeProjector {
    config: ProjectorConfig,
}

impl TreeProjector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    fn locale(&self) -> &Locale {
        self.config.locale()
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.config.exclusions().contains(key)
    }

    // =========================================================================
    // Display projection
    // =========================================================================

    /// Projects one field into display nodes.
    ///
    /// Returns no node for `Null` values and excluded labels, otherwise
    /// exactly one node at `depth`. Children of tables and lists sit one level
    /// deeper.
    pub fn project(&self, value: &LabeledValue, label: &str, depth: usize) -> Vec<DisplayNode> {
        self.project_field(value, label, depth).into_iter().collect()
    }

    /// Projects every top-level field of a record at depth 0.
    pub fn project_record(&self, record: &Entries) -> Vec<DisplayNode> {
        self.project_entries(record, 0)
    }

    fn project_entries(&self, entries: &Entries, depth: usize) -> Vec<DisplayNode> {
        entries
            .iter()
            .filter_map(|(key, value)| self.project_field(value, key, depth))
            .collect()
    }

    fn project_field(&self, value: &LabeledValue, label: &str, depth: usize) -> Option<DisplayNode> {
        if value.is_null() || self.is_excluded(label) {
            return None;
        }
        let content = match value {
            LabeledValue::Null => return None,
            LabeledValue::Temporal(timestamp) => self.date_content(timestamp),
            LabeledValue::Scalar(scalar) => NodeContent::Scalar(match scalar {
                Scalar::Bool(flag) => self.locale().yes_no(*flag).to_owned(),
                other => other.to_string(),
            }),
            LabeledValue::Sequence(items) => self.sequence_content(items, depth),
            LabeledValue::Keyed(entries) => NodeContent::Table(self.project_entries(entries, depth + 1)),
        };
        Some(DisplayNode::new(humanize(label), depth, content))
    }

    fn date_content(&self, timestamp: &Timestamp) -> NodeContent {
        match timestamp.format(self.locale()) {
            Ok(text) => NodeContent::Date(text),
            Err(err) => NodeContent::Invalid(err),
        }
    }

    /// Content of a sequence node sitting at `depth`.
    fn sequence_content(&self, items: &[LabeledValue], depth: usize) -> NodeContent {
        if items.is_empty() {
            return NodeContent::NoItems(self.locale().no_items().to_owned());
        }
        let entries = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| self.list_entry(item, index, depth + 1))
            .collect();
        NodeContent::List(entries)
    }

    fn list_entry(&self, item: &LabeledValue, index: usize, depth: usize) -> Option<ListEntry> {
        let entry = match item {
            LabeledValue::Null => return None,
            LabeledValue::Scalar(scalar) => ListEntry::Bare(scalar.to_string()),
            LabeledValue::Temporal(timestamp) => match timestamp.format(self.locale()) {
                Ok(text) => ListEntry::Bare(text),
                Err(err) => ListEntry::Invalid(err),
            },
            LabeledValue::Keyed(entries) => ListEntry::Item(DisplayNode::new(
                self.locale().item_label(index + 1),
                depth,
                NodeContent::Table(self.project_entries(entries, depth + 1)),
            )),
            LabeledValue::Sequence(items) => ListEntry::Item(DisplayNode::new(
                self.locale().item_label(index + 1),
                depth,
                self.sequence_content(items, depth),
            )),
        };
        Some(entry)
    }

    // =========================================================================
    // Export flattening
    // =========================================================================

    /// Flattens a keyed root into ordered rows.
    ///
    /// `prefix` is prepended to every path; pass `""` for a whole submission.
    pub fn flatten(&self, value: &LabeledValue, prefix: &str) -> Result<Vec<FlatRow>, ShapeError> {
        match value {
            LabeledValue::Keyed(entries) => Ok(self.flatten_entries(entries, prefix)),
            other => Err(ShapeError::NotKeyed { found: other.kind() }),
        }
    }

    /// Flattens a record's fields; the infallible form of [`Self::flatten`].
    pub fn flatten_entries(&self, entries: &Entries, prefix: &str) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        self.flatten_into(entries, prefix, &mut rows);
        rows
    }

    /// Flattens a record straight into an [`ExportTable`].
    pub fn export_table(&self, record: &Entries) -> ExportTable {
        ExportTable::new(self.flatten_entries(record, ""))
    }

    fn flatten_into(&self, entries: &Entries, prefix: &str, rows: &mut Vec<FlatRow>) {
        for (key, value) in entries.iter() {
            if self.is_excluded(key) {
                continue;
            }
            self.flatten_value(value, join_path(prefix, key), rows);
        }
    }

    fn flatten_value(&self, value: &LabeledValue, path: String, rows: &mut Vec<FlatRow>) {
        match value {
            LabeledValue::Null => {}
            LabeledValue::Scalar(scalar) => rows.push(FlatRow::new(path, scalar.to_string())),
            LabeledValue::Temporal(timestamp) => rows.push(self.temporal_row(timestamp, path)),
            LabeledValue::Keyed(entries) => self.flatten_into(entries, &path, rows),
            LabeledValue::Sequence(items) => self.flatten_sequence(items, path, rows),
        }
    }

    fn temporal_row(&self, timestamp: &Timestamp, path: String) -> FlatRow {
        match timestamp.format(self.locale()) {
            Ok(text) => FlatRow::new(path, text),
            Err(err) => self.invalid_row(path, err),
        }
    }

    fn invalid_row(&self, path: String, err: FormatError) -> FlatRow {
        FlatRow::invalid(path, self.locale().invalid_marker().to_owned(), err)
    }

    fn flatten_sequence(&self, items: &[LabeledValue], path: String, rows: &mut Vec<FlatRow>) {
        if items.is_empty() {
            rows.push(FlatRow::new(path, self.locale().no_items().to_owned()));
            return;
        }
        let nested = match self.config.mixed_sequences() {
            MixedSequencePolicy::FirstElement => items
                .iter()
                .find(|item| !item.is_null())
                .is_some_and(LabeledValue::is_nested),
            MixedSequencePolicy::PerElement => items.iter().any(LabeledValue::is_nested),
        };
        if nested {
            self.flatten_elements(items, &path, rows);
        } else {
            rows.push(self.joined_row(items, path));
        }
    }

    /// One indexed path per element: `path [1]`, `path [2]`, ...
    fn flatten_elements(&self, items: &[LabeledValue], path: &str, rows: &mut Vec<FlatRow>) {
        let policy = self.config.mixed_sequences();
        for (index, item) in items.iter().enumerate() {
            let element_path = indexed_path(path, index);
            match item {
                LabeledValue::Null => {}
                LabeledValue::Keyed(_) | LabeledValue::Sequence(_) => {
                    self.flatten_value(item, element_path, rows);
                }
                leaf if policy == MixedSequencePolicy::PerElement => {
                    self.flatten_value(leaf, element_path, rows);
                }
                leaf => rows.push(self.invalid_row(
                    element_path,
                    FormatError::MixedSequence {
                        index,
                        expected: ValueKind::Keyed,
                        found: leaf.kind(),
                    },
                )),
            }
        }
    }

    /// All leaf elements joined with `", "` into a single row.
    fn joined_row(&self, items: &[LabeledValue], path: String) -> FlatRow {
        let mut parts = Vec::with_capacity(items.len());
        let mut first_error = None;
        for (index, item) in items.iter().enumerate() {
            let part = match item {
                LabeledValue::Null => continue,
                LabeledValue::Scalar(scalar) => Ok(scalar.to_string()),
                LabeledValue::Temporal(timestamp) => timestamp.format(self.locale()),
                nested => Err(FormatError::MixedSequence {
                    index,
                    expected: ValueKind::Scalar,
                    found: nested.kind(),
                }),
            };
            match part {
                Ok(text) => parts.push(text),
                Err(err) => {
                    parts.push(self.locale().invalid_marker().to_owned());
                    first_error.get_or_insert(err);
                }
            }
        }
        let value = parts.join(", ");
        match first_error {
            Some(err) => FlatRow::invalid(path, value, err),
            None => FlatRow::new(path, value),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::config::ExclusionSet;

    fn projector() -> TreeProjector {
        TreeProjector::default()
    }

    fn pairs(rows: &[FlatRow]) -> Vec<(&str, &str)> {
        rows.iter().map(FlatRow::as_pair).collect()
    }

    #[test]
    fn null_projects_to_nothing() {
        assert!(projector().project(&LabeledValue::Null, "businessName", 0).is_empty());
    }

    #[test]
    fn excluded_label_projects_to_nothing_at_any_depth() {
        let value = LabeledValue::text("abc");
        assert!(projector().project(&value, "userId", 0).is_empty());
        assert!(projector().project(&value, "userId", 3).is_empty());
    }

    #[test]
    fn exclusion_uses_the_raw_key() {
        let value = LabeledValue::text("abc");
        let nodes = projector().project(&value, "UserId", 0);
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn boolean_renders_yes_no_with_humanized_label() {
        let nodes = projector().project(&LabeledValue::bool(true), "sameMenuForAll", 0);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].label(), "Same Menu For All");
        assert_eq!(nodes[0].content(), &NodeContent::Scalar("Yes".into()));
    }

    #[test]
    fn temporal_renders_locale_date() {
        let value = LabeledValue::instant(Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap());
        let nodes = projector().project(&value, "openingDate", 1);
        assert_eq!(nodes[0].label(), "Opening Date");
        assert_eq!(nodes[0].depth(), 1);
        assert_eq!(nodes[0].content(), &NodeContent::Date("3/9/2024, 8:00:00 AM".into()));
    }

    #[test]
    fn empty_sequence_is_one_no_items_node() {
        let nodes = projector().project(&LabeledValue::sequence([]), "menuItems", 0);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].content(), &NodeContent::NoItems("No items".into()));
    }

    #[test]
    fn sequence_elements_group_under_item_labels() {
        let value = LabeledValue::sequence([
            LabeledValue::keyed([("dishName", LabeledValue::text("Pozole"))]),
            LabeledValue::Null,
            LabeledValue::text("loose"),
        ]);
        let nodes = projector().project(&value, "dishes", 0);
        let NodeContent::List(entries) = nodes[0].content() else {
            panic!("expected a list");
        };
        assert_eq!(entries.len(), 2);
        let ListEntry::Item(item) = &entries[0] else {
            panic!("expected an item group");
        };
        assert_eq!(item.label(), "Item 1");
        assert_eq!(item.depth(), 1);
        assert_eq!(item.children()[0].label(), "Dish Name");
        assert_eq!(item.children()[0].depth(), 2);
        assert_eq!(entries[1], ListEntry::Bare("loose".into()));
    }

    #[test]
    fn keyed_children_sit_one_level_deeper() {
        let value = LabeledValue::keyed([
            ("city", LabeledValue::text("Austin")),
            ("id", LabeledValue::text("hidden")),
            ("suite", LabeledValue::Null),
        ]);
        let nodes = projector().project(&value, "location", 0);
        let children = nodes[0].children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].label(), "City");
        assert_eq!(children[0].depth(), 1);
    }

    #[test]
    fn malformed_temporal_is_an_invalid_node() {
        let value = LabeledValue::Temporal(Timestamp::Text("soon".into()));
        let nodes = projector().project(&value, "openingDate", 0);
        assert_eq!(
            nodes[0].content(),
            &NodeContent::Invalid(FormatError::InvalidTimestamp { raw: "soon".into() })
        );
    }

    #[test]
    fn flatten_nested_path() {
        let value = LabeledValue::keyed([("a", LabeledValue::keyed([("b", LabeledValue::int(5))]))]);
        let rows = projector().flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("a > b", "5")]);
    }

    #[test]
    fn flatten_with_prefix() {
        let value = LabeledValue::keyed([("b", LabeledValue::int(5))]);
        let rows = projector().flatten(&value, "a").unwrap();
        assert_eq!(pairs(&rows), [("a > b", "5")]);
    }

    #[test]
    fn flatten_rejects_non_keyed_root() {
        let err = projector().flatten(&LabeledValue::int(1), "").unwrap_err();
        assert_eq!(err, ShapeError::NotKeyed { found: ValueKind::Scalar });
    }

    #[test]
    fn flatten_scalar_booleans_keep_natural_form() {
        let value = LabeledValue::keyed([("delivery", LabeledValue::bool(false))]);
        let rows = projector().flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("delivery", "false")]);
    }

    #[test]
    fn flatten_nested_sequences_index_each_level() {
        let value = LabeledValue::keyed([(
            "grid",
            LabeledValue::sequence([
                LabeledValue::sequence([LabeledValue::int(1), LabeledValue::int(2)]),
                LabeledValue::sequence([]),
            ]),
        )]);
        let rows = projector().flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("grid [1]", "1, 2"), ("grid [2]", "No items")]);
    }

    #[test]
    fn first_element_decides_mixed_sequences() {
        let value = LabeledValue::keyed([(
            "mixed",
            LabeledValue::sequence([
                LabeledValue::keyed([("x", LabeledValue::int(1))]),
                LabeledValue::text("stray"),
            ]),
        )]);
        let rows = projector().flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("mixed [1] > x", "1"), ("mixed [2]", "[invalid]")]);
        assert_eq!(
            rows[1].error(),
            Some(&FormatError::MixedSequence {
                index: 1,
                expected: ValueKind::Keyed,
                found: ValueKind::Scalar,
            })
        );
    }

    #[test]
    fn scalar_first_marks_nested_elements_in_the_join() {
        let value = LabeledValue::keyed([(
            "mixed",
            LabeledValue::sequence([
                LabeledValue::text("a"),
                LabeledValue::keyed([("x", LabeledValue::int(1))]),
                LabeledValue::text("b"),
            ]),
        )]);
        let rows = projector().flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("mixed", "a, [invalid], b")]);
        assert!(rows[0].is_invalid());
    }

    #[test]
    fn per_element_policy_renders_each_kind() {
        let projector = TreeProjector::new(
            ProjectorConfig::default().with_mixed_sequences(MixedSequencePolicy::PerElement),
        );
        let value = LabeledValue::keyed([(
            "mixed",
            LabeledValue::sequence([
                LabeledValue::text("a"),
                LabeledValue::keyed([("x", LabeledValue::int(1))]),
            ]),
        )]);
        let rows = projector.flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("mixed [1]", "a"), ("mixed [2] > x", "1")]);
        assert!(rows.iter().all(|row| !row.is_invalid()));
    }

    #[test]
    fn null_elements_are_skipped_in_joins() {
        let value = LabeledValue::keyed([(
            "tags",
            LabeledValue::sequence([LabeledValue::Null, LabeledValue::text("a"), LabeledValue::Null]),
        )]);
        let rows = projector().flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("tags", "a")]);
    }

    #[test]
    fn custom_exclusions_replace_the_defaults() {
        let projector = TreeProjector::new(
            ProjectorConfig::default().with_exclusions(ExclusionSet::new(["secret"])),
        );
        let value = LabeledValue::keyed([
            ("id", LabeledValue::int(7)),
            ("secret", LabeledValue::text("x")),
        ]);
        let rows = projector.flatten(&value, "").unwrap();
        assert_eq!(pairs(&rows), [("id", "7")]);
    }
}
