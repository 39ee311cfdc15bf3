//! Projection configuration: excluded fields, locale strings, mixed-sequence handling.
//!
//! This module provides:
//!
//! - [`ExclusionSet`]: field names that never reach either projection
//! - [`Locale`]: the strings and date pattern used when rendering leaves
//! - [`LocaleProfile`]: zero-sized markers (`EnUs`, `EnGb`) bound to preset locales
//! - [`MixedSequencePolicy`]: how flattening treats arrays mixing leaves and objects
//! - [`ProjectorConfig`]: the bundle handed to [`crate::TreeProjector`]
//!
//! # Example
//!
//! ```rust
//! use formtree::{EnGb, ExclusionSet, LocaleProfile, ProjectorConfig};
//!
//! let config = ProjectorConfig::default()
//!     .with_exclusions(ExclusionSet::default().with("internalNotes"))
//!     .with_locale(EnGb::locale().with_yes_no("Ja", "Nein"));
//! assert!(config.exclusions().contains("internalNotes"));
//! assert!(config.exclusions().contains("userId"));
//! ```

use std::collections::BTreeSet;

use chrono::{FixedOffset, Offset, Utc};

/// Field names dropped from every projection unless configured otherwise.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 5] = ["id", "userId", "userEmail", "createdAt", "updatedAt"];

// =============================================================================
// ExclusionSet
// =============================================================================

/// Field names that never appear in display or export output.
///
/// Matching is exact and uses the raw field name, not its humanized label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Builds a set from arbitrary names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A set that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Adds a name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Removes a name.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.names.remove(name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_FIELDS)
    }
}

// =============================================================================
// Locale
// =============================================================================

/// Strings and date formatting used when rendering leaves.
///
/// Dates are formatted with a chrono `strftime` pattern after shifting the
/// instant to `offset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    yes: String,
    no: String,
    no_items: String,
    item_word: String,
    invalid_marker: String,
    date_time_format: String,
    offset: FixedOffset,
}

impl Locale {
    #[must_use]
    pub fn with_yes_no(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.yes = yes.into();
        self.no = no.into();
        self
    }

    /// Text shown for a present but empty sequence.
    #[must_use]
    pub fn with_no_items(mut self, no_items: impl Into<String>) -> Self {
        self.no_items = no_items.into();
        self
    }

    /// Word used for synthetic sequence-element labels (`"Item"` in `"Item 3"`).
    #[must_use]
    pub fn with_item_word(mut self, item_word: impl Into<String>) -> Self {
        self.item_word = item_word.into();
        self
    }

    /// Text written into a cell whose leaf failed to format.
    #[must_use]
    pub fn with_invalid_marker(mut self, marker: impl Into<String>) -> Self {
        self.invalid_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_date_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_time_format = pattern.into();
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn yes_no(&self, flag: bool) -> &str {
        if flag { &self.yes } else { &self.no }
    }

    pub fn no_items(&self) -> &str {
        &self.no_items
    }

    pub fn invalid_marker(&self) -> &str {
        &self.invalid_marker
    }

    pub fn date_time_format(&self) -> &str {
        &self.date_time_format
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Label for the sequence element at 1-based `position`.
    pub fn item_label(&self, position: usize) -> String {
        format!("{} {position}", self.item_word)
    }

    fn preset(date_time_format: &str) -> Self {
        Self {
            yes: "Yes".to_owned(),
            no: "No".to_owned(),
            no_items: "No items".to_owned(),
            item_word: "Item".to_owned(),
            invalid_marker: "[invalid]".to_owned(),
            date_time_format: date_time_format.to_owned(),
            offset: Utc.fix(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        EnUs::locale()
    }
}

// =============================================================================
// LocaleProfile trait and markers
// =============================================================================

/// Associates a marker type with a preset [`Locale`].
///
/// ```rust
/// use formtree::{Locale, LocaleProfile};
///
/// struct Kitchen;
///
/// impl LocaleProfile for Kitchen {
///     fn locale() -> Locale {
///         Locale::default().with_yes_no("Y", "N")
///     }
/// }
///
/// assert_eq!(Kitchen::locale().yes_no(false), "N");
/// ```
pub trait LocaleProfile {
    fn locale() -> Locale;
}

/// US English: `1/15/2024, 10:30:00 AM`.
#[derive(Clone, Copy, Debug)]
pub struct EnUs;

impl LocaleProfile for EnUs {
    fn locale() -> Locale {
        Locale::preset("%-m/%-d/%Y, %-I:%M:%S %p")
    }
}

/// British English: `15/01/2024, 10:30:00`.
#[derive(Clone, Copy, Debug)]
pub struct EnGb;

impl LocaleProfile for EnGb {
    fn locale() -> Locale {
        Locale::preset("%d/%m/%Y, %H:%M:%S")
    }
}

// =============================================================================
// MixedSequencePolicy
// =============================================================================

/// How flattening handles a sequence whose elements mix leaves with nested values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MixedSequencePolicy {
    /// The first non-null element picks the branch for the whole sequence.
    /// Elements that do not fit it are written as invalid cells.
    #[default]
    FirstElement,
    /// Every element is rendered according to its own kind.
    PerElement,
}

// =============================================================================
// ProjectorConfig
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectorConfig {
    exclusions: ExclusionSet,
    locale: Locale,
    mixed_sequences: MixedSequencePolicy,
}

impl ProjectorConfig {
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_mixed_sequences(mut self, policy: MixedSequencePolicy) -> Self {
        self.mixed_sequences = policy;
        self
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn mixed_sequences(&self) -> MixedSequencePolicy {
        self.mixed_sequences
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::value::Timestamp;

    fn sample() -> Timestamp {
        Timestamp::Instant(Utc.with_ymd_and_hms(2024, 1, 15, 22, 5, 9).unwrap())
    }

    #[test]
    fn default_exclusions_cover_record_metadata() {
        let set = ExclusionSet::default();
        for name in DEFAULT_EXCLUDED_FIELDS {
            assert!(set.contains(name), "{name} should be excluded");
        }
        assert!(!set.contains("businessName"));
        assert!(!set.contains("UserId"));
    }

    #[test]
    fn exclusion_set_builders() {
        let set = ExclusionSet::empty().with("secret").with("id").without("id");
        assert_eq!(set.iter().collect::<Vec<_>>(), ["secret"]);
        assert!(ExclusionSet::empty().is_empty());
    }

    #[test]
    fn en_us_formats_like_a_us_browser() {
        assert_eq!(sample().format(&EnUs::locale()).unwrap(), "1/15/2024, 10:05:09 PM");
    }

    #[test]
    fn en_gb_formats_day_first() {
        assert_eq!(sample().format(&EnGb::locale()).unwrap(), "15/01/2024, 22:05:09");
    }

    #[test]
    fn offset_shifts_the_rendered_time() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let locale = EnGb::locale().with_offset(offset);
        assert_eq!(sample().format(&locale).unwrap(), "16/01/2024, 00:05:09");
    }

    #[test]
    fn locale_strings() {
        let locale = Locale::default()
            .with_yes_no("Sí", "No")
            .with_item_word("Elemento")
            .with_no_items("Sin elementos");
        assert_eq!(locale.yes_no(true), "Sí");
        assert_eq!(locale.item_label(2), "Elemento 2");
        assert_eq!(locale.no_items(), "Sin elementos");
    }
}
