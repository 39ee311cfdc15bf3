//! Display-mode output: a labeled tree that preserves the document's nesting.
//!
//! This module provides:
//!
//! - [`DisplayNode`]: one rendered field with its humanized label and depth
//! - [`NodeContent`]: what a node shows (a leaf string, a child table, a list)
//! - [`ListEntry`]: one element of a rendered sequence
//!
//! Nodes are plain snapshots. `Display` renders an indented outline with two
//! spaces per depth level, which is what the plain-text preview uses.

use std::fmt;

use crate::error::FormatError;

const INDENT: &str = "  ";

// =============================================================================
// NodeContent and ListEntry
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "type", content = "value", rename_all = "camelCase"))]
pub enum NodeContent {
    /// A formatted text, number or boolean.
    Scalar(String),
    /// A formatted date-time.
    Date(String),
    /// A present but empty sequence, carrying the locale's text for it.
    NoItems(String),
    /// The elements of a non-empty sequence.
    List(Vec<ListEntry>),
    /// The fields of a nested mapping.
    Table(Vec<DisplayNode>),
    /// A leaf that failed to format.
    Invalid(FormatError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "type", content = "value", rename_all = "camelCase"))]
pub enum ListEntry {
    /// A nested element grouped under a synthetic `Item N` label.
    Item(DisplayNode),
    /// A leaf element rendered without a label.
    Bare(String),
    /// A leaf element that failed to format.
    Invalid(FormatError),
}

// =============================================================================
// DisplayNode
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DisplayNode {
    label: String,
    depth: usize,
    content: NodeContent,
}

impl DisplayNode {
    pub(crate) fn new(label: String, depth: usize, content: NodeContent) -> Self {
        Self {
            label,
            depth,
            content,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// The leaf text for scalar, date and empty-sequence nodes.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Scalar(text) | NodeContent::Date(text) | NodeContent::NoItems(text) => {
                Some(text)
            }
            _ => None,
        }
    }

    /// Child nodes of a table node.
    pub fn children(&self) -> &[DisplayNode] {
        match &self.content {
            NodeContent::Table(children) => children,
            _ => &[],
        }
    }

    /// Finds a direct child by its rendered label.
    pub fn child(&self, label: &str) -> Option<&DisplayNode> {
        self.children().iter().find(|child| child.label == label)
    }

    /// Number of cells this node occupies once the same field is flattened.
    ///
    /// Leaves and empty sequences count one. A list of leaf elements joins
    /// into a single cell; a list of nested elements, like a table, sums its
    /// children.
    pub fn leaf_count(&self) -> usize {
        match &self.content {
            NodeContent::Scalar(_)
            | NodeContent::Date(_)
            | NodeContent::NoItems(_)
            | NodeContent::Invalid(_) => 1,
            NodeContent::Table(children) => children.iter().map(Self::leaf_count).sum(),
            NodeContent::List(entries) => {
                let nested: usize = entries
                    .iter()
                    .map(|entry| match entry {
                        ListEntry::Item(node) => node.leaf_count(),
                        ListEntry::Bare(_) | ListEntry::Invalid(_) => 0,
                    })
                    .sum();
                let has_items = entries
                    .iter()
                    .any(|entry| matches!(entry, ListEntry::Item(_)));
                if has_items { nested } else { 1 }
            }
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = INDENT.repeat(self.depth);
        match &self.content {
            NodeContent::Scalar(text) | NodeContent::Date(text) | NodeContent::NoItems(text) => {
                writeln!(f, "{indent}{}: {text}", self.label)
            }
            NodeContent::Invalid(err) => writeln!(f, "{indent}{}: <{err}>", self.label),
            NodeContent::Table(children) => {
                writeln!(f, "{indent}{}:", self.label)?;
                children.iter().try_for_each(|child| child.write_outline(f))
            }
            NodeContent::List(entries) => {
                writeln!(f, "{indent}{}:", self.label)?;
                let entry_indent = INDENT.repeat(self.depth + 1);
                for entry in entries {
                    match entry {
                        ListEntry::Item(node) => node.write_outline(f)?,
                        ListEntry::Bare(text) => writeln!(f, "{entry_indent}- {text}")?,
                        ListEntry::Invalid(err) => writeln!(f, "{entry_indent}- <{err}>")?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DisplayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f)
    }
}

// =============================================================================
// Tests
// =============================================================================
