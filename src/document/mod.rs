//! Navigable document model
//!
//! A page is a flat, pre-order sequence of entries. Nesting is encoded only
//! by depth: an entry's children are the deeper entries that directly follow
//! it. The engine re-reads the entries on every navigation call and never
//! mutates them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of an entry, stable across re-queries
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_string())
    }
}

/// Whether an entry is the page's own item (a post) or a nested reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Root,
    #[default]
    Nested,
}

/// One selectable node of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Nesting level, 0 for top-level items
    #[serde(default)]
    pub depth: usize,
    /// A collapsed entry hides all of its descendants
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(id: impl Into<String>, depth: usize) -> Self {
        Self {
            id: EntryId::new(id),
            depth,
            collapsed: false,
            kind: EntryKind::Nested,
        }
    }

    /// A root-kind (post) entry at depth 0
    pub fn root(id: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Root,
            ..Self::new(id, 0)
        }
    }

    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    pub fn is_root(&self) -> bool {
        self.kind == EntryKind::Root
    }
}

/// How a link inside an entry body is used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Ordinary inline link
    #[default]
    Inline,
    /// The button that toggles an expando
    ExpandoButton,
    /// Link revealed by a spoiler or similar
    MadeVisible,
    /// Image toggle
    ToggleImage,
    /// Explicitly excluded from keyboard navigation
    NoKeyNav,
}

/// An inline link of an entry's body, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: Option<String>,
    pub text: String,
    pub kind: LinkKind,
    /// Inside a code block or span
    pub in_code: bool,
    /// Wraps an image or other media
    pub has_media: bool,
    /// Directly followed by its own expando button
    pub expando_follows: bool,
}

impl Link {
    pub fn inline(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the link gets a number for keyboard opening
    pub fn is_numberable(&self) -> bool {
        if self.kind != LinkKind::Inline || self.in_code {
            return false;
        }
        let Some(href) = self.href.as_deref() else {
            return false;
        };
        if href.starts_with("javascript:") || href == "#" {
            return false;
        }
        !(self.text.trim().is_empty() && !self.has_media)
    }
}

/// Source of the entries and links of the current page
pub trait Document {
    /// All entries in document order
    fn entries(&self) -> Vec<Entry>;

    /// Inline links of one entry's body
    fn links(&self, _entry: &EntryId) -> Vec<Link> {
        Vec::new()
    }
}

impl Document for Vec<Entry> {
    fn entries(&self) -> Vec<Entry> {
        self.clone()
    }
}

/// Position of an entry in document order
pub fn index_of(entries: &[Entry], id: &EntryId) -> Option<usize> {
    entries.iter().position(|e| &e.id == id)
}
