//! Page fixtures: a serialized snapshot of everything a host would report

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document::{Entry, EntryId, Link};
use crate::host::{Control, EntryUrl, Pagination};
use crate::keymap::{ContextSet, PageContext};
use crate::scroll::{EntryBounds, Viewport};

/// One entry of a fixture page with the host-side data attached to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureEntry {
    #[serde(flatten)]
    pub entry: Entry,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Controls the entry has, with whether each is currently active
    #[serde(default)]
    pub controls: BTreeMap<Control, bool>,
    #[serde(default)]
    pub urls: BTreeMap<EntryUrl, String>,
    #[serde(default)]
    pub rank: Option<usize>,
    #[serde(default)]
    pub bounds: Option<EntryBounds>,
}

impl FixtureEntry {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            links: Vec::new(),
            controls: BTreeMap::new(),
            urls: BTreeMap::new(),
            rank: None,
            bounds: None,
        }
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    pub fn with_control(mut self, control: Control, active: bool) -> Self {
        self.controls.insert(control, active);
        self
    }

    pub fn with_url(mut self, which: EntryUrl, url: impl Into<String>) -> Self {
        self.urls.insert(which, url.into());
        self
    }

    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_bounds(mut self, top: f64, bottom: f64) -> Self {
        self.bounds = Some(EntryBounds::new(top, bottom));
        self
    }
}

/// A whole page
///
/// ```yaml
/// contexts: [thread]
/// selected: p0
/// entries:
///   - { id: p0, kind: root }
///   - { id: c1, depth: 1, links: [{ href: "https://example.com", text: "x" }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub contexts: Vec<PageContext>,
    pub entries: Vec<FixtureEntry>,
    /// Entry selected before the first key
    pub selected: Option<EntryId>,
    pub user: Option<String>,
    pub subreddit: Option<String>,
    pub voting_blocked: bool,
    pub has_reply_form: bool,
    pub pagination: Pagination,
    /// Entries appended by each "load more"
    pub more: Vec<Vec<FixtureEntry>>,
    pub viewport: Option<Viewport>,
}

impl Fixture {
    pub fn new(contexts: &[PageContext], entries: Vec<FixtureEntry>) -> Self {
        Self {
            contexts: contexts.to_vec(),
            entries,
            ..Self::default()
        }
    }

    /// Fixture of bare entries
    pub fn from_entries(contexts: &[PageContext], entries: Vec<Entry>) -> Self {
        Self::new(contexts, entries.into_iter().map(FixtureEntry::new).collect())
    }

    pub fn context_set(&self) -> ContextSet {
        self.contexts.iter().copied().collect()
    }

    /// Read a fixture, as JSON for `.json` files and YAML otherwise
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let fixture = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON fixture {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML fixture {}", path.display()))?
        };

        tracing::debug!("Loaded fixture {}", path.display());
        Ok(fixture)
    }
}
