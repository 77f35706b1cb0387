//! Page contexts for scoped keybindings
//!
//! A command may be limited to the kinds of page it makes sense on, e.g.
//! "move to parent" only on threaded comment pages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tag describing the kind of page currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageContext {
    /// Flat list of posts
    #[serde(alias = "linklist")]
    List,
    /// Threaded comment page
    #[serde(alias = "comments")]
    Thread,
    /// User profile
    Profile,
    /// Search results
    Search,
    /// Messages
    Inbox,
}

impl PageContext {
    pub const ALL: [PageContext; 5] = [
        PageContext::List,
        PageContext::Thread,
        PageContext::Profile,
        PageContext::Search,
        PageContext::Inbox,
    ];

    const fn bit(self) -> u8 {
        match self {
            PageContext::List => 0b00001,
            PageContext::Thread => 0b00010,
            PageContext::Profile => 0b00100,
            PageContext::Search => 0b01000,
            PageContext::Inbox => 0b10000,
        }
    }

    /// Parse a context tag, accepting the older page-type names
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "list" | "linklist" => Some(PageContext::List),
            "thread" | "comments" => Some(PageContext::Thread),
            "profile" => Some(PageContext::Profile),
            "search" => Some(PageContext::Search),
            "inbox" => Some(PageContext::Inbox),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageContext::List => "list",
            PageContext::Thread => "thread",
            PageContext::Profile => "profile",
            PageContext::Search => "search",
            PageContext::Inbox => "inbox",
        }
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of page contexts as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextSet(u8);

impl ContextSet {
    pub const EMPTY: ContextSet = ContextSet(0);

    pub fn of(contexts: &[PageContext]) -> Self {
        contexts
            .iter()
            .fold(Self::EMPTY, |set, ctx| set.with(*ctx))
    }

    pub const fn with(self, ctx: PageContext) -> Self {
        ContextSet(self.0 | ctx.bit())
    }

    pub const fn contains(self, ctx: PageContext) -> bool {
        self.0 & ctx.bit() != 0
    }

    pub const fn intersects(self, other: ContextSet) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PageContext> {
        PageContext::ALL
            .into_iter()
            .filter(move |ctx| self.contains(*ctx))
    }
}

impl From<PageContext> for ContextSet {
    fn from(ctx: PageContext) -> Self {
        ContextSet::EMPTY.with(ctx)
    }
}

impl FromIterator<PageContext> for ContextSet {
    fn from_iter<I: IntoIterator<Item = PageContext>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, ctx| set.with(ctx))
    }
}

impl fmt::Display for ContextSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(PageContext::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Inclusion/exclusion scoping attached to a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextFilter {
    /// Command only applies where the page intersects this set
    pub include: Option<ContextSet>,
    /// Command never applies where the page intersects this set
    pub exclude: Option<ContextSet>,
}

impl ContextFilter {
    /// Matches every page
    pub const ANY: ContextFilter = ContextFilter {
        include: None,
        exclude: None,
    };

    pub fn include(contexts: &[PageContext]) -> Self {
        Self {
            include: Some(ContextSet::of(contexts)),
            exclude: None,
        }
    }

    pub fn excluding(mut self, contexts: &[PageContext]) -> Self {
        self.exclude = Some(ContextSet::of(contexts));
        self
    }

    /// Evaluate against the contexts of the current page
    pub fn matches(&self, current: ContextSet) -> bool {
        if let Some(include) = self.include {
            if !include.intersects(current) {
                return false;
            }
        }
        match self.exclude {
            Some(exclude) => !exclude.intersects(current),
            None => true,
        }
    }
}
