//! The page environment the engine drives
//!
//! Everything site-specific lives behind `Host`: finding controls, opening
//! URLs, scrolling, drawing labels and panels. Most methods default to a
//! no-op so an embedder only implements what its page supports. A control
//! the page lacks is reported as `None`/`false` and the action that needed it
//! silently does nothing.

use serde::{Deserialize, Serialize};

use crate::annotation::LinkAnnotation;
use crate::document::{Document, EntryId};
use crate::keymap::{ContextSet, HelpRow, RawKeyEvent};
use crate::scroll::{EntryBounds, Viewport};
use crate::selection::SelectionChange;

/// Clickable controls attached to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Upvote,
    Downvote,
    Hide,
    SavePost,
    SaveComment,
    /// Local copy of a comment
    SaveLocal,
    /// Inline reply button
    Reply,
    /// Reply link that leaves the page (e.g. in the inbox)
    ReplyElsewhere,
    /// Collapse/expand a comment's children
    ToggleChildren,
    /// The entry's own media expando
    Expando,
    /// Page-wide "show all media" toggle
    AllExpandos,
    GalleryPrevious,
    GalleryNext,
    /// The combined "link and comments" opener
    LinkAndComments,
    /// Same, opening in background tabs
    LinkAndCommentsBackground,
}

/// URLs an entry can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryUrl {
    /// Where a post links to
    PostLink,
    /// A post's comment page
    Comments,
    /// A comment's permalink
    Permalink,
    /// The community a post belongs to
    Subreddit,
}

/// Where to open a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    SameTab,
    NewTab { focus: bool },
}

/// Paging state of a list page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Further entries are appended in place instead of loading a new page
    pub never_ending: bool,
    /// Reaching the last entry should load more on its own
    pub auto_load: bool,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Requests for the comment navigator panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorRequest {
    Toggle,
    MoveUp,
    MoveDown,
}

/// Page environment consumed by the engine
pub trait Host: Document {
    // ========================================================================
    // Page state
    // ========================================================================

    /// Context tags of the current page
    fn contexts(&self) -> ContextSet;

    /// Another component is capturing keystrokes (e.g. a key-binding editor)
    fn capture_in_progress(&self) -> bool {
        false
    }

    fn logged_in_user(&self) -> Option<String> {
        None
    }

    fn prompt_login(&mut self) {}

    fn voting_blocked(&self) -> bool {
        false
    }

    fn notify_voting_blocked(&mut self) {}

    fn current_subreddit(&self) -> Option<String> {
        None
    }

    // ========================================================================
    // Entry controls and URLs
    // ========================================================================

    /// Whether the control is active; `None` if the entry doesn't have it
    fn control_state(&self, _entry: &EntryId, _control: Control) -> Option<bool> {
        None
    }

    /// Click a control; false if it's missing
    fn activate(&mut self, _entry: &EntryId, _control: Control) -> bool {
        false
    }

    /// Click the expando following the link at `link` in the entry's link list
    fn activate_link(&mut self, _entry: &EntryId, _link: usize) -> bool {
        false
    }

    fn entry_url(&self, _entry: &EntryId, _which: EntryUrl) -> Option<String> {
        None
    }

    /// 1-based rank of a post on a list page
    fn entry_rank(&self, _entry: &EntryId) -> Option<usize> {
        None
    }

    fn open_url(&mut self, url: &str, target: OpenTarget) -> anyhow::Result<()>;

    // ========================================================================
    // Scrolling
    // ========================================================================

    fn viewport(&self) -> Option<Viewport> {
        None
    }

    fn entry_bounds(&self, _entry: &EntryId) -> Option<EntryBounds> {
        None
    }

    fn scroll_to(&mut self, _top: f64) {}

    // ========================================================================
    // Selection feedback
    // ========================================================================

    fn selection_changed(&mut self, _change: &SelectionChange) {}

    fn annotate_link(&mut self, _annotation: &LinkAnnotation) {}

    /// Remove all link numbers from an entry
    fn clear_annotations(&mut self, _entry: &EntryId) {}

    // ========================================================================
    // Panels
    // ========================================================================

    fn show_help(&mut self, _rows: &[HelpRow]) {}

    fn hide_help(&mut self) {}

    fn show_go_panel(&mut self, _rows: &[HelpRow]) {}

    fn hide_go_panel(&mut self) {}

    /// Open or close the command line; receives the triggering key event
    fn toggle_command_line(&mut self, _event: Option<&RawKeyEvent>) {}

    fn comment_navigator(&mut self, _request: NavigatorRequest) {}

    /// Show the chain of parents of a comment
    fn show_parents(&mut self, _entry: &EntryId) {}

    /// Focus the page's own reply form; false if there is none
    fn focus_reply_form(&mut self) -> bool {
        false
    }

    // ========================================================================
    // Paging and media
    // ========================================================================

    fn pagination(&self) -> Pagination {
        Pagination::default()
    }

    /// Append the next batch of entries; false if nothing was loaded
    fn load_more(&mut self) -> bool {
        false
    }

    /// Media browsing is suspended (e.g. a lightbox is open)
    fn media_browse_halted(&self) -> bool {
        false
    }

    fn resize_media(&mut self, _entry: &EntryId, _delta: i32) {}

    /// Pan the most visible media element on the page
    fn move_media(&mut self, _dx: i32, _dy: i32) {}

    fn toggle_view_images(&mut self) {}
}
