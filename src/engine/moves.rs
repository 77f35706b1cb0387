//! Selection moves: traversal result → selection, scrolling, media browse

use anyhow::Result;

use super::Engine;
use crate::document::EntryId;
use crate::host::{Control, Host};
use crate::keymap::PageContext;
use crate::navigation::{Direction, Traversal};
use crate::scroll::ScrollStyle;

impl Engine {
    /// Next/previous visible entry
    ///
    /// Moving down near the end of a list page with auto-loading pagination
    /// also loads the next page.
    pub(super) fn move_adjacent(&mut self, dir: Direction, host: &mut dyn Host) -> Result<()> {
        let entries = host.entries();
        let Some(from) = self.current_index(&entries) else {
            return Ok(());
        };

        let traversal = Traversal::new(&entries);
        let target = traversal.adjacent(dir, from);
        if let Some(to) = target {
            let style = if self.media_browse(&entries[from].id, &entries[to].id, host) {
                ScrollStyle::Top
            } else {
                self.config.scroll_style
            };
            self.move_to(&entries[to].id, style, host);
        }

        if dir.is_down() && self.needs_pagination(target.unwrap_or(from), entries.len(), host) {
            tracing::debug!("Reached the end of the list, loading the next page");
            self.next_page(host)?;
        }
        Ok(())
    }

    pub(super) fn move_sibling(&mut self, dir: Direction, host: &mut dyn Host) {
        self.move_with(ScrollStyle::Legacy, host, |t, from| t.sibling(dir, from));
    }

    /// Root of the next/previous thread
    ///
    /// Up from the first thread is an adjacent move and scrolls like one.
    pub(super) fn move_thread(&mut self, dir: Direction, host: &mut dyn Host) {
        let entries = host.entries();
        let Some(from) = self.current_index(&entries) else {
            return;
        };

        let Some(to) = Traversal::new(&entries).thread(dir, from) else {
            return;
        };
        let style = if entries[to].depth == 0 {
            ScrollStyle::Legacy
        } else {
            self.config.scroll_style
        };
        self.move_to(&entries[to].id, style, host);
    }

    pub(super) fn move_to_top_comment(&mut self, host: &mut dyn Host) {
        self.move_with(ScrollStyle::Legacy, host, |t, from| t.thread_root(from));
    }

    pub(super) fn move_to_parent(&mut self, host: &mut dyn Host) {
        let style = self.config.scroll_style;
        self.move_with(style, host, |t, from| t.parent(from));
    }

    /// First entry of the page; works without a selection
    pub(super) fn move_top(&mut self, host: &mut dyn Host) {
        let entries = host.entries();
        if let Some(first) = entries.first() {
            let style = self.config.scroll_style;
            self.move_to(&first.id, style, host);
        }
    }

    /// Last entry of the page; works without a selection
    pub(super) fn move_bottom(&mut self, host: &mut dyn Host) {
        let entries = host.entries();
        if let Some(last) = entries.last() {
            self.move_to(&last.id, ScrollStyle::Top, host);
        }
    }

    /// Run a traversal from the selected entry and select its result
    fn move_with<F>(&mut self, style: ScrollStyle, host: &mut dyn Host, pick: F)
    where
        F: FnOnce(&Traversal<'_>, usize) -> Option<usize>,
    {
        let entries = host.entries();
        let Some(from) = self.current_index(&entries) else {
            return;
        };

        let traversal = Traversal::new(&entries);
        if let Some(to) = pick(&traversal, from) {
            self.move_to(&entries[to].id, style, host);
        }
    }

    fn move_to(&mut self, id: &EntryId, style: ScrollStyle, host: &mut dyn Host) {
        tracing::trace!("Moving selection to {} ({:?})", id, style);
        self.apply_selection(Some(id.clone()), Some(style), host);
        self.mark_recent_key();
    }

    /// Carry an open expando from `from` over to `to`
    ///
    /// Returns true if `to`'s expando was opened, in which case the move
    /// scrolls it to the top.
    fn media_browse(&mut self, from: &EntryId, to: &EntryId, host: &mut dyn Host) -> bool {
        if from == to || !self.config.media_browse_mode || host.media_browse_halted() {
            return false;
        }
        let contexts = host.contexts();
        if !contexts.contains(PageContext::List) && !contexts.contains(PageContext::Search) {
            return false;
        }

        if let Some(expanded) = host.control_state(from, Control::Expando) {
            self.media_browse_expanded = expanded;
            if expanded {
                host.activate(from, Control::Expando);
            }
        }

        if self.media_browse_expanded && host.control_state(to, Control::Expando) == Some(false) {
            host.activate(to, Control::Expando);
            return true;
        }
        false
    }

    fn needs_pagination(&self, index: usize, len: usize, host: &dyn Host) -> bool {
        if !host.contexts().contains(PageContext::List) || index + 2 <= len {
            return false;
        }
        let pagination = host.pagination();
        pagination.never_ending && pagination.auto_load
    }
}

