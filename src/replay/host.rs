//! A `Host` backed by a fixture that records every effect it is asked for

use std::fmt;

use anyhow::Result;

use super::fixture::{Fixture, FixtureEntry};
use crate::annotation::LinkAnnotation;
use crate::document::{Document, Entry, EntryId, Link};
use crate::host::{Control, EntryUrl, Host, NavigatorRequest, OpenTarget, Pagination};
use crate::keymap::{ContextSet, HelpRow, RawKeyEvent};
use crate::scroll::{EntryBounds, Viewport};
use crate::selection::SelectionChange;

/// One observable effect on the page
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Open { url: String, target: OpenTarget },
    Activate { entry: EntryId, control: Control },
    ActivateLink { entry: EntryId, link: usize },
    ScrollTo(f64),
    Annotate { entry: EntryId, link: usize, label: String },
    ClearAnnotations(EntryId),
    ShowHelp(usize),
    HideHelp,
    ShowGoPanel(Vec<String>),
    HideGoPanel,
    ToggleCommandLine,
    CommentNavigator(NavigatorRequest),
    ShowParents(EntryId),
    FocusReplyForm,
    PromptLogin,
    NotifyVotingBlocked,
    LoadMore,
    ResizeMedia { entry: EntryId, delta: i32 },
    MoveMedia { dx: i32, dy: i32 },
    ToggleViewImages,
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCall::Open { url, target } => match target {
                OpenTarget::SameTab => write!(f, "open {}", url),
                OpenTarget::NewTab { focus: true } => write!(f, "open {} (new tab)", url),
                OpenTarget::NewTab { focus: false } => {
                    write!(f, "open {} (background tab)", url)
                }
            },
            HostCall::Activate { entry, control } => write!(f, "click {:?} on {}", control, entry),
            HostCall::ActivateLink { entry, link } => {
                write!(f, "click expando after link {} of {}", link, entry)
            }
            HostCall::ScrollTo(top) => write!(f, "scroll to {}", top),
            HostCall::Annotate { entry, link, label } => {
                write!(f, "label link {} of {} as {:?}", link, entry, label)
            }
            HostCall::ClearAnnotations(entry) => write!(f, "clear labels of {}", entry),
            HostCall::ShowHelp(rows) => write!(f, "show help ({} shortcuts)", rows),
            HostCall::HideHelp => f.write_str("hide help"),
            HostCall::ShowGoPanel(commands) => write!(f, "show go panel: {}", commands.join(", ")),
            HostCall::HideGoPanel => f.write_str("hide go panel"),
            HostCall::ToggleCommandLine => f.write_str("toggle command line"),
            HostCall::CommentNavigator(request) => write!(f, "comment navigator {:?}", request),
            HostCall::ShowParents(entry) => write!(f, "show parents of {}", entry),
            HostCall::FocusReplyForm => f.write_str("focus reply form"),
            HostCall::PromptLogin => f.write_str("prompt login"),
            HostCall::NotifyVotingBlocked => f.write_str("voting blocked"),
            HostCall::LoadMore => f.write_str("load more"),
            HostCall::ResizeMedia { entry, delta } => {
                write!(f, "resize media of {} by {}", entry, delta)
            }
            HostCall::MoveMedia { dx, dy } => write!(f, "move media by ({}, {})", dx, dy),
            HostCall::ToggleViewImages => f.write_str("toggle view images"),
        }
    }
}

/// Fixture-driven host
///
/// Clicking a control flips its state; toggling children also flips the
/// entry's collapsed flag so later moves see the new tree.
#[derive(Debug, Clone, Default)]
pub struct ReplayHost {
    fixture: Fixture,
    calls: Vec<HostCall>,
    /// Another component owns the keyboard
    pub capturing: bool,
}

impl ReplayHost {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture,
            calls: Vec::new(),
            capturing: false,
        }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub fn fixture_mut(&mut self) -> &mut Fixture {
        &mut self.fixture
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Recorded calls since the last drain
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// URLs opened so far, in order
    pub fn opened(&self) -> Vec<(String, OpenTarget)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Open { url, target } => Some((url.clone(), *target)),
                _ => None,
            })
            .collect()
    }

    fn entry(&self, id: &EntryId) -> Option<&FixtureEntry> {
        self.fixture.entries.iter().find(|e| &e.entry.id == id)
    }

    fn entry_mut(&mut self, id: &EntryId) -> Option<&mut FixtureEntry> {
        self.fixture.entries.iter_mut().find(|e| &e.entry.id == id)
    }

    fn record(&mut self, call: HostCall) {
        tracing::trace!("host: {}", call);
        self.calls.push(call);
    }
}

impl Document for ReplayHost {
    fn entries(&self) -> Vec<Entry> {
        self.fixture.entries.iter().map(|e| e.entry.clone()).collect()
    }

    fn links(&self, entry: &EntryId) -> Vec<Link> {
        self.entry(entry).map(|e| e.links.clone()).unwrap_or_default()
    }
}

impl Host for ReplayHost {
    fn contexts(&self) -> ContextSet {
        self.fixture.context_set()
    }

    fn capture_in_progress(&self) -> bool {
        self.capturing
    }

    fn logged_in_user(&self) -> Option<String> {
        self.fixture.user.clone()
    }

    fn prompt_login(&mut self) {
        self.record(HostCall::PromptLogin);
    }

    fn voting_blocked(&self) -> bool {
        self.fixture.voting_blocked
    }

    fn notify_voting_blocked(&mut self) {
        self.record(HostCall::NotifyVotingBlocked);
    }

    fn current_subreddit(&self) -> Option<String> {
        self.fixture.subreddit.clone()
    }

    fn control_state(&self, entry: &EntryId, control: Control) -> Option<bool> {
        self.entry(entry)?.controls.get(&control).copied()
    }

    fn activate(&mut self, entry: &EntryId, control: Control) -> bool {
        let Some(target) = self.entry_mut(entry) else {
            return false;
        };
        let Some(active) = target.controls.get_mut(&control) else {
            return false;
        };
        *active = !*active;
        if control == Control::ToggleChildren {
            target.entry.collapsed = !target.entry.collapsed;
        }
        self.record(HostCall::Activate {
            entry: entry.clone(),
            control,
        });
        true
    }

    fn activate_link(&mut self, entry: &EntryId, link: usize) -> bool {
        let exists = self.entry(entry).is_some_and(|e| link < e.links.len());
        if exists {
            self.record(HostCall::ActivateLink {
                entry: entry.clone(),
                link,
            });
        }
        exists
    }

    fn entry_url(&self, entry: &EntryId, which: EntryUrl) -> Option<String> {
        self.entry(entry)?.urls.get(&which).cloned()
    }

    fn entry_rank(&self, entry: &EntryId) -> Option<usize> {
        self.entry(entry)?.rank
    }

    fn open_url(&mut self, url: &str, target: OpenTarget) -> Result<()> {
        self.record(HostCall::Open {
            url: url.to_string(),
            target,
        });
        Ok(())
    }

    fn viewport(&self) -> Option<Viewport> {
        self.fixture.viewport
    }

    fn entry_bounds(&self, entry: &EntryId) -> Option<EntryBounds> {
        self.entry(entry)?.bounds
    }

    fn scroll_to(&mut self, top: f64) {
        if let Some(viewport) = self.fixture.viewport.as_mut() {
            viewport.top = top;
        }
        self.record(HostCall::ScrollTo(top));
    }

    fn selection_changed(&mut self, change: &SelectionChange) {
        tracing::trace!("host: selection {:?} -> {:?}", change.previous, change.current);
    }

    fn annotate_link(&mut self, annotation: &LinkAnnotation) {
        self.record(HostCall::Annotate {
            entry: annotation.entry.clone(),
            link: annotation.link,
            label: annotation.label.clone(),
        });
    }

    fn clear_annotations(&mut self, entry: &EntryId) {
        self.record(HostCall::ClearAnnotations(entry.clone()));
    }

    fn show_help(&mut self, rows: &[HelpRow]) {
        self.record(HostCall::ShowHelp(rows.len()));
    }

    fn hide_help(&mut self) {
        self.record(HostCall::HideHelp);
    }

    fn show_go_panel(&mut self, rows: &[HelpRow]) {
        let commands = rows.iter().map(|row| row.command.clone()).collect();
        self.record(HostCall::ShowGoPanel(commands));
    }

    fn hide_go_panel(&mut self) {
        self.record(HostCall::HideGoPanel);
    }

    fn toggle_command_line(&mut self, _event: Option<&RawKeyEvent>) {
        self.record(HostCall::ToggleCommandLine);
    }

    fn comment_navigator(&mut self, request: NavigatorRequest) {
        self.record(HostCall::CommentNavigator(request));
    }

    fn show_parents(&mut self, entry: &EntryId) {
        self.record(HostCall::ShowParents(entry.clone()));
    }

    fn focus_reply_form(&mut self) -> bool {
        if self.fixture.has_reply_form {
            self.record(HostCall::FocusReplyForm);
        }
        self.fixture.has_reply_form
    }

    fn pagination(&self) -> Pagination {
        self.fixture.pagination.clone()
    }

    fn load_more(&mut self) -> bool {
        self.record(HostCall::LoadMore);
        if self.fixture.more.is_empty() {
            return false;
        }
        let batch = self.fixture.more.remove(0);
        self.fixture.entries.extend(batch);
        true
    }

    fn resize_media(&mut self, entry: &EntryId, delta: i32) {
        self.record(HostCall::ResizeMedia {
            entry: entry.clone(),
            delta,
        });
    }

    fn move_media(&mut self, dx: i32, dy: i32) {
        self.record(HostCall::MoveMedia { dx, dy });
    }

    fn toggle_view_images(&mut self) {
        self.record(HostCall::ToggleViewImages);
    }
}
