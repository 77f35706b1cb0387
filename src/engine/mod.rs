//! The keyboard navigation engine
//!
//! `Engine` owns the command registry, go-mode state, the selection and the
//! link annotations. Key events come in through `handle_key_event`; every
//! effect on the page goes out through the `Host`.
//!
//! ```text
//! RawKeyEvent → KeyChord → Registry::lookup → execute() → moves / actions → Host
//! ```

mod actions;
mod moves;

use std::time::Instant;

use anyhow::Result;

use crate::annotation::{self, Annotations};
use crate::config::NavConfig;
use crate::debounce::Debounce;
use crate::document::{self, EntryId};
use crate::host::{Host, OpenTarget};
use crate::keymap::{
    key, load_default_keymap, Action, Command, CommandSpec, EventTarget, KeyChord, PageContext,
    RawKeyEvent, Registry,
};
use crate::mode::{ModeController, ModeId, ModeTransition};
use crate::scroll::{self, ScrollStyle};
use crate::selection::{ListenerId, SelectionChange, SelectionState};

/// Keyboard command dispatcher and navigation state
#[derive(Debug)]
pub struct Engine {
    config: NavConfig,
    registry: Registry,
    mode: ModeController,
    selection: SelectionState,
    debounce: Debounce,
    annotations: Annotations,
    /// Last expando state seen by media browsing, kept across entries without one
    media_browse_expanded: bool,
    help_visible: bool,
    enabled: bool,
    /// Time of the key event being dispatched
    key_time: Option<Instant>,
}

impl Engine {
    pub fn new(config: NavConfig, specs: Vec<CommandSpec>) -> Self {
        let mode = ModeController::new(config.use_go_mode);
        let registry = Registry::with_specs(specs);
        for conflict in registry.conflicts() {
            tracing::debug!(
                "{} fires {} together",
                conflict.chord,
                conflict.commands.join(" + ")
            );
        }

        Self {
            config,
            registry,
            mode,
            selection: SelectionState::new(),
            debounce: Debounce::default(),
            annotations: Annotations::new(),
            media_browse_expanded: false,
            help_visible: false,
            enabled: true,
            key_time: None,
        }
    }

    /// Engine using the user's config and keymap files
    pub fn load() -> Self {
        Self::new(NavConfig::load(), load_default_keymap())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Replace the behaviour settings; go mode follows `use_go_mode`
    ///
    /// Switching go mode off while it is active closes its panel first.
    pub fn set_config(&mut self, config: NavConfig, host: &mut dyn Host) {
        if !config.use_go_mode {
            self.leave_mode(host);
        }
        self.mode.set_enabled(config.use_go_mode);
        self.config = config;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn mode(&self) -> &ModeController {
        &self.mode
    }

    pub fn selected(&self) -> Option<&EntryId> {
        self.selection.current()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ========================================================================
    // Runtime configuration
    // ========================================================================

    /// Enable or disable a command by name
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let found = self.registry.set_enabled(name, enabled);
        if !found {
            tracing::warn!("Cannot toggle unknown command {:?}", name);
        }
        found
    }

    /// Move a command to another chord
    pub fn rebind(&mut self, name: &str, chord: KeyChord) -> bool {
        let found = self.registry.rebind(name, chord);
        if !found {
            tracing::warn!("Cannot rebind unknown command {:?}", name);
        }
        found
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        self.selection.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.selection.unsubscribe(id)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Resume handling keys, re-numbering the selected entry's links
    pub fn enable(&mut self, host: &mut dyn Host) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        let current = self.selection.current().cloned();
        self.update_annotations(current.as_ref(), host);
        tracing::info!("Keyboard navigation enabled");
    }

    /// Stop handling keys and tear down everything shown on the page
    pub fn disable(&mut self, host: &mut dyn Host) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.selection.clear_listeners();
        self.annotations.retract(host);
        self.leave_mode(host);
        if self.help_visible {
            self.help_visible = false;
            host.hide_help();
        }
        self.debounce.reset();
        tracing::info!("Keyboard navigation disabled");
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Handle one keydown; returns true if any command matched
    ///
    /// Matching commands run in registration order. If one fails, the error
    /// is logged and the rest of this dispatch is skipped.
    pub fn handle_key_event(&mut self, event: &RawKeyEvent, host: &mut dyn Host) -> bool {
        self.handle_key_event_at(event, host, Instant::now())
    }

    /// `handle_key_event` for a host that supplies its own clock
    ///
    /// `now` is when the key was pressed; it opens the recent-key window
    /// queried by `recent_key_press` and `tick`.
    pub fn handle_key_event_at(
        &mut self,
        event: &RawKeyEvent,
        host: &mut dyn Host,
        now: Instant,
    ) -> bool {
        self.key_time = Some(now);
        let handled = self.dispatch(event, host);
        self.key_time = None;
        handled
    }

    fn dispatch(&mut self, event: &RawKeyEvent, host: &mut dyn Host) -> bool {
        if !self.enabled || event.target != EventTarget::Body || host.capture_in_progress() {
            return false;
        }

        if event.code == key::ESCAPE && self.mode.active().is_some() {
            self.leave_mode(host);
            return true;
        }

        let chord = KeyChord::from_event(event);
        let contexts = host.contexts();
        let matched: Vec<(Action, Option<ModeId>)> = self
            .registry
            .lookup(&chord, contexts, &self.mode)
            .into_iter()
            .map(|spec| (spec.action.clone(), spec.requires_mode))
            .collect();

        if matched.is_empty() {
            tracing::trace!("No command for {} on {}", chord, contexts);
            return false;
        }

        let mut mode_command_ran = false;
        for (action, requires_mode) in &matched {
            tracing::debug!("{} -> {}", chord, action.name());
            match self.run_action(action, event, host) {
                Ok(()) => mode_command_ran |= requires_mode.is_some(),
                Err(e) => {
                    tracing::error!("Keyboard command {} failed: {:#}", action.name(), e);
                    break;
                }
            }
        }

        if mode_command_ran {
            self.leave_mode(host);
        }
        true
    }

    fn run_action(
        &mut self,
        action: &Action,
        event: &RawKeyEvent,
        host: &mut dyn Host,
    ) -> Result<()> {
        match action {
            Action::Builtin(command) => {
                let event = command.wants_event().then_some(event);
                self.execute(*command, event, host)
            }
            Action::Custom {
                handler,
                wants_event,
                ..
            } => handler(host, wants_event.then_some(event)),
            Action::Unresolved(name) => {
                tracing::warn!("No handler for keyboard command {:?}", name);
                Ok(())
            }
        }
    }

    /// Run a command directly, bypassing chord lookup and mode gating
    pub fn run_command(&mut self, command: Command, host: &mut dyn Host) -> Result<()> {
        self.execute(command, None, host)
    }

    /// Handle a number typed into the command line
    ///
    /// On thread pages opens that numbered link; on list pages selects the
    /// post with that rank and follows it. Returns false if the input isn't
    /// a number or the page has no use for one.
    pub fn run_command_line(&mut self, input: &str, host: &mut dyn Host) -> Result<bool> {
        let Ok(number) = input.trim().parse::<usize>() else {
            return Ok(false);
        };

        let contexts = host.contexts();
        if contexts.contains(PageContext::Thread) {
            if let Some(index) = number.checked_sub(1) {
                self.open_link(index, host)?;
            }
            Ok(true)
        } else if contexts.contains(PageContext::List) {
            self.follow_link_by_rank(number, host)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // ========================================================================
    // Go mode
    // ========================================================================

    fn toggle_go_mode(&mut self, host: &mut dyn Host) {
        match self.mode.toggle(ModeId::Go) {
            ModeTransition::Entered(mode) => {
                host.show_go_panel(&self.registry.mode_rows(mode));
            }
            ModeTransition::Exited(_) => host.hide_go_panel(),
            ModeTransition::Ignored => {}
        }
    }

    fn leave_mode(&mut self, host: &mut dyn Host) {
        if self.mode.exit().is_some() {
            host.hide_go_panel();
        }
    }

    fn toggle_help(&mut self, host: &mut dyn Host) {
        self.help_visible = !self.help_visible;
        if self.help_visible {
            host.show_help(&self.registry.help_rows());
        } else {
            host.hide_help();
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select an entry from outside (e.g. a click), scrolling per config
    pub fn select_entry(&mut self, id: Option<EntryId>, host: &mut dyn Host) -> bool {
        let style = self.config.scroll_style;
        self.apply_selection(id, Some(style), host)
    }

    /// Whether a navigation key was pressed within the recent-key window
    pub fn recent_key_press(&self, now: Instant) -> bool {
        self.debounce.is_pending(now)
    }

    /// Advance the recent-key timer; true once when the window closes
    pub fn tick(&mut self, now: Instant) -> bool {
        self.debounce.poll(now)
    }

    fn mark_recent_key(&mut self) {
        let now = self.key_time.unwrap_or_else(Instant::now);
        self.debounce.arm(now);
    }

    /// Make `target` current and scroll to it; true if the selection changed
    fn apply_selection(
        &mut self,
        target: Option<EntryId>,
        scroll: Option<ScrollStyle>,
        host: &mut dyn Host,
    ) -> bool {
        let changed = match self.selection.select(target.clone()) {
            Some(change) => {
                host.selection_changed(&change);
                self.update_annotations(change.current.as_ref(), host);
                true
            }
            None => false,
        };

        if let (Some(style), Some(id)) = (scroll, target.as_ref()) {
            self.scroll_to_entry(id, style, host);
        }
        changed
    }

    fn scroll_to_entry(&self, id: &EntryId, style: ScrollStyle, host: &mut dyn Host) {
        let (Some(viewport), Some(bounds)) = (host.viewport(), host.entry_bounds(id)) else {
            return;
        };
        if let Some(top) = scroll::resolve(style, viewport, bounds) {
            host.scroll_to(top);
        }
    }

    // ========================================================================
    // Numbered links
    // ========================================================================

    fn update_annotations(&mut self, current: Option<&EntryId>, host: &mut dyn Host) {
        self.annotations.retract(host);

        if !self.config.comments_link_numbers
            || !host.contexts().contains(PageContext::Thread)
        {
            return;
        }
        let Some(entry) = current else {
            return;
        };

        let links = host.links(entry);
        let cmdline_key = self
            .registry
            .display_for(Command::ToggleCmdLine)
            .unwrap_or_else(|| ".".to_string());
        self.annotations.annotate(
            entry,
            &links,
            self.config.comments_link_number_position,
            &cmdline_key,
            host,
        );
    }

    /// Open the `index`th (0-based) numbered link of the selected entry
    pub fn open_link(&mut self, index: usize, host: &mut dyn Host) -> Result<()> {
        if !self.config.comments_link_numbers {
            return Ok(());
        }
        let Some(entry) = self.selection.current().cloned() else {
            return Ok(());
        };

        let found = match self.annotations.link(&entry, index) {
            Some(link) => Some(link.clone()),
            None => annotation::eligible(&host.links(&entry))
                .into_iter()
                .nth(index),
        };
        let Some((position, link)) = found else {
            tracing::debug!("{} has no link #{}", entry, index + 1);
            return Ok(());
        };

        if link.expando_follows {
            host.activate_link(&entry, position);
            return Ok(());
        }

        let Some(href) = link.href else {
            return Ok(());
        };
        let target = if self.config.comments_link_new_tab {
            OpenTarget::NewTab {
                focus: self.config.follow_link_new_tab_focus,
            }
        } else {
            OpenTarget::SameTab
        };
        host.open_url(&href, target)
    }

    fn follow_link_by_rank(&mut self, rank: usize, host: &mut dyn Host) -> Result<()> {
        let entries = host.entries();
        let Some(entry) = entries.iter().find(|e| host.entry_rank(&e.id) == Some(rank)) else {
            tracing::debug!("No entry with rank {}", rank);
            return Ok(());
        };

        self.select_entry(Some(entry.id.clone()), host);
        self.follow_link(false, host)
    }

    fn current_index(&self, entries: &[document::Entry]) -> Option<usize> {
        self.selection
            .current()
            .and_then(|id| document::index_of(entries, id))
    }
}
