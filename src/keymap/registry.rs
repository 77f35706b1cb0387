//! Registry storing command specs and resolving chords to handlers

use std::cell::OnceCell;
use std::collections::HashMap;

use super::binding::CommandSpec;
use super::command::Command;
use super::context::{ContextSet, PageContext};
use super::types::{ChordHash, KeyChord};
use crate::mode::{ModeController, ModeId};

/// One row of a shortcut listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRow {
    /// Key(s) to press, e.g. "G, I" for a go-mode destination
    pub keys: String,
    /// Command name
    pub command: String,
    pub description: String,
}

/// Several enabled specs that can fire together for one chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordConflict {
    pub chord: KeyChord,
    pub commands: Vec<String>,
}

/// The registry stores all command specs and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// All registered specs, in registration order
    specs: Vec<CommandSpec>,
    /// Chord hash -> indices of enabled specs, built on first lookup
    index: OnceCell<HashMap<ChordHash, Vec<usize>>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given specs
    pub fn with_specs(specs: Vec<CommandSpec>) -> Self {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec);
        }
        registry
    }

    /// Add a spec to the registry
    pub fn register(&mut self, spec: CommandSpec) {
        tracing::trace!("Registering {} on {}", spec.name(), spec.chord);
        self.specs.push(spec);
        self.index.take();
    }

    fn index(&self) -> &HashMap<ChordHash, Vec<usize>> {
        self.index.get_or_init(|| {
            let mut index: HashMap<ChordHash, Vec<usize>> = HashMap::new();
            for (idx, spec) in self.specs.iter().enumerate() {
                if spec.enabled {
                    index.entry(spec.chord.hash()).or_default().push(idx);
                }
            }
            tracing::debug!("Built command index ({} chords)", index.len());
            index
        })
    }

    /// Every enabled spec bound to `chord` whose context and mode
    /// requirements hold, in registration order
    pub fn lookup(
        &self,
        chord: &KeyChord,
        contexts: ContextSet,
        mode: &ModeController,
    ) -> Vec<&CommandSpec> {
        let Some(indices) = self.index().get(&chord.hash()) else {
            return Vec::new();
        };

        indices
            .iter()
            .map(|&idx| &self.specs[idx])
            .filter(|spec| spec.contexts.matches(contexts) && mode.satisfies(spec.requires_mode))
            .collect()
    }

    /// Enable or disable every spec with this name; returns whether any matched
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut found = false;
        for spec in self.specs.iter_mut().filter(|s| s.name() == name) {
            spec.enabled = enabled;
            found = true;
        }
        if found {
            self.index.take();
        }
        found
    }

    /// Move every spec with this name to a new chord
    pub fn rebind(&mut self, name: &str, chord: KeyChord) -> bool {
        let mut found = false;
        for spec in self.specs.iter_mut().filter(|s| s.name() == name) {
            spec.chord = chord;
            found = true;
        }
        if found {
            self.index.take();
        }
        found
    }

    /// Get all specs
    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    /// Get the spec for a command (first match)
    pub fn binding_for(&self, command: Command) -> Option<&CommandSpec> {
        self.specs.iter().find(|s| s.command() == Some(command))
    }

    /// Get display string for a command's chord
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|s| s.chord.display_string())
    }

    /// Chord that toggles the given mode
    fn trigger_for(&self, mode: ModeId) -> Option<&CommandSpec> {
        match mode {
            ModeId::Go => self.binding_for(Command::GoMode),
        }
    }

    /// Shortcut listing for the help overlay, numbered links excluded
    pub fn help_rows(&self) -> Vec<HelpRow> {
        self.specs
            .iter()
            .filter(|s| !s.is_numbered())
            .map(|spec| {
                let mut keys = spec.chord.display_string();
                if let Some(trigger) = spec.requires_mode.and_then(|m| self.trigger_for(m)) {
                    keys = format!("{}, {}", trigger.chord.display_string(), keys);
                }
                HelpRow {
                    keys,
                    command: spec.name(),
                    description: spec.description.clone(),
                }
            })
            .collect()
    }

    /// Enabled commands armed by a mode, for the mode panel
    pub fn mode_rows(&self, mode: ModeId) -> Vec<HelpRow> {
        self.specs
            .iter()
            .filter(|s| s.enabled && s.requires_mode == Some(mode) && !s.is_numbered())
            .map(|spec| HelpRow {
                keys: spec.chord.display_string(),
                command: spec.name(),
                description: spec.description.clone(),
            })
            .collect()
    }

    /// Chords where more than one enabled spec can fire at once
    ///
    /// Fan-out is legal; this only reports it so overlapping bindings can be
    /// reviewed.
    pub fn conflicts(&self) -> Vec<ChordConflict> {
        let mut conflicts = Vec::new();
        let mut hashes: Vec<_> = self.index().keys().copied().collect();
        hashes.sort();

        for hash in hashes {
            let indices = &self.index()[&hash];
            if indices.len() < 2 {
                continue;
            }

            let mut names: Vec<String> = Vec::new();
            for (i, &a) in indices.iter().enumerate() {
                for &b in &indices[i + 1..] {
                    if can_fire_together(&self.specs[a], &self.specs[b]) {
                        for idx in [a, b] {
                            let name = self.specs[idx].name();
                            if !names.contains(&name) {
                                names.push(name);
                            }
                        }
                    }
                }
            }

            if !names.is_empty() {
                conflicts.push(ChordConflict {
                    chord: self.specs[indices[0]].chord,
                    commands: names,
                });
            }
        }
        conflicts
    }
}

/// Whether some page and mode state satisfies both specs
///
/// A page is assumed to carry at most one context.
fn can_fire_together(a: &CommandSpec, b: &CommandSpec) -> bool {
    if a.requires_mode.is_some() && b.requires_mode.is_some() && a.requires_mode != b.requires_mode
    {
        return false;
    }

    std::iter::once(ContextSet::EMPTY)
        .chain(PageContext::ALL.into_iter().map(ContextSet::from))
        .any(|set| a.contexts.matches(set) && b.contexts.matches(set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;
    use PageContext::*;

    fn j() -> KeyChord {
        KeyChord::key(74)
    }

    fn k() -> KeyChord {
        KeyChord::key(75)
    }

    fn thread() -> ContextSet {
        ContextSet::of(&[Thread])
    }

    fn list() -> ContextSet {
        ContextSet::of(&[List])
    }

    #[test]
    fn test_lookup_by_context() {
        let registry = Registry::with_specs(vec![
            CommandSpec::new(j(), Command::MoveDown).include(&[List]),
            CommandSpec::new(j(), Command::MoveDownComment).include(&[Thread]),
        ]);
        let mode = ModeController::new(true);

        let found: Vec<_> = registry
            .lookup(&j(), list(), &mode)
            .iter()
            .map(|s| s.command())
            .collect();
        assert_eq!(found, vec![Some(Command::MoveDown)]);

        let found: Vec<_> = registry
            .lookup(&j(), thread(), &mode)
            .iter()
            .map(|s| s.command())
            .collect();
        assert_eq!(found, vec![Some(Command::MoveDownComment)]);

        assert!(registry.lookup(&k(), list(), &mode).is_empty());
    }

    #[test]
    fn test_fan_out_in_registration_order() {
        let enter = KeyChord::key(13);
        let registry = Registry::with_specs(vec![
            CommandSpec::new(enter, Command::FollowLink).include(&[List, Thread]),
            CommandSpec::new(enter, Command::ToggleChildren).include(&[Thread]),
        ]);
        let mode = ModeController::new(true);

        let found: Vec<_> = registry
            .lookup(&enter, thread(), &mode)
            .iter()
            .map(|s| s.command().unwrap())
            .collect();
        assert_eq!(found, vec![Command::FollowLink, Command::ToggleChildren]);
    }

    #[test]
    fn test_mode_gates_dependent_specs_only() {
        let i = KeyChord::key(73);
        let registry = Registry::with_specs(vec![
            CommandSpec::new(i, Command::Inbox).requires(ModeId::Go),
            CommandSpec::new(j(), Command::MoveDown),
        ]);
        let mut mode = ModeController::new(true);

        assert!(registry.lookup(&i, list(), &mode).is_empty());
        mode.toggle(ModeId::Go);
        assert_eq!(registry.lookup(&i, list(), &mode).len(), 1);
        // Mode-independent commands still fire while a mode is active
        assert_eq!(registry.lookup(&j(), list(), &mode).len(), 1);
    }

    #[test]
    fn test_disabled_mode_lets_dependent_specs_through() {
        let i = KeyChord::key(73);
        let registry =
            Registry::with_specs(vec![CommandSpec::new(i, Command::Inbox).requires(ModeId::Go)]);
        let mode = ModeController::new(false);
        assert_eq!(registry.lookup(&i, list(), &mode).len(), 1);
    }

    #[test]
    fn test_set_enabled_invalidates_index() {
        let mut registry = Registry::with_specs(vec![CommandSpec::new(j(), Command::MoveDown)]);
        let mode = ModeController::new(true);
        assert_eq!(registry.lookup(&j(), list(), &mode).len(), 1);

        assert!(registry.set_enabled("moveDown", false));
        assert!(registry.lookup(&j(), list(), &mode).is_empty());

        assert!(registry.set_enabled("moveDown", true));
        assert_eq!(registry.lookup(&j(), list(), &mode).len(), 1);

        assert!(!registry.set_enabled("noSuchCommand", false));
    }

    #[test]
    fn test_rebind() {
        let mut registry = Registry::with_specs(vec![CommandSpec::new(j(), Command::MoveDown)]);
        let mode = ModeController::new(true);
        let down = KeyChord::key(40);

        assert!(registry.rebind("moveDown", down));
        assert!(registry.lookup(&j(), list(), &mode).is_empty());
        assert_eq!(registry.lookup(&down, list(), &mode).len(), 1);
    }

    #[test]
    fn test_exact_modifier_matching() {
        let registry = Registry::with_specs(vec![CommandSpec::new(j(), Command::MoveDown)]);
        let mode = ModeController::new(true);
        let shift_j = KeyChord::new(74, Modifiers::SHIFT);
        assert!(registry.lookup(&shift_j, list(), &mode).is_empty());
    }

    #[test]
    fn test_help_rows_skip_numbered_and_prefix_mode_trigger() {
        let registry = Registry::with_specs(vec![
            CommandSpec::new(KeyChord::key(71), Command::GoMode),
            CommandSpec::new(KeyChord::key(73), Command::Inbox).requires(ModeId::Go),
            CommandSpec::new(KeyChord::key(49), Command::Link(1)),
        ]);

        let rows = registry.help_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].keys, "G, I");
        assert_eq!(rows[1].command, "inbox");

        let go_rows = registry.mode_rows(ModeId::Go);
        assert_eq!(go_rows.len(), 1);
        assert_eq!(go_rows[0].keys, "I");
    }

    #[test]
    fn test_conflicts_report_overlapping_scopes_only() {
        let s = KeyChord::key(83);
        let registry = Registry::with_specs(vec![
            CommandSpec::new(s, Command::SavePost).include(&[List, Profile, Thread]),
            CommandSpec::new(s, Command::SaveRes).include(&[Thread, Profile]),
            CommandSpec::new(j(), Command::MoveDown).include(&[List]),
            CommandSpec::new(j(), Command::MoveDownComment).include(&[Thread]),
        ]);

        let conflicts = registry.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].chord, s);
        assert_eq!(conflicts[0].commands, vec!["savePost", "saveRES"]);
    }
}
