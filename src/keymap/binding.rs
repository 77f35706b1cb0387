//! CommandSpec: one bindable action with its chord, scoping and handler

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::command::Command;
use super::context::{ContextFilter, PageContext};
use super::event::RawKeyEvent;
use super::types::KeyChord;
use crate::host::Host;
use crate::mode::ModeId;

/// Handler supplied by an embedder instead of a built-in command
///
/// Receives the triggering key event only if its spec asked for it.
pub type CustomHandler = Rc<dyn Fn(&mut dyn Host, Option<&RawKeyEvent>) -> anyhow::Result<()>>;

/// What runs when a spec fires
#[derive(Clone)]
pub enum Action {
    /// A built-in command executed by the engine
    Builtin(Command),
    /// An embedder-supplied closure
    Custom {
        name: String,
        handler: CustomHandler,
        /// Pass the raw key event to the handler
        wants_event: bool,
    },
    /// A name that resolved to nothing; firing it only logs a warning
    Unresolved(String),
}

impl Action {
    /// Resolve a command name against the built-in command table
    ///
    /// Unknown names are reported once here and become a warning no-op.
    pub fn resolve(name: &str) -> Self {
        match Command::from_str(name) {
            Ok(command) => Action::Builtin(command),
            Err(()) => {
                tracing::error!("No handler for keyboard command {:?}", name);
                Action::Unresolved(name.to_string())
            }
        }
    }

    pub fn name(&self) -> String {
        match self {
            Action::Builtin(command) => command.name(),
            Action::Custom { name, .. } => name.clone(),
            Action::Unresolved(name) => name.clone(),
        }
    }

    pub fn command(&self) -> Option<Command> {
        match self {
            Action::Builtin(command) => Some(*command),
            _ => None,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Builtin(command) => f.debug_tuple("Builtin").field(command).finish(),
            Action::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
            Action::Unresolved(name) => f.debug_tuple("Unresolved").field(name).finish(),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Builtin(a), Action::Builtin(b)) => a == b,
            (
                Action::Custom {
                    name: a,
                    handler: ha,
                    wants_event: wa,
                },
                Action::Custom {
                    name: b,
                    handler: hb,
                    wants_event: wb,
                },
            ) => a == b && wa == wb && Rc::ptr_eq(ha, hb),
            (Action::Unresolved(a), Action::Unresolved(b)) => a == b,
            _ => false,
        }
    }
}

/// A single bindable action
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    /// The trigger
    pub chord: KeyChord,
    /// What to run
    pub action: Action,
    /// Page scoping
    pub contexts: ContextFilter,
    /// Only fires while this mode is active
    pub requires_mode: Option<ModeId>,
    /// Disabled specs never match
    pub enabled: bool,
    /// Help text
    pub description: String,
}

impl CommandSpec {
    /// Spec for a built-in command, matching every page
    pub fn new(chord: KeyChord, command: Command) -> Self {
        Self {
            chord,
            action: Action::Builtin(command),
            contexts: ContextFilter::ANY,
            requires_mode: None,
            enabled: true,
            description: command.description(),
        }
    }

    /// Spec resolved by name against the built-in command table
    pub fn named(chord: KeyChord, name: &str) -> Self {
        let action = Action::resolve(name);
        let description = action
            .command()
            .map(Command::description)
            .unwrap_or_default();
        Self {
            chord,
            action,
            contexts: ContextFilter::ANY,
            requires_mode: None,
            enabled: true,
            description,
        }
    }

    /// Spec with an explicit handler closure
    pub fn custom<F>(chord: KeyChord, name: &str, handler: F) -> Self
    where
        F: Fn(&mut dyn Host, Option<&RawKeyEvent>) -> anyhow::Result<()> + 'static,
    {
        Self {
            chord,
            action: Action::Custom {
                name: name.to_string(),
                handler: Rc::new(handler),
                wants_event: false,
            },
            contexts: ContextFilter::ANY,
            requires_mode: None,
            enabled: true,
            description: String::new(),
        }
    }

    /// Restrict to pages carrying one of these contexts (builder pattern)
    pub fn include(mut self, contexts: &[PageContext]) -> Self {
        self.contexts.include = Some(super::context::ContextSet::of(contexts));
        self
    }

    /// Never fire on pages carrying one of these contexts
    pub fn exclude(mut self, contexts: &[PageContext]) -> Self {
        self.contexts = self.contexts.excluding(contexts);
        self
    }

    /// Only fire while `mode` is active
    pub fn requires(mut self, mode: ModeId) -> Self {
        self.requires_mode = Some(mode);
        self
    }

    /// Hand the raw key event to a custom handler; no effect on built-ins
    pub fn with_event(mut self) -> Self {
        if let Action::Custom { wants_event, .. } = &mut self.action {
            *wants_event = true;
        }
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> String {
        self.action.name()
    }

    pub fn command(&self) -> Option<Command> {
        self.action.command()
    }

    /// "Open link N" commands
    pub fn is_numbered(&self) -> bool {
        self.command().is_some_and(Command::is_numbered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;

    #[test]
    fn test_named_resolves_builtin() {
        let spec = CommandSpec::named(KeyChord::key(74), "moveDown");
        assert_eq!(spec.command(), Some(Command::MoveDown));
        assert!(!spec.description.is_empty());
    }

    #[test]
    fn test_named_unknown_becomes_unresolved() {
        let spec = CommandSpec::named(KeyChord::key(74), "doTheThing");
        assert_eq!(spec.action, Action::Unresolved("doTheThing".to_string()));
        assert_eq!(spec.name(), "doTheThing");
        assert!(spec.command().is_none());
    }

    #[test]
    fn test_builder() {
        let spec = CommandSpec::new(KeyChord::new(74, Modifiers::SHIFT), Command::MoveBottom)
            .include(&[PageContext::List])
            .exclude(&[PageContext::Search])
            .requires(ModeId::Go)
            .disabled();
        assert!(spec.contexts.include.is_some());
        assert!(spec.contexts.exclude.is_some());
        assert_eq!(spec.requires_mode, Some(ModeId::Go));
        assert!(!spec.enabled);
    }

    #[test]
    fn test_numbered() {
        assert!(CommandSpec::new(KeyChord::key(49), Command::Link(1)).is_numbered());
        assert!(!CommandSpec::new(KeyChord::key(74), Command::MoveDown).is_numbered());
    }
}
