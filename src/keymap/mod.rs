//! Configurable keyboard command system
//!
//! This module provides a data-driven command registry that:
//! - Maps key chords to navigation commands
//! - Scopes commands to page contexts and to go mode
//! - Lets several commands share a chord (all matching ones fire)
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! RawKeyEvent → KeyChord → Registry::lookup(contexts, mode) → [CommandSpec] → Engine
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Embedded defaults plus ~/.config/keynav/keymap.yaml
//! let registry = Registry::with_specs(load_default_keymap());
//!
//! // Or a complete keymap from a file
//! let registry = Registry::with_specs(load_keymap_file(path)?);
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
mod event;
mod registry;
mod types;

pub use binding::{Action, CommandSpec, CustomHandler};
pub use command::{Command, LINK_SLOTS};
pub use config::{
    load_keymap_file, load_overrides_file, parse_key_string, parse_keymap_yaml,
    parse_overrides_yaml, BindingOverride, KeymapError,
};
pub use context::{ContextFilter, ContextSet, PageContext};
pub use defaults::{
    default_specs, embedded_specs, get_default_keymap_yaml, get_user_config_path,
    load_default_keymap, merge_overrides,
};
pub use event::{EventTarget, RawKeyEvent};
pub use registry::{ChordConflict, HelpRow, Registry};
pub use types::{key, ChordHash, KeyChord, Modifiers};
