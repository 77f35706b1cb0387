//! keynav - keyboard command dispatch and threaded-entry navigation
//!
//! This crate maps key chords to navigation commands scoped by page context
//! and a two-stage "go mode", and moves a selection through a flat,
//! depth-annotated list of entries (posts and nested comments). All page
//! effects go through the `Host` trait.

pub mod annotation;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod debounce;
pub mod document;
pub mod engine;
pub mod host;
pub mod keymap;
pub mod mode;
pub mod navigation;
pub mod replay;
pub mod scroll;
pub mod selection;
pub mod tracing;

// Re-export commonly used types
pub use config::NavConfig;
pub use document::{Document, Entry, EntryId, Link};
pub use engine::Engine;
pub use host::Host;
pub use keymap::{Command, KeyChord, RawKeyEvent, Registry};
