//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into CommandSpecs (full keymaps) or
//! BindingOverrides (user files that patch the defaults by command name).

use std::path::Path;

use serde::Deserialize;

use super::binding::CommandSpec;
use super::context::{ContextSet, PageContext};
use super::types::{key, KeyChord, Modifiers};
use crate::mode::ModeId;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct BindingConfig {
    pub command: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub contexts: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A validated user change to the bindings of one command
#[derive(Debug, Clone, PartialEq)]
pub struct BindingOverride {
    pub command: String,
    pub chord: Option<KeyChord>,
    pub include: Option<ContextSet>,
    pub exclude: Option<ContextSet>,
    pub mode: Option<ModeId>,
    pub enabled: Option<bool>,
}

impl BindingOverride {
    /// Build a fresh spec for a command the base keymap doesn't know
    pub fn to_spec(&self) -> Option<CommandSpec> {
        let chord = self.chord?;
        let mut spec = CommandSpec::named(chord, &self.command);
        self.apply(&mut spec);
        Some(spec)
    }

    /// Patch an existing spec with every field this override sets
    pub fn apply(&self, spec: &mut CommandSpec) {
        if let Some(chord) = self.chord {
            spec.chord = chord;
        }
        if let Some(include) = self.include {
            spec.contexts.include = Some(include);
        }
        if let Some(exclude) = self.exclude {
            spec.contexts.exclude = Some(exclude);
        }
        if let Some(mode) = self.mode {
            spec.requires_mode = Some(mode);
        }
        if let Some(enabled) = self.enabled {
            spec.enabled = enabled;
        }
    }
}

/// Load a complete keymap from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<CommandSpec>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse a complete keymap; every entry must name a key
///
/// Unknown command names are not an error here: they become unresolved
/// specs that log when fired.
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<CommandSpec>, KeymapError> {
    parse_overrides_yaml(yaml)?
        .into_iter()
        .map(|entry| {
            entry
                .to_spec()
                .ok_or_else(|| KeymapError::MissingKey(entry.command.clone()))
        })
        .collect()
}

/// Load user overrides from a YAML file
pub fn load_overrides_file(path: &Path) -> Result<Vec<BindingOverride>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_overrides_yaml(&content)
}

/// Parse user overrides; only `command` is required per entry
pub fn parse_overrides_yaml(yaml: &str) -> Result<Vec<BindingOverride>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    config.bindings.iter().map(parse_binding).collect()
}

fn parse_binding(entry: &BindingConfig) -> Result<BindingOverride, KeymapError> {
    let chord = entry.key.as_deref().map(parse_key_string).transpose()?;
    let include = entry.contexts.as_deref().map(parse_contexts).transpose()?;
    let exclude = entry.exclude.as_deref().map(parse_contexts).transpose()?;
    let mode = entry
        .mode
        .as_deref()
        .map(|m| ModeId::parse(m).ok_or_else(|| KeymapError::InvalidMode(m.to_string())))
        .transpose()?;

    Ok(BindingOverride {
        command: entry.command.clone(),
        chord,
        include,
        exclude,
        mode,
        enabled: entry.enabled,
    })
}

fn parse_contexts(tags: &[String]) -> Result<ContextSet, KeymapError> {
    tags.iter()
        .map(|tag| PageContext::parse(tag).ok_or_else(|| KeymapError::InvalidContext(tag.clone())))
        .collect()
}

/// Parse a key string like "shift+alt+j" into a KeyChord
pub fn parse_key_string(key_str: &str) -> Result<KeyChord, KeymapError> {
    let trimmed = key_str.trim();
    if trimmed.is_empty() {
        return Err(KeymapError::InvalidKey(key_str.to_string()));
    }

    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in trimmed.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "ctrl" | "control" => {
                mods = mods | Modifiers::CTRL;
            }
            "shift" => {
                mods = mods | Modifiers::SHIFT;
            }
            "alt" | "option" | "opt" => {
                mods = mods | Modifiers::ALT;
            }
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                let (code, implied) = parse_key_code(part.trim())?;
                mods = mods | implied;
                key_part = Some(code);
            }
        }
    }

    let code = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(KeyChord::new(code, mods))
}

/// Parse a key name into a code plus any modifier the character implies
fn parse_key_code(name: &str) -> Result<(u16, Modifiers), KeymapError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let shifted = match c {
            '?' => Some(key::SLASH),
            '<' => Some(key::COMMA),
            '>' => Some(key::PERIOD),
            '_' => Some(key::MINUS),
            '{' => Some(key::BRACKET_LEFT),
            '}' => Some(key::BRACKET_RIGHT),
            '|' => Some(key::BACKSLASH),
            _ => None,
        };
        if let Some(code) = shifted {
            return Ok((code, Modifiers::SHIFT));
        }
        return key::for_char(c)
            .map(|code| (code, Modifiers::NONE))
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", name)));
    }

    let code = match name.to_lowercase().as_str() {
        "enter" | "return" => key::ENTER,
        "escape" | "esc" => key::ESCAPE,
        "space" => key::SPACE,
        "up" | "arrowup" => key::UP,
        "down" | "arrowdown" => key::DOWN,
        "left" | "arrowleft" => key::LEFT,
        "right" | "arrowright" => key::RIGHT,
        other => {
            let digit = other
                .strip_prefix("numpad")
                .or_else(|| other.strip_prefix("num"))
                .and_then(|d| d.parse::<u16>().ok())
                .filter(|d| *d <= 9);
            match digit {
                Some(d) => key::NUMPAD_0 + d,
                None => return Err(KeymapError::InvalidKey(format!("Unknown key: {}", name))),
            }
        }
    };
    Ok((code, Modifiers::NONE))
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidContext(String),
    InvalidMode(String),
    MissingKey(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidContext(c) => write!(f, "Invalid context: {}", c),
            KeymapError::InvalidMode(m) => write!(f, "Invalid mode: {}", m),
            KeymapError::MissingKey(c) => write!(f, "No key given for command: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}
