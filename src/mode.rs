//! Modal command state ("go mode")
//!
//! Go mode is a two-stage chord: the trigger key arms it, and the next
//! mode-dependent command fires and disarms it.

use std::fmt;

/// Identifier of a command mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    Go,
}

impl ModeId {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "go" | "gomode" | "go_mode" => Some(ModeId::Go),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModeId::Go => "go",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of pressing a mode trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    Entered(ModeId),
    Exited(ModeId),
    /// Modes are switched off by configuration
    Ignored,
}

/// Tracks the active mode
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    active: Option<ModeId>,
    enabled: bool,
}

impl ModeController {
    pub fn new(enabled: bool) -> Self {
        Self {
            active: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switching modes off also leaves any active mode
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.active = None;
        }
    }

    pub fn active(&self) -> Option<ModeId> {
        self.active
    }

    pub fn is_active(&self, mode: ModeId) -> bool {
        self.active == Some(mode)
    }

    /// Whether a command with this mode requirement may fire right now
    ///
    /// With modes disabled, mode-dependent commands fire directly.
    pub fn satisfies(&self, required: Option<ModeId>) -> bool {
        match required {
            None => true,
            Some(mode) => !self.enabled || self.active == Some(mode),
        }
    }

    /// Enter `mode`, or leave it if it is already active
    pub fn toggle(&mut self, mode: ModeId) -> ModeTransition {
        if !self.enabled {
            return ModeTransition::Ignored;
        }
        if self.active == Some(mode) {
            self.active = None;
            tracing::debug!("Leaving {} mode", mode);
            ModeTransition::Exited(mode)
        } else {
            self.active = Some(mode);
            tracing::debug!("Entering {} mode", mode);
            ModeTransition::Entered(mode)
        }
    }

    /// Leave the active mode, returning it
    pub fn exit(&mut self) -> Option<ModeId> {
        let left = self.active.take();
        if let Some(mode) = left {
            tracing::debug!("Leaving {} mode", mode);
        }
        left
    }
}
