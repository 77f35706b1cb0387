//! Key script replay against a fixture page
//!
//! A script is a whitespace-separated list of steps:
//! - a key in keymap syntax (`j`, `shift+k`, `?`, `esc`)
//! - `:N` to type N into the command line
//! - `input:KEY` for a key pressed inside a text field

mod fixture;
mod host;

pub use fixture::{Fixture, FixtureEntry};
pub use host::{HostCall, ReplayHost};

use std::fmt;

use crate::document::EntryId;
use crate::engine::Engine;
use crate::keymap::{parse_key_string, EventTarget, KeymapError, RawKeyEvent};

/// One step of a key script
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Key(RawKeyEvent),
    CommandLine(String),
}

/// Parse a key script
pub fn parse_script(script: &str) -> Result<Vec<(String, Step)>, KeymapError> {
    script
        .split_whitespace()
        .map(|token| {
            let step = if let Some(number) = token.strip_prefix(':') {
                Step::CommandLine(number.to_string())
            } else if let Some(key) = token.strip_prefix("input:") {
                let event = RawKeyEvent::from_chord(parse_key_string(key)?);
                Step::Key(event.with_target(EventTarget::Input))
            } else {
                Step::Key(RawKeyEvent::from_chord(parse_key_string(token)?))
            };
            Ok((token.to_string(), step))
        })
        .collect()
}

/// Outcome of one replayed step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: String,
    pub handled: bool,
    pub selected: Option<EntryId>,
    pub calls: Vec<HostCall>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let selected = self
            .selected
            .as_ref()
            .map(EntryId::as_str)
            .unwrap_or("-");
        let handled = if self.handled { "" } else { " (ignored)" };
        write!(f, "{:<12} -> {}{}", self.step, selected, handled)?;
        for call in &self.calls {
            write!(f, "\n    {}", call)?;
        }
        Ok(())
    }
}

/// Run every step, reporting the selection and host calls after each
pub fn run(engine: &mut Engine, host: &mut ReplayHost, steps: &[(String, Step)]) -> Vec<StepReport> {
    if let Some(initial) = host.fixture().selected.clone() {
        engine.select_entry(Some(initial), host);
        host.take_calls();
    }

    steps
        .iter()
        .map(|(label, step)| {
            let handled = match step {
                Step::Key(event) => engine.handle_key_event(event, host),
                Step::CommandLine(input) => match engine.run_command_line(input, host) {
                    Ok(handled) => handled,
                    Err(e) => {
                        tracing::error!("Command line {:?} failed: {:#}", input, e);
                        false
                    }
                },
            };
            StepReport {
                step: label.clone(),
                handled,
                selected: engine.selected().cloned(),
                calls: host.take_calls(),
            }
        })
        .collect()
}
