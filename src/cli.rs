//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Replaying a key script against a fixture page
//! - Overriding the behaviour config and keymap files
//! - Listing the active shortcuts

use clap::Parser;
use std::path::PathBuf;

/// Replay keyboard navigation against a page fixture
#[derive(Parser, Debug)]
#[command(
    name = "keynav",
    version,
    about = "Replay keyboard navigation against a page fixture"
)]
pub struct CliArgs {
    /// Page fixture (YAML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    /// Keys to press, e.g. "j j shift+k :3"
    #[arg(short, long, value_name = "SCRIPT", default_value = "")]
    pub keys: String,

    /// Behaviour config instead of ~/.config/keynav/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keymap overrides instead of ~/.config/keynav/keymap.yaml
    #[arg(long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Print the shortcut listing and exit
    #[arg(short, long)]
    pub list: bool,
}

/// What the tool should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Print every shortcut
    ListKeys,
    /// Replay a script against a fixture
    Replay { fixture: PathBuf, script: String },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: RunMode,
    pub config_path: Option<PathBuf>,
    pub keymap_path: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let mode = if self.list {
            RunMode::ListKeys
        } else {
            let fixture = self
                .fixture
                .ok_or_else(|| "A --fixture is required unless --list is given".to_string())?;
            RunMode::Replay {
                fixture,
                script: self.keys,
            }
        };

        Ok(RunConfig {
            mode,
            config_path: self.config,
            keymap_path: self.keymap,
        })
    }
}
