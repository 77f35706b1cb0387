//! Navigation behaviour configuration
//!
//! Stores user preferences in `~/.config/keynav/config.yaml`. Every field is
//! optional in the file; missing ones take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scroll::ScrollStyle;

/// Which side of a link its number label goes on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkNumberPosition {
    Left,
    #[default]
    Right,
}

/// Behaviour toggles for keyboard navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Carry an expanded expando over to the next entry on list pages
    pub media_browse_mode: bool,
    /// Scroll an entry to the top when its expando is opened
    pub scroll_on_expando: bool,
    /// Viewport policy for adjacent, parent and top moves
    pub scroll_style: ScrollStyle,
    /// Number the links of the selected comment
    pub comments_link_numbers: bool,
    pub comments_link_number_position: LinkNumberPosition,
    /// Numbered links open in a new tab
    pub comments_link_new_tab: bool,
    /// After hiding a post, select the next one
    pub on_hide_move_down: bool,
    /// After voting on a post, select the next one
    pub on_vote_move_down: bool,
    /// After voting on a comment, select the next one
    pub on_vote_comment_move_down: bool,
    /// Require the go-mode key before destination keys
    pub use_go_mode: bool,
    /// New tabs opened by following links take focus
    pub follow_link_new_tab_focus: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            media_browse_mode: true,
            scroll_on_expando: true,
            scroll_style: ScrollStyle::Directional,
            comments_link_numbers: true,
            comments_link_number_position: LinkNumberPosition::Right,
            comments_link_new_tab: true,
            on_hide_move_down: true,
            on_vote_move_down: false,
            on_vote_comment_move_down: false,
            use_go_mode: true,
            follow_link_new_tab_focus: true,
        }
    }
}

impl NavConfig {
    /// Load config from the user's config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the user's config dir
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: NavConfig =
            serde_yaml::from_str("scroll_style: page\nuse_go_mode: false\n").unwrap();
        assert_eq!(config.scroll_style, ScrollStyle::Page);
        assert!(!config.use_go_mode);
        assert!(config.media_browse_mode);
        assert_eq!(
            config.comments_link_number_position,
            LinkNumberPosition::Right
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config: NavConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, NavConfig::default());
    }
}
