//! Default keybindings
//!
//! The default keymap ships as keymap.yaml embedded at compile time. If that
//! ever fails to parse, the hardcoded `default_specs()` take over. User
//! overrides from the config dir are merged on top by command name.

use std::path::PathBuf;

use super::binding::CommandSpec;
use super::command::Command;
use super::config::{load_overrides_file, parse_keymap_yaml, BindingOverride};
use super::context::PageContext;
use super::types::{key, KeyChord, Modifiers};
use crate::mode::ModeId;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Get the user's keymap override path
pub fn get_user_config_path() -> Option<PathBuf> {
    crate::config_paths::keymap_file()
}

/// Load the embedded defaults merged with the user's overrides
///
/// A missing user file is silently skipped; a broken one is logged and
/// ignored.
pub fn load_default_keymap() -> Vec<CommandSpec> {
    let mut specs = embedded_specs();

    if let Some(user_path) = get_user_config_path() {
        if user_path.exists() {
            match load_overrides_file(&user_path) {
                Ok(overrides) => {
                    tracing::info!(
                        "Merging user keymap from {} ({} overrides)",
                        user_path.display(),
                        overrides.len()
                    );
                    specs = merge_overrides(specs, overrides);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load user keymap from {}: {}",
                        user_path.display(),
                        e
                    );
                }
            }
        }
    }

    specs
}

/// Parse the embedded keymap, falling back to the hardcoded table
pub fn embedded_specs() -> Vec<CommandSpec> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(specs) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", specs.len());
            specs
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_specs()
        }
    }
}

/// Merge user overrides into base specs
///
/// - An override naming a known command patches every spec of that command
/// - An override for a command not in the base is added if it carries a key
/// - Anything else is logged and dropped
pub fn merge_overrides(base: Vec<CommandSpec>, user: Vec<BindingOverride>) -> Vec<CommandSpec> {
    let mut result = base;

    for patch in user {
        let mut matched = false;
        for spec in result.iter_mut().filter(|s| s.name() == patch.command) {
            patch.apply(spec);
            matched = true;
        }
        if matched {
            continue;
        }

        match patch.to_spec() {
            Some(spec) => result.push(spec),
            None => tracing::warn!(
                "Keymap override for {:?} has no key and matches no default binding",
                patch.command
            ),
        }
    }

    result
}

/// Hardcoded default bindings, mirroring keymap.yaml
pub fn default_specs() -> Vec<CommandSpec> {
    use PageContext::*;

    let none = Modifiers::NONE;
    let shift = Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let alt = Modifiers::ALT;
    let shift_alt = Modifiers::SHIFT | Modifiers::ALT;

    let links = [List, Profile, Thread, Search];
    let votes = [List, Profile, Thread, Inbox, Search];

    let mut specs = vec![
        // ====================================================================
        // General
        // ====================================================================
        bind(key::SLASH, shift, Command::ToggleHelp),
        bind(ch('g'), none, Command::GoMode),
        bind(key::PERIOD, none, Command::ToggleCmdLine),
        bind(ch('h'), none, Command::Hide).include(&[List, Profile]),

        // ====================================================================
        // Movement
        // ====================================================================
        bind(ch('k'), none, Command::MoveUp).include(&[List, Profile, Search]),
        bind(ch('j'), none, Command::MoveDown).include(&[List, Profile, Search]),
        bind(ch('k'), none, Command::MoveUpComment).include(&[Thread, Inbox]),
        bind(ch('j'), none, Command::MoveDownComment).include(&[Thread, Inbox]),
        bind(ch('k'), shift, Command::MoveTop).include(&[List, Profile, Inbox, Search]),
        bind(ch('j'), shift, Command::MoveBottom).include(&[List, Profile, Inbox, Search]),
        bind(ch('k'), shift, Command::MoveUpSibling).include(&[Thread]),
        bind(ch('j'), shift, Command::MoveDownSibling).include(&[Thread]),
        bind(ch('k'), shift_alt, Command::MoveUpThread).include(&[Thread]),
        bind(ch('j'), shift_alt, Command::MoveDownThread).include(&[Thread]),
        bind(ch('t'), none, Command::MoveToTopComment).include(&[Thread]),
        bind(ch('p'), none, Command::MoveToParent).include(&[Thread]),
        bind(ch('p'), shift, Command::ShowParents).include(&[Thread]),

        // ====================================================================
        // Links and media
        // ====================================================================
        bind(key::ENTER, none, Command::FollowLink).include(&links),
        bind(key::ENTER, shift, Command::FollowLinkNewTab).include(&links),
        bind(ch('x'), none, Command::ToggleExpando),
        bind(key::EQUALS, none, Command::ImageSizeUp),
        bind(key::MINUS, none, Command::ImageSizeDown),
        bind(key::EQUALS, shift, Command::ImageSizeUpFine),
        bind(key::MINUS, shift, Command::ImageSizeDownFine),
        bind(key::UP, ctrl, Command::ImageMoveUp),
        bind(key::DOWN, ctrl, Command::ImageMoveDown),
        bind(key::LEFT, ctrl, Command::ImageMoveLeft),
        bind(key::RIGHT, ctrl, Command::ImageMoveRight),
        bind(key::BRACKET_LEFT, none, Command::PreviousGalleryImage),
        bind(key::BRACKET_RIGHT, none, Command::NextGalleryImage),
        bind(ch('x'), shift, Command::ToggleViewImages),
        bind(key::ENTER, none, Command::ToggleChildren).include(&[Thread, Inbox]),
        bind(ch('c'), none, Command::FollowComments).include(&[List, Profile, Search]),
        bind(ch('c'), shift, Command::FollowCommentsNewTab).include(&[List, Profile, Search]),
        bind(ch('l'), none, Command::FollowLinkAndCommentsNewTab).include(&[List, Profile]),
        bind(ch('l'), shift, Command::FollowLinkAndCommentsNewTabBg).include(&[List, Profile]),

        // ====================================================================
        // Entry actions
        // ====================================================================
        bind(ch('a'), none, Command::UpVote).include(&votes),
        bind(ch('z'), none, Command::DownVote).include(&votes),
        bind(ch('a'), shift, Command::UpVoteWithoutToggling).include(&votes),
        bind(ch('z'), shift, Command::DownVoteWithoutToggling).include(&votes),
        bind(ch('s'), none, Command::SavePost).include(&[List, Profile, Thread]),
        bind(ch('s'), shift, Command::SaveComment).include(&[Thread]),
        bind(ch('s'), none, Command::SaveRes).include(&[Thread, Profile]),
        bind(ch('r'), none, Command::Reply).include(&[Thread, Inbox]),
        bind(ch('y'), none, Command::FollowPermalink).include(&[Thread, Inbox]),
        bind(ch('y'), shift, Command::FollowPermalinkNewTab).include(&[Thread, Inbox]),
        bind(ch('r'), none, Command::FollowSubreddit).include(&[List, Profile, Search]),
        bind(ch('r'), shift, Command::FollowSubredditNewTab).include(&[List, Profile, Search]),

        // ====================================================================
        // Go mode destinations
        // ====================================================================
        go(ch('i'), none, Command::Inbox),
        go(ch('i'), shift, Command::InboxNewTab),
        go(ch('m'), none, Command::Modmail),
        go(ch('m'), shift, Command::ModmailNewTab),
        go(ch('u'), none, Command::Profile),
        go(ch('u'), shift, Command::ProfileNewTab),
        go(ch('f'), none, Command::FrontPage),
        go(ch('f'), shift, Command::SubredditFrontPage),
        go(ch('y'), alt, Command::Random),
        go(ch('n'), none, Command::NextPage).include(&[List, Profile, Inbox]),
        go(ch('p'), none, Command::PrevPage).include(&[List, Profile, Inbox]),
    ];

    // ========================================================================
    // Numbered links: 1-9 then 0 for the tenth
    // ========================================================================
    for n in 1..=10u8 {
        let digit = (n % 10) as u16;
        specs.push(bind(key::DIGIT_0 + digit, none, Command::Link(n)));
    }
    for n in 1..=10u8 {
        let digit = (n % 10) as u16;
        specs.push(bind(key::NUMPAD_0 + digit, none, Command::LinkNumPad(n)));
    }

    // ========================================================================
    // Comment navigator
    // ========================================================================
    specs.push(bind(ch('n'), none, Command::ToggleCommentNavigator).include(&[Thread]));
    specs.push(bind(key::UP, shift, Command::CommentNavigatorMoveUp).include(&[Thread]));
    specs.push(bind(key::DOWN, shift, Command::CommentNavigatorMoveDown).include(&[Thread]));

    specs
}

/// Key code of a letter, for the table above
const fn ch(c: char) -> u16 {
    key::LETTER_A + (c as u16 - 'a' as u16)
}

fn bind(code: u16, mods: Modifiers, command: Command) -> CommandSpec {
    CommandSpec::new(KeyChord::new(code, mods), command)
}

fn go(code: u16, mods: Modifiers, command: Command) -> CommandSpec {
    bind(code, mods, command).requires(ModeId::Go)
}
