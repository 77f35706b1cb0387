//! Configuration tests
//!
//! Config paths, behaviour config files and keymap files.

mod common;

use common::*;
use keynav::config::{LinkNumberPosition, NavConfig};
use keynav::config_paths;
use keynav::engine::Engine;
use keynav::keymap::{
    embedded_specs, key, load_keymap_file, load_overrides_file, merge_overrides, Command,
    ContextSet, KeyChord, KeymapError, PageContext,
};
use keynav::scroll::ScrollStyle;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("keynav"));
    }
}

#[test]
fn test_config_files_live_in_config_dir() {
    let (Some(dir), Some(config), Some(keymap)) = (
        config_paths::config_dir(),
        config_paths::config_file(),
        config_paths::keymap_file(),
    ) else {
        return;
    };
    assert_eq!(config, dir.join("config.yaml"));
    assert_eq!(keymap, dir.join("keymap.yaml"));
}

// ========================================================================
// NavConfig Tests
// ========================================================================

#[test]
fn test_nav_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = NavConfig {
        scroll_style: ScrollStyle::Legacy,
        comments_link_number_position: LinkNumberPosition::Left,
        on_vote_move_down: true,
        use_go_mode: false,
        ..NavConfig::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(NavConfig::load_from(&path), config);
}

#[test]
fn test_nav_config_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = NavConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, NavConfig::default());
}

#[test]
fn test_nav_config_broken_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "scroll_style: [sideways\n").unwrap();

    assert_eq!(NavConfig::load_from(&path), NavConfig::default());
}

#[test]
fn test_nav_config_file_changes_behaviour() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "on_hide_move_down: false\n").unwrap();

    let mut engine = Engine::new(NavConfig::load_from(&path), keynav::keymap::default_specs());
    let mut host = list_page(2);
    host.fixture_mut().entries[0]
        .controls
        .insert(keynav::host::Control::Hide, false);
    select(&mut engine, &mut host, "a");

    press(&mut engine, &mut host, "h");
    assert_eq!(selected(&engine), Some("a"));
}

// ========================================================================
// Keymap File Tests
// ========================================================================

const OVERRIDES: &str = r#"
bindings:
  - command: moveDown
    key: down
  - command: hide
    enabled: false
  - command: frontPage
    key: h
    mode: go
"#;

#[test]
fn test_overrides_file_merges_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(&path, OVERRIDES).unwrap();

    let overrides = load_overrides_file(&path).unwrap();
    assert_eq!(overrides.len(), 3);

    let specs = merge_overrides(embedded_specs(), overrides);
    let move_down = specs
        .iter()
        .find(|s| s.command() == Some(Command::MoveDown))
        .unwrap();
    assert_eq!(move_down.chord, KeyChord::key(key::DOWN));
    // contexts were not mentioned, so they stay
    assert!(move_down.contexts.matches(ContextSet::of(&[PageContext::List])));

    let mut engine = Engine::new(NavConfig::default(), specs);
    let mut host = list_page(3);
    select(&mut engine, &mut host, "a");

    assert_eq!(press(&mut engine, &mut host, "j down"), vec![false, true]);
    assert_eq!(selected(&engine), Some("b"));

    press(&mut engine, &mut host, "g h");
    assert_eq!(opened_urls(host.calls()), vec!["/"]);
}

#[test]
fn test_overrides_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_overrides_file(&dir.path().join("nope.yaml"));
    assert!(matches!(missing, Err(KeymapError::IoError(_))));

    let path = dir.path().join("keymap.yaml");
    std::fs::write(&path, "bindings:\n  - command: moveDown\n    key: hyper+j\n").unwrap();
    assert!(matches!(
        load_overrides_file(&path),
        Err(KeymapError::InvalidKey(_))
    ));
}

#[test]
fn test_full_keymap_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - { command: moveDownComment, key: n, contexts: [thread] }\n",
    )
    .unwrap();

    let mut engine = Engine::new(NavConfig::default(), load_keymap_file(&path).unwrap());
    let mut host = small_thread();
    select(&mut engine, &mut host, "p0");

    assert_eq!(press(&mut engine, &mut host, "j n"), vec![false, true]);
    assert_eq!(selected(&engine), Some("c1"));
}
