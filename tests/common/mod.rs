//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use keynav::config::NavConfig;
use keynav::document::{Entry, EntryId, Link};
use keynav::engine::Engine;
use keynav::keymap::{default_specs, parse_key_string, PageContext, RawKeyEvent};
use keynav::replay::{Fixture, FixtureEntry, HostCall, ReplayHost};

/// Engine with the built-in keymap and default config
pub fn test_engine() -> Engine {
    Engine::new(NavConfig::default(), default_specs())
}

/// Engine with the built-in keymap and a tweaked config
pub fn engine_with(config: impl FnOnce(&mut NavConfig)) -> Engine {
    let mut nav = NavConfig::default();
    config(&mut nav);
    Engine::new(nav, default_specs())
}

/// Host over bare entries
pub fn host_with(contexts: &[PageContext], entries: Vec<Entry>) -> ReplayHost {
    ReplayHost::new(Fixture::from_entries(contexts, entries))
}

/// `[P0(0), C1(1), C2(1)]` on a thread page
pub fn small_thread() -> ReplayHost {
    host_with(
        &[PageContext::Thread],
        vec![Entry::root("p0"), Entry::new("c1", 1), Entry::new("c2", 1)],
    )
}

/// A list page of posts "a".."z" truncated to `count`, ranked from 1
pub fn list_page(count: usize) -> ReplayHost {
    let entries = (0..count)
        .map(|i| {
            let id = ((b'a' + i as u8) as char).to_string();
            FixtureEntry::new(Entry::root(id.clone()))
                .with_rank(i + 1)
                .with_url(keynav::host::EntryUrl::PostLink, format!("https://example.com/{}", id))
        })
        .collect();
    ReplayHost::new(Fixture::new(&[PageContext::List], entries))
}

/// Key event for a keymap-syntax key string
pub fn key(spec: &str) -> RawKeyEvent {
    RawKeyEvent::from_chord(parse_key_string(spec).unwrap())
}

/// Press each key in turn, returning whether each was handled
pub fn press(engine: &mut Engine, host: &mut ReplayHost, keys: &str) -> Vec<bool> {
    keys.split_whitespace()
        .map(|k| engine.handle_key_event(&key(k), host))
        .collect()
}

pub fn select(engine: &mut Engine, host: &mut ReplayHost, id: &str) {
    engine.select_entry(Some(EntryId::from(id)), host);
    host.take_calls();
}

pub fn selected(engine: &Engine) -> Option<&str> {
    engine.selected().map(EntryId::as_str)
}

/// `count` ordinary links pointing at example.com/1, /2, ...
pub fn numbered_links(count: usize) -> Vec<Link> {
    (1..=count)
        .map(|n| Link::inline(format!("https://example.com/{}", n), format!("link {}", n)))
        .collect()
}

/// Opened URLs among recorded calls
pub fn opened_urls(calls: &[HostCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::Open { url, .. } => Some(url.clone()),
            _ => None,
        })
        .collect()
}
