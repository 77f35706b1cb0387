//! Numbered links on comment pages and the command line

mod common;

use common::*;
use keynav::document::{EntryId, Link, LinkKind};
use keynav::host::OpenTarget;
use keynav::keymap::PageContext;
use keynav::replay::{HostCall, ReplayHost};

fn thread_with_links(links: Vec<Link>) -> ReplayHost {
    let mut host = small_thread();
    host.fixture_mut().entries[1].links = links;
    host
}

fn annotated(calls: &[HostCall]) -> Vec<(usize, String)> {
    calls
        .iter()
        .filter_map(|call| match call {
            HostCall::Annotate { link, label, .. } => Some((*link, label.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_selecting_a_comment_numbers_its_links() {
    let mut engine = test_engine();
    let mut host = thread_with_links(numbered_links(12));
    select(&mut engine, &mut host, "p0");

    press(&mut engine, &mut host, "j");
    let labels = annotated(&host.take_calls());
    assert_eq!(labels.len(), 12);
    assert_eq!(labels[0], (0, "[1] ".to_string()));
    assert_eq!(labels[11], (11, "[12] ".to_string()));
    assert_eq!(engine.annotations().entry(), Some(&EntryId::from("c1")));
}

#[test]
fn test_digit_keys_open_first_ten_links() {
    let mut engine = test_engine();
    let mut host = thread_with_links(numbered_links(12));
    select(&mut engine, &mut host, "c1");

    press(&mut engine, &mut host, "1 0 numpad3");
    assert_eq!(
        host.opened(),
        vec![
            (
                "https://example.com/1".to_string(),
                OpenTarget::NewTab { focus: true }
            ),
            (
                "https://example.com/10".to_string(),
                OpenTarget::NewTab { focus: true }
            ),
            (
                "https://example.com/3".to_string(),
                OpenTarget::NewTab { focus: true }
            ),
        ]
    );
}

#[test]
fn test_eleventh_link_only_through_command_line() {
    let mut engine = test_engine();
    let mut host = thread_with_links(numbered_links(12));
    select(&mut engine, &mut host, "c1");

    assert!(engine.run_command_line("11", &mut host).unwrap());
    assert_eq!(opened_urls(host.calls()), vec!["https://example.com/11"]);

    // past the end and zero are consumed without effect
    host.take_calls();
    assert!(engine.run_command_line("13", &mut host).unwrap());
    assert!(engine.run_command_line("0", &mut host).unwrap());
    assert!(host.calls().is_empty());

    assert!(!engine.run_command_line("eleven", &mut host).unwrap());
}

#[test]
fn test_moving_away_retracts_labels_first() {
    let mut engine = test_engine();
    let mut host = thread_with_links(numbered_links(2));
    host.fixture_mut().entries[2].links = numbered_links(1);
    select(&mut engine, &mut host, "c1");

    press(&mut engine, &mut host, "j");
    let calls = host.take_calls();
    assert_eq!(calls[0], HostCall::ClearAnnotations("c1".into()));
    assert_eq!(
        calls[1],
        HostCall::Annotate {
            entry: "c2".into(),
            link: 0,
            label: "[1] ".to_string()
        }
    );
    assert_eq!(engine.annotations().len(), 1);
}

#[test]
fn test_ineligible_links_are_skipped() {
    let mut engine = test_engine();
    let code = Link {
        in_code: true,
        ..Link::inline("https://example.com/code", "code")
    };
    let button = Link {
        kind: LinkKind::ExpandoButton,
        ..Link::inline("https://example.com/button", "button")
    };
    let mut host = thread_with_links(vec![
        Link::inline("javascript:void(0)", "js"),
        Link::inline("https://example.com/a", "a"),
        Link::inline("#", "anchor"),
        code,
        button,
        Link::inline("https://example.com/b", "b"),
    ]);
    select(&mut engine, &mut host, "p0");

    press(&mut engine, &mut host, "j");
    let labels = annotated(&host.take_calls());
    assert_eq!(labels, vec![(1, "[1] ".to_string()), (5, "[2] ".to_string())]);

    press(&mut engine, &mut host, "2");
    assert_eq!(opened_urls(host.calls()), vec!["https://example.com/b"]);
}

#[test]
fn test_link_with_expando_clicks_it() {
    let mut engine = test_engine();
    let media = Link {
        expando_follows: true,
        ..Link::inline("https://i.example.com/cat.png", "cat")
    };
    let mut host = thread_with_links(vec![Link::inline("https://example.com/a", "a"), media]);
    select(&mut engine, &mut host, "c1");

    press(&mut engine, &mut host, "2");
    assert_eq!(
        host.take_calls(),
        vec![HostCall::ActivateLink {
            entry: "c1".into(),
            link: 1
        }]
    );
}

#[test]
fn test_same_tab_and_background_options() {
    let mut engine = engine_with(|c| c.comments_link_new_tab = false);
    let mut host = thread_with_links(numbered_links(1));
    select(&mut engine, &mut host, "c1");
    press(&mut engine, &mut host, "1");
    assert_eq!(host.opened()[0].1, OpenTarget::SameTab);

    let mut engine = engine_with(|c| c.follow_link_new_tab_focus = false);
    let mut host = thread_with_links(numbered_links(1));
    select(&mut engine, &mut host, "c1");
    press(&mut engine, &mut host, "1");
    assert_eq!(host.opened()[0].1, OpenTarget::NewTab { focus: false });
}

#[test]
fn test_numbering_switched_off() {
    let mut engine = engine_with(|c| c.comments_link_numbers = false);
    let mut host = thread_with_links(numbered_links(3));
    select(&mut engine, &mut host, "p0");

    press(&mut engine, &mut host, "j 1");
    assert!(engine.annotations().is_empty());
    assert!(host.calls().is_empty());
}

#[test]
fn test_list_pages_have_no_labels() {
    let mut engine = test_engine();
    let mut host = list_page(2);
    host.fixture_mut().entries[0].links = numbered_links(3);

    select(&mut engine, &mut host, "b");
    press(&mut engine, &mut host, "k");
    assert!(annotated(host.calls()).is_empty());
}

#[test]
fn test_command_line_on_list_follows_ranked_post() {
    let mut engine = test_engine();
    let mut host = list_page(3);

    assert!(engine.run_command_line(" 2 ", &mut host).unwrap());
    assert_eq!(selected(&engine), Some("b"));
    assert_eq!(
        host.opened(),
        vec![("https://example.com/b".to_string(), OpenTarget::SameTab)]
    );

    host.take_calls();
    assert!(engine.run_command_line("9", &mut host).unwrap());
    assert_eq!(selected(&engine), Some("b"));
    assert!(host.opened().is_empty());
}

#[test]
fn test_command_line_elsewhere_is_not_handled() {
    let mut engine = test_engine();
    let mut host = host_with(&[PageContext::Inbox], vec![keynav::document::Entry::new("m", 0)]);
    assert!(!engine.run_command_line("1", &mut host).unwrap());
}
