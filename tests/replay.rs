//! Key scripts replayed against fixture files

mod common;

use common::*;
use keynav::document::EntryId;
use keynav::replay::{self, Fixture, HostCall, ReplayHost};

const THREAD: &str = r#"
contexts: [comments]
selected: p0
user: alice
entries:
  - id: p0
    kind: root
    urls: { post_link: "https://example.com/story" }
    controls: { upvote: false }
  - id: c1
    depth: 1
    links:
      - { href: "https://example.com/a", text: "a" }
      - { href: "https://example.com/b", text: "b" }
  - id: c2
    depth: 1
"#;

fn thread_fixture() -> ReplayHost {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thread.yaml");
    std::fs::write(&path, THREAD).unwrap();
    ReplayHost::new(Fixture::load(&path).unwrap())
}

#[test]
fn test_script_reports_each_step() {
    let mut engine = test_engine();
    let mut host = thread_fixture();
    let steps = replay::parse_script("a j 2 :1 input:j q").unwrap();

    let reports = replay::run(&mut engine, &mut host, &steps);
    assert_eq!(reports.len(), 6);

    assert_eq!(reports[0].step, "a");
    assert_eq!(
        reports[0].calls,
        vec![HostCall::Activate {
            entry: "p0".into(),
            control: keynav::host::Control::Upvote
        }]
    );

    assert_eq!(reports[1].selected, Some(EntryId::from("c1")));
    assert_eq!(reports[1].calls.len(), 2, "two links numbered");

    assert_eq!(opened_urls(&reports[2].calls), vec!["https://example.com/b"]);
    assert_eq!(opened_urls(&reports[3].calls), vec!["https://example.com/a"]);

    assert!(!reports[4].handled);
    assert_eq!(reports[4].selected, Some(EntryId::from("c1")));
    assert!(!reports[5].handled);
}

#[test]
fn test_report_display() {
    let mut engine = test_engine();
    let mut host = thread_fixture();
    let steps = replay::parse_script("k q").unwrap();

    let reports = replay::run(&mut engine, &mut host, &steps);
    assert_eq!(reports[0].to_string(), format!("{:<12} -> p0", "k"));
    assert_eq!(reports[1].to_string(), format!("{:<12} -> p0 (ignored)", "q"));
}
