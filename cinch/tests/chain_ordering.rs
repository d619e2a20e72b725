use cinch::{Chain, ChainConfig, HookResult, testing::EventLog};

mod common;
use common::{Job, job, step};

fn ids(chain: &Chain<Job>) -> Vec<&str> {
    chain.ids().into_iter().flatten().collect()
}

fn named(names: &[&str]) -> Chain<Job> {
    let mut chain = Chain::new();
    for name in names {
        chain.add(|_: &Job| true, Some(*name));
    }
    chain
}

#[test]
fn test_add_keeps_insertion_order_minus_duplicates() {
    let mut chain = Chain::new();
    for name in ["a", "b", "a", "c", "b", "d"] {
        chain.add(|_: &Job| true, Some(name));
    }
    assert_eq!(ids(&chain), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_anonymous_entries_are_never_duplicates() {
    let mut chain = Chain::new();
    assert!(chain.add(|_: &Job| true, None));
    assert!(chain.add(|_: &Job| true, None));
    assert!(chain.add(|_: &Job| true, Some("named")));
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.ids(), vec![None, None, Some("named")]);
}

#[test]
fn test_remove_then_exists_is_false() {
    let mut chain = named(&["a", "b", "c"]);
    assert!(chain.remove("b"));
    assert!(!chain.exists("b"));
    assert!(!chain.remove("b"));
    assert!(!chain.remove("never"));
    assert_eq!(ids(&chain), vec!["a", "c"]);
}

#[test]
fn test_exists_is_false_for_empty_id() {
    let mut chain = named(&["a"]);
    chain.add(|_: &Job| true, Some(""));
    assert!(!chain.exists(""));
    assert!(chain.exists("a"));
}

#[test]
fn test_insert_before_missing_anchor_goes_first() {
    let mut chain = named(&["a", "b", "c"]);
    chain.insert_before("missing", |_: &Job| true, Some("x"));
    assert_eq!(ids(&chain), vec!["x", "a", "b", "c"]);
}

#[test]
fn test_insert_after_missing_anchor_goes_before_last() {
    let mut chain = named(&["a", "b", "c"]);
    chain.insert_after("missing", |_: &Job| true, Some("x"));
    assert_eq!(ids(&chain), vec!["a", "b", "x", "c"]);
}

#[test]
fn test_insert_with_anchor() {
    let mut chain = named(&["a", "b", "c"]);
    chain.insert_before("c", |_: &Job| true, Some("before_c"));
    chain.insert_after("a", |_: &Job| true, Some("after_a"));
    assert_eq!(ids(&chain), vec!["a", "after_a", "b", "before_c", "c"]);
}

#[test]
fn test_insert_existing_id_moves_and_replaces() {
    let log = EventLog::new();
    let mut chain = Chain::new();
    chain.add(step(&log, "old-a", true), Some("a"));
    chain.add(step(&log, "b", true), Some("b"));
    chain.add(step(&log, "c", true), Some("c"));

    chain.insert_after("c", step(&log, "new-a", true), Some("a"));
    assert_eq!(ids(&chain), vec!["b", "c", "a"]);

    chain.invoke(&job(1, "mail")).unwrap();
    assert_eq!(log.lines(), vec!["b", "c", "new-a"]);
}

#[test]
fn test_clear_removes_everything() {
    let mut chain = named(&["a", "b"]);
    chain.clear();
    assert!(chain.is_empty());
    assert_eq!(chain.invoke(&job(1, "mail")).unwrap(), HookResult::Next);
}

#[test]
fn test_halt_stops_remaining_entries() {
    let log = EventLog::new();
    let mut chain = Chain::new();
    chain.add(step(&log, "A", true), Some("a"));
    chain.add(step(&log, "B", false), Some("b"));
    chain.add(step(&log, "C", true), Some("c"));

    assert_eq!(chain.invoke(&job(1, "mail")).unwrap(), HookResult::Halt);
    assert_eq!(log.lines(), vec!["A", "B"]);
}

#[test]
fn test_halt_disabled_runs_every_entry() {
    let log = EventLog::new();
    let mut chain = Chain::with_config(ChainConfig::new().with_halt_on_false(false));
    chain.add(step(&log, "A", true), Some("a"));
    chain.add(step(&log, "B", false), Some("b"));
    chain.add(step(&log, "C", true), Some("c"));

    assert_eq!(chain.invoke(&job(1, "mail")).unwrap(), HookResult::Next);
    assert_eq!(log.lines(), vec!["A", "B", "C"]);
}
