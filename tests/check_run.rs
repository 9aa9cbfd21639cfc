#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
//! End-to-end reconciliation scenarios.
//!
//! These exercise the engine through its public API against real temp
//! directories: the classification outcomes, the relocate-and-relink path,
//! convergence on a second run, and the distinct nothing-to-do signal.

mod common;

use common::Fixture;
use relink::engine::{AutoObserver, Engine, StaleStorePolicy};
use relink::report::{IssueKind, Report, RunOutcome};
use relink::skiplist::SkipSet;

fn run(engine: &Engine, skips: &SkipSet) -> RunOutcome {
    engine.run(skips, &mut AutoObserver).expect("engine run")
}

fn completed(outcome: RunOutcome) -> Report {
    match outcome {
        RunOutcome::Completed(report) => report,
        other => panic!("expected a completed run, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Core scenarios
// ---------------------------------------------------------------------------

/// A.app is a valid link, B.app was overwritten by an updater: the report
/// lists A as valid and B as fixed, and B's link now resolves to the store.
#[cfg(unix)]
#[test]
fn valid_and_stale_pair() {
    let fx = Fixture::new();
    fx.stored("A.app").linked("A.app");
    fx.stored("B.app").stale("B.app");

    let report = completed(run(&fx.engine(), &SkipSet::default()));

    assert_eq!(report.valid, vec!["A.app"]);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::Fixed);
    assert_eq!(report.issues[0].name, "B.app");

    assert!(fx.is_symlink("B.app"));
    assert_eq!(
        std::fs::read_link(fx.link_path("B.app")).unwrap(),
        fx.store_path("B.app")
    );
    assert!(fx.store_path("B.app").join("Contents/MacOS/binary").is_file());
}

/// A skip-listed bundle yields a Skipped issue and zero mutations, whatever
/// the state of the link directory.
#[test]
fn skipped_bundle_is_untouched() {
    let fx = Fixture::new();
    fx.stored("C.app").stale("C.app");
    let skips: SkipSet = ["C.app"].into_iter().collect();

    let report = completed(run(&fx.engine(), &skips));

    assert!(report.valid.is_empty());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::Skipped);
    assert_eq!(report.issues[0].name, "C.app");
    // The stale real entry was not relocated.
    assert!(!fx.is_symlink("C.app"));
    assert!(fx.link_path("C.app").join("Contents/Info.plist").is_file());
}

/// A bundle with no entry at the link location yields MissingTarget and no
/// mutation.
#[test]
fn missing_target_is_reported_not_fixed() {
    let fx = Fixture::new();
    fx.stored("D.app");

    let report = completed(run(&fx.engine(), &SkipSet::default()));

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, IssueKind::MissingTarget);
    assert_eq!(report.issues[0].name, "D.app");
    assert!(!fx.link_path("D.app").exists());
    assert!(fx.store_path("D.app").is_dir());
}

/// An empty candidate set is a distinct signal, not an empty report.
#[test]
fn empty_store_is_nothing_to_do() {
    let fx = Fixture::new();
    assert_eq!(run(&fx.engine(), &SkipSet::default()), RunOutcome::NothingToDo);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

/// `|valid| + |issues|` equals the number of filtered candidates.
#[cfg(unix)]
#[test]
fn every_candidate_is_accounted_for() {
    let fx = Fixture::new();
    fx.stored("A.app").linked("A.app");
    fx.stored("B.app").stale("B.app");
    fx.stored("C.app");
    fx.stored("D.app");
    // Non-candidates: hidden and wrong suffix.
    std::fs::create_dir(fx.store.join(".Hidden.app")).unwrap();
    std::fs::write(fx.store.join("notes.txt"), b"x").unwrap();

    let skips: SkipSet = ["D.app"].into_iter().collect();
    let report = completed(run(&fx.engine(), &skips));

    assert_eq!(report.total(), 4);
}

/// Reconciliation converges: items fixed on the first run are valid links on
/// the second.
#[cfg(unix)]
#[test]
fn second_run_reaches_fixed_point() {
    let fx = Fixture::new();
    fx.stored("A.app").stale("A.app");
    fx.stored("B.app").stale("B.app");

    let first = completed(run(&fx.engine(), &SkipSet::default()));
    assert_eq!(first.count_of(IssueKind::Fixed), 2);

    let second = completed(run(&fx.engine(), &SkipSet::default()));
    assert_eq!(second.valid, vec!["A.app", "B.app"]);
    assert!(second.issues.is_empty());
}

/// A valid link is left exactly as it was.
#[cfg(unix)]
#[test]
fn valid_link_is_not_rewritten() {
    let fx = Fixture::new();
    fx.stored("A.app").linked("A.app");
    let target_before = std::fs::read_link(fx.link_path("A.app")).unwrap();

    let report = completed(run(&fx.engine(), &SkipSet::default()));

    assert_eq!(report.valid, vec!["A.app"]);
    assert_eq!(
        std::fs::read_link(fx.link_path("A.app")).unwrap(),
        target_before
    );
}

/// A leftover copy in the store is replaced by the incoming bundle under the
/// default policy, and refused under `Preserve`.
#[test]
fn stale_store_copy_policies() {
    // Default: the leftover copy is removed and replaced.
    let fx = Fixture::new();
    fx.stored("A.app").stale("A.app");
    std::fs::write(fx.store_path("A.app").join("leftover"), b"old").unwrap();

    let report = completed(run(&fx.engine(), &SkipSet::default()));
    assert_eq!(report.issues[0].kind, IssueKind::Fixed);
    assert!(!fx.store_path("A.app").join("leftover").exists());

    // Preserve: the item fails, both sides untouched.
    let fx = Fixture::new();
    fx.stored("B.app").stale("B.app");
    let engine = fx.engine().with_stale_store(StaleStorePolicy::Preserve);

    let report = completed(run(&engine, &SkipSet::default()));
    assert_eq!(report.issues[0].kind, IssueKind::RelocateFailed);
    assert!(fx.link_path("B.app").join("Contents/Info.plist").is_file());
    assert!(!fx.is_symlink("B.app"));
}
