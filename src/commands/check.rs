//! The `check` command: run the engine and render the report.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

use crate::cli::{CheckOpts, GlobalOpts};
use crate::engine::{Decision, Engine, RunObserver, StaleStorePolicy};
use crate::logging::Logger;
use crate::report::{IssueKind, Report, RunOutcome};

/// Observer wiring the engine to the console: progress lines, the `--no-fix`
/// policy, and the ctrl-c flag checked between items.
struct ConsoleObserver<'a> {
    log: &'a Logger,
    no_fix: bool,
    cancel: Arc<AtomicBool>,
}

impl RunObserver for ConsoleObserver<'_> {
    fn decide(&mut self, name: &str) -> Decision {
        if self.no_fix {
            self.log.debug(&format!("not fixing {name} (--no-fix)"));
            Decision::Defer
        } else {
            Decision::Proceed
        }
    }

    fn on_item_done(&mut self, done: usize, total: usize, name: &str) {
        self.log.debug(&format!("[{done}/{total}] {name}"));
    }

    fn should_cancel(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

/// Run the check command.
///
/// The exit status is success whenever the run completes, regardless of
/// per-item issues; only startup failures (bad directories, unreadable store
/// or skip list) propagate as errors.
///
/// # Errors
///
/// Returns an error if settings or the skip list cannot be loaded, or if the
/// engine fails at startup.
pub fn run(global: &GlobalOpts, opts: &CheckOpts, log: &Logger) -> Result<()> {
    let settings = super::load_settings(global)?;
    log.debug(&format!("store dir: {}", settings.store_dir.display()));
    log.debug(&format!("link dir:  {}", settings.link_dir.display()));

    let skips = super::skiplist_store(global)?.load()?;
    if !skips.is_empty() {
        log.debug(&format!("{} name(s) on the skip list", skips.len()));
    }

    let stale_store = if opts.preserve_store {
        StaleStorePolicy::Preserve
    } else {
        StaleStorePolicy::Replace
    };
    let engine = Engine::new(&settings).with_stale_store(stale_store);

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        // Fails if a handler is already installed (e.g. in tests); the run
        // then simply cannot be interrupted cleanly.
        let _ = ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst));
    }

    log.stage("Checking bundles");
    let mut observer = ConsoleObserver {
        log,
        no_fix: opts.no_fix,
        cancel,
    };

    match engine.run(&skips, &mut observer)? {
        RunOutcome::NothingToDo => {
            log.warn(&format!(
                "no {} bundles found in {}",
                settings.bundle_suffix,
                settings.store_dir.display()
            ));
        }
        RunOutcome::Cancelled(report) => {
            log.warn("interrupted; the report covers the items processed so far");
            render(&report, log);
        }
        RunOutcome::Completed(report) => {
            render(&report, log);
        }
    }

    Ok(())
}

/// Console icon and color for an issue kind.
const fn issue_style(kind: IssueKind) -> (&'static str, &'static str) {
    match kind {
        IssueKind::Fixed => ("✓", "\x1b[32m"),
        IssueKind::Skipped => ("○", "\x1b[33m"),
        IssueKind::MissingTarget => ("!", "\x1b[33m"),
        IssueKind::Deferred => ("~", "\x1b[33m"),
        IssueKind::RelocateFailed => ("✗", "\x1b[31m"),
    }
}

/// Render the report: valid links first, then issues with per-kind icons,
/// then a totals line.
fn render(report: &Report, log: &Logger) {
    log.stage("Results");

    log.info(&format!("valid links ({}):", report.valid.len()));
    for name in &report.valid {
        log.info(&format!("  \x1b[32m✓\x1b[0m {name}"));
    }

    if !report.issues.is_empty() {
        log.info(&format!("issues ({}):", report.issues.len()));
        for issue in &report.issues {
            let (icon, color) = issue_style(issue.kind);
            log.info(&format!("  {color}{icon}\x1b[0m {}", issue.message));
        }
    }

    log.info(&format!(
        "{} bundles: {} valid, {} fixed, {} skipped, {} missing, {} deferred, {} failed",
        report.total(),
        report.valid.len(),
        report.count_of(IssueKind::Fixed),
        report.count_of(IssueKind::Skipped),
        report.count_of(IssueKind::MissingTarget),
        report.count_of(IssueKind::Deferred),
        report.count_of(IssueKind::RelocateFailed),
    ));

    if report.has_failures() {
        log.warn("some relocations failed; resolve manually and re-run");
    }
}
