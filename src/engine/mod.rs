//! The reconciliation engine.
//!
//! [`Engine::run`] enumerates tracked bundles in the store directory,
//! classifies each one against the link directory ([`classify`]), routes
//! stale entries through the relocator ([`relocate`]), and accumulates a
//! [`Report`]. Each item's outcome is isolated: only a failure to enumerate
//! the store directory aborts the run.
//!
//! The engine is single-threaded on purpose — relocations touch overlapping
//! paths and must stay strictly ordered. The caller observes progress and
//! injects policy through [`RunObserver`]; the observer carries no control
//! authority beyond deferring an item or stopping between items.

pub mod classify;
pub mod relocate;

pub use classify::{Classification, classify};
pub use relocate::{StaleStorePolicy, relocate};

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::EngineError;
use crate::report::{Issue, IssueKind, Report, RunOutcome};
use crate::skiplist::SkipSet;

/// A caller's verdict on one stale entry before relocation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Relocate and relink the bundle.
    Proceed,
    /// Leave the bundle alone; record it as deferred.
    Defer,
}

/// Observation and policy hooks for one engine run.
///
/// All methods have defaults matching the fully automated mode: always
/// proceed, never cancel, ignore progress.
pub trait RunObserver {
    /// Decide whether to relocate the stale bundle `name`. Called only for
    /// [`Classification::StaleRealEntry`] items.
    fn decide(&mut self, _name: &str) -> Decision {
        Decision::Proceed
    }

    /// Called after each item completes, with 1-based progress.
    fn on_item_done(&mut self, _done: usize, _total: usize, _name: &str) {}

    /// Polled between items; returning `true` stops the run, keeping the
    /// report accumulated so far.
    fn should_cancel(&self) -> bool {
        false
    }
}

/// The default fully automated observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoObserver;

impl RunObserver for AutoObserver {}

/// One configured reconciliation run over a store and a link directory.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Canonical store directory.
    pub store_dir: PathBuf,
    /// Directory where the symlinks must exist.
    pub link_dir: PathBuf,
    /// Suffix that marks a tracked bundle.
    pub bundle_suffix: String,
    /// Policy for leftover copies already present in the store.
    pub stale_store: StaleStorePolicy,
}

impl Engine {
    /// Build an engine from validated settings with the default policies.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            store_dir: settings.store_dir.clone(),
            link_dir: settings.link_dir.clone(),
            bundle_suffix: settings.bundle_suffix.clone(),
            stale_store: StaleStorePolicy::default(),
        }
    }

    /// Replace the stale-store policy.
    #[must_use]
    pub const fn with_stale_store(mut self, policy: StaleStorePolicy) -> Self {
        self.stale_store = policy;
        self
    }

    /// Enumerate candidate bundle names: entries in the store directory that
    /// carry the tracked suffix and are not hidden, sorted alphabetically for
    /// deterministic output.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotADirectory`] if either configured path is
    /// not an accessible directory, or [`EngineError::ListStore`] if the
    /// store directory cannot be read.
    pub fn candidates(&self) -> Result<Vec<String>, EngineError> {
        for dir in [&self.store_dir, &self.link_dir] {
            if !dir.is_dir() {
                return Err(EngineError::NotADirectory { path: dir.clone() });
            }
        }

        let entries = std::fs::read_dir(&self.store_dir).map_err(|source| {
            EngineError::ListStore {
                path: self.store_dir.clone(),
                source,
            }
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| EngineError::ListStore {
                path: self.store_dir.clone(),
                source,
            })?;
            // Non-UTF-8 names cannot be tracked bundles; skip them.
            let Some(name) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            if name.ends_with(&self.bundle_suffix) && !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Run one reconciliation pass.
    ///
    /// Every candidate ends up in exactly one report entry. Relocation
    /// failures are recorded, never retried, and never abort the run.
    ///
    /// # Errors
    ///
    /// Fails only on startup: inaccessible directories or an unlistable
    /// store directory. No partial report is produced in that case.
    pub fn run(
        &self,
        skips: &SkipSet,
        observer: &mut dyn RunObserver,
    ) -> Result<RunOutcome, EngineError> {
        let candidates = self.candidates()?;
        if candidates.is_empty() {
            return Ok(RunOutcome::NothingToDo);
        }

        let total = candidates.len();
        let mut report = Report::default();

        for (index, name) in candidates.into_iter().enumerate() {
            if observer.should_cancel() {
                return Ok(RunOutcome::Cancelled(report));
            }

            match classify(&name, &self.link_dir, skips) {
                Classification::Skipped => {
                    report.issues.push(Issue::new(
                        IssueKind::Skipped,
                        name.as_str(),
                        format!("{name} is in the skip list"),
                    ));
                }
                Classification::MissingTarget => {
                    report.issues.push(Issue::new(
                        IssueKind::MissingTarget,
                        name.as_str(),
                        format!("{name} does not exist in {}", self.link_dir.display()),
                    ));
                }
                Classification::ValidLink => {
                    report.valid.push(name.clone());
                }
                Classification::StaleRealEntry => match observer.decide(&name) {
                    Decision::Defer => {
                        report.issues.push(Issue::new(
                            IssueKind::Deferred,
                            name.as_str(),
                            format!("{name} is not a symlink; left in place"),
                        ));
                    }
                    Decision::Proceed => {
                        let issue = match relocate(
                            name.as_str(),
                            &self.store_dir,
                            &self.link_dir,
                            self.stale_store,
                        ) {
                            Ok(()) => Issue::new(
                                IssueKind::Fixed,
                                name.as_str(),
                                format!("{name} moved to store and relinked"),
                            ),
                            Err(e) if e.is_data_risk() => Issue::new(
                                IssueKind::RelocateFailed,
                                name.as_str(),
                                format!("{e}; manual recovery required"),
                            ),
                            Err(e) => {
                                Issue::new(IssueKind::RelocateFailed, name.as_str(), e.to_string())
                            }
                        };
                        report.issues.push(issue);
                    }
                },
            }

            observer.on_item_done(index + 1, total, &name);
        }

        Ok(RunOutcome::Completed(report))
    }
}
