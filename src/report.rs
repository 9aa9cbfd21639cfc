//! The structured run report.
//!
//! The engine returns plain data; presentation layers decide how to render
//! it. Consumers must branch on [`IssueKind`], never on message text — the
//! bundle name is a structured field from the point of creation.

/// What happened to one bundle that did not end up in the `valid` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The bundle is in the skip list; nothing was touched.
    Skipped,
    /// Nothing exists at the expected link location; nothing was touched.
    MissingTarget,
    /// A stale real entry was moved back into the store and relinked.
    Fixed,
    /// The caller's policy declined the relocation; nothing was touched.
    Deferred,
    /// Relocation was attempted and failed; see the message for the cause.
    RelocateFailed,
}

/// One report entry for a bundle that needs operator attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Outcome category.
    pub kind: IssueKind,
    /// Bundle name the entry refers to.
    pub name: String,
    /// Human-readable detail. Presentation only; carries no structure.
    pub message: String,
}

impl Issue {
    /// Build an issue entry.
    #[must_use]
    pub fn new(kind: IssueKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Accumulated results of one reconciliation run.
///
/// Every enumerated candidate lands in exactly one of the two sequences, in
/// candidate (alphabetical) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Bundles confirmed as correct symbolic links.
    pub valid: Vec<String>,
    /// Everything else, tagged with an outcome kind.
    pub issues: Vec<Issue>,
}

impl Report {
    /// Total number of candidates accounted for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.valid.len() + self.issues.len()
    }

    /// Number of issues of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    /// Whether any relocation failed during the run.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.count_of(IssueKind::RelocateFailed) > 0
    }
}

/// Result of a reconciliation run.
///
/// "Nothing to do" is distinct from a populated report so the caller can
/// present an empty store differently from a run where every item was, say,
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The store directory contained no tracked bundles.
    NothingToDo,
    /// Every candidate was processed.
    Completed(Report),
    /// The run was cancelled between items; the report covers the items
    /// processed before the stop.
    Cancelled(Report),
}
