//! Per-bundle state classification.
use std::path::Path;

use crate::skiplist::SkipSet;

/// The state of one tracked bundle at classification time.
///
/// Classification is a pure function of the current filesystem state: it
/// never mutates anything and nothing is cached across items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The bundle is in the skip list.
    Skipped,
    /// No filesystem entry exists at the expected link location.
    MissingTarget,
    /// The link location holds a symbolic link. The link target is not
    /// resolved or validated; existence-as-symlink is sufficient.
    ValidLink,
    /// The link location holds a real file or directory — the link was
    /// overwritten out-of-band (typically by a package updater) and the
    /// bundle must be moved back into the store and relinked.
    StaleRealEntry,
}

/// Classify the bundle `name` against the link directory and the skip set.
///
/// Skip-list membership wins over any filesystem state, so a skipped bundle
/// is never even inspected on disk.
#[must_use]
pub fn classify(name: &str, link_dir: &Path, skips: &SkipSet) -> Classification {
    if skips.contains(name) {
        return Classification::Skipped;
    }
    let link_path = link_dir.join(name);
    match link_path.symlink_metadata() {
        Err(_) => Classification::MissingTarget,
        Ok(meta) if meta.is_symlink() => Classification::ValidLink,
        Ok(_) => Classification::StaleRealEntry,
    }
}
