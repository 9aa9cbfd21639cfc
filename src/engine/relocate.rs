//! Relocate-and-relink recovery for a stale real entry.
//!
//! The sequence for one bundle is strictly ordered: remove any leftover copy
//! in the store, move the real entry from the link directory into the store,
//! then create the symlink. A failure in the later steps happens after the
//! original entry has already left the link directory, which is why
//! [`RelocateError::is_data_risk`] exists — there is no rollback for
//! non-transactional filesystem operations.

use std::io;
use std::path::Path;

use crate::error::RelocateError;

/// What to do when the store already holds an entry with the bundle's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleStorePolicy {
    /// Remove the leftover copy unconditionally before moving (the default).
    #[default]
    Replace,
    /// Refuse to touch it; the item fails and the operator resolves manually.
    Preserve,
}

/// Move the stale real entry at `link_dir/name` into the store and create a
/// symlink back to it.
///
/// # Errors
///
/// Returns a [`RelocateError`] naming the step that failed. Nothing is
/// retried; the caller records the failure and continues with other items.
pub fn relocate(
    name: &str,
    store_dir: &Path,
    link_dir: &Path,
    policy: StaleStorePolicy,
) -> Result<(), RelocateError> {
    let dest = store_dir.join(name);
    let entry = link_dir.join(name);

    // A leftover copy from a previous relocation may sit at the destination.
    if dest.symlink_metadata().is_ok() {
        match policy {
            StaleStorePolicy::Preserve => {
                return Err(RelocateError::StoreCopyExists { path: dest });
            }
            StaleStorePolicy::Replace => {
                remove_entry(&dest).map_err(|source| RelocateError::RemoveStale {
                    path: dest.clone(),
                    source,
                })?;
            }
        }
    }

    move_entry(&entry, &dest).map_err(|source| RelocateError::Move {
        from: entry.clone(),
        to: dest.clone(),
        source,
    })?;

    create_symlink(&dest, &entry).map_err(|source| RelocateError::Symlink {
        link: entry,
        target: dest,
        source,
    })
}

/// Remove whatever sits at `path`: recursively for a real directory, a
/// single-entry removal for files and symlinks.
fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    // symlink_metadata does not follow links, so is_dir() is true only for
    // real directories.
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Move `from` to `to`, preferring an atomic rename and falling back to a
/// copy + delete when the rename crosses a filesystem boundary.
fn move_entry(from: &Path, to: &Path) -> io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    if from.is_dir() {
        copy_dir_recursive(from, to)?;
        std::fs::remove_dir_all(from)
    } else {
        std::fs::copy(from, to)?;
        std::fs::remove_file(from)
    }
}

/// Recursively copy a directory tree, preserving its internal structure.
/// Symlinks within the tree are recreated as symlinks, not followed.
fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let meta = std::fs::symlink_metadata(&src_path)?;
        if meta.is_symlink() {
            let target = std::fs::read_link(&src_path)?;
            create_symlink(&target, &dst_path)?;
        } else if meta.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symlink at `link` pointing to `target`.
#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
