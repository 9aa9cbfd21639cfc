// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed pair of store/link directories and
// builder methods so each test can lay out bundle states without repeating
// filesystem boilerplate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use relink::engine::Engine;

/// An isolated store/link directory pair backed by a [`tempfile::TempDir`].
///
/// Everything is deleted when the fixture is dropped.
pub struct Fixture {
    tmp: tempfile::TempDir,
    /// Canonical store directory.
    pub store: PathBuf,
    /// Link directory.
    pub links: PathBuf,
}

impl Fixture {
    /// Create the two directories inside a fresh tempdir.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let store = tmp.path().join("store");
        let links = tmp.path().join("links");
        std::fs::create_dir(&store).expect("create store dir");
        std::fs::create_dir(&links).expect("create link dir");
        Self { tmp, store, links }
    }

    /// An engine over this fixture with the default policies.
    pub fn engine(&self) -> Engine {
        Engine {
            store_dir: self.store.clone(),
            link_dir: self.links.clone(),
            bundle_suffix: ".app".to_string(),
            stale_store: relink::engine::StaleStorePolicy::Replace,
        }
    }

    /// Create a bundle-shaped directory tree in the store.
    pub fn stored(&self, name: &str) -> &Self {
        make_bundle(&self.store.join(name));
        self
    }

    /// Create a symlink in the link directory pointing at the stored copy.
    #[cfg(unix)]
    pub fn linked(&self, name: &str) -> &Self {
        std::os::unix::fs::symlink(self.store.join(name), self.links.join(name))
            .expect("create symlink");
        self
    }

    /// Create a real bundle directory in the link directory — the shape a
    /// package updater leaves behind after overwriting the link.
    pub fn stale(&self, name: &str) -> &Self {
        make_bundle(&self.links.join(name));
        self
    }

    /// Path of the entry in the link directory.
    pub fn link_path(&self, name: &str) -> PathBuf {
        self.links.join(name)
    }

    /// Path of the entry in the store.
    pub fn store_path(&self, name: &str) -> PathBuf {
        self.store.join(name)
    }

    /// Whether the link directory entry is a symlink.
    pub fn is_symlink(&self, name: &str) -> bool {
        self.link_path(name)
            .symlink_metadata()
            .map(|m| m.is_symlink())
            .unwrap_or(false)
    }
}

/// Write a minimal multi-file bundle tree at `path`.
pub fn make_bundle(path: &Path) {
    std::fs::create_dir_all(path.join("Contents/MacOS")).expect("create bundle dirs");
    std::fs::write(path.join("Contents/Info.plist"), b"<plist/>").expect("write Info.plist");
    std::fs::write(path.join("Contents/MacOS/binary"), b"\x00binary").expect("write binary");
}
