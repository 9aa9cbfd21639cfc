//! Operator-curated exclusion list.
//!
//! The engine only ever reads a frozen [`SkipSet`] snapshot; all mutation goes
//! through [`SkipListStore`], which persists before the change becomes visible
//! to a later run. The on-disk format is a newline-delimited list of bundle
//! names: additions append, removals rewrite the whole file.

use std::collections::BTreeSet;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// An immutable-per-run set of bundle names to exclude from reconciliation.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    names: BTreeSet<String>,
}

impl SkipSet {
    /// Whether `name` is excluded.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// All excluded names in sorted order, for deterministic display.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of excluded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkipSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// On-disk store for the skip list.
#[derive(Debug, Clone)]
pub struct SkipListStore {
    path: PathBuf,
}

impl SkipListStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the skip list. A missing file is an empty set; blank lines and
    /// surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<SkipSet, ConfigError> {
        if !self.path.exists() {
            return Ok(SkipSet::default());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect())
    }

    /// Add `name` to the skip list. Idempotent: returns `false` without
    /// touching the file when the name is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or appended to.
    pub fn add(&self, name: &str) -> Result<bool, ConfigError> {
        let current = self.load()?;
        if current.contains(name) {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| ConfigError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        writeln!(file, "{name}").map_err(|source| ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(true)
    }

    /// Remove `name` from the skip list by rewriting the file. Returns
    /// `false` when the name was not present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or rewritten.
    pub fn remove(&self, name: &str) -> Result<bool, ConfigError> {
        let current = self.load()?;
        if !current.contains(name) {
            return Ok(false);
        }
        let remaining: Vec<&str> = current.all().filter(|n| *n != name).collect();
        let mut text = remaining.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        std::fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(true)
    }
}
