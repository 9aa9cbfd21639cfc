//! Domain-specific error types for the reconciliation engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`EngineError`],
//! [`RelocateError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! Only [`EngineError`] and [`ConfigError`] abort a run; a [`RelocateError`]
//! is always confined to the item it occurred on and ends up in the report.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from settings and skip-list persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The per-user config directory could not be determined.
    #[error("cannot determine the user config directory")]
    NoConfigDir,

    /// An I/O error occurred while reading or writing a persisted file.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path of the file that could not be read or written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file contains invalid TOML.
    #[error("invalid settings in {path}: {message}")]
    Parse {
        /// Path of the offending file.
        path: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Fatal startup errors from the reconciliation engine.
///
/// These abort the run before (or instead of) producing a report and map to a
/// non-zero process exit. Per-item problems never appear here.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A configured path is missing or is not a directory.
    #[error("not an accessible directory: {path}")]
    NotADirectory {
        /// The offending configured path.
        path: PathBuf,
    },

    /// The store directory exists but cannot be enumerated.
    #[error("cannot list store directory {path}: {source}")]
    ListStore {
        /// The store directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A failure inside the relocate-and-relink sequence for one bundle.
///
/// The variant records which step failed. [`Move`](Self::Move) and
/// [`Symlink`](Self::Symlink) happen after the original entry has left the
/// link directory, so the bundle may be neither at its old location nor
/// correctly linked; [`is_data_risk`](Self::is_data_risk) flags those so the
/// report can tell the operator that manual recovery is needed.
#[derive(Error, Debug)]
pub enum RelocateError {
    /// A leftover copy in the store could not be removed.
    #[error("remove stale store copy {path}: {source}")]
    RemoveStale {
        /// Path of the stale copy inside the store.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A copy already exists in the store and the policy forbids replacing it.
    #[error("store already contains {path} and --preserve-store is set")]
    StoreCopyExists {
        /// Path of the pre-existing copy inside the store.
        path: PathBuf,
    },

    /// Moving the bundle from the link directory into the store failed.
    #[error("move {from} to {to}: {source}")]
    Move {
        /// Source of the move (the real entry in the link directory).
        from: PathBuf,
        /// Destination inside the store.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating the symlink back into the link directory failed.
    #[error("create symlink {link} -> {target}: {source}")]
    Symlink {
        /// Path of the link to create.
        link: PathBuf,
        /// What the link should point to.
        target: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl RelocateError {
    /// Whether the failure happened after the original entry was already
    /// moved or removed, leaving the bundle in a state that needs manual
    /// recovery.
    #[must_use]
    pub const fn is_data_risk(&self) -> bool {
        matches!(self, Self::Move { .. } | Self::Symlink { .. })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: "/home/u/.config/relink/config.toml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("config.toml"));
        assert!(e.to_string().contains("IO error"));
    }

    #[test]
    fn config_error_parse_display() {
        let e = ConfigError::Parse {
            path: "config.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid settings in config.toml: expected `=`"
        );
    }

    #[test]
    fn engine_error_not_a_directory_display() {
        let e = EngineError::NotADirectory {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(e.to_string(), "not an accessible directory: /nope");
    }

    #[test]
    fn engine_error_list_store_has_source() {
        use std::error::Error as StdError;
        let e = EngineError::ListStore {
            path: PathBuf::from("/store"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/store"));
    }

    #[test]
    fn relocate_error_remove_stale_is_not_data_risk() {
        let e = RelocateError::RemoveStale {
            path: PathBuf::from("/store/Foo.app"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!e.is_data_risk());
    }

    #[test]
    fn relocate_error_store_copy_exists_is_not_data_risk() {
        let e = RelocateError::StoreCopyExists {
            path: PathBuf::from("/store/Foo.app"),
        };
        assert!(!e.is_data_risk());
        assert!(e.to_string().contains("--preserve-store"));
    }

    #[test]
    fn relocate_error_move_is_data_risk() {
        let e = RelocateError::Move {
            from: PathBuf::from("/Applications/Foo.app"),
            to: PathBuf::from("/store/Foo.app"),
            source: io::Error::other("boom"),
        };
        assert!(e.is_data_risk());
    }

    #[test]
    fn relocate_error_symlink_is_data_risk() {
        let e = RelocateError::Symlink {
            link: PathBuf::from("/Applications/Foo.app"),
            target: PathBuf::from("/store/Foo.app"),
            source: io::Error::other("boom"),
        };
        assert!(e.is_data_risk());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<EngineError>();
        assert_send_sync::<RelocateError>();
    }

    #[test]
    fn engine_error_converts_to_anyhow() {
        let e = EngineError::NotADirectory {
            path: PathBuf::from("/nope"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
