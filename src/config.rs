//! Persisted settings: the two reconciled directories and the bundle suffix.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default canonical store location.
const DEFAULT_STORE_DIR: &str = "/Volumes/MMKMINI/SYMLINKED";
/// Default link location.
const DEFAULT_LINK_DIR: &str = "/Applications";
/// Default suffix that marks a tracked bundle.
const DEFAULT_BUNDLE_SUFFIX: &str = ".app";

fn default_bundle_suffix() -> String {
    DEFAULT_BUNDLE_SUFFIX.to_string()
}

/// Validated settings consumed by the engine.
///
/// Loaded once per invocation; CLI overrides are applied on top and are never
/// written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the real, non-linked copy of each bundle.
    pub store_dir: PathBuf,
    /// Directory where a symlink to each stored bundle is expected.
    pub link_dir: PathBuf,
    /// Suffix that marks a directory entry as a tracked bundle.
    #[serde(default = "default_bundle_suffix")]
    pub bundle_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            link_dir: PathBuf::from(DEFAULT_LINK_DIR),
            bundle_suffix: default_bundle_suffix(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, writing the defaults there first if the
    /// file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or if its
    /// contents are not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    /// Persist the settings to `path` as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Return the per-user directory holding the config file and skip list,
/// honouring `XDG_CONFIG_HOME`.
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("relink"));
    }
    dirs::config_dir()
        .map(|d| d.join("relink"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Default location of the settings file.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default location of the skip list.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined.
pub fn default_skiplist_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("skiplist.txt"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::default();
        assert_eq!(s.store_dir, PathBuf::from("/Volumes/MMKMINI/SYMLINKED"));
        assert_eq!(s.link_dir, PathBuf::from("/Applications"));
        assert_eq!(s.bundle_suffix, ".app");
    }

    #[test]
    fn load_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, Settings::default());
        assert!(path.exists(), "defaults should be persisted on first load");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let settings = Settings {
            store_dir: PathBuf::from("/mnt/store"),
            link_dir: PathBuf::from("/opt/apps"),
            bundle_suffix: ".bundle".to_string(),
        };

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn load_applies_suffix_default_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "store_dir = \"/mnt/store\"\nlink_dir = \"/opt/apps\"\n",
        )
        .unwrap();

        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded.bundle_suffix, ".app");
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "store_dir = [not toml").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/config.toml");

        Settings::default().save(&path).unwrap();

        assert!(path.exists());
    }
}
