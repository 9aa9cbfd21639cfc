//! The `config` command: show and change persisted settings.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::{ConfigCmd, GlobalOpts, SettingKey};
use crate::config::{Settings, default_config_path};
use crate::logging::Logger;

/// Run a config subcommand.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or written, or if
/// the new value is rejected by validation.
pub fn run(global: &GlobalOpts, cmd: &ConfigCmd, log: &Logger) -> Result<()> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    match cmd {
        ConfigCmd::Show => {
            let settings = Settings::load(&path)?;
            log.stage("Settings");
            log.info(&format!("store dir:     {}", settings.store_dir.display()));
            log.info(&format!("link dir:      {}", settings.link_dir.display()));
            log.info(&format!("bundle suffix: {}", settings.bundle_suffix));
            log.info(&format!("file:          {}", path.display()));
        }
        ConfigCmd::Set { key, value } => {
            let mut settings = Settings::load(&path)?;
            apply(&mut settings, *key, value)?;
            settings.save(&path)?;
            log.info(&format!("saved {}", path.display()));
        }
    }

    Ok(())
}

/// Apply one `config set` assignment, validating the value first.
///
/// Directory settings must name an existing, accessible directory — the
/// engine relies on that before a run starts. The suffix must be non-empty
/// and start with a dot so hidden-entry filtering stays meaningful.
fn apply(settings: &mut Settings, key: SettingKey, value: &str) -> Result<()> {
    match key {
        SettingKey::StoreDir => {
            settings.store_dir = existing_dir(value)?;
        }
        SettingKey::LinkDir => {
            settings.link_dir = existing_dir(value)?;
        }
        SettingKey::BundleSuffix => {
            if value.is_empty() || !value.starts_with('.') {
                anyhow::bail!("bundle suffix must start with a dot, e.g. `.app`");
            }
            settings.bundle_suffix = value.to_string();
        }
    }
    Ok(())
}

/// Accept `value` only if it names an existing directory.
fn existing_dir(value: &str) -> Result<PathBuf> {
    let path = Path::new(value);
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        anyhow::bail!("not an accessible directory: {value}")
    }
}
