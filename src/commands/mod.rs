//! Top-level subcommand orchestration.
pub mod check;
pub mod config;
pub mod skiplist;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Settings, default_config_path, default_skiplist_path};
use crate::skiplist::SkipListStore;

/// Load settings, honouring `--config` and the one-run directory overrides.
///
/// Overrides are applied after loading and never persisted.
pub(crate) fn load_settings(global: &GlobalOpts) -> Result<Settings> {
    let path = match &global.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut settings = Settings::load(&path)?;
    if let Some(dir) = &global.store_dir {
        settings.store_dir.clone_from(dir);
    }
    if let Some(dir) = &global.link_dir {
        settings.link_dir.clone_from(dir);
    }
    Ok(settings)
}

/// Locate the skip list store. With `--config` the skip list lives next to
/// the given config file; otherwise in the default config directory.
pub(crate) fn skiplist_store(global: &GlobalOpts) -> Result<SkipListStore> {
    let path = match &global.config {
        Some(config_path) => config_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("skiplist.txt"),
        None => default_skiplist_path()?,
    };
    Ok(SkipListStore::new(path))
}
