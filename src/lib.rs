//! Bundle relocation reconciler.
//!
//! Large application bundles are moved to secondary storage (the *store*
//! directory) and replaced by symbolic links in the location where the system
//! expects them (the *link* directory). Package updaters routinely overwrite
//! such a link with a freshly installed real bundle; `relink` detects that and
//! moves the bundle back into the store, recreating the link.
//!
//! The public API is organised into thin layers:
//!
//! - **[`config`]** — persisted settings (store dir, link dir, bundle suffix)
//! - **[`skiplist`]** — operator-curated exclusion list and its on-disk store
//! - **[`engine`]** — classification, relocation, and the reconciliation loop
//! - **[`report`]** — the structured run report consumed by presentation code
//! - **[`commands`]** — top-level subcommand orchestration

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod report;
pub mod skiplist;
