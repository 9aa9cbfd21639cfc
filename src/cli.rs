//! Command-line interface definitions.
use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI entry point for the bundle relocation reconciler.
#[derive(Parser, Debug)]
#[command(
    name = "relink",
    about = "Reconcile relocated application bundles with their symlinks",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the config file location
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Override the canonical store directory for this run (not persisted)
    #[arg(long, global = true)]
    pub store_dir: Option<std::path::PathBuf>,

    /// Override the link directory for this run (not persisted)
    #[arg(long, global = true)]
    pub link_dir: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile the store directory against the link directory
    Check(CheckOpts),
    /// Manage the skip list
    #[command(subcommand)]
    Skiplist(SkiplistCmd),
    /// Show or change persisted settings
    #[command(subcommand)]
    Config(ConfigCmd),
    /// Print version information
    Version,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckOpts {
    /// Classify only; never move bundles or rewrite links
    #[arg(long)]
    pub no_fix: bool,

    /// Refuse to overwrite a leftover copy already present in the store
    #[arg(long)]
    pub preserve_store: bool,
}

/// Subcommands for `skiplist`.
#[derive(Subcommand, Debug, Clone)]
pub enum SkiplistCmd {
    /// Print the skip list, sorted
    List,
    /// Add a bundle name to the skip list
    Add {
        /// Bundle name, e.g. `Foo.app`
        name: String,
    },
    /// Remove a bundle name from the skip list
    Remove {
        /// Bundle name, e.g. `Foo.app`
        name: String,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCmd {
    /// Print the effective settings and where they were loaded from
    Show,
    /// Persist a new value for a setting
    Set {
        /// Which setting to change
        #[arg(value_enum)]
        key: SettingKey,
        /// New value
        value: String,
    },
}

/// Settings addressable by `config set`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    /// Canonical store directory
    StoreDir,
    /// Directory where the symlinks must exist
    LinkDir,
    /// Suffix that marks a directory entry as a tracked bundle
    BundleSuffix,
}
