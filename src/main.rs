//! `relink` binary entry point.
use anyhow::Result;
use clap::Parser;

use relink::cli;
use relink::commands;
use relink::logging::Logger;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = Logger::new(args.verbose);

    match args.command {
        cli::Command::Check(ref opts) => commands::check::run(&args.global, opts, &log),
        cli::Command::Skiplist(ref cmd) => commands::skiplist::run(&args.global, cmd, &log),
        cli::Command::Config(ref cmd) => commands::config::run(&args.global, cmd, &log),
        cli::Command::Version => {
            let version = option_env!("RELINK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("relink {version}");
            Ok(())
        }
    }
}
