//! The `skiplist` command: list, add, and remove exclusions.
use anyhow::Result;

use crate::cli::{GlobalOpts, SkiplistCmd};
use crate::logging::Logger;

/// Run a skiplist subcommand.
///
/// # Errors
///
/// Returns an error if the skip list file cannot be read or written.
pub fn run(global: &GlobalOpts, cmd: &SkiplistCmd, log: &Logger) -> Result<()> {
    let store = super::skiplist_store(global)?;

    match cmd {
        SkiplistCmd::List => {
            let skips = store.load()?;
            log.stage("Skip list");
            if skips.is_empty() {
                log.info("(empty)");
            } else {
                for name in skips.all() {
                    log.info(name);
                }
            }
            log.debug(&format!("file: {}", store.path().display()));
        }
        SkiplistCmd::Add { name } => {
            if store.add(name)? {
                log.info(&format!("added {name} to the skip list"));
            } else {
                log.info(&format!("{name} is already on the skip list"));
            }
        }
        SkiplistCmd::Remove { name } => {
            if store.remove(name)? {
                log.info(&format!("removed {name} from the skip list"));
            } else {
                log.warn(&format!("{name} is not on the skip list"));
            }
        }
    }

    Ok(())
}
