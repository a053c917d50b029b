//! Orchestration of one cleanup run.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::debris::{load_debris_topics, remove_debris_for, suggest_debris_option};
use crate::erase::remove_freeform_targets;
use crate::runner::CleanupRunner;
use crate::scanner::{
    descend_and_clean, remove_empty_directories, BYTECODE_DIR_NAMES, BYTECODE_FILE_SUFFIXES,
};
use crate::vcs::execute_git_clean;

/// Validated configuration for one run, produced by the CLI layer.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Directory trees to clean, in order.
    pub directories: Vec<PathBuf>,
    /// Directory names or relative paths excluded from traversal.
    pub ignore: Vec<String>,
    /// Debris topics to clean (already validated against the registry).
    pub debris: Vec<String>,
    /// Freeform glob patterns to erase.
    pub erase: Vec<String>,
    pub dry_run: bool,
    pub yes: bool,
    pub folders: bool,
    pub git_clean: bool,
}

/// Clean Python bytecode and requested debris from the configured
/// directories, then report a summary.
pub fn clean(options: &CleanOptions) -> Result<()> {
    let topics = load_debris_topics()?;
    let mut runner = CleanupRunner::new();
    runner.configure(options);

    for directory in &options.directories {
        info!("Cleaning directory {}", directory.display());
        descend_and_clean(
            directory,
            BYTECODE_FILE_SUFFIXES,
            BYTECODE_DIR_NAMES,
            &mut runner,
        )?;

        for topic in &options.debris {
            remove_debris_for(topic, directory, &topics, &mut runner)?;
        }

        remove_freeform_targets(directory, &options.erase, options.yes, &mut runner)?;

        if options.folders {
            debug!("Removing empty directories...");
            remove_empty_directories(directory, &mut runner);
        }

        if options.git_clean {
            execute_git_clean(directory, options)?;
        }
    }

    let git_clean_note = if options.git_clean {
        " (Not counting git clean)"
    } else {
        ""
    };

    info!(
        "Total {} files, {} directories {}.{}",
        runner.unlink_count,
        runner.rmdir_count,
        if options.dry_run {
            "would be removed"
        } else {
            "removed"
        },
        git_clean_note,
    );

    if runner.unlink_failed > 0 || runner.rmdir_failed > 0 {
        debug!(
            "{} files, {} directories {} not be removed.{}",
            runner.unlink_failed,
            runner.rmdir_failed,
            if options.dry_run { "would" } else { "could" },
            git_clean_note,
        );
    }

    if options.debris.is_empty() {
        suggest_debris_option(options, &topics);
    }

    Ok(())
}
