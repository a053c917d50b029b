//! Git integration for cleaning untracked files.

use std::fmt;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::clean::CleanOptions;

/// Exit code git uses for "not a git repository" (among other fatal errors).
pub const GIT_FATAL_ERROR: i32 = 128;

/// A `git clean` invocation that failed for a reason other than "not a
/// repository". Carries the exit code to propagate as the process status.
#[derive(Debug)]
pub struct GitCleanError {
    pub code: i32,
}

impl fmt::Display for GitCleanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git clean exited with status {}", self.code)
    }
}

impl std::error::Error for GitCleanError {}

/// Build the argument list for `git clean` with appropriate flags.
///
/// Untracked files and directories are removed including ignored ones,
/// except for the configured ignore patterns. The mode is `-n` for dry-run,
/// `-f` when confirmation is waived, and interactive `-i` otherwise.
pub fn build_git_clean_args(
    ignore_patterns: &[String],
    dry_run: bool,
    force: bool,
) -> Vec<String> {
    let mut args = vec!["clean".to_string(), "-dx".to_string()];
    for pattern in ignore_patterns {
        args.push("-e".to_string());
        args.push(pattern.clone());
    }
    let mode = if dry_run {
        "-n"
    } else if force {
        "-f"
    } else {
        "-i"
    };
    args.push(mode.to_string());
    args
}

/// Execute `git clean` in the specified directory.
///
/// A directory that is not under version control is skipped with a warning;
/// any other non-zero exit is fatal and propagates via [`GitCleanError`].
pub fn execute_git_clean(directory: &Path, options: &CleanOptions) -> Result<()> {
    info!("Executing git clean...");
    let args = build_git_clean_args(&options.ignore, options.dry_run, options.yes);

    debug!("Run: git {}", args.join(" "));
    let status = Command::new("git")
        .args(&args)
        .current_dir(directory)
        .status()
        .context("Failed to run git")?;

    match status.code() {
        Some(0) => Ok(()),
        Some(GIT_FATAL_ERROR) => {
            warn!(
                "Directory {} is not under version control. Skipping git clean.",
                directory.display()
            );
            Ok(())
        }
        Some(code) => Err(GitCleanError { code }.into()),
        None => Err(GitCleanError { code: 1 }.into()),
    }
}
