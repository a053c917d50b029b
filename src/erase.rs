//! Freeform target deletion with interactive prompt.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use glob::glob;
use tracing::{debug, warn};

use crate::runner::CleanupRunner;

/// An interactive confirmation prompt.
///
/// Returns true iff the answer is "y" or "yes" (case-insensitive). An
/// interrupted or closed stdin aborts the whole process immediately.
pub fn confirm(message: &str) -> bool {
    print!("{message}? ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(0) | Err(_) => {
            eprintln!("Aborted by user.");
            process::exit(1);
        }
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Identify all pathnames matching a glob pattern below `directory`, and
/// attempt to delete them in the proper order, optionally asking for
/// confirmation per object.
///
/// The matches are sorted in reverse order and all files are deleted before
/// any directory is removed. This way the directories that are deepest down
/// in the hierarchy are empty (of both files and directories) by the time we
/// attempt to remove them. Symlinks are treated as files, even when they
/// point at directories.
pub fn delete_filesystem_objects(
    directory: &Path,
    path_glob: &str,
    prompt: bool,
    runner: &mut CleanupRunner,
) -> Result<()> {
    let full_pattern = directory.join(path_glob);
    let full_pattern = full_pattern
        .to_str()
        .with_context(|| format!("Non-UTF-8 glob pattern below {}", directory.display()))?;

    let mut all_names: Vec<PathBuf> = glob(full_pattern)
        .with_context(|| format!("Invalid glob pattern: {path_glob}"))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Cannot access {}: {}", err.path().display(), err);
                None
            }
        })
        .collect();
    all_names.sort_unstable_by(|a, b| b.cmp(a));

    let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) = all_names.into_iter().partition(|name| {
        name.symlink_metadata()
            .is_ok_and(|meta| meta.is_dir())
    });

    // Prompting makes no sense when nothing will actually be removed.
    let prompt = prompt && !runner.is_dry_run();

    for file_object in files {
        let file_type = if is_symlink(&file_object) {
            "symlink"
        } else {
            "file"
        };
        if prompt && !confirm(&format!("Delete {} {}", file_type, file_object.display())) {
            runner.unlink_failed += 1;
            continue;
        }
        runner.unlink(&file_object);
    }

    for dir_object in dirs {
        if prompt && !confirm(&format!("Remove empty directory {}", dir_object.display())) {
            runner.rmdir_failed += 1;
            continue;
        }
        runner.rmdir(&dir_object);
    }

    Ok(())
}

/// Remove free-form targets using globbing.
///
/// This is potentially dangerous since users can delete anything anywhere in
/// their file system, including the project they are working on. Deletion is
/// therefore not recursive (directory contents must be matched explicitly,
/// e.g. `dirname/**/*`), and every single object is confirmed interactively
/// unless `yes` is set.
pub fn remove_freeform_targets(
    directory: &Path,
    glob_patterns: &[String],
    yes: bool,
    runner: &mut CleanupRunner,
) -> Result<()> {
    for path_glob in glob_patterns {
        debug!("Erase file system objects matching: {}", path_glob);
        delete_filesystem_objects(directory, path_glob, !yes, runner)?;
    }
    Ok(())
}
