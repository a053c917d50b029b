//! Directory tree traversal for the bytecode sweep and empty-folder pruning.

use std::ffi::OsStr;
use std::fs::{self, DirEntry};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::patterns::should_ignore;
use crate::runner::CleanupRunner;

/// File extensions of compiled Python bytecode.
pub const BYTECODE_FILE_SUFFIXES: &[&str] = &["pyc", "pyo"];

/// Directory names that hold compiled Python bytecode.
pub const BYTECODE_DIR_NAMES: &[&str] = &["__pycache__"];

/// List a directory's entries sorted lexicographically by name.
fn sorted_entries(directory: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries: Vec<DirEntry> = fs::read_dir(directory)?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}

/// Walk and descend a directory tree, cleaning up files of a certain type
/// along the way. Marker directories are only removed if they end up empty.
///
/// Ignored directories are skipped entirely: no recursion and no removal
/// attempt. Entries that are neither plain files nor directories (symlinks,
/// sockets, devices) are never deleted.
pub fn descend_and_clean(
    directory: &Path,
    file_suffixes: &[&str],
    dir_names: &[&str],
    runner: &mut CleanupRunner,
) -> Result<()> {
    let entries = sorted_entries(directory)
        .with_context(|| format!("Cannot traverse directory {}", directory.display()))?;

    for child in entries {
        let path = child.path();
        let Ok(file_type) = child.file_type() else {
            debug!("Ignoring {} (file type unavailable)", path.display());
            continue;
        };

        if file_type.is_file() {
            let matches_suffix = path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| file_suffixes.contains(&ext));
            if matches_suffix {
                runner.unlink(&path);
            }
        } else if file_type.is_dir() {
            if should_ignore(&path, &runner.ignore) {
                debug!("Skipping {}", path.display());
            } else {
                descend_and_clean(&path, file_suffixes, dir_names, runner)?;
            }

            if child
                .file_name()
                .to_str()
                .is_some_and(|name| dir_names.contains(&name))
            {
                runner.rmdir(&path);
            }
        } else {
            debug!("Ignoring {} (neither a file nor a folder)", path.display());
        }
    }

    Ok(())
}

/// Recursively remove empty directories in the given directory tree.
///
/// Walks in post-order, so nested empty directories collapse bottom-up in a
/// single pass. Listing failures abandon the affected subtree with a warning
/// instead of aborting the run.
pub fn remove_empty_directories(directory: &Path, runner: &mut CleanupRunner) {
    let entries = match sorted_entries(directory) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Cannot access directory {}: {}", directory.display(), err);
            return;
        }
    };

    for child in entries {
        if !child.file_type().is_ok_and(|ft| ft.is_dir()) {
            continue;
        }
        let path = child.path();
        if should_ignore(&path, &runner.ignore) {
            debug!("Skipping {}", path.display());
            continue;
        }

        remove_empty_directories(&path, runner);
        match fs::read_dir(&path).map(|mut entries| entries.next().is_none()) {
            Ok(true) => runner.rmdir(&path),
            Ok(false) => {}
            Err(err) => {
                debug!("Cannot check directory {}: {}", path.display(), err);
            }
        }
    }
}
