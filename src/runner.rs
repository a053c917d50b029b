//! Cleanup runner with deletion counting and optional dry-run.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::clean::CleanOptions;

/// How deletions are carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Actually remove filesystem objects.
    Real,
    /// Only log what would be removed.
    DryRun,
}

/// Execution engine with object counting, logging and optional dry-run.
///
/// Every deletion in the program goes through one instance of this runner,
/// so the end-of-run summary is accurate and dry-run is honored uniformly.
/// It is owned by the orchestrator and passed down by mutable reference;
/// `configure` must be called before any traversal starts.
#[derive(Debug)]
pub struct CleanupRunner {
    mode: Mode,
    pub ignore: Vec<String>,
    pub unlink_count: u64,
    pub unlink_failed: u64,
    pub rmdir_count: u64,
    pub rmdir_failed: u64,
}

impl CleanupRunner {
    pub fn new() -> Self {
        Self {
            mode: Mode::Real,
            ignore: Vec::new(),
            unlink_count: 0,
            unlink_failed: 0,
            rmdir_count: 0,
            rmdir_failed: 0,
        }
    }

    /// Set up the runner according to command line options, resetting all
    /// counters to zero.
    pub fn configure(&mut self, options: &CleanOptions) {
        self.mode = if options.dry_run {
            Mode::DryRun
        } else {
            Mode::Real
        };
        self.ignore = options.ignore.clone();
        self.unlink_count = 0;
        self.unlink_failed = 0;
        self.rmdir_count = 0;
        self.rmdir_failed = 0;
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == Mode::DryRun
    }

    /// Attempt to delete a file (or symlink). Failures are counted and
    /// logged, never raised.
    pub fn unlink(&mut self, path: &Path) {
        match self.mode {
            Mode::DryRun => {
                debug!("Would delete file: {}", path.display());
                self.unlink_count += 1;
            }
            Mode::Real => {
                debug!("Deleting file: {}", path.display());
                match fs::remove_file(path) {
                    Ok(()) => self.unlink_count += 1,
                    Err(err) => {
                        debug!("File not deleted. {}", err);
                        self.unlink_failed += 1;
                    }
                }
            }
        }
    }

    /// Attempt to remove a directory. Only succeeds for empty directories;
    /// failures are counted and logged, never raised.
    pub fn rmdir(&mut self, path: &Path) {
        match self.mode {
            Mode::DryRun => {
                debug!("Would delete directory: {}", path.display());
                self.rmdir_count += 1;
            }
            Mode::Real => {
                debug!("Removing directory: {}", path.display());
                match fs::remove_dir(path) {
                    Ok(()) => self.rmdir_count += 1,
                    Err(err) => {
                        debug!("Directory not removed. {}", err);
                        self.rmdir_failed += 1;
                    }
                }
            }
        }
    }
}

impl Default for CleanupRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;

    fn options(dry_run: bool) -> CleanOptions {
        CleanOptions {
            directories: vec![PathBuf::from(".")],
            ignore: vec!["venv".to_string()],
            debris: vec![],
            erase: vec![],
            dry_run,
            yes: false,
            folders: false,
            git_clean: false,
        }
    }

    #[test]
    fn configure_resets_counters_and_binds_ignore() {
        let mut runner = CleanupRunner::new();
        runner.unlink_count = 7;
        runner.rmdir_failed = 3;
        runner.configure(&options(false));
        assert_eq!(runner.unlink_count, 0);
        assert_eq!(runner.unlink_failed, 0);
        assert_eq!(runner.rmdir_count, 0);
        assert_eq!(runner.rmdir_failed, 0);
        assert_eq!(runner.ignore, vec!["venv".to_string()]);
        assert!(!runner.is_dry_run());
    }

    #[test]
    fn real_mode_removes_file_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("junk.pyc");
        File::create(&file).unwrap();

        let mut runner = CleanupRunner::new();
        runner.configure(&options(false));
        runner.unlink(&file);
        assert!(!file.exists());
        assert_eq!(runner.unlink_count, 1);
        assert_eq!(runner.unlink_failed, 0);
    }

    #[test]
    fn real_mode_counts_failures_without_raising() {
        let mut runner = CleanupRunner::new();
        runner.configure(&options(false));
        runner.unlink(Path::new("no/such/file.pyc"));
        runner.rmdir(Path::new("no/such/dir"));
        assert_eq!(runner.unlink_failed, 1);
        assert_eq!(runner.rmdir_failed, 1);
        assert_eq!(runner.unlink_count, 0);
        assert_eq!(runner.rmdir_count, 0);
    }

    #[test]
    fn rmdir_refuses_non_empty_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("full");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("keep.txt")).unwrap();

        let mut runner = CleanupRunner::new();
        runner.configure(&options(false));
        runner.rmdir(&sub);
        assert!(sub.exists());
        assert_eq!(runner.rmdir_failed, 1);
    }

    #[test]
    fn dry_run_counts_but_leaves_filesystem_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("junk.pyc");
        File::create(&file).unwrap();
        let sub = dir.path().join("empty");
        fs::create_dir(&sub).unwrap();

        let mut runner = CleanupRunner::new();
        runner.configure(&options(true));
        runner.unlink(&file);
        runner.rmdir(&sub);
        assert!(file.exists());
        assert!(sub.exists());
        assert_eq!(runner.unlink_count, 1);
        assert_eq!(runner.rmdir_count, 1);
    }
}
