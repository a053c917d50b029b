//! pysweep - Python bytecode and debris cleaner
//!
//! pysweep removes compiled bytecode files (`*.pyc`, `*.pyo`) and their
//! `__pycache__` directories from a directory tree, along with leftovers
//! from popular development tools (pytest, coverage, packaging, ...).
//! Additional freeform targets can be erased by glob pattern, empty folders
//! can be pruned, and `git clean` can be chained in for untracked files.
//!
//! All deletions flow through a single [`runner::CleanupRunner`], which
//! enforces dry-run mode uniformly and accumulates the counts reported in
//! the end-of-run summary.

pub mod clean;
pub mod debris;
pub mod erase;
pub mod patterns;
pub mod runner;
pub mod scanner;
pub mod vcs;

// Re-export commonly used items
pub use clean::{clean, CleanOptions};
pub use debris::{load_debris_topics, DEFAULT_TOPICS, OPTIONAL_TOPICS};
pub use patterns::{normalize, should_ignore};
pub use runner::{CleanupRunner, Mode};
pub use scanner::{BYTECODE_DIR_NAMES, BYTECODE_FILE_SUFFIXES};
pub use vcs::{GitCleanError, GIT_FATAL_ERROR};
