//! Tool-specific debris cleanup and debris detection (to suggest option usage).

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glob::glob;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::clean::CleanOptions;
use crate::erase::delete_filesystem_objects;
use crate::patterns::should_ignore;
use crate::runner::CleanupRunner;

/// Topics cleaned when `--debris` is given without arguments.
pub const DEFAULT_TOPICS: &[&str] = &["cache", "coverage", "package", "pytest", "ruff"];

/// Topics that must be requested explicitly (or via `all`).
pub const OPTIONAL_TOPICS: &[&str] = &["jupyter", "mypy", "pyright", "tox"];

/// Ordered glob patterns for one debris topic.
#[derive(Debug, Deserialize)]
struct TopicConfig {
    patterns: Vec<String>,
}

// Embed the registry in the binary at compile time.
const DEBRIS_TOML: &str = include_str!("../debris.toml");

/// Static registry mapping each debris topic to its ordered glob patterns.
pub type DebrisTopics = BTreeMap<String, Vec<String>>;

/// Parse the debris topic registry from the embedded TOML content.
pub fn load_debris_topics() -> Result<DebrisTopics> {
    let topics: BTreeMap<String, TopicConfig> =
        toml::from_str(DEBRIS_TOML).context("Failed to parse embedded debris registry")?;
    Ok(topics
        .into_iter()
        .map(|(name, config)| (name, config.patterns))
        .collect())
}

/// Clean up debris for a specific topic below `directory`.
pub fn remove_debris_for(
    topic: &str,
    directory: &Path,
    topics: &DebrisTopics,
    runner: &mut CleanupRunner,
) -> Result<()> {
    debug!("Scanning for debris of {} ...", title_case(topic));

    let patterns = topics
        .get(topic)
        .with_context(|| format!("Unknown debris topic: {topic}"))?;
    recursive_delete_debris(directory, patterns, runner)
}

/// Recursively delete debris matching any of the given patterns.
///
/// All patterns are applied at each directory level before recursing, so the
/// directory listing happens once per directory regardless of how many
/// patterns the topic has.
pub fn recursive_delete_debris(
    directory: &Path,
    patterns: &[String],
    runner: &mut CleanupRunner,
) -> Result<()> {
    for pattern in patterns {
        delete_filesystem_objects(directory, pattern, false, runner)?;
    }

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Cannot access directory {}: {}", directory.display(), err);
            return Ok(());
        }
    };

    let mut subdirs: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|entry| entry.path())
        .collect();
    subdirs.sort_unstable();

    for subdir in subdirs {
        if should_ignore(&subdir, &runner.ignore) {
            debug!("Skipping {}", subdir.display());
        } else {
            recursive_delete_debris(&subdir, patterns, runner)?;
        }
    }

    Ok(())
}

/// Scan a directory for debris artifacts and return the detected topics.
///
/// Only a topic's non-recursive patterns are evaluated, to keep detection
/// cheap; this is a top-level spot check, not a full tree scan.
pub fn detect_debris_in_directory(directory: &Path, topics: &DebrisTopics) -> Vec<String> {
    let mut detected = Vec::new();

    for (topic, patterns) in topics {
        for pattern in patterns {
            if pattern.contains("**") {
                continue;
            }
            let full_pattern = directory.join(pattern);
            let Some(full_pattern) = full_pattern.to_str() else {
                continue;
            };
            let found = glob(full_pattern)
                .map(|mut matches| matches.any(|entry| entry.is_ok()))
                .unwrap_or(false);
            if found {
                detected.push(topic.clone());
                break;
            }
        }
    }

    detected
}

/// Suggest using the `--debris` option when it wasn't used, naming the
/// topics whose artifacts are actually present.
pub fn suggest_debris_option(options: &CleanOptions, topics: &DebrisTopics) {
    let mut all_detected = BTreeSet::new();
    for directory in &options.directories {
        if directory.exists() {
            all_detected.extend(detect_debris_in_directory(directory, topics));
        }
    }

    if all_detected.is_empty() {
        info!(
            "Hint: Use --debris to also clean up build artifacts \
             from common Python development tools."
        );
    } else {
        let detected: Vec<String> = all_detected.into_iter().collect();
        info!(
            "Hint: Use --debris to also clean up build artifacts. Detected: {}",
            detected.join(" ")
        );
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
