use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use pysweep::clean::{clean, CleanOptions};
use pysweep::debris::{DEFAULT_TOPICS, OPTIONAL_TOPICS};
use pysweep::vcs::GitCleanError;

/// Directories that are skipped during traversal unless overridden.
const DEFAULT_IGNORE: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".tox",
    ".venv",
    "node_modules",
    "venv",
];

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Remove byte-compiled files for a package or project",
    long_about = None
)]
struct Args {
    /// Directory tree to traverse for byte-code
    #[arg(required = true)]
    directory: Vec<PathBuf>,

    /// Directory that should be ignored, in addition to the defaults
    /// (.git .hg .svn .tox .venv node_modules venv); may be given multiple times
    #[arg(short, long, value_name = "DIRECTORY", num_args = 1..)]
    ignore: Vec<String>,

    /// Remove leftovers from popular Python development tools
    /// (bare --debris cleans the default topics; "all" adds the optional ones)
    #[arg(
        short,
        long,
        value_name = "TOPIC",
        num_args = 0..,
        value_parser = [
            "all", "cache", "coverage", "jupyter", "mypy", "package",
            "pyright", "pytest", "ruff", "tox",
        ],
    )]
    debris: Option<Vec<String>>,

    /// Delete files or folders matching a globbing pattern (may be given
    /// multiple times); interactive unless --yes is used
    #[arg(short, long, value_name = "PATTERN", num_args = 1..)]
    erase: Vec<String>,

    /// Show what would be done
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Be quiet
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Be more verbose
    #[arg(short, long)]
    verbose: bool,

    /// Assume yes as answer for interactive questions
    #[arg(short, long)]
    yes: bool,

    /// Remove empty directories left behind after cleaning
    #[arg(short, long)]
    folders: bool,

    /// Also run git clean for untracked files in the directory
    #[arg(long)]
    git_clean: bool,
}

/// Set the log level according to the -v/-q command line options.
fn init_logging(args: &Args) {
    let level = if args.quiet {
        LevelFilter::ERROR
    } else if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(false)
        .with_ansi(false)
        .without_time()
        .init();
}

/// Resolve the topic list from the --debris occurrences: absent means no
/// debris cleanup, bare means the default topics, "all" expands to every
/// known topic.
fn resolve_debris_topics(debris: Option<Vec<String>>) -> Vec<String> {
    let all = || {
        DEFAULT_TOPICS
            .iter()
            .chain(OPTIONAL_TOPICS)
            .map(|s| s.to_string())
            .collect()
    };
    match debris {
        None => Vec::new(),
        Some(topics) if topics.iter().any(|t| t == "all") => all(),
        Some(topics) if topics.is_empty() => {
            DEFAULT_TOPICS.iter().map(|s| s.to_string()).collect()
        }
        Some(topics) => topics,
    }
}

fn build_options(args: Args) -> CleanOptions {
    let mut ignore: Vec<String> = DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect();
    ignore.extend(args.ignore);

    CleanOptions {
        directories: args.directory,
        ignore,
        debris: resolve_debris_topics(args.debris),
        erase: args.erase,
        dry_run: args.dry_run,
        yes: args.yes,
        folders: args.folders,
        git_clean: args.git_clean,
    }
}

fn main() {
    let args = Args::parse();

    if args.yes && args.erase.is_empty() && !args.git_clean {
        Args::command()
            .error(
                ErrorKind::ArgumentConflict,
                "Specifying --yes only makes sense with --erase or --git-clean.",
            )
            .exit();
    }

    init_logging(&args);
    let options = build_options(args);

    if !options.debris.is_empty() {
        debug!("Debris topics to scan for: {}", options.debris.join(" "));
    }
    debug!("Ignored directories: {}", options.ignore.join(" "));

    if let Err(err) = clean(&options) {
        if let Some(git_err) = err.downcast_ref::<GitCleanError>() {
            process::exit(git_err.code);
        }
        eprintln!("{err:#}");
        process::exit(1);
    }
}
