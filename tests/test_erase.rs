use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use pysweep::clean::CleanOptions;
use pysweep::erase::{delete_filesystem_objects, remove_freeform_targets};
use pysweep::runner::CleanupRunner;

fn configured_runner(dry_run: bool) -> CleanupRunner {
    let mut runner = CleanupRunner::new();
    runner.configure(&CleanOptions {
        directories: vec![PathBuf::from(".")],
        ignore: vec![],
        debris: vec![],
        erase: vec![],
        dry_run,
        yes: true,
        folders: false,
        git_clean: false,
    });
    runner
}

#[test]
fn files_are_deleted_before_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tmp/sub")).unwrap();
    fs::write(dir.path().join("tmp/sub/deep.txt"), "deep").unwrap();
    fs::write(dir.path().join("tmp/a.txt"), "a").unwrap();

    let mut runner = configured_runner(false);
    delete_filesystem_objects(dir.path(), "tmp/**/*", false, &mut runner).unwrap();

    // If `sub` had been attempted before its contents, the rmdir would have
    // failed on a non-empty directory.
    assert!(!dir.path().join("tmp/sub").exists());
    assert!(dir.path().join("tmp").exists());
    assert_eq!(runner.unlink_count, 2);
    assert_eq!(runner.rmdir_count, 1);
    assert_eq!(runner.rmdir_failed, 0);
}

#[cfg(unix)]
#[test]
fn symlinks_to_directories_are_deleted_as_files() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tmp")).unwrap();
    fs::create_dir_all(dir.path().join("real_dir")).unwrap();
    fs::write(dir.path().join("real_dir/content.txt"), "content").unwrap();
    std::os::unix::fs::symlink(dir.path().join("real_dir"), dir.path().join("tmp/link"))
        .unwrap();

    let mut runner = configured_runner(false);
    delete_filesystem_objects(dir.path(), "tmp/*", false, &mut runner).unwrap();

    // The link itself is gone; its target is untouched.
    assert!(dir.path().join("tmp/link").symlink_metadata().is_err());
    assert!(dir.path().join("real_dir/content.txt").exists());
    assert_eq!(runner.unlink_count, 1);
    assert_eq!(runner.rmdir_count, 0);
}

#[test]
fn dry_run_counts_matches_without_touching_them() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tmp")).unwrap();
    fs::write(dir.path().join("tmp/scratch.txt"), "scratch").unwrap();

    let mut runner = configured_runner(true);
    // prompt=true must be a no-op under dry-run, otherwise this would block
    // waiting for stdin.
    delete_filesystem_objects(dir.path(), "tmp/*", true, &mut runner).unwrap();

    assert!(dir.path().join("tmp/scratch.txt").exists());
    assert_eq!(runner.unlink_count, 1);
}

#[test]
fn each_pattern_is_applied_in_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(dir.path().join("out/report.html"), "html").unwrap();

    let patterns = vec!["out/**/*".to_string(), "out/".to_string()];
    let mut runner = configured_runner(false);
    remove_freeform_targets(dir.path(), &patterns, true, &mut runner).unwrap();

    assert!(!dir.path().join("out").exists());
    assert_eq!(runner.unlink_count, 1);
    assert_eq!(runner.rmdir_count, 1);
}

#[test]
fn invalid_glob_pattern_is_an_error() {
    let dir = tempdir().unwrap();
    let mut runner = configured_runner(false);
    let result = delete_filesystem_objects(dir.path(), "a[", false, &mut runner);
    assert!(result.is_err());
}
