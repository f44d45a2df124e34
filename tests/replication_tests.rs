//! End-to-end replication runs against the real filesystem.

use mirrorcp::executor::{Executor, RunHooks};
use mirrorcp::fsys::RealFileSystem;
use mirrorcp::CopyJob;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn executor() -> Executor {
    Executor::new(Arc::new(RealFileSystem::new()))
        .expect("build executor")
        .with_tick_interval(Duration::from_millis(1))
}

fn job(root: &Path, dest_dirs: Vec<PathBuf>, ignore_pattern: Option<&str>) -> CopyJob {
    CopyJob {
        name: "integration".to_string(),
        source_dir: root.join("src"),
        dest_dirs,
        ignore_pattern: ignore_pattern.map(str::to_string),
        backup_dir: root.join("backup"),
        always_backup: false,
    }
}

/// Relative file map (path -> contents) of a tree, for whole-tree asserts.
fn tree_files(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).expect("read_dir") {
            let entry = entry.expect("dir entry");
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                let relative = path.strip_prefix(root).expect("inside root").to_path_buf();
                files.insert(relative, fs::read(&path).expect("read file"));
            }
        }
    }

    let mut files = BTreeMap::new();
    walk(root, root, &mut files);
    files
}

fn seed_scenario_source(root: &Path) {
    fs::create_dir_all(root.join("src/folder")).expect("create src/folder");
    fs::create_dir_all(root.join("src/ignore1")).expect("create src/ignore1");
    fs::write(root.join("src/file.txt"), b"top").expect("write file.txt");
    fs::write(root.join("src/folder/file.txt"), b"nested").expect("write folder/file.txt");
    fs::write(root.join("src/folder/ignore.txt"), b"nested-ignored")
        .expect("write folder/ignore.txt");
    fs::write(root.join("src/ignore1/file.txt"), b"orphaned").expect("write ignore1/file.txt");
}

#[test]
fn test_filtered_copy_with_orphaned_subtree() {
    let temp = TempDir::new().expect("create tempdir");
    let root = temp.path();
    seed_scenario_source(root);
    fs::create_dir_all(root.join("dest")).expect("create dest");
    fs::create_dir_all(root.join("backup")).expect("create backup");

    let job = job(root, vec![root.join("dest")], Some("ignore1|.*ignore\\.txt"));
    let outcome = executor().execute(Some(&job), &RunHooks::default());
    assert!(outcome.success, "unexpected failure: {}", outcome.message);

    let dest = root.join("dest");
    assert_eq!(fs::read(dest.join("file.txt")).expect("read"), b"top");
    assert_eq!(
        fs::read(dest.join("folder/file.txt")).expect("read"),
        b"nested"
    );
    assert!(!dest.join("folder/ignore.txt").exists());
    // The matched directory disappears wholesale: the non-matching child
    // underneath it is orphaned away with it.
    assert!(!dest.join("ignore1").exists());
    assert!(!dest.join("ignore1/file.txt").exists());
}

#[test]
fn test_anchored_pattern_keeps_nested_near_match() {
    let temp = TempDir::new().expect("create tempdir");
    let root = temp.path();
    seed_scenario_source(root);
    fs::create_dir_all(root.join("dest")).expect("create dest");
    fs::create_dir_all(root.join("backup")).expect("create backup");

    // "ignore\.txt" only matches the whole relative path, so the nested
    // folder/ignore.txt is still copied.
    let job = job(root, vec![root.join("dest")], Some("ignore1|ignore\\.txt"));
    let outcome = executor().execute(Some(&job), &RunHooks::default());
    assert!(outcome.success, "unexpected failure: {}", outcome.message);

    assert!(root.join("dest/folder/ignore.txt").exists());
    assert!(!root.join("dest/ignore1").exists());
}

#[test]
fn test_always_backup_snapshots_every_destination() {
    let temp = TempDir::new().expect("create tempdir");
    let root = temp.path();
    seed_scenario_source(root);
    fs::create_dir_all(root.join("backup")).expect("create backup");

    // Pre-existing destination content, including a file the ignore
    // pattern would exclude from a normal copy.
    fs::create_dir_all(root.join("dest1/ignore1")).expect("create dest1/ignore1");
    fs::write(root.join("dest1/keep.txt"), b"dest1-own").expect("write dest1 file");
    fs::write(root.join("dest1/ignore1/old.txt"), b"dest1-excluded")
        .expect("write dest1 excluded file");
    fs::create_dir_all(root.join("dest2")).expect("create dest2");
    fs::write(root.join("dest2/other.txt"), b"dest2-own").expect("write dest2 file");

    let dest1_before = tree_files(&root.join("dest1"));
    let dest2_before = tree_files(&root.join("dest2"));

    let job = CopyJob {
        always_backup: true,
        ..job(
            root,
            vec![root.join("dest1"), root.join("dest2")],
            Some("ignore1"),
        )
    };
    let outcome = executor().execute(Some(&job), &RunHooks::default());
    assert!(outcome.success, "unexpected failure: {}", outcome.message);

    // One timestamp-prefixed snapshot per destination base name, sharing
    // a single capture timestamp.
    let snapshots: Vec<String> = fs::read_dir(root.join("backup"))
        .expect("read backup dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(snapshots.len(), 2);
    let dest1_snap = snapshots
        .iter()
        .find(|name| name.ends_with("_dest1"))
        .expect("dest1 snapshot");
    let dest2_snap = snapshots
        .iter()
        .find(|name| name.ends_with("_dest2"))
        .expect("dest2 snapshot");
    assert_eq!(
        dest1_snap.trim_end_matches("_dest1"),
        dest2_snap.trim_end_matches("_dest2"),
        "both snapshots share the phase's capture timestamp"
    );

    // Snapshots are full, unfiltered copies of the pre-run contents.
    assert_eq!(tree_files(&root.join("backup").join(dest1_snap)), dest1_before);
    assert_eq!(tree_files(&root.join("backup").join(dest2_snap)), dest2_before);

    // Destinations gained the filtered source content and kept their own.
    assert!(root.join("dest1/file.txt").exists());
    assert!(root.join("dest2/file.txt").exists());
    assert_eq!(
        fs::read(root.join("dest1/keep.txt")).expect("read"),
        b"dest1-own"
    );
    assert_eq!(
        fs::read(root.join("dest2/other.txt")).expect("read"),
        b"dest2-own"
    );
    // The pattern kept ignore1 out of the copy, but not out of the backup.
    assert_eq!(
        fs::read(root.join("dest1/ignore1/old.txt")).expect("read"),
        b"dest1-excluded"
    );
    assert!(root
        .join("backup")
        .join(dest1_snap)
        .join("ignore1/old.txt")
        .exists());
}

#[test]
fn test_invalid_dest_entry_fails_validation_without_writes() {
    let temp = TempDir::new().expect("create tempdir");
    let root = temp.path();
    seed_scenario_source(root);
    fs::create_dir_all(root.join("dest")).expect("create dest");
    fs::create_dir_all(root.join("backup")).expect("create backup");

    let job = job(
        root,
        vec![root.join("dest"), root.join("does-not-exist")],
        None,
    );
    let outcome = executor().execute(Some(&job), &RunHooks::default());

    assert!(!outcome.success);
    assert_eq!(outcome.message, "'DestDirs' has an invalid entry.");
    assert!(
        tree_files(&root.join("dest")).is_empty(),
        "validation failure must not write anything"
    );
}

#[test]
fn test_rerun_is_idempotent() {
    let temp = TempDir::new().expect("create tempdir");
    let root = temp.path();
    seed_scenario_source(root);
    fs::create_dir_all(root.join("dest")).expect("create dest");
    fs::create_dir_all(root.join("backup")).expect("create backup");

    let job = job(root, vec![root.join("dest")], Some("ignore1"));
    let executor = executor();

    let first = executor.execute(Some(&job), &RunHooks::default());
    assert!(first.success, "unexpected failure: {}", first.message);
    let after_first = tree_files(&root.join("dest"));

    let second = executor.execute(Some(&job), &RunHooks::default());
    assert!(second.success, "unexpected failure: {}", second.message);
    let after_second = tree_files(&root.join("dest"));

    assert_eq!(after_first, after_second);
    assert!(
        fs::read_dir(root.join("backup"))
            .expect("read backup dir")
            .next()
            .is_none(),
        "no backup was requested"
    );
}
