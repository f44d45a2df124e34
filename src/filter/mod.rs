//! Ignore-pattern selection
//!
//! Computes the set of entries to replicate beneath a filter root. The
//! caller-supplied pattern fragment is anchored as a whole-path regular
//! expression and matched against root-relative paths; matched entries are
//! excluded, and the orphan rule then drops every entry whose ancestor
//! chain does not reach the root through included directories.

use crate::fsys::{path_key, FileSystem};
use crate::types::{FsEntry, MirrorError};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Build the ordered copy set for `root` under `pattern`.
///
/// An absent or empty pattern matches nothing, so every listed entry is
/// selected. An invalid pattern fragment is reported as
/// [`MirrorError::Pattern`].
pub fn select_entries(
    fs: &dyn FileSystem,
    root: &Path,
    pattern: Option<&str>,
) -> Result<Vec<FsEntry>, MirrorError> {
    let all = fs.list_recursive(root)?;
    let anchored = format!("^({})$", pattern.unwrap_or(""));
    let regex = Regex::new(&anchored)?;

    let candidates: Vec<FsEntry> = all
        .into_iter()
        .filter(|entry| {
            let relative = entry.relative_to(root);
            !regex.is_match(&relative.to_string_lossy())
        })
        .collect();

    let selected = drop_orphans(root, candidates);
    debug!(
        root = %root.display(),
        pattern = pattern.unwrap_or(""),
        selected = selected.len(),
        "built copy set"
    );
    Ok(selected)
}

/// Remove candidates whose parent directory is neither the filter root nor
/// an included candidate, following ancestor chains transitively.
fn drop_orphans(root: &Path, candidates: Vec<FsEntry>) -> Vec<FsEntry> {
    let root_key = path_key(root);
    let index: HashMap<String, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, entry)| (path_key(entry.path()), i))
        .collect();

    let mut orphaned: Vec<Option<bool>> = vec![None; candidates.len()];
    for start in 0..candidates.len() {
        resolve_orphaned(start, &candidates, &index, &root_key, &mut orphaned);
    }

    candidates
        .into_iter()
        .zip(orphaned)
        .filter(|(_, is_orphan)| *is_orphan == Some(false))
        .map(|(entry, _)| entry)
        .collect()
}

/// Resolve the orphan flag for one candidate with an iterative ancestor
/// walk. Every entry on the walked chain inherits the terminal verdict, so
/// each entry is resolved at most once across all calls. The visited set
/// guards against pathological parent cycles, which resolve as orphaned.
fn resolve_orphaned(
    start: usize,
    candidates: &[FsEntry],
    index: &HashMap<String, usize>,
    root_key: &str,
    orphaned: &mut [Option<bool>],
) {
    let mut chain = Vec::new();
    let mut on_chain = HashSet::new();
    let mut current = start;

    let verdict = loop {
        if let Some(resolved) = orphaned[current] {
            break resolved;
        }
        if !on_chain.insert(current) {
            break true;
        }
        chain.push(current);

        match candidates[current].path().parent() {
            None => break true,
            Some(parent) => {
                let parent_key = path_key(parent);
                if parent_key == root_key {
                    // Direct children of the filter root are never orphans.
                    break false;
                }
                match index.get(&parent_key) {
                    Some(&parent_index) => current = parent_index,
                    // Parent was excluded by the pattern (or never listed).
                    None => break true,
                }
            }
        }
    };

    for resolved in chain {
        orphaned[resolved] = Some(verdict);
    }
}
