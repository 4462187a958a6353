use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::walker::{SkippedPath, into_io_error};
use crate::error::{ReapError, Result};
use crate::rules::RuleSet;

/// Returns true iff `path` is a directory with no files anywhere below it.
///
/// Nested directories that are themselves empty do not count as content.
/// Anything else does, including symlinks and special files. A path that
/// cannot be opened or listed is never reported as empty.
pub fn is_empty_dir(path: &Path) -> bool {
    let Ok(entries) = fs::read_dir(path) else {
        return false;
    };

    for entry in entries {
        let Ok(entry) = entry else {
            return false;
        };
        let Ok(file_type) = entry.file_type() else {
            return false;
        };

        if !file_type.is_dir() || !is_empty_dir(&entry.path()) {
            return false;
        }
    }

    true
}

/// Outcome of [`remove_empty_dirs`].
#[derive(Debug, Default)]
pub struct Pruned {
    /// Removed directories, deepest first (or those that would be, in a dry run)
    pub removed: Vec<PathBuf>,
    /// Directories that could not be listed or removed
    pub failed: Vec<SkippedPath>,
}

/// Remove every empty directory strictly below `root`, deepest first.
///
/// The root itself is kept, and excluded subtrees are neither entered nor
/// removed, so a directory holding one is not empty. Failures on single
/// directories are collected in [`Pruned::failed`] and the pass moves on.
pub fn remove_empty_dirs(root: &Path, rules: &RuleSet, dry_run: bool) -> Result<Pruned> {
    if !root.is_dir() {
        return Err(ReapError::WalkRoot {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut pruned = Pruned::default();
    // Paths in `pruned.removed`, for the lookups below
    let mut gone: HashSet<PathBuf> = HashSet::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .contents_first(true)
        .into_iter()
        .filter_entry(|entry| !entry.file_type().is_dir() || !rules.is_excluded(entry.path()));

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                pruned.failed.push(SkippedPath {
                    path,
                    error: into_io_error(err),
                });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.into_path();
        // Children come first, so a prunable directory holds nothing but
        // directories already pruned
        match only_holds(&path, &gone) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(error) => {
                pruned.failed.push(SkippedPath { path, error });
                continue;
            }
        }

        if !dry_run && let Err(error) = fs::remove_dir(&path) {
            pruned.failed.push(SkippedPath { path, error });
            continue;
        }

        gone.insert(path.clone());
        pruned.removed.push(path);
    }

    Ok(pruned)
}

fn only_holds(dir: &Path, gone: &HashSet<PathBuf>) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() || !gone.contains(&entry.path()) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Remove a directory tree made only of directories, bottom-up.
///
/// Only `remove_dir` is used, so anything that appeared since the tree was
/// checked makes the removal fail instead of being deleted with it.
pub(crate) fn remove_empty_tree(path: &Path) -> io::Result<()> {
    for item in WalkDir::new(path).follow_links(false).contents_first(true) {
        let entry = item?;
        if !entry.file_type().is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::DirectoryNotEmpty,
                format!("{} appeared during removal", entry.path().display()),
            ));
        }
        fs::remove_dir(entry.path())?;
    }
    Ok(())
}
