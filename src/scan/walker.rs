use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{ReapError, Result};
use crate::rules::RuleSet;

/// Snapshot of one filesystem entry taken during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
    pub is_dir: bool,
}

impl FileEntry {
    pub(crate) fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let is_dir = metadata.is_dir();
        Self {
            path,
            size: if is_dir { 0 } else { metadata.len() },
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            is_dir,
        }
    }

    /// Snapshot a single path, following no symlinks.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = path.symlink_metadata()?;
        Ok(Self::from_metadata(path.to_path_buf(), &metadata))
    }

    /// Lower-cased extension with a leading dot, e.g. `.jpg`.
    ///
    /// Everything from the last dot of the file name counts, so a dotfile
    /// such as `.bashrc` has the extension `.bashrc`.
    pub fn extension(&self) -> Option<String> {
        let name = self.path.file_name()?.to_string_lossy();
        name.rfind('.').map(|dot| name[dot..].to_lowercase())
    }
}

/// A path below the root that could not be read during a walk.
#[derive(Debug)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Result of walking one root.
#[derive(Debug, Default)]
pub struct Walk {
    /// Candidates in traversal order
    pub entries: Vec<FileEntry>,
    /// Unreadable paths below the root; their subtrees were not visited
    pub skipped: Vec<SkippedPath>,
}

/// Walk `root` depth-first and collect candidate entries.
///
/// Directories matching an exclusion pattern are pruned together with
/// everything below them. Regular files are emitted; directories are
/// emitted only when `rules` selects empty directories. Symlinks are
/// never followed nor emitted. The root itself is never emitted or pruned.
///
/// A root that is missing or unreadable fails with
/// [`ReapError::WalkRoot`]. Anything unreadable further down is recorded
/// in [`Walk::skipped`].
pub fn walk(root: &Path, rules: &RuleSet) -> Result<Walk> {
    let mut walk = Walk::default();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !rules.is_excluded(entry.path())
        });

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(ReapError::WalkRoot {
                    path: root.to_path_buf(),
                    source: into_io_error(err),
                });
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                walk.skipped.push(SkippedPath {
                    path,
                    error: into_io_error(err),
                });
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(ReapError::WalkRoot {
                    path: root.to_path_buf(),
                    source: io::Error::other("not a directory"),
                });
            }
            continue;
        }

        let file_type = entry.file_type();
        let wanted = if rules.empty_dirs_only() {
            file_type.is_dir()
        } else {
            file_type.is_file()
        };
        if !wanted {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => walk
                .entries
                .push(FileEntry::from_metadata(entry.into_path(), &metadata)),
            Err(err) => walk.skipped.push(SkippedPath {
                path: entry.into_path(),
                error: into_io_error(err),
            }),
        }
    }

    Ok(walk)
}

pub(super) fn into_io_error(err: walkdir::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::other(message))
}
