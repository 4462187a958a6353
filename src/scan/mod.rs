//! Directory traversal and rule evaluation.
//!
//! [`walk`] visits a root top-down, pruning excluded directories, and
//! [`evaluate`] decides for each visited entry whether it qualifies.
//! Empty-directory detection ([`is_empty_dir`]) is a separate bottom-up
//! recursion. [`remove_empty_dirs`] is the cleanup pass run after
//! deletions; it honors the same exclusions as the walk.
//!
//! Everything here is synchronous and single-threaded; directory handles
//! never outlive the call that opened them.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use reap::rules::{RuleSet, parse_extensions};
//! use reap::scan;
//!
//! let rules = RuleSet::builder()
//!     .extensions(parse_extensions("log"))
//!     .exclude("node_modules")
//!     .build()?;
//!
//! for entry in scan::find_matches(Path::new("."), &rules)?.matched {
//!     println!("{}", entry.entry.path.display());
//! }
//! # Ok::<(), reap::error::ReapError>(())
//! ```

use std::path::Path;

mod empty;
mod matcher;
mod walker;

pub(crate) use empty::remove_empty_tree;
pub use empty::{Pruned, is_empty_dir, remove_empty_dirs};
pub use matcher::{MatchReason, RejectReason, Verdict, evaluate, matches};
pub use walker::{FileEntry, SkippedPath, Walk, walk};

use crate::error::Result;
use crate::rules::RuleSet;

/// An entry that satisfied the rules, with the reasons it did.
#[derive(Debug, Clone)]
pub struct Matched {
    pub entry: FileEntry,
    pub reasons: Vec<MatchReason>,
}

/// Outcome of [`find_matches`].
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Matches in traversal order
    pub matched: Vec<Matched>,
    /// Candidates the walk produced, matched or not
    pub examined: usize,
    pub skipped: Vec<SkippedPath>,
}

impl ScanReport {
    pub fn total_size(&self) -> u64 {
        self.matched.iter().map(|m| m.entry.size).sum()
    }
}

/// Walk `root` and keep the entries that match `rules`.
pub fn find_matches(root: &Path, rules: &RuleSet) -> Result<ScanReport> {
    let Walk { entries, skipped } = walk(root, rules)?;
    let examined = entries.len();

    let matched = entries
        .into_iter()
        .filter_map(|entry| match evaluate(&entry, rules) {
            Verdict::Matched(reasons) => Some(Matched { entry, reasons }),
            Verdict::Rejected(_) => None,
        })
        .collect();

    Ok(ScanReport {
        matched,
        examined,
        skipped,
    })
}
