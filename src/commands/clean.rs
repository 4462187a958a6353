//! Clean command and helpers.

use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::Path;

use super::prompt::confirm;
use super::scan::{print_matches, report_skipped};
use crate::error::{ReapError, Result};
use crate::logging::{DeletionLog, Logger};
use crate::rules::{RuleSet, format_size};
use crate::scan::{FileEntry, find_matches, is_empty_dir, remove_empty_dirs, remove_empty_tree};

/// Totals for one clean run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanStats {
    /// Entries the rules selected
    pub matched: usize,
    /// Entries actually removed (or that would be, in a dry run)
    pub removed: usize,
    pub bytes_freed: u64,
    /// Entries that could not be removed
    pub failed: usize,
    /// Empty directories removed by the follow-up prune
    pub dirs_pruned: usize,
    /// Whether the user declined the confirmation prompt
    pub declined: bool,
    /// Removals that could not be written to the deletion log
    pub log_errors: usize,
}

pub struct Clean<'a> {
    root: &'a Path,
    rules: &'a RuleSet,
    dry_run: bool,
    assume_yes: bool,
    prune_empty: bool,
    log_path: Option<&'a Path>,
    verbose: u8,
    quiet: bool,
}

#[derive(Default)]
pub struct CleanBuilder<'a> {
    root: Option<&'a Path>,
    rules: Option<&'a RuleSet>,
    dry_run: bool,
    assume_yes: bool,
    prune_empty: bool,
    log_path: Option<&'a Path>,
    verbose: u8,
    quiet: bool,
}

impl<'a> CleanBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, path: &'a Path) -> Self {
        self.root = Some(path);
        self
    }

    pub fn rules(mut self, rules: &'a RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip the confirmation prompt
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn prune_empty(mut self, prune: bool) -> Self {
        self.prune_empty = prune;
        self
    }

    /// Record deletions in this file; no log when unset
    pub fn log_path(mut self, path: Option<&'a Path>) -> Self {
        self.log_path = path;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn build(self) -> Result<Clean<'a>> {
        let root = self
            .root
            .ok_or_else(|| ReapError::ConfigError("clean requires a root directory".to_string()))?;
        let rules = self
            .rules
            .ok_or_else(|| ReapError::ConfigError("clean requires a rule set".to_string()))?;

        Ok(Clean {
            root,
            rules,
            dry_run: self.dry_run,
            assume_yes: self.assume_yes,
            prune_empty: self.prune_empty,
            log_path: self.log_path,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}

impl<'a> Clean<'a> {
    pub fn builder() -> CleanBuilder<'a> {
        CleanBuilder::new()
    }

    /// Preview, confirm, delete and optionally prune.
    ///
    /// Confirmation is read from `input`; the match list and the prompt go
    /// to `output`.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<CleanStats> {
        let log = Logger::new(self.verbose, self.quiet);
        let mut stats = CleanStats::default();

        log.verbose(1, format!("Scanning {}", self.root.display()));
        let report = find_matches(self.root, self.rules)?;
        report_skipped(&log, &report);
        stats.matched = report.matched.len();

        if report.matched.is_empty() {
            log.info("Nothing matched, nothing to delete");
            return self.finish(stats, &log, None);
        }

        print_matches(&report, log.level(), output)?;
        let noun = if self.rules.empty_dirs_only() {
            "directories"
        } else {
            "files"
        };
        log.info(format!(
            "{} {noun} matched, {} total",
            report.matched.len(),
            format_size(report.total_size())
        ));

        if self.dry_run {
            stats.removed = report.matched.len();
            stats.bytes_freed = report.total_size();
            log.info("Dry run, nothing was deleted");
            return self.finish(stats, &log, None);
        }

        if !self.assume_yes {
            let question = format!("Delete {} {noun}?", report.matched.len());
            if !confirm(input, output, &question)? {
                log.info("Aborted, nothing was deleted");
                stats.declined = true;
                return Ok(stats);
            }
        }

        let mut deletion_log = self.open_log()?;

        for matched in &report.matched {
            let entry = &matched.entry;
            match remove_entry(entry) {
                Ok(Removal::Removed) => {
                    log.verbose(2, format!("Removed {}", entry.path.display()));
                    let action = if entry.is_dir { "deleted-dir" } else { "deleted" };
                    record(&mut deletion_log, &log, &mut stats, action, entry.size, &entry.path);
                    stats.removed += 1;
                    stats.bytes_freed += entry.size;
                }
                Ok(Removal::Gone) => {
                    log.verbose(2, format!("Already gone: {}", entry.path.display()));
                }
                Ok(Removal::NoLongerEmpty) => {
                    log.warn(format!(
                        "{} is no longer empty, leaving it",
                        entry.path.display()
                    ));
                    stats.failed += 1;
                }
                Err(e) => {
                    log.warn(format!("Failed to remove {}: {e}", entry.path.display()));
                    stats.failed += 1;
                }
            }
        }

        log.info(format!(
            "Deleted {} {noun}, freed {}",
            stats.removed,
            format_size(stats.bytes_freed)
        ));
        if stats.failed > 0 {
            log.warn(format!("{} entries could not be removed", stats.failed));
        }

        self.finish(stats, &log, Some(deletion_log))
    }

    fn open_log(&self) -> Result<DeletionLog> {
        match self.log_path {
            Some(path) if !self.dry_run => DeletionLog::open(path),
            _ => Ok(DeletionLog::disabled()),
        }
    }

    /// Run the optional empty-directory prune and report it.
    fn finish(
        &self,
        mut stats: CleanStats,
        log: &Logger,
        deletion_log: Option<DeletionLog>,
    ) -> Result<CleanStats> {
        if !self.prune_empty {
            return Ok(stats);
        }

        let mut deletion_log = match deletion_log {
            Some(deletion_log) => deletion_log,
            None => self.open_log()?,
        };

        let pruned = remove_empty_dirs(self.root, self.rules, self.dry_run)?;
        for dir in &pruned.removed {
            log.verbose(2, format!("Pruned {}", dir.display()));
            record(&mut deletion_log, log, &mut stats, "deleted-dir", 0, dir);
        }
        for failure in &pruned.failed {
            log.warn(format!(
                "Failed to prune {}: {}",
                failure.path.display(),
                failure.error
            ));
        }
        stats.dirs_pruned = pruned.removed.len();
        stats.failed += pruned.failed.len();

        if stats.dirs_pruned > 0 {
            let verb = if self.dry_run { "Would prune" } else { "Pruned" };
            log.info(format!("{verb} {} empty directories", stats.dirs_pruned));
        }
        Ok(stats)
    }
}

/// Log a removal; a failed write is a warning, the deletions carry on
fn record(
    deletion_log: &mut DeletionLog,
    log: &Logger,
    stats: &mut CleanStats,
    action: &str,
    size: u64,
    target: &Path,
) {
    if let Err(e) = deletion_log.record(action, size, target) {
        log.warn(format!("Could not log removal of {}: {e}", target.display()));
        stats.log_errors += 1;
    }
}

enum Removal {
    Removed,
    Gone,
    NoLongerEmpty,
}

fn remove_entry(entry: &FileEntry) -> io::Result<Removal> {
    let result = if entry.is_dir {
        if !entry.path.exists() {
            return Ok(Removal::Gone);
        }
        // Files may have appeared since the scan
        if !is_empty_dir(&entry.path) {
            return Ok(Removal::NoLongerEmpty);
        }
        remove_empty_tree(&entry.path)
    } else {
        fs::remove_file(&entry.path)
    };

    match result {
        Ok(()) => Ok(Removal::Removed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Removal::Gone),
        Err(e) => Err(e),
    }
}
