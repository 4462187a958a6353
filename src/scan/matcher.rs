use std::fmt;
use std::time::SystemTime;

use super::empty::is_empty_dir;
use super::walker::FileEntry;
use crate::rules::{RuleSet, format_size};

/// Why an entry qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    /// Directory with no files anywhere below it
    EmptyDirectory,
    /// Extension is on the allow-list
    Extension(String),
    /// At least this many bytes
    MinSize(u64),
    /// At most this many bytes
    MaxSize(u64),
    /// Modified at or before this instant
    OlderThan(SystemTime),
    /// No filter is active
    Unfiltered,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::EmptyDirectory => write!(f, "empty directory"),
            MatchReason::Extension(ext) => write!(f, "extension {ext}"),
            MatchReason::MinSize(bytes) => write!(f, "size >= {}", format_size(*bytes)),
            MatchReason::MaxSize(bytes) => write!(f, "size <= {}", format_size(*bytes)),
            MatchReason::OlderThan(cutoff) => {
                let age = SystemTime::now()
                    .duration_since(*cutoff)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                write!(f, "not modified in the last {}", format_age(age))
            }
            MatchReason::Unfiltered => write!(f, "no filters"),
        }
    }
}

fn format_age(secs: u64) -> String {
    const STEPS: &[(u64, &str)] = &[(86_400, "d"), (3_600, "h"), (60, "m")];
    STEPS
        .iter()
        .find(|(unit, _)| secs >= *unit)
        .map(|(unit, suffix)| format!("{}{suffix}", secs / unit))
        .unwrap_or_else(|| format!("{secs}s"))
}

/// Why an entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Not a directory, or a directory that still holds files
    NotEmptyDirectory,
    Excluded(String),
    Extension,
    TooSmall,
    TooLarge,
    TooRecent,
}

/// Outcome of evaluating one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Matched(Vec<MatchReason>),
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched(_))
    }
}

/// Whether `entry` satisfies every active rule.
pub fn matches(entry: &FileEntry, rules: &RuleSet) -> bool {
    evaluate(entry, rules).is_match()
}

/// Evaluate `entry` against `rules`.
///
/// In empty-directory mode only directory emptiness counts. Otherwise the
/// checks run in order (exclusions, extension, size bounds, age) and the
/// first failing one rejects the entry.
pub fn evaluate(entry: &FileEntry, rules: &RuleSet) -> Verdict {
    if rules.empty_dirs_only() {
        return if entry.is_dir && is_empty_dir(&entry.path) {
            Verdict::Matched(vec![MatchReason::EmptyDirectory])
        } else {
            Verdict::Rejected(RejectReason::NotEmptyDirectory)
        };
    }

    if let Some(pattern) = rules.excluded_by(&entry.path) {
        return Verdict::Rejected(RejectReason::Excluded(pattern.to_string()));
    }

    let mut reasons = Vec::new();

    if !rules.extensions().is_empty() {
        match entry.extension() {
            Some(ext) if rules.extensions().contains(&ext) => {
                reasons.push(MatchReason::Extension(ext));
            }
            _ => return Verdict::Rejected(RejectReason::Extension),
        }
    }

    if entry.size < rules.min_size() {
        return Verdict::Rejected(RejectReason::TooSmall);
    }
    if rules.min_size() > 0 {
        reasons.push(MatchReason::MinSize(rules.min_size()));
    }

    if let Some(max) = rules.max_size() {
        if entry.size > max {
            return Verdict::Rejected(RejectReason::TooLarge);
        }
        reasons.push(MatchReason::MaxSize(max));
    }

    if let Some(cutoff) = rules.age_cutoff() {
        if entry.modified > cutoff {
            return Verdict::Rejected(RejectReason::TooRecent);
        }
        reasons.push(MatchReason::OlderThan(cutoff));
    }

    if reasons.is_empty() {
        reasons.push(MatchReason::Unfiltered);
    }

    Verdict::Matched(reasons)
}
