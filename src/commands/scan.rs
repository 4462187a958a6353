//! Scan command implementation.

use std::io::Write;
use std::path::Path;

use crate::error::{ReapError, Result};
use crate::logging::Logger;
use crate::rules::{RuleSet, format_size};
use crate::scan::{ScanReport, find_matches};

/// Executes the scan command: list matches without touching them.
pub fn scan<W: Write>(
    root: &Path,
    rules: &RuleSet,
    verbose: u8,
    quiet: bool,
    output: &mut W,
) -> Result<ScanReport> {
    let log = Logger::new(verbose, quiet);
    log.verbose(1, format!("Scanning {}", root.display()));

    let report = find_matches(root, rules)?;
    report_skipped(&log, &report);
    print_matches(&report, log.level(), output)?;

    log.info(format!(
        "{} of {} entries matched, {} total",
        report.matched.len(),
        report.examined,
        format_size(report.total_size())
    ));

    Ok(report)
}

pub(crate) fn report_skipped(log: &Logger, report: &ScanReport) {
    if report.skipped.is_empty() {
        return;
    }

    log.warn(format!(
        "Skipped {} unreadable path{}",
        report.skipped.len(),
        if report.skipped.len() == 1 { "" } else { "s" }
    ));
    for skipped in &report.skipped {
        log.verbose(1, format!("  {}: {}", skipped.path.display(), skipped.error));
    }
}

/// One line per match: size and path, plus the reasons at verbosity 1+
pub(crate) fn print_matches<W: Write>(report: &ScanReport, verbose: u8, output: &mut W) -> Result<()> {
    for matched in &report.matched {
        let entry = &matched.entry;
        let size = if entry.is_dir {
            "<dir>".to_string()
        } else {
            format_size(entry.size)
        };

        let line = if verbose > 0 {
            let reasons: Vec<String> = matched.reasons.iter().map(ToString::to_string).collect();
            format!("{size:>10}  {}  ({})", entry.path.display(), reasons.join(", "))
        } else {
            format!("{size:>10}  {}", entry.path.display())
        };

        writeln!(output, "{line}").map_err(|source| ReapError::io(&entry.path, source))?;
    }

    Ok(())
}
