//! Rules command implementation.

use std::io::Write;

use crate::cli::RuleArgs;
use crate::error::{ReapError, Result};
use crate::logging::Logger;
use crate::rules::store::{RuleStore, SavedRules};

/// Print the saved rule document as JSON.
pub fn show_rules<W: Write>(store: &RuleStore, output: &mut W) -> Result<SavedRules> {
    let rules = store.load()?;
    let json = serde_json::to_string_pretty(&rules).map_err(|source| ReapError::RulesFile {
        path: store.path().to_path_buf(),
        source,
    })?;
    writeln!(output, "{json}").map_err(|source| ReapError::io(store.path(), source))?;
    Ok(rules)
}

/// Merge `args` into the saved document and persist it.
///
/// The merged rules are parsed before saving so a malformed value is never
/// written.
pub fn save_rules(store: &RuleStore, args: &RuleArgs, verbose: u8, quiet: bool) -> Result<SavedRules> {
    let log = Logger::new(verbose, quiet);

    let current = if args.no_saved_rules() {
        SavedRules::default()
    } else {
        store.load()?
    };
    let merged = current.merge(args.to_saved_rules());
    merged.to_rule_set()?;

    store.save(&merged)?;
    log.info(format!("Rules saved to {}", store.path().display()));
    Ok(merged)
}

/// Delete the saved rule document.
pub fn reset_rules(store: &RuleStore, verbose: u8, quiet: bool) -> Result<()> {
    let log = Logger::new(verbose, quiet);
    if store.reset()? {
        log.info(format!("Removed {}", store.path().display()));
    } else {
        log.verbose(1, format!("No saved rules at {}", store.path().display()));
    }
    Ok(())
}
