//! Implementation of reap subcommands.
//!
//! `mod.rs` is a thin dispatcher; command logic lives in dedicated modules
//! (`scan`, `clean`, `rules`).
//!
//! # Example
//!
//! ```no_run
//! use reap::cli::Cli;
//! use reap::commands;
//!
//! let cli = Cli::parse_args();
//! if let Err(e) = commands::execute(&cli) {
//!     eprintln!("Error: {e:?}");
//! }
//! ```

use std::io::{self, BufRead, Write};

use crate::cli::{Cli, Commands, RuleArgs, RulesAction};
use crate::config::{AppConfig, expand_tilde};
use crate::error::Result;
use crate::rules::RuleSet;
use crate::rules::store::{RuleStore, SavedRules};

pub(crate) mod clean;
mod prompt;
pub(crate) mod rules;
pub(crate) mod scan;

pub use clean::{Clean, CleanBuilder, CleanStats};
pub use rules::{reset_rules, save_rules, show_rules};
pub use scan::scan;


/// Execute commands based on the parsed CLI arguments, using the process's
/// stdin and stdout.
pub fn execute(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    execute_with_input(cli, &mut stdin.lock(), &mut stdout.lock())
}

/// Execute commands reading confirmations from `input` and writing
/// listings to `output`.
pub fn execute_with_input<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let quiet = cli.global_opts().quiet();
    let verbose = if quiet {
        0
    } else {
        cli.global_opts().verbose()
    };
    let config = cli.global_opts().app_config();
    let store = rule_store(&config);

    match cli.command() {
        Commands::Scan { root, rules } => {
            let rule_set = resolve_rules(&store, rules)?;
            scan(&expand_tilde(root), &rule_set, verbose, quiet, output)?;
            Ok(())
        }
        Commands::Clean {
            root,
            rules,
            dry_run,
            yes,
            prune_empty,
            no_log,
        } => {
            let rule_set = resolve_rules(&store, rules)?;
            let root = expand_tilde(root);
            let log_path = config.log_file_path();

            Clean::builder()
                .root(&root)
                .rules(&rule_set)
                .dry_run(*dry_run)
                .assume_yes(*yes)
                .prune_empty(*prune_empty)
                .log_path((!*no_log).then_some(log_path.as_path()))
                .verbose(verbose)
                .quiet(quiet)
                .build()?
                .run(input, output)?;
            Ok(())
        }
        Commands::Rules { action } => match action {
            RulesAction::Show => show_rules(&store, output).map(|_| ()),
            RulesAction::Save { rules } => save_rules(&store, rules, verbose, quiet).map(|_| ()),
            RulesAction::Reset => reset_rules(&store, verbose, quiet),
        },
    }
}

/// Combine the saved rules (unless disabled) with command-line flags and
/// parse the result.
pub fn resolve_rules(store: &RuleStore, args: &RuleArgs) -> Result<RuleSet> {
    let saved = if args.no_saved_rules() {
        SavedRules::default()
    } else {
        store.load()?
    };

    saved.merge(args.to_saved_rules()).to_rule_set()
}

/// Rule store location for `config`
pub fn rule_store(config: &AppConfig) -> RuleStore {
    RuleStore::new(config.rule_file_path())
}
