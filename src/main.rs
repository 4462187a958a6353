//! # reap CLI
//!
//! Find and delete files by extension, size and age, or remove empty
//! directories.
//!
//! ## Commands
//!
//! - **scan**: List what the rules select without touching anything
//! - **clean**: Preview, confirm and delete the selected entries
//! - **rules**: Show, save or reset the saved default rules
//!
//! ## Quick Start
//!
//! ```bash
//! # Preview old screenshots outside of vendored trees
//! reap scan ~/Pictures -e png,jpg --older-than 90days -x vendor
//!
//! # Delete them, then drop directories left empty
//! reap clean ~/Pictures -e png,jpg --older-than 90days --prune-empty
//!
//! # Only remove empty directories
//! reap clean ~/projects --empty-dirs-only --yes
//! ```
//!
//! ## Environment Variables
//!
//! - `REAP_CONFIG_DIR`: Base directory for saved rules and the deletion log
//!   (default: ~/.config)
//! - `REAP_VERBOSE`: Enable verbose output
//! - `REAP_QUIET`: Silence all output except errors
//!
//! See individual commands for more environment variables.

use std::io::IsTerminal;

use reap::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    // Plain reports when stderr is not a terminal
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();
    reap::commands::execute(&cli).map_err(Into::into)
}
