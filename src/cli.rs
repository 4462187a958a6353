//! Command-line interface definitions for reap.
//!
//! This module defines the CLI structure using clap, including all
//! subcommands and their arguments. The main entry point is the [`Cli`]
//! struct.
//!
//! # Example
//!
//! ```no_run
//! use reap::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//!
//! match cli.command() {
//!     Commands::Scan { root, .. } => println!("Previewing {}", root.display()),
//!     _ => {}
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::error::{ReapError, Result};
use crate::rules::ExclusionMode;
use crate::rules::store::SavedRules;


/// Main command-line interface for reap.
#[derive(Parser, Debug)]
#[command(
    name = "reap",
    bin_name = "reap",
    author,
    version,
    about = "Find and remove files by extension, size, age and exclusion rules",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options that apply to all reap commands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Directory holding reap's rule file and log (defaults to ~/.config)
    #[arg(long, global = true, env = "REAP_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "REAP_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors and the match list
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "REAP_QUIET"
    )]
    quiet: bool,
}

impl GlobalOpts {
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Application paths derived from `--config-dir` or the home directory
    pub fn app_config(&self) -> AppConfig {
        match self.config_dir() {
            Some(dir) => AppConfig::new(dir),
            None => AppConfig::from_home(),
        }
    }
}

/// Rule flags shared by `scan`, `clean` and `rules save`.
///
/// Every flag left unset falls back to the saved rule document.
#[derive(Args, Debug, Default, Clone)]
pub struct RuleArgs {
    /// File extensions to match (comma-separated, e.g. "jpg,png")
    #[arg(short, long)]
    extensions: Option<String>,

    /// Minimum file size (e.g. "10kb", "100mb")
    #[arg(long)]
    min_size: Option<String>,

    /// Maximum file size (e.g. "1gb")
    #[arg(long)]
    max_size: Option<String>,

    /// Only match files not modified within this long (e.g. "2weeks", "24 hours")
    #[arg(long)]
    older_than: Option<String>,

    /// Paths containing any of these are skipped (comma-separated)
    #[arg(short = 'x', long)]
    exclude: Option<String>,

    /// How exclusion patterns are compared with paths
    #[arg(long, value_enum)]
    exclude_mode: Option<ExclusionMode>,

    /// Match only directories that contain no files (`=false` overrides a
    /// saved setting)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    empty_dirs_only: Option<bool>,

    /// Ignore the saved rule document
    #[arg(long)]
    no_saved_rules: bool,
}

impl RuleArgs {
    pub fn builder() -> RuleArgsBuilder {
        RuleArgsBuilder::default()
    }

    /// Whether the saved rule document should be ignored
    pub fn no_saved_rules(&self) -> bool {
        self.no_saved_rules
    }

    /// The flags as a rule document, with unset flags left empty
    pub fn to_saved_rules(&self) -> SavedRules {
        SavedRules {
            extensions: self.extensions.clone(),
            exclude: self.exclude.clone(),
            min_size: self.min_size.clone(),
            max_size: self.max_size.clone(),
            older_than: self.older_than.clone(),
            exclude_mode: self.exclude_mode,
            empty_dirs_only: self.empty_dirs_only,
        }
    }
}

/// Builder for [`RuleArgs`]
#[derive(Debug, Default)]
pub struct RuleArgsBuilder {
    args: RuleArgs,
}

impl RuleArgsBuilder {
    pub fn extensions(mut self, value: impl Into<String>) -> Self {
        self.args.extensions = Some(value.into());
        self
    }

    pub fn min_size(mut self, value: impl Into<String>) -> Self {
        self.args.min_size = Some(value.into());
        self
    }

    pub fn max_size(mut self, value: impl Into<String>) -> Self {
        self.args.max_size = Some(value.into());
        self
    }

    pub fn older_than(mut self, value: impl Into<String>) -> Self {
        self.args.older_than = Some(value.into());
        self
    }

    pub fn exclude(mut self, value: impl Into<String>) -> Self {
        self.args.exclude = Some(value.into());
        self
    }

    pub fn exclude_mode(mut self, mode: ExclusionMode) -> Self {
        self.args.exclude_mode = Some(mode);
        self
    }

    pub fn empty_dirs_only(mut self, enabled: bool) -> Self {
        self.args.empty_dirs_only = Some(enabled);
        self
    }

    pub fn no_saved_rules(mut self, enabled: bool) -> Self {
        self.args.no_saved_rules = enabled;
        self
    }

    pub fn build(self) -> RuleArgs {
        self.args
    }
}

/// Available reap subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview the files the rules select, without deleting anything
    Scan {
        /// Directory to scan
        root: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Delete the files the rules select
    ///
    /// Matched entries are listed first and deleted only after
    /// confirmation (or with --yes).
    Clean {
        /// Directory to clean
        root: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,

        /// Show what would be deleted without deleting anything
        #[arg(long, env = "REAP_DRY_RUN")]
        dry_run: bool,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Afterwards remove directories left without files
        #[arg(long)]
        prune_empty: bool,

        /// Do not record deletions in the log file
        #[arg(long, env = "REAP_NO_LOG")]
        no_log: bool,
    },

    /// Manage the saved rule document
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

/// Actions on the saved rule document.
#[derive(Debug, Subcommand)]
pub enum RulesAction {
    /// Print the saved rules
    Show,
    /// Save rules; flags not given keep their saved value
    Save {
        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Delete the saved rules
    Reset,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    config_dir: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the configuration directory
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self
            .command
            .ok_or_else(|| ReapError::ConfigError("Command is required".to_string()))?;

        Ok(Cli {
            global_opts: GlobalOpts {
                config_dir: self.config_dir,
                verbose: self.verbose,
                quiet: self.quiet,
            },
            command,
        })
    }
}
