//! # reap
//!
//! A rule-driven file pruning tool: walk a directory tree, select files by
//! extension, size and age (or select empty directories), and delete them
//! after a preview and confirmation.
//!
//! ## Overview
//!
//! Rules are parsed from short human strings (`"10mb"`, `"30days"`,
//! `"jpg,png"`, `"vendor,.git"`) into a [`rules::RuleSet`]. The walker prunes
//! excluded directories before descending into them, so nothing inside an
//! excluded subtree is ever read. Every matched entry is checked against all
//! active rules; a single failing rule rejects it.
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Implementation of the `scan`, `clean` and `rules`
//!   subcommands
//! - [`config`]: Where saved rules and the deletion log live
//! - [`error`]: Error types and handling with thiserror + miette
//! - [`rules`]: Rule parsing, the rule set and saved rule documents
//! - [`scan`]: Directory walking, matching and empty-directory detection
//!
//! Internal modules (not part of the public API):
//! - `logging`: Verbosity-aware console output and the deletion log
//!
//! ## Library Usage
//!
//! ```no_run
//! use reap::rules::{RuleSet, parse_age, parse_extensions, parse_size};
//! use reap::scan::find_matches;
//!
//! let rules = RuleSet::builder()
//!     .extensions(parse_extensions("log,tmp"))
//!     .min_size(parse_size("1mb")?)
//!     .age_cutoff(parse_age("30days")?)
//!     .build()?;
//!
//! let report = find_matches("/var/tmp".as_ref(), &rules)?;
//! for matched in &report.matched {
//!     println!("{}", matched.entry.path.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI
//!
//! All public functions return `Result` types with descriptive error variants.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod rules;
pub mod scan;

mod logging;
