//! Error types for reap.
//!
//! All errors are variants of [`ReapError`], defined with `thiserror` and
//! annotated with `miette` diagnostics so the CLI can render them with codes
//! and help text.
//!
//! # Error Handling Strategy
//!
//! - Malformed rule text (`InvalidSize`, `InvalidAge`, `InvalidPattern`) is a
//!   hard error and always reaches the caller
//! - Filesystem trouble below the walk root is soft: it is recorded and the
//!   walk moves on
//! - A walk root that cannot be read ends that walk with [`ReapError::WalkRoot`]
//!
//! # Example
//!
//! ```
//! use reap::error::ReapError;
//! use reap::rules::parse_size;
//!
//! let err = parse_size("12parsecs").unwrap_err();
//! assert!(matches!(err, ReapError::InvalidSize { .. }));
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in reap operations
#[derive(Error, Debug, Diagnostic)]
pub enum ReapError {
    /// A size rule such as `--min-size` could not be parsed.
    ///
    /// Raised when the numeric prefix is missing or the unit is not one of
    /// `b`, `k`/`kb`, `m`/`mb`, `g`/`gb`.
    #[error("Invalid size '{input}': {reason}")]
    #[diagnostic(
        code(reap::rules::invalid_size),
        help("Specify a size as a number followed by a unit, e.g. '500b', '10kb', '100mb', '2gb'")
    )]
    InvalidSize {
        /// The text that failed to parse
        input: String,
        /// Why it failed
        reason: String,
    },

    /// An age rule such as `--older-than` had digits but an unknown unit.
    #[error("Invalid age '{input}': unknown unit '{unit}'")]
    #[diagnostic(
        code(reap::rules::invalid_age),
        help(
            "Use a number followed by sec, min, hour, day, week, month or year (plural forms \
             are accepted), e.g. '2weeks' or '24 hours'"
        )
    )]
    InvalidAge {
        /// The text that failed to parse
        input: String,
        /// The unrecognized unit suffix
        unit: String,
    },

    /// A glob exclusion pattern could not be compiled.
    #[error("Invalid exclusion pattern '{pattern}'")]
    #[diagnostic(code(reap::rules::invalid_pattern))]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The minimum size rule is larger than the maximum size rule.
    #[error("Minimum size ({min} bytes) is larger than maximum size ({max} bytes)")]
    #[diagnostic(
        code(reap::rules::invalid_size_range),
        help("Lower --min-size or raise --max-size.")
    )]
    InvalidSizeRange {
        /// Parsed minimum size
        min: u64,
        /// Parsed maximum size
        max: u64,
    },

    /// The directory a walk starts from does not exist or cannot be read.
    #[error("Cannot scan '{path}'")]
    #[diagnostic(
        code(reap::scan::root_unreadable),
        help("Check that the directory exists and that you can list its contents.")
    )]
    WalkRoot {
        /// The root that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File system I/O error outside of a walk.
    ///
    /// Used for rule file access, log file writes and user prompts.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(reap::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The saved rule document could not be read or written as JSON.
    #[error("Failed to process rule file '{path}'")]
    #[diagnostic(
        code(reap::rules::file_error),
        help("The rule file may be corrupted. Run 'reap rules reset' to remove it.")
    )]
    RulesFile {
        /// Location of the rule document
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(reap::config::error),
        help("Check the required configuration parameters.")
    )]
    ConfigError(
        /// Description of the configuration error
        String,
    ),
}

impl ReapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReapError::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ReapError>;
