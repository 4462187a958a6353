//! Rule parsing and the combined [`RuleSet`].
//!
//! Rules arrive as human-readable text (`"100mb"`, `"2weeks"`,
//! `"jpg, png"`, `"node_modules,vendor"`) either from the command line or
//! from the saved rule document, and are parsed into a read-only
//! [`RuleSet`] that the scanner evaluates every file against.
//!
//! # Example
//!
//! ```
//! use reap::rules::{RuleSet, parse_extensions, parse_size};
//!
//! let rules = RuleSet::builder()
//!     .extensions(parse_extensions("jpg,png"))
//!     .max_size(parse_size("1kb")?)
//!     .build()?;
//!
//! assert_eq!(rules.extensions(), &[".jpg", ".png"]);
//! assert_eq!(rules.max_size(), Some(1024));
//! # Ok::<(), reap::error::ReapError>(())
//! ```

use std::path::Path;
use std::time::SystemTime;

mod age;
mod exclude;
mod lists;
mod size;
pub mod store;

pub use age::{parse_age, parse_age_at, parse_duration};
pub use exclude::ExclusionMode;
use exclude::Exclusions;
pub use lists::{parse_exclusions, parse_extensions};
pub use size::{format_size, parse_size};

use crate::error::{ReapError, Result};

/// The combined filtering predicates for one invocation.
///
/// Every unset filter matches everything: no extensions means any
/// extension, no maximum size means unbounded, no age cutoff means any
/// modification time, no exclusions means nothing is excluded.
#[derive(Debug, Clone)]
pub struct RuleSet {
    extensions: Vec<String>,
    min_size: u64,
    max_size: Option<u64>,
    age_cutoff: Option<SystemTime>,
    exclusion_patterns: Vec<String>,
    exclusion_mode: ExclusionMode,
    exclusions: Exclusions,
    empty_dirs_only: bool,
}

impl RuleSet {
    /// Creates a new builder for [`RuleSet`]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Normalized extensions (`.jpg`), empty when unfiltered
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn min_size(&self) -> u64 {
        self.min_size
    }

    pub fn max_size(&self) -> Option<u64> {
        self.max_size
    }

    /// Files must be modified at or before this instant to qualify
    pub fn age_cutoff(&self) -> Option<SystemTime> {
        self.age_cutoff
    }

    pub fn exclusion_patterns(&self) -> &[String] {
        &self.exclusion_patterns
    }

    pub fn exclusion_mode(&self) -> ExclusionMode {
        self.exclusion_mode
    }

    pub fn empty_dirs_only(&self) -> bool {
        self.empty_dirs_only
    }

    /// Returns the exclusion pattern that rejects `path`, if any.
    pub fn excluded_by(&self, path: &Path) -> Option<&str> {
        if self.exclusions.is_empty() {
            return None;
        }
        self.exclusions.find_match(path)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excluded_by(path).is_some()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            min_size: 0,
            max_size: None,
            age_cutoff: None,
            exclusion_patterns: Vec::new(),
            exclusion_mode: ExclusionMode::default(),
            exclusions: Exclusions::Substring(Vec::new()),
            empty_dirs_only: false,
        }
    }
}

/// Builder for [`RuleSet`]
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    extensions: Vec<String>,
    min_size: u64,
    max_size: Option<u64>,
    age_cutoff: Option<SystemTime>,
    exclusions: Vec<String>,
    exclusion_mode: ExclusionMode,
    empty_dirs_only: bool,
}

impl RuleSetBuilder {
    /// Set the extension allow-list (already normalized, see
    /// [`parse_extensions`])
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the minimum file size in bytes
    pub fn min_size(mut self, bytes: u64) -> Self {
        self.min_size = bytes;
        self
    }

    /// Set the maximum file size in bytes
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Set the age cutoff; `None` disables the age filter
    pub fn age_cutoff(mut self, cutoff: Option<SystemTime>) -> Self {
        self.age_cutoff = cutoff;
        self
    }

    /// Set the exclusion patterns
    pub fn exclusions(mut self, patterns: Vec<String>) -> Self {
        self.exclusions = patterns;
        self
    }

    /// Add a single exclusion pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclusions.push(pattern.into());
        self
    }

    pub fn exclusion_mode(mut self, mode: ExclusionMode) -> Self {
        self.exclusion_mode = mode;
        self
    }

    /// Only match directories whose subtree holds no files
    pub fn empty_dirs_only(mut self, enabled: bool) -> Self {
        self.empty_dirs_only = enabled;
        self
    }

    /// Build the [`RuleSet`], checking the size range and compiling the
    /// exclusion patterns.
    pub fn build(self) -> Result<RuleSet> {
        if let Some(max) = self.max_size
            && self.min_size > max
        {
            return Err(ReapError::InvalidSizeRange {
                min: self.min_size,
                max,
            });
        }

        let exclusions = Exclusions::compile(&self.exclusions, self.exclusion_mode)?;

        Ok(RuleSet {
            extensions: self.extensions,
            min_size: self.min_size,
            max_size: self.max_size,
            age_cutoff: self.age_cutoff,
            exclusion_patterns: self.exclusions,
            exclusion_mode: self.exclusion_mode,
            exclusions,
            empty_dirs_only: self.empty_dirs_only,
        })
    }
}
