//! Persistence of textual rules as a JSON document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::{ExclusionMode, RuleSet, parse_age_at, parse_exclusions, parse_extensions, parse_size};
use crate::error::{ReapError, Result};

/// Rules as the user wrote them.
///
/// Sizes and ages stay textual so that an age like `"2weeks"` is measured
/// from the moment the rules are used, not from when they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedRules {
    /// Comma-separated extensions, e.g. `"jpg, png"`
    pub extensions: Option<String>,
    /// Comma-separated exclusion patterns
    pub exclude: Option<String>,
    pub min_size: Option<String>,
    pub max_size: Option<String>,
    /// Minimum age, e.g. `"30days"`
    pub older_than: Option<String>,
    pub exclude_mode: Option<ExclusionMode>,
    pub empty_dirs_only: Option<bool>,
}

impl SavedRules {
    /// Overlay `overrides` on top of `self`, field by field.
    pub fn merge(self, overrides: SavedRules) -> SavedRules {
        SavedRules {
            extensions: overrides.extensions.or(self.extensions),
            exclude: overrides.exclude.or(self.exclude),
            min_size: overrides.min_size.or(self.min_size),
            max_size: overrides.max_size.or(self.max_size),
            older_than: overrides.older_than.or(self.older_than),
            exclude_mode: overrides.exclude_mode.or(self.exclude_mode),
            empty_dirs_only: overrides.empty_dirs_only.or(self.empty_dirs_only),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &SavedRules::default()
    }

    /// Parse into a [`RuleSet`] with ages measured from now.
    pub fn to_rule_set(&self) -> Result<RuleSet> {
        self.to_rule_set_at(SystemTime::now())
    }

    /// Parse into a [`RuleSet`] with ages measured from `now`.
    pub fn to_rule_set_at(&self, now: SystemTime) -> Result<RuleSet> {
        let mut builder = RuleSet::builder()
            .extensions(self.extensions.as_deref().map(parse_extensions).unwrap_or_default())
            .exclusions(self.exclude.as_deref().map(parse_exclusions).unwrap_or_default())
            .exclusion_mode(self.exclude_mode.unwrap_or_default())
            .empty_dirs_only(self.empty_dirs_only.unwrap_or(false));

        if let Some(min) = non_blank(&self.min_size) {
            builder = builder.min_size(parse_size(min)?);
        }
        if let Some(max) = non_blank(&self.max_size) {
            builder = builder.max_size(parse_size(max)?);
        }
        if let Some(age) = self.older_than.as_deref() {
            builder = builder.age_cutoff(parse_age_at(age, now)?);
        }

        builder.build()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Reads and writes [`SavedRules`] at a fixed location.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved rules; a missing file yields empty rules.
    pub fn load(&self) -> Result<SavedRules> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SavedRules::default()),
            Err(source) => return Err(ReapError::io(&self.path, source)),
        };

        serde_json::from_str(&data).map_err(|source| ReapError::RulesFile {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, rules: &SavedRules) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ReapError::io(parent, source))?;
        }

        let data = serde_json::to_string_pretty(rules).map_err(|source| ReapError::RulesFile {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, data).map_err(|source| ReapError::io(&self.path, source))
    }

    /// Remove the saved rules. Returns whether a file was removed.
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ReapError::io(&self.path, source)),
        }
    }
}
