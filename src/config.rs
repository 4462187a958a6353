//! Application paths.
//!
//! [`AppConfig`] is built once per invocation and handed to whatever needs
//! to locate the rule document or the deletion log.

use std::path::{Path, PathBuf};

/// Immutable description of where reap keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    base_dir: PathBuf,
    app_dir_name: String,
    rule_file_name: String,
    log_file_name: String,
}

impl AppConfig {
    pub const DEFAULT_APP_DIR_NAME: &'static str = "reap";
    pub const DEFAULT_RULE_FILE_NAME: &'static str = "rules.json";
    pub const DEFAULT_LOG_FILE_NAME: &'static str = "reap.log";

    /// Configuration rooted at `base_dir` with default file names.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            app_dir_name: Self::DEFAULT_APP_DIR_NAME.to_string(),
            rule_file_name: Self::DEFAULT_RULE_FILE_NAME.to_string(),
            log_file_name: Self::DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }

    /// Configuration rooted at `<home>/.config`, or `./.config` when the
    /// home directory is unknown.
    pub fn from_home() -> Self {
        let base = home::home_dir()
            .map(|home| home.join(".config"))
            .unwrap_or_else(|| PathBuf::from(".config"));
        Self::new(base)
    }

    pub fn with_rule_file_name(mut self, name: impl Into<String>) -> Self {
        self.rule_file_name = name.into();
        self
    }

    pub fn with_log_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file_name = name.into();
        self
    }

    pub fn app_dir_name(&self) -> &str {
        &self.app_dir_name
    }

    pub fn rule_file_name(&self) -> &str {
        &self.rule_file_name
    }

    pub fn log_file_name(&self) -> &str {
        &self.log_file_name
    }

    /// Directory holding reap's files
    pub fn app_dir(&self) -> PathBuf {
        self.base_dir.join(&self.app_dir_name)
    }

    pub fn rule_file_path(&self) -> PathBuf {
        self.app_dir().join(&self.rule_file_name)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.app_dir().join(&self.log_file_name)
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths that do not start with `~` (or when the home directory cannot be
/// determined) are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match home::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
