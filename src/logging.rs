use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ReapError, Result};

#[derive(Clone, Copy, Debug)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if !self.quiet && self.verbose >= level {
            eprintln!("{message}");
        }
    }

    pub fn warn(&self, message: impl Display) {
        eprintln!("Warning: {message}");
    }

    pub fn level(&self) -> u8 {
        self.verbose
    }
}

/// Append-only record of removed paths.
///
/// Each line is `<unix-seconds>\t<action>\t<bytes>\t<path>`. A disabled log
/// accepts records and discards them.
pub struct DeletionLog {
    path: PathBuf,
    file: Option<File>,
}

impl DeletionLog {
    /// Open (creating parents as needed) the log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ReapError::io(parent, source))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| ReapError::io(path, source))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    pub fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            file: None,
        }
    }

    pub fn record(&mut self, action: &str, size: u64, target: &Path) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        writeln!(file, "{stamp}\t{action}\t{size}\t{}", target.display())
            .map_err(|source| ReapError::io(&self.path, source))
    }
}
