use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use filetime::FileTime;
use reap::cli::{Cli, Commands};
use reap::commands::execute_with_input;
use reap::error::Result;

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// A scratch tree to prune plus a private config directory, so saved rules
/// and the deletion log never touch the real home directory.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        dir.child("tree").create_dir_all().unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("tree")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn log_path(&self) -> PathBuf {
        self.config_dir().join("reap/reap.log")
    }

    pub fn rules_path(&self) -> PathBuf {
        self.config_dir().join("reap/rules.json")
    }

    pub fn child(&self, relative: &str) -> ChildPath {
        self.dir.child("tree").child(relative)
    }

    /// Create a file of `size` bytes last modified `age` ago.
    pub fn file(&self, relative: &str, size: usize, age: Duration) -> ChildPath {
        let child = self.child(relative);
        if let Some(parent) = child.path().parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        child.write_binary(&vec![b'x'; size]).unwrap();
        set_age(child.path(), age);
        child
    }

    pub fn dir(&self, relative: &str) -> ChildPath {
        let child = self.child(relative);
        child.create_dir_all().unwrap();
        child
    }

    /// Run `command` against this tree's config, answering prompts with
    /// `answer`. Returns what the command wrote to its output.
    pub fn run(&self, command: Commands, answer: &str) -> Result<String> {
        let cli = Cli::builder()
            .config_dir(self.config_dir())
            .quiet(true)
            .command(command)
            .build()?;

        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        execute_with_input(&cli, &mut input, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }
}

pub fn set_age(path: &Path, age: Duration) {
    let mtime = SystemTime::now() - age;
    filetime::set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}
