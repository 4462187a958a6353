use std::path::{Component, Path};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ReapError, Result};

/// How exclusion patterns are compared with paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionMode {
    /// The path text contains the pattern
    #[default]
    Substring,
    /// Shell-style glob (`*`, `?`, `**`)
    Glob,
}

/// Compiled exclusion patterns.
#[derive(Debug, Clone)]
pub(crate) enum Exclusions {
    Substring(Vec<String>),
    Glob(Vec<GlobPattern>),
}

impl Exclusions {
    pub(crate) fn compile(patterns: &[String], mode: ExclusionMode) -> Result<Self> {
        match mode {
            ExclusionMode::Substring => Ok(Exclusions::Substring(patterns.to_vec())),
            ExclusionMode::Glob => patterns
                .iter()
                .map(|p| GlobPattern::new(p))
                .collect::<Result<Vec<_>>>()
                .map(Exclusions::Glob),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Exclusions::Substring(patterns) => patterns.is_empty(),
            Exclusions::Glob(patterns) => patterns.is_empty(),
        }
    }

    /// The first pattern that matches `path`, if any
    pub(crate) fn find_match(&self, path: &Path) -> Option<&str> {
        match self {
            Exclusions::Substring(patterns) => {
                let text = path.to_string_lossy();
                patterns
                    .iter()
                    .find(|pattern| text.contains(pattern.as_str()))
                    .map(String::as_str)
            }
            Exclusions::Glob(patterns) => patterns
                .iter()
                .find(|pattern| pattern.is_match(path))
                .map(|pattern| pattern.source.as_str()),
        }
    }
}

/// A glob translated to a regex.
///
/// Patterns without `/` are tried against every path component; patterns
/// with `/` must match a trailing run of components.
#[derive(Debug, Clone)]
pub(crate) struct GlobPattern {
    source: String,
    regex: Regex,
    per_component: bool,
}

impl GlobPattern {
    pub(crate) fn new(pattern: &str) -> Result<Self> {
        let per_component = !pattern.contains('/');
        let body = glob_to_regex(pattern.trim_start_matches('/'));
        let anchored = if per_component {
            format!("^{body}$")
        } else {
            format!("(?:^|/){body}$")
        };

        let regex = Regex::new(&anchored).map_err(|source| ReapError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            per_component,
        })
    }

    pub(crate) fn is_match(&self, path: &Path) -> bool {
        if self.per_component {
            path.components().any(|component| match component {
                Component::Normal(name) => self.regex.is_match(&name.to_string_lossy()),
                _ => false,
            })
        } else {
            let text = path.to_string_lossy().replace('\\', "/");
            self.regex.is_match(&text)
        }
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                // `**/` also matches zero directories
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> Exclusions {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        Exclusions::compile(&owned, ExclusionMode::Glob).unwrap()
    }

    #[test]
    fn test_substring_matching() {
        let exclusions = Exclusions::compile(
            &["vendor".to_string(), "Cache".to_string()],
            ExclusionMode::Substring,
        )
        .unwrap();

        assert_eq!(
            exclusions.find_match(Path::new("/work/vendor/c.jpg")),
            Some("vendor")
        );
        assert_eq!(
            exclusions.find_match(Path::new("/work/my-vendored/c.jpg")),
            Some("vendor")
        );
        // Case-sensitive
        assert_eq!(exclusions.find_match(Path::new("/work/cache/x")), None);
        assert_eq!(
            exclusions.find_match(Path::new("/work/Cache/x")),
            Some("Cache")
        );
    }

    #[test]
    fn test_empty_exclusions_match_nothing() {
        let exclusions = Exclusions::compile(&[], ExclusionMode::Substring).unwrap();
        assert!(exclusions.is_empty());
        assert_eq!(exclusions.find_match(Path::new("/anything")), None);

        let exclusions = globs(&[]);
        assert!(exclusions.is_empty());
    }

    #[test]
    fn test_glob_component_patterns() {
        let exclusions = globs(&["*.bak", "node_?odules"]);

        assert!(exclusions.find_match(Path::new("/w/notes.bak")).is_some());
        assert!(exclusions.find_match(Path::new("/w/old.bak/file.txt")).is_some());
        assert!(exclusions.find_match(Path::new("/w/notes.bak.txt")).is_none());
        assert!(exclusions.find_match(Path::new("/w/node_modules/x.js")).is_some());
        assert!(exclusions.find_match(Path::new("/w/node_mmodules/x.js")).is_none());
        // Unlike substring mode, a glob without wildcards is a whole component
        assert!(globs(&["vendor"]).find_match(Path::new("/w/vendored/a")).is_none());
        assert!(globs(&["vendor"]).find_match(Path::new("/w/vendor/a")).is_some());
    }

    #[test]
    fn test_glob_path_patterns() {
        let exclusions = globs(&["build/*.o", "**/gen/**"]);

        assert!(exclusions.find_match(Path::new("/w/build/main.o")).is_some());
        assert!(exclusions.find_match(Path::new("/w/build/sub/main.o")).is_none());
        assert!(exclusions.find_match(Path::new("/w/src/gen/a/b.rs")).is_some());
        assert!(exclusions.find_match(Path::new("/w/src/generated/b.rs")).is_none());
    }

    #[test]
    fn test_glob_escapes_regex_metacharacters() {
        let exclusions = globs(&["a+b(1).txt"]);
        assert!(exclusions.find_match(Path::new("/w/a+b(1).txt")).is_some());
        assert!(exclusions.find_match(Path::new("/w/aab1.txt")).is_none());
    }
}
