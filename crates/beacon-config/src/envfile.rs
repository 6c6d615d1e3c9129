// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Line-preserving `.env` file store.
//!
//! Corpus preparation and deployment both write resolved resource ids back
//! into the environment file so that later process starts pick them up.
//! Writes are idempotent: setting a key to its current value or unsetting a
//! key that is absent leaves the file untouched.  Comments, blank lines, and
//! unrelated keys survive every edit.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

/// One physical line of the file.  Non-assignment lines are kept verbatim.
#[derive(Debug, Clone)]
enum Line {
    Raw(String),
    Pair { key: String, value: String },
}

/// An editable view of a `KEY=VALUE` environment file.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    lines: Vec<Line>,
}

impl EnvFile {
    /// Load the file at `path`.  A missing file is not an error — it yields
    /// an empty store that will be created on the first [`EnvFile::save`].
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let lines = if path.is_file() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            text.lines().map(parse_line).collect()
        } else {
            debug!(path = %path.display(), "env file not present, starting empty");
            Vec::new()
        };
        Ok(Self { path, lines })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value for `key`, if assigned anywhere in the file.  Last assignment wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key` to `value`, updating an existing assignment in place or
    /// appending a new one.  Returns `true` if the file content changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if self.get(key) == Some(value) {
            return false;
        }
        for line in self.lines.iter_mut().rev() {
            if let Line::Pair { key: k, value: v } = line {
                if k == key {
                    *v = value.to_string();
                    return true;
                }
            }
        }
        self.lines.push(Line::Pair {
            key: key.to_string(),
            value: value.to_string(),
        });
        true
    }

    /// Remove every assignment of `key`.  Returns `true` if anything was removed.
    pub fn unset(&mut self, key: &str) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|line| !matches!(line, Line::Pair { key: k, .. } if k == key));
        self.lines.len() != before
    }

    /// Write the file back to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Raw(text) => out.push_str(text),
                Line::Pair { key, value } => {
                    out.push_str(key);
                    out.push('=');
                    out.push_str(value);
                }
            }
            out.push('\n');
        }
        std::fs::write(&self.path, out)
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!(path = %self.path.display(), "env file saved");
        Ok(())
    }
}

fn parse_line(line: &str) -> Line {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Raw(line.to_string());
    }
    match trimmed.split_once('=') {
        Some((key, value)) => Line::Pair {
            key: key.trim().to_string(),
            value: unquote(value.trim()).to_string(),
        },
        None => Line::Raw(line.to_string()),
    }
}

/// Strip one level of matching single or double quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_file(content: &str) -> (tempfile::NamedTempFile, EnvFile) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{content}").unwrap();
        let env = EnvFile::load(f.path()).unwrap();
        (f, env)
    }

    #[test]
    fn get_returns_last_assignment() {
        let (_f, env) = env_file("A=1\nA=2\n");
        assert_eq!(env.get("A"), Some("2"));
    }

    #[test]
    fn get_strips_quotes() {
        let (_f, env) = env_file("A='hello'\nB=\"world\"\n");
        assert_eq!(env.get("A"), Some("hello"));
        assert_eq!(env.get("B"), Some("world"));
    }

    #[test]
    fn set_existing_key_updates_in_place() {
        let (_f, mut env) = env_file("A=1\nB=2\n");
        assert!(env.set("A", "9"));
        assert_eq!(env.get("A"), Some("9"));
        assert_eq!(env.get("B"), Some("2"));
    }

    #[test]
    fn set_is_idempotent() {
        let (_f, mut env) = env_file("A=1\n");
        assert!(!env.set("A", "1"));
    }

    #[test]
    fn set_appends_missing_key() {
        let (_f, mut env) = env_file("A=1\n");
        assert!(env.set("NEW", "x"));
        assert_eq!(env.get("NEW"), Some("x"));
    }

    #[test]
    fn unset_absent_key_is_noop() {
        let (_f, mut env) = env_file("A=1\n");
        assert!(!env.unset("MISSING"));
        assert!(env.unset("A"));
        assert_eq!(env.get("A"), None);
    }

    #[test]
    fn save_preserves_comments_and_blank_lines() {
        let (f, mut env) = env_file("# coordinates\nA=1\n\nB=2\n");
        env.set("A", "changed");
        env.save().unwrap();
        let text = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(text, "# coordinates\nA=changed\n\nB=2\n");
    }

    #[test]
    fn load_missing_file_starts_empty_and_save_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut env = EnvFile::load(&path).unwrap();
        assert_eq!(env.get("A"), None);
        env.set("A", "1");
        env.save().unwrap();
        assert!(path.is_file());
        let reloaded = EnvFile::load(&path).unwrap();
        assert_eq!(reloaded.get("A"), Some("1"));
    }
}
