//! Blacklist of sources that are never checked.
//!
//! One entry per line; blank lines and `#` comments are ignored. An entry is
//! a file, a directory (everything below it), or a glob. Entries are
//! relative to the directory holding the blacklist file.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

#[derive(Debug)]
enum Entry {
    Path(PathBuf),
    Glob(glob::Pattern),
}

/// Parsed blacklist file.
#[derive(Debug)]
pub struct Blacklist {
    base: PathBuf,
    entries: Vec<Entry>,
}

impl Blacklist {
    /// Reads a blacklist file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read blacklist: {}", path.display()))?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::parse(&content, base))
    }

    /// Parses blacklist lines relative to `base`.
    #[must_use]
    pub fn parse(content: &str, base: PathBuf) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                if line.contains(['*', '?', '[']) {
                    match glob::Pattern::new(line) {
                        Ok(pattern) => Some(Entry::Glob(pattern)),
                        Err(e) => {
                            tracing::warn!("Ignoring blacklist entry {line:?}: {e}");
                            None
                        }
                    }
                } else {
                    Some(Entry::Path(normalize(Path::new(line))))
                }
            })
            .collect();
        Self {
            base: normalize(&base),
            entries,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if `source` is listed, or lies below a listed directory.
    #[must_use]
    pub fn contains(&self, source: &Path) -> bool {
        let source = normalize(source);
        let relative = source.strip_prefix(&self.base).unwrap_or(&source);
        let options = glob::MatchOptions {
            require_literal_separator: true,
            ..glob::MatchOptions::new()
        };

        self.entries.iter().any(|entry| match entry {
            Entry::Path(path) => relative.starts_with(path),
            Entry::Glob(pattern) => pattern.matches_path_with(relative, options),
        })
    }
}

/// Drops `.` components and resolves `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
