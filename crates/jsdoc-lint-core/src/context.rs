//! Context for checking a single file.

use crate::config::CheckerConfig;
use std::path::{Path, PathBuf};

/// Facts about the file being checked that are known before the first token.
///
/// Used to seed the [`AnalysisState`](crate::AnalysisState) of a session.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the JavaScript (or HTML) source.
    pub path: &'a Path,
    /// Path relative to the project root; used in reported locations.
    pub relative_path: PathBuf,
    /// The script is embedded in markup (HTML).
    pub is_markup: bool,
    /// The file only needs limited documentation (externs and the like).
    pub limited_doc: bool,
}

impl<'a> FileContext<'a> {
    /// Creates a context, classifying `path` with the checker configuration.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path, config: &CheckerConfig) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let is_markup = Self::detect_markup_file(path, &config.markup_extensions);
        let limited_doc = Self::detect_limited_doc_file(&relative_path, &config.limited_doc_files);

        Self {
            path,
            relative_path,
            is_markup,
            limited_doc,
        }
    }

    /// Creates a plain context: script file, full documentation checks.
    #[must_use]
    pub fn plain(path: &'a Path) -> Self {
        Self {
            path,
            relative_path: path.to_path_buf(),
            is_markup: false,
            limited_doc: false,
        }
    }

    /// Detects HTML-embedded scripts by extension.
    fn detect_markup_file(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|m| m.eq_ignore_ascii_case(ext)))
    }

    /// Detects files that get relaxed documentation checks.
    fn detect_limited_doc_file(relative_path: &Path, patterns: &[String]) -> bool {
        let path_str = relative_path.to_string_lossy();
        let file_name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        patterns.iter().any(|pattern| {
            match glob::Pattern::new(pattern) {
                Ok(p) => p.matches(&path_str) || p.matches(&file_name),
                Err(e) => {
                    tracing::warn!("Ignoring invalid limited_doc_files pattern {pattern:?}: {e}");
                    false
                }
            }
        })
    }
}
