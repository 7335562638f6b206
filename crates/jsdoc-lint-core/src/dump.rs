//! Loading pre-tokenized files.
//!
//! The tokenizer writes one JSON token dump per source file
//! (`app.tokens.json` for `app.js`). Sub-token references inside a flag
//! (`type_end`, `name_token`) are indices into the dump's `tokens` array.

use crate::doc::{DocFlag, FlagKind};
use crate::token::{Attachment, FunctionDecl, TokenKind, TokenStream, TokenStreamBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name suffix of token dumps.
pub const DUMP_SUFFIX: &str = ".tokens.json";

/// Errors from reading a token dump.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// The dump could not be read.
    #[error("Failed to read token dump {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The dump is not valid JSON for the expected shape.
    #[error("Malformed token dump {path}: {source}")]
    Json {
        /// Path of the dump.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The dump parsed but is inconsistent.
    #[error("Invalid token dump {path}: {message}")]
    InvalidDump {
        /// Path of the dump.
        path: PathBuf,
        /// What is wrong.
        message: String,
    },
}

/// Lines a dump may leave out on top of one line per token.
const MAX_UNTOKENIZED_LINES: usize = 100_000;

/// Source path of a dump that does not name one: `app.tokens.json` → `app.js`.
#[must_use]
pub fn default_source_path(dump_path: &Path) -> PathBuf {
    let name = dump_path.to_string_lossy();
    match name.strip_suffix(DUMP_SUFFIX) {
        Some(stem) => PathBuf::from(format!("{stem}.js")),
        None => dump_path.to_path_buf(),
    }
}

/// A token dump as written by the tokenizer.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenDump {
    /// Source file the tokens came from.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Tokens in source order.
    pub tokens: Vec<DumpToken>,
}

/// One token of a dump.
#[derive(Debug, Clone, Deserialize)]
pub struct DumpToken {
    /// Lexical category.
    pub kind: TokenKind,
    /// Literal text.
    #[serde(default)]
    pub text: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Operator used in a unary context.
    #[serde(default)]
    pub unary: bool,
    /// Parsed documentation flag.
    #[serde(default)]
    pub flag: Option<DumpFlag>,
    /// Function introduced by this token.
    #[serde(default)]
    pub function: Option<FunctionDecl>,
}

/// A documentation flag of a dump.
#[derive(Debug, Clone, Deserialize)]
pub struct DumpFlag {
    /// Flag name without `@`.
    pub kind: String,
    /// Declared type, without braces.
    #[serde(default, rename = "type")]
    pub type_text: Option<String>,
    /// Index of the token closing the type.
    #[serde(default)]
    pub type_end: Option<usize>,
    /// Declared name.
    #[serde(default)]
    pub name: Option<String>,
    /// Index of the token holding the name.
    #[serde(default)]
    pub name_token: Option<usize>,
}

impl TokenDump {
    /// Reads and parses a dump file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid dump.
    pub fn from_file(path: &Path) -> Result<Self, DumpError> {
        let content = std::fs::read_to_string(path).map_err(|e| DumpError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parses dump JSON; `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a dump.
    pub fn parse(content: &str, path: &Path) -> Result<Self, DumpError> {
        serde_json::from_str(content).map_err(|e| DumpError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Builds the token stream, validating lines and sub-token references.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::InvalidDump`] if line numbers go backwards or
    /// run implausibly far past the tokens, or a flag refers to a token
    /// outside the dump.
    pub fn into_stream(self, dump_path: &Path) -> Result<TokenStream, DumpError> {
        let invalid = |message: String| DumpError::InvalidDump {
            path: dump_path.to_path_buf(),
            message,
        };

        let mut builder = TokenStreamBuilder::new();
        let mut line = 1;
        let mut line_started = false;
        let mut ids = Vec::with_capacity(self.tokens.len());
        let last_line = self.tokens.len().saturating_add(MAX_UNTOKENIZED_LINES);

        for (index, token) in self.tokens.iter().enumerate() {
            if token.line < line {
                return Err(invalid(format!(
                    "token {index} is on line {} after line {line}",
                    token.line
                )));
            }
            if token.line > last_line {
                return Err(invalid(format!(
                    "token {index} is on line {}, past the last possible line {last_line}",
                    token.line
                )));
            }
            // Lines the tokenizer skipped are blank.
            while line < token.line {
                if line_started {
                    builder.newline();
                } else {
                    builder.blank_line();
                }
                line_started = false;
                line += 1;
            }
            let id = builder.push(token.kind, token.text.as_str());
            line_started = true;
            if token.unary {
                builder.mark_unary(id);
            }
            ids.push(id);
        }

        for (index, token) in self.tokens.into_iter().enumerate() {
            let Some(&id) = ids.get(index) else { continue };
            if let Some(decl) = token.function {
                builder.attach(id, Attachment::Function(decl));
            }
            let Some(flag) = token.flag else { continue };

            let lookup = |reference: Option<usize>, what: &str| match reference {
                None => Ok(None),
                Some(i) => ids.get(i).copied().map(Some).ok_or_else(|| {
                    invalid(format!(
                        "flag at token {index} has {what} {i} outside the dump"
                    ))
                }),
            };
            let type_end = lookup(flag.type_end, "type_end")?;
            let name_token = lookup(flag.name_token, "name_token")?;

            let mut doc_flag = DocFlag::new(FlagKind::from_name(&flag.kind), id);
            if let Some(type_text) = flag.type_text {
                doc_flag = doc_flag.with_type(type_text, type_end);
            }
            if let Some(name) = flag.name {
                doc_flag = doc_flag.with_name(name, name_token);
            }
            builder.attach(id, Attachment::DocFlag(doc_flag));
        }

        Ok(builder.build())
    }
}

/// Returns true if `path` names a token dump.
#[must_use]
pub fn is_dump_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(DUMP_SUFFIX))
}
