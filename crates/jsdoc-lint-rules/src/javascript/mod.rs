//! JavaScript documentation and formatting rules.
//!
//! One rule, dispatched per token kind:
//!
//! - documentation flags: optional-parameter markers, missing and misplaced types
//! - single-quoted strings: prefer double quotes
//! - end of a doc comment: externs detection, blank lines above top-level blocks
//! - function open/close: `@param`, `@return` and `@this` documentation
//! - operators: a space after every binary operator
//! - brackets: space just inside openers and closers (off by default)
//!
//! # Configuration
//!
//! Options live under `[rules.javascript]`:
//!
//! - `optional_type_marker`: check `opt_` names against `=` types (default: true)
//! - `blank_lines_at_top_level`: check blank lines above top-level blocks (default: true)
//! - `bracket_adjacency`: check spacing inside brackets (default: false)
//! - `parameter_docs`: require `@param` for every parameter (default: true)
//! - `module_linkage`: identifiers exempting suppression-only comments from
//!   the blank-line check (default: `goog.provide`, `goog.require`)
//! - `long_line_exceptions`: regexes of lines exempt from the line length limit

mod blank_lines;
mod doc_flags;
mod function_docs;
mod quotes;
mod spacing;

use jsdoc_lint_core::{AnalysisState, ErrorReporter, RuleConfig, Rule, TokenKind, TokenRef};
use regex::Regex;

/// Rule name, also the configuration key of the options.
pub const NAME: &str = "javascript";

/// JavaScript-specific style rules.
#[derive(Debug, Clone)]
pub struct JavaScriptRules {
    /// Check `opt_` parameter names against `=` types.
    pub optional_type_marker: bool,
    /// Check blank lines above top-level documented blocks.
    pub blank_lines_at_top_level: bool,
    /// Check spacing just inside brackets.
    pub bracket_adjacency: bool,
    /// Require a `@param` for every declared parameter.
    pub parameter_docs: bool,
    /// Identifiers of module linkage statements.
    pub module_linkage: Vec<String>,
    long_line_exceptions: Vec<Regex>,
}

impl Default for JavaScriptRules {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaScriptRules {
    /// Creates the rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            optional_type_marker: true,
            blank_lines_at_top_level: true,
            bracket_adjacency: false,
            parameter_docs: true,
            module_linkage: vec!["goog.provide".to_string(), "goog.require".to_string()],
            long_line_exceptions: Vec::new(),
        }
    }

    /// Sets whether optional parameter markers are checked.
    #[must_use]
    pub fn optional_type_marker(mut self, check: bool) -> Self {
        self.optional_type_marker = check;
        self
    }

    /// Sets whether blank lines above top-level blocks are checked.
    #[must_use]
    pub fn blank_lines_at_top_level(mut self, check: bool) -> Self {
        self.blank_lines_at_top_level = check;
        self
    }

    /// Sets whether spacing inside brackets is checked.
    #[must_use]
    pub fn bracket_adjacency(mut self, check: bool) -> Self {
        self.bracket_adjacency = check;
        self
    }

    /// Sets whether undocumented parameters are reported.
    #[must_use]
    pub fn parameter_docs(mut self, check: bool) -> Self {
        self.parameter_docs = check;
        self
    }

    /// Replaces the module linkage identifiers.
    #[must_use]
    pub fn module_linkage<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_linkage = identifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a line pattern exempt from the maximum line length.
    #[must_use]
    pub fn long_line_exception(mut self, pattern: Regex) -> Self {
        self.long_line_exceptions.push(pattern);
        self
    }

    /// Applies options from a `[rules.javascript]` block.
    ///
    /// Unknown keys are ignored; invalid regexes are logged and skipped.
    #[must_use]
    pub fn configure(mut self, config: &RuleConfig) -> Self {
        self.optional_type_marker =
            config.get_bool("optional_type_marker", self.optional_type_marker);
        self.blank_lines_at_top_level =
            config.get_bool("blank_lines_at_top_level", self.blank_lines_at_top_level);
        self.bracket_adjacency = config.get_bool("bracket_adjacency", self.bracket_adjacency);
        self.parameter_docs = config.get_bool("parameter_docs", self.parameter_docs);
        if let Some(linkage) = config.get_str_array("module_linkage") {
            self.module_linkage = linkage;
        }
        for pattern in config.get_str_array("long_line_exceptions").unwrap_or_default() {
            match Regex::new(&pattern) {
                Ok(re) => self.long_line_exceptions.push(re),
                Err(e) => tracing::warn!("Ignoring long line exception {pattern:?}: {e}"),
            }
        }
        self
    }
}

/// Returns true for a flag whose type is a nested record.
fn contains_record_type(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::DocFlag && token.doc_flag().is_some_and(|f| f.has_record_type())
}

impl Rule for JavaScriptRules {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "JavaScript documentation and formatting conventions"
    }

    fn check_token(
        &self,
        token: TokenRef<'_>,
        state: &mut AnalysisState,
        reporter: &mut dyn ErrorReporter,
    ) {
        // Record types are not understood; treat the whole comment as checked.
        if contains_record_type(&token) {
            state.invalidate_doc_comment();
            return;
        }

        match token.kind {
            TokenKind::DocFlag => doc_flags::check_doc_flag(self, token, state, reporter),
            TokenKind::SingleQuoteStringStart => {
                quotes::check_single_quoted_string(token, reporter);
            }
            TokenKind::EndDocComment => {
                blank_lines::check_doc_comment_end(self, token, state, reporter);
            }
            TokenKind::Operator => spacing::check_operator(token, reporter),
            TokenKind::StartParen | TokenKind::StartBracket | TokenKind::StartBlock => {
                if token.kind == TokenKind::StartBlock && state.is_function_open() {
                    function_docs::check_function_open(self, token, state, reporter);
                }
                if self.bracket_adjacency {
                    spacing::check_after_opener(token, reporter);
                }
            }
            TokenKind::EndParen | TokenKind::EndBracket | TokenKind::EndBlock => {
                if token.kind == TokenKind::EndBlock && state.is_function_close() {
                    function_docs::check_function_close(token, state, reporter);
                }
                if self.bracket_adjacency {
                    spacing::check_before_closer(token, reporter);
                }
            }
            _ => {}
        }
    }

    fn long_line_exceptions(&self) -> Vec<Regex> {
        self.long_line_exceptions.clone()
    }
}
