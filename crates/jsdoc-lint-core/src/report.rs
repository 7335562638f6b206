//! Error reporting sink.

use crate::config::Config;
use crate::errors::ErrorKind;
use crate::token::Token;
use crate::types::{Location, Suggestion, Violation};
use std::path::PathBuf;

/// Span of a violation relative to the start of its anchor token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset from the token start.
    pub start: usize,
    /// Span length in bytes.
    pub length: usize,
}

impl Position {
    /// Zero-width position at the start of the token.
    #[must_use]
    pub fn at_beginning() -> Self {
        Self {
            start: 0,
            length: 0,
        }
    }

    /// Zero-width position right after `text`.
    #[must_use]
    pub fn at_end(text: &str) -> Self {
        Self {
            start: text.len(),
            length: 0,
        }
    }

    /// Span covering all of `text`.
    #[must_use]
    pub fn all(text: &str) -> Self {
        Self {
            start: 0,
            length: text.len(),
        }
    }
}

/// Receives violations from rules.
///
/// Reporting is fire-and-forget: rules never read anything back.
pub trait ErrorReporter {
    /// Records a violation of `kind` anchored at `token`.
    fn report(
        &mut self,
        kind: ErrorKind,
        message: String,
        token: &Token,
        position: Position,
        delta: Option<i64>,
    );
}

/// Collects reported violations for one file.
///
/// Applies per-kind enable/disable and severity overrides from the config.
#[derive(Debug)]
pub struct ViolationCollector<'c> {
    file: PathBuf,
    config: &'c Config,
    violations: Vec<Violation>,
}

impl<'c> ViolationCollector<'c> {
    /// Creates an empty collector for `file`.
    #[must_use]
    pub fn new(file: PathBuf, config: &'c Config) -> Self {
        Self {
            file,
            config,
            violations: Vec::new(),
        }
    }

    /// Consumes the collector.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl ErrorReporter for ViolationCollector<'_> {
    fn report(
        &mut self,
        kind: ErrorKind,
        message: String,
        token: &Token,
        position: Position,
        delta: Option<i64>,
    ) {
        if !self.config.is_rule_enabled(kind.name()) {
            tracing::trace!("Dropping disabled violation: {}", kind.name());
            return;
        }

        let severity = self
            .config
            .rule_severity(kind.name())
            .unwrap_or_else(|| kind.default_severity());
        let location = Location::new(
            self.file.clone(),
            token.line_number,
            token.column + position.start + 1,
        )
        .with_span(token.offset + position.start, position.length);

        let mut violation = Violation::new(kind.code(), kind.name(), severity, location, message)
            .with_suggestion(Suggestion::new(kind.help()));
        if let Some(delta) = delta {
            violation = violation.with_delta(delta);
        }
        self.violations.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{TokenKind, TokenStreamBuilder};
    use crate::types::Severity;

    #[test]
    fn test_position_constructors() {
        assert_eq!(Position::at_end("+="), Position { start: 2, length: 0 });
        assert_eq!(Position::all("'"), Position { start: 0, length: 1 });
    }

    #[test]
    fn test_collector_builds_location() {
        let mut b = TokenStreamBuilder::new();
        b.push(TokenKind::Identifier, "x");
        b.newline();
        b.push(TokenKind::Whitespace, "  ");
        let op = b.push(TokenKind::Operator, "+");
        let stream = b.build();
        let token = stream.get(op).unwrap();

        let config = Config::default();
        let mut collector = ViolationCollector::new(PathBuf::from("a.js"), &config);
        collector.report(
            ErrorKind::MissingSpace,
            "Missing space after \"+\"".to_string(),
            &token,
            Position::at_end(&token.text),
            None,
        );

        let violations = collector.into_violations();
        let v = &violations[0];
        assert_eq!(v.location.line, 2);
        assert_eq!(v.location.column, 4);
        assert_eq!(v.location.offset, "x\n  +".len());
        assert_eq!(v.code, "JS001");
        assert_eq!(v.severity, Severity::Error);
    }

    #[test]
    fn test_collector_applies_config() {
        let config = Config::parse(
            r#"
[rules.missing-space]
enabled = false

[rules.missing-jsdoc-tag-type]
severity = "info"
"#,
        )
        .unwrap();

        let mut b = TokenStreamBuilder::new();
        let id = b.push(TokenKind::DocFlag, "@param");
        let stream = b.build();
        let token = stream.get(id).unwrap();

        let mut collector = ViolationCollector::new(PathBuf::from("a.js"), &config);
        collector.report(
            ErrorKind::MissingSpace,
            "dropped".to_string(),
            &token,
            Position::at_beginning(),
            None,
        );
        collector.report(
            ErrorKind::MissingJsdocTagType,
            "kept".to_string(),
            &token,
            Position::at_beginning(),
            Some(3),
        );

        let violations = collector.into_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Info);
        assert_eq!(violations[0].delta, Some(3));
    }
}
