//! Rule trait for defining token-stream lint rules.

use crate::report::ErrorReporter;
use crate::state::AnalysisState;
use crate::token::TokenRef;
use regex::Regex;

/// A per-token lint rule.
///
/// The [`Checker`](crate::Checker) calls [`check_token`](Rule::check_token)
/// once per token in source order, after the state tracker has updated the
/// [`AnalysisState`], then [`finalize`](Rule::finalize) once after the last
/// token. Rules are stateless between calls: everything that must survive
/// from one token to the next lives in the state.
///
/// # Example
///
/// ```ignore
/// use jsdoc_lint_core::{AnalysisState, ErrorKind, ErrorReporter, Position, Rule, TokenRef};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///
///     fn check_token(&self, token: TokenRef<'_>, _: &mut AnalysisState, r: &mut dyn ErrorReporter) {
///         if token.text.contains('\t') {
///             r.report(ErrorKind::MissingSpace, "Tab found".into(), &token, Position::all(&token.text), None);
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "javascript").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single token.
    ///
    /// # Arguments
    ///
    /// * `token` - The current token, positioned in its stream
    /// * `state` - Session state as of this token
    /// * `reporter` - Sink for violations
    fn check_token(
        &self,
        token: TokenRef<'_>,
        state: &mut AnalysisState,
        reporter: &mut dyn ErrorReporter,
    );

    /// Runs once after the last token of the file.
    fn finalize(&self, _state: &mut AnalysisState, _reporter: &mut dyn ErrorReporter) {}

    /// Patterns of lines exempt from the maximum line length.
    fn long_line_exceptions(&self) -> Vec<Regex> {
        Vec::new()
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }

        fn check_token(
            &self,
            _token: TokenRef<'_>,
            _state: &mut AnalysisState,
            _reporter: &mut dyn ErrorReporter,
        ) {
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.description(), "");
        assert!(rule.long_line_exceptions().is_empty());
    }
}
