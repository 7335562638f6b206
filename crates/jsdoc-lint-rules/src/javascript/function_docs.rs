//! Function documentation: `@param` on open, `@return` and `@this` on close.

use super::JavaScriptRules;
use jsdoc_lint_core::{
    AnalysisState, DocComment, ErrorKind, ErrorReporter, FlagKind, Position, TokenKind, TokenRef,
};

const MISSING_THIS_MESSAGE: &str = "Missing @this JsDoc in function referencing \"this\". \
     (this usually means you are trying to reference \"this\" in a static function, \
     or you have forgotten to mark a constructor with @constructor)";

/// Return types that document the absence of a value.
const NOTHING_TYPES: [&str; 3] = ["undefined", "void", "*"];

/// Documentation that function checks apply to.
fn checked_doc(state: &AnalysisState) -> Option<&DocComment> {
    state
        .function_doc()
        .filter(|doc| !doc.is_invalidated())
}

/// Reports undocumented parameters when a function body opens.
pub(super) fn check_function_open(
    rules: &JavaScriptRules,
    token: TokenRef<'_>,
    state: &AnalysisState,
    reporter: &mut dyn ErrorReporter,
) {
    if !rules.parameter_docs || state.limited_doc_checks() {
        return;
    }
    let (Some(function), Some(doc)) = (state.function(), checked_doc(state)) else {
        return;
    };
    if doc.inherits_documentation() {
        return;
    }
    let Some(anchor) = token.stream().get(function.start_token) else {
        return;
    };

    for param in &function.parameters {
        if !doc.documents_param(param) {
            reporter.report(
                ErrorKind::MissingParameterDocumentation,
                format!("Missing docs for parameter: \"{param}\""),
                &anchor,
                Position::at_beginning(),
                None,
            );
        }
    }
}

/// Checks `@return` and `@this` when a function body closes.
pub(super) fn check_function_close(
    token: TokenRef<'_>,
    state: &AnalysisState,
    reporter: &mut dyn ErrorReporter,
) {
    if !state.in_function() || state.limited_doc_checks() {
        return;
    }
    let immediately_invoked = token
        .next()
        .is_some_and(|next| next.kind == TokenKind::StartParen);
    if immediately_invoked {
        return;
    }
    let (Some(function), Some(doc)) = (state.function(), checked_doc(state)) else {
        return;
    };
    let stream = token.stream();
    let Some(doc_end) = doc.end_token().and_then(|id| stream.get(id)) else {
        return;
    };

    if function.has_return
        && !doc.has_flag(&FlagKind::Return)
        && !doc.inherits_documentation()
        && !doc.has_flag(&FlagKind::Constructor)
    {
        reporter.report(
            ErrorKind::MissingReturnDocumentation,
            "Missing @return JsDoc in function with non-trivial return".to_string(),
            &doc_end,
            Position::at_beginning(),
            None,
        );
    } else if !function.has_return && !function.has_throw && !state.in_interface_method() {
        if let Some(flag) = doc.get_flag(&FlagKind::Return) {
            let documents_value = flag
                .declared_type()
                .is_some_and(|t| !NOTHING_TYPES.iter().any(|nothing| t.contains(nothing)));
            if let Some(flag_token) = stream.get(flag.flag_token).filter(|_| documents_value) {
                reporter.report(
                    ErrorKind::UnnecessaryReturnDocumentation,
                    "Found @return JsDoc on function that returns nothing".to_string(),
                    &flag_token,
                    Position::at_beginning(),
                    None,
                );
            }
        }
    }

    if function.has_this
        && !doc.has_flag(&FlagKind::This)
        && !function.is_constructor
        && !function.is_interface
        && !function.name.contains(".prototype.")
    {
        reporter.report(
            ErrorKind::MissingJsdocTagThis,
            MISSING_THIS_MESSAGE.to_string(),
            &doc_end,
            Position::at_beginning(),
            None,
        );
    }
}
