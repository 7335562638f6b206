//! Checks on individual documentation flags.

use super::spacing::check_missing_space_before;
use super::JavaScriptRules;
use jsdoc_lint_core::{
    AnalysisState, DocFlag, ErrorKind, ErrorReporter, FlagKind, Position, TokenRef,
};

pub(super) fn check_doc_flag(
    rules: &JavaScriptRules,
    token: TokenRef<'_>,
    state: &AnalysisState,
    reporter: &mut dyn ErrorReporter,
) {
    let Some(flag) = token.doc_flag() else {
        return;
    };
    if state.doc_comment().is_some_and(|doc| doc.is_invalidated()) {
        return;
    }

    if flag.kind == FlagKind::Param {
        if let Some(name_token) = flag.name_token.and_then(|id| token.stream().get(id)) {
            check_missing_space_before(name_token, reporter);
        }
        if rules.optional_type_marker {
            check_optional_marker(flag, token, reporter);
        }
    }

    if flag.kind.has_type() {
        check_type(flag, token, reporter);
    }
}

/// `opt_` names and `=` types go together.
fn check_optional_marker(flag: &DocFlag, token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    let (Some(type_text), Some(name)) = (flag.type_text.as_deref(), flag.name.as_deref()) else {
        return;
    };
    if type_text.is_empty() || name.is_empty() {
        return;
    }

    let optional_type = type_text.ends_with('=');
    let optional_name = name.starts_with("opt_");
    if optional_type && !optional_name {
        reporter.report(
            ErrorKind::JsdocMissingOptionalPrefix,
            format!("Optional parameter name {name} must be prefixed with opt_."),
            &token,
            Position::at_beginning(),
            None,
        );
    } else if optional_name && !optional_type {
        reporter.report(
            ErrorKind::JsdocMissingOptionalType,
            format!("Optional parameter {name} type must end with =."),
            &token,
            Position::at_beginning(),
            None,
        );
    }
}

fn check_type(flag: &DocFlag, token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    if flag.declared_type().is_none() && !flag.kind.may_omit_type() {
        reporter.report(
            ErrorKind::MissingJsdocTagType,
            format!("Missing type in {} tag", token.text),
            &token,
            Position::at_beginning(),
            None,
        );
        return;
    }

    if let (Some(type_end), Some(name)) = (flag.type_end_token, flag.name_token) {
        if type_end > name {
            reporter.report(
                ErrorKind::OutOfOrderJsdocTagType,
                format!("Type should be immediately after {} tag", token.text),
                &token,
                Position::at_beginning(),
                None,
            );
        }
    }
}
