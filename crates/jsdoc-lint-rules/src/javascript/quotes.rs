//! Quoting convention: double quotes unless the string holds one.

use jsdoc_lint_core::{ErrorKind, ErrorReporter, Position, TokenKind, TokenRef};

pub(super) fn check_single_quoted_string(token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    let mut next = token.next();
    while let Some(text) = next.filter(|t| t.kind == TokenKind::StringText) {
        if text.text.contains('"') {
            return;
        }
        next = text.next();
    }

    reporter.report(
        ErrorKind::UnnecessarySingleQuotedString,
        "Double-quoted string preferred over single-quoted string.".to_string(),
        &token,
        Position::all(&token.text),
        None,
    );
}
