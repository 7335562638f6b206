//! Token spacing: after operators, before documented names, inside brackets.

use jsdoc_lint_core::{ErrorKind, ErrorReporter, Position, TokenKind, TokenRef};

/// A binary operator needs a space after it unless what follows is itself
/// spacing or punctuation.
pub(super) fn check_operator(token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    if token.is_unary_operator() || token.is_last_in_line() {
        return;
    }
    let Some(next) = token.next() else {
        return;
    };
    // `[` reports its own spacing.
    if next.is_comment()
        || next.is_operator(",")
        || matches!(
            next.kind,
            TokenKind::Whitespace
                | TokenKind::EndParen
                | TokenKind::EndBracket
                | TokenKind::Semicolon
                | TokenKind::StartBracket
        )
    {
        return;
    }

    reporter.report(
        ErrorKind::MissingSpace,
        format!("Missing space after \"{}\"", token.text),
        &token,
        Position::at_end(&token.text),
        None,
    );
}

/// `token` must be separated from the previous token on its line.
pub(super) fn check_missing_space_before(token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    if token.text.starts_with(char::is_whitespace) {
        return;
    }
    let Some(prev) = token.previous() else {
        return;
    };
    if prev.line_number != token.line_number
        || prev.text.is_empty()
        || prev.text.ends_with(char::is_whitespace)
    {
        return;
    }

    reporter.report(
        ErrorKind::MissingSpace,
        format!("Missing space before \"{}\"", token.text),
        &token,
        Position::at_beginning(),
        None,
    );
}

/// After an opener, only more openers may follow until whitespace, the
/// matching closer, or the end of the line.
pub(super) fn check_after_opener(token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    let Some(matching) = token.kind.matching() else {
        return;
    };
    let mut cur = token;
    while !cur.is_last_in_line() {
        let Some(next) = cur.next() else {
            break;
        };
        cur = next;
        if cur.kind.is_opener() {
            continue;
        }
        if cur.kind != TokenKind::Whitespace && cur.kind != matching {
            reporter.report(
                ErrorKind::MissingSpace,
                format!("Missing space after \"{}\"", token.text),
                &token,
                Position::all(&token.text),
                None,
            );
        }
        break;
    }
}

/// Before a closer, only more closers may precede back to whitespace, the
/// matching opener, or the start of the line.
pub(super) fn check_before_closer(token: TokenRef<'_>, reporter: &mut dyn ErrorReporter) {
    let Some(matching) = token.kind.matching() else {
        return;
    };
    let mut cur = token;
    while !cur.is_first_in_line() {
        let Some(prev) = cur.previous() else {
            break;
        };
        cur = prev;
        if cur.kind.is_closer() {
            continue;
        }
        if cur.kind != TokenKind::Whitespace && cur.kind != matching {
            reporter.report(
                ErrorKind::MissingSpace,
                format!("Missing space before \"{}\"", token.text),
                &token,
                Position::all(&token.text),
                None,
            );
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{check, check_with, codes, Js};
    use crate::JavaScriptRules;
    use jsdoc_lint_core::{Config, TokenKind};
    use pretty_assertions::assert_eq;

    const A: (TokenKind, &str) = (TokenKind::Identifier, "a");
    const B: (TokenKind, &str) = (TokenKind::Identifier, "b");
    const SPACE: (TokenKind, &str) = (TokenKind::Whitespace, " ");

    fn op(text: &str) -> (TokenKind, &str) {
        (TokenKind::Operator, text)
    }

    #[test]
    fn test_binary_operator_before_identifier() {
        let mut js = Js::new();
        js.statement(&[A, SPACE, op("+"), B]);
        let violations = check(&js.build());
        assert_eq!(codes(&violations), vec!["JS001"]);
        assert_eq!(violations[0].message, "Missing space after \"+\"");
        // Reported at the end of the operator.
        assert_eq!(violations[0].location.column, "a +".len() + 1);
    }

    #[test]
    fn test_binary_operator_before_whitespace() {
        let mut js = Js::new();
        js.statement(&[A, SPACE, op("+"), SPACE, B]);
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_unary_operator() {
        let mut js = Js::new();
        let minus = js.statement_with_ids(&[A, SPACE, op("="), SPACE, op("-"), B])[4];
        js.mark_unary(minus);
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_operator_exemptions() {
        let followers = [
            (TokenKind::EndParen, ")"),
            (TokenKind::EndBracket, "]"),
            (TokenKind::StartBracket, "["),
            (TokenKind::StartLineComment, "//"),
            (TokenKind::Operator, ","),
        ];
        for follower in followers {
            let mut js = Js::new();
            js.statement(&[A, op("++"), follower]);
            let violations = check(&js.build());
            assert!(
                violations.iter().all(|v| !v.message.contains("\"++\"")),
                "{follower:?}: {violations:?}"
            );
        }

        // Semicolon directly after the operator.
        let mut js = Js::new();
        js.statement(&[A, op("++")]);
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_operator_at_end_of_line() {
        let mut js = Js::new();
        js.line(&[A, SPACE, op("+")]);
        js.statement(&[B]);
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_bracket_adjacency_is_off_by_default() {
        let mut js = Js::new();
        js.statement(&[
            (TokenKind::Identifier, "f"),
            (TokenKind::StartParen, "("),
            A,
            (TokenKind::EndParen, ")"),
        ]);
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_bracket_adjacency() {
        let strict = || JavaScriptRules::new().bracket_adjacency(true);

        let mut js = Js::new();
        js.statement(&[
            (TokenKind::Identifier, "f"),
            (TokenKind::StartParen, "("),
            A,
            (TokenKind::EndParen, ")"),
        ]);
        let violations = check_with(strict(), &Config::default(), &js.build());
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Missing space after \"(\"", "Missing space before \")\""]
        );

        let mut js = Js::new();
        js.statement(&[
            (TokenKind::Identifier, "f"),
            (TokenKind::StartParen, "("),
            (TokenKind::StartBracket, "["),
            SPACE,
            A,
            SPACE,
            (TokenKind::EndBracket, "]"),
            (TokenKind::EndParen, ")"),
        ]);
        assert!(check_with(strict(), &Config::default(), &js.build()).is_empty());

        let mut js = Js::new();
        js.statement(&[
            (TokenKind::Identifier, "f"),
            (TokenKind::StartParen, "("),
            (TokenKind::EndParen, ")"),
        ]);
        assert!(check_with(strict(), &Config::default(), &js.build()).is_empty());
    }
}
