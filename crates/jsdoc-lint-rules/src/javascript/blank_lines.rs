//! End of a documentation comment: externs mode and top-level blank lines.

use super::JavaScriptRules;
use jsdoc_lint_core::{
    AnalysisState, ErrorKind, ErrorReporter, FlagKind, Position, TokenId, TokenKind, TokenRef,
};

/// What a top-level documented block is, for blank-line purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    FileOverview,
    Constructor,
    Ordinary,
}

impl BlockKind {
    fn expected_blank_lines(self) -> i64 {
        match self {
            Self::FileOverview => 1,
            Self::Constructor => 3,
            Self::Ordinary => 2,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::FileOverview => "Should have a blank line before a file overview.",
            Self::Constructor => "Should have 3 blank lines before a constructor/interface.",
            Self::Ordinary => "Should have 2 blank lines between top-level blocks.",
        }
    }
}

pub(super) fn check_doc_comment_end(
    rules: &JavaScriptRules,
    token: TokenRef<'_>,
    state: &mut AnalysisState,
    reporter: &mut dyn ErrorReporter,
) {
    let Some(doc) = state.doc_comment() else {
        return;
    };
    let is_file_overview = doc.has_flag(&FlagKind::FileOverview);
    let is_externs = is_file_overview && doc.has_flag(&FlagKind::Externs);
    let kind = if is_file_overview {
        BlockKind::FileOverview
    } else if doc.has_flag(&FlagKind::Constructor) || doc.has_flag(&FlagKind::Interface) {
        BlockKind::Constructor
    } else {
        BlockKind::Ordinary
    };
    let suppression_only = doc.is_suppression_only();
    let doc_start = doc.start_token();

    if is_externs {
        tracing::debug!("@externs file overview, limiting documentation checks");
        state.set_limited_doc_checks(true);
    }

    if !rules.blank_lines_at_top_level
        || state.is_markup()
        || !state.in_top_level()
        || state.in_block()
    {
        return;
    }

    let Some(next) = token.next() else {
        return;
    };
    if kind != BlockKind::FileOverview && next.kind.is_non_code() {
        return;
    }
    if suppression_only
        && next.kind == TokenKind::Identifier
        && rules.module_linkage.iter().any(|id| *id == next.text)
    {
        return;
    }

    let Some(block_start) = block_start(token, doc_start, kind) else {
        return;
    };
    let blank_lines = count_blank_lines_above(block_start);
    let expected = kind.expected_blank_lines();
    if blank_lines != expected {
        reporter.report(
            ErrorKind::WrongBlankLineCount,
            kind.message().to_string(),
            &block_start,
            Position::at_beginning(),
            Some(expected - blank_lines),
        );
    }
}

/// The first token of the block: the comment itself, extended upward through
/// comments directly above it unless it is a file overview.
fn block_start<'a>(
    token: TokenRef<'a>,
    doc_start: TokenId,
    kind: BlockKind,
) -> Option<TokenRef<'a>> {
    let mut start = token.stream().get(doc_start)?;
    if kind != BlockKind::FileOverview {
        while let Some(prev) = start.previous().filter(|t| t.is_comment()) {
            start = prev;
        }
    }
    Some(start)
}

/// Blank or whitespace-only lines directly above `start`.
fn count_blank_lines_above(start: TokenRef<'_>) -> i64 {
    let mut count = 0;
    let mut prev = start.previous();
    while let Some(token) = prev {
        match token.kind {
            TokenKind::BlankLine => count += 1,
            TokenKind::Whitespace if token.line.trim().is_empty() => count += 1,
            TokenKind::Whitespace => {}
            _ => break,
        }
        prev = token.previous();
    }
    count
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{check, check_in, codes, Js};
    use crate::JavaScriptRules;
    use jsdoc_lint_core::{FileContext, FlagKind, TokenKind, Violation};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// A `var x;` line, `blanks` blank lines, then a doc comment with
    /// `flags` followed by a function.
    fn block(blanks: usize, flags: &[FlagKind]) -> Js {
        let mut js = Js::new();
        js.statement(&[
            (TokenKind::Keyword, "var"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "x"),
        ]);
        js.blank_lines(blanks);
        js.doc(|d| {
            for flag in flags {
                d.flag(flag.clone(), None, None);
            }
        });
        js.function("app.f", &[], |_| {});
        js
    }

    fn blank_line_violations(js: Js) -> Vec<Violation> {
        check(&js.build())
            .into_iter()
            .filter(|v| v.code == "JS002")
            .collect()
    }

    #[test]
    fn test_ordinary_block() {
        assert!(blank_line_violations(block(2, &[])).is_empty());

        let violations = blank_line_violations(block(4, &[]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].delta, Some(-2));
        assert_eq!(
            violations[0].message,
            "Should have 2 blank lines between top-level blocks."
        );
        assert_eq!(violations[0].location.line, 6);
        assert_eq!(violations[0].location.column, 1);
    }

    #[test]
    fn test_constructor_block() {
        assert!(blank_line_violations(block(3, &[FlagKind::Constructor])).is_empty());
        assert!(blank_line_violations(block(3, &[FlagKind::Interface])).is_empty());

        let violations = blank_line_violations(block(2, &[FlagKind::Constructor]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].delta, Some(1));
        assert_eq!(
            violations[0].message,
            "Should have 3 blank lines before a constructor/interface."
        );
    }

    #[test]
    fn test_file_overview() {
        let mut js = Js::new();
        js.line_comment(" Copyright");
        js.blank_lines(1);
        js.doc(|d| {
            d.flag(FlagKind::FileOverview, None, None);
        });
        js.blank_lines(1);
        assert!(check(&js.build()).is_empty());

        let mut js = Js::new();
        js.line_comment(" Copyright");
        js.doc(|d| {
            d.flag(FlagKind::FileOverview, None, None);
        });
        js.blank_lines(1);
        let violations = check(&js.build());
        assert_eq!(codes(&violations), vec!["JS002"]);
        assert_eq!(violations[0].delta, Some(1));
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn test_file_overview_wins_over_constructor() {
        let mut js = Js::new();
        js.line_comment(" Copyright");
        js.blank_lines(1);
        js.doc(|d| {
            d.flag(FlagKind::FileOverview, None, None);
            d.flag(FlagKind::Constructor, None, None);
        });
        js.function("app.Widget", &[], |_| {});
        assert!(blank_line_violations(js).is_empty());
    }

    #[test]
    fn test_whitespace_only_lines_count() {
        let mut js = Js::new();
        js.statement(&[(TokenKind::Identifier, "x")]);
        js.blank_lines(1);
        js.whitespace_line("   ");
        js.doc(|_| {});
        js.function("app.f", &[], |_| {});
        assert!(blank_line_violations(js).is_empty());
    }

    #[test]
    fn test_comments_above_extend_the_block() {
        let mut js = Js::new();
        js.statement(&[(TokenKind::Identifier, "x")]);
        js.blank_lines(2);
        js.line_comment(" Helpers.");
        js.doc(|_| {});
        js.function("app.f", &[], |_| {});

        let violations = check(&js.build());
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_comment_not_followed_by_code() {
        let mut js = Js::new();
        js.statement(&[(TokenKind::Identifier, "x")]);
        js.doc(|_| {});
        js.line_comment(" trailing");
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_comment_at_end_of_file() {
        let mut js = Js::new();
        js.statement(&[(TokenKind::Identifier, "x")]);
        js.doc(|_| {});
        assert!(check(&js.build()).is_empty());
    }

    #[test]
    fn test_suppression_before_module_linkage() {
        let linkage = |identifier: &str| {
            let mut js = Js::new();
            js.statement(&[(TokenKind::Identifier, "x")]);
            js.doc(|d| {
                d.flag(FlagKind::Suppress, Some("extraRequire"), None);
            });
            js.statement(&[
                (TokenKind::Identifier, identifier),
                (TokenKind::StartParen, "("),
                (TokenKind::DoubleQuoteStringStart, "\""),
                (TokenKind::StringText, "app.dom"),
                (TokenKind::DoubleQuoteStringEnd, "\""),
                (TokenKind::EndParen, ")"),
            ]);
            blank_line_violations(js)
        };

        assert!(linkage("goog.require").is_empty());
        assert!(linkage("goog.provide").is_empty());
        assert_eq!(linkage("app.init").len(), 1);
    }

    #[test]
    fn test_nested_comments_are_skipped() {
        let mut js = Js::new();
        js.function("app.f", &[], |f| {
            f.doc(|_| {});
            f.statement(&[(TokenKind::Identifier, "x")]);
        });
        assert!(blank_line_violations(js).is_empty());
    }

    #[test]
    fn test_markup_and_disabled() {
        let path = PathBuf::from("page.html");
        let ctx = FileContext {
            is_markup: true,
            ..FileContext::plain(&path)
        };
        assert!(check_in(JavaScriptRules::new(), &ctx, &block(0, &[]).build()).is_empty());

        let rule = JavaScriptRules::new().blank_lines_at_top_level(false);
        let path = PathBuf::from("a.js");
        assert!(check_in(rule, &FileContext::plain(&path), &block(0, &[]).build()).is_empty());
    }

    #[test]
    fn test_externs_overview_limits_checks() {
        let mut js = Js::new();
        js.line_comment(" Copyright");
        js.blank_lines(1);
        js.doc(|d| {
            d.flag(FlagKind::FileOverview, None, None);
            d.flag(FlagKind::Externs, None, None);
        });
        js.blank_lines(2);
        js.doc(|_| {});
        js.function("app.f", &[], |f| {
            f.statement_return("x");
        });

        assert!(check(&js.build()).is_empty());
    }
}
