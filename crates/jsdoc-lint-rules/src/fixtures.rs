//! Token stream builders for rule tests.
//!
//! [`Js`] lays tokens out the way the tokenizer would for well-formed
//! source, so tests only spell out the part they care about.

use crate::JavaScriptRules;
use jsdoc_lint_core::{
    Attachment, Checker, Config, DocFlag, FileContext, FlagKind, FunctionDecl, TokenId, TokenKind,
    TokenStream, TokenStreamBuilder, Violation,
};
use std::path::PathBuf;

pub(crate) struct Js {
    builder: TokenStreamBuilder,
    depth: usize,
}

impl Js {
    pub(crate) fn new() -> Self {
        Self {
            builder: TokenStreamBuilder::new(),
            depth: 0,
        }
    }

    pub(crate) fn build(self) -> TokenStream {
        self.builder.build()
    }

    fn push(&mut self, kind: TokenKind, text: &str) -> TokenId {
        self.builder.push(kind, text)
    }

    fn indent(&mut self) {
        if self.depth > 0 {
            let indent = "  ".repeat(self.depth);
            self.push(TokenKind::Whitespace, &indent);
        }
    }

    pub(crate) fn mark_unary(&mut self, id: TokenId) {
        self.builder.mark_unary(id);
    }

    /// Writes `tokens` as one line, without a semicolon.
    pub(crate) fn line(&mut self, tokens: &[(TokenKind, &str)]) {
        self.indent();
        for (kind, text) in tokens {
            self.push(*kind, text);
        }
        self.builder.newline();
    }

    /// Writes `tokens;` as one line.
    pub(crate) fn statement(&mut self, tokens: &[(TokenKind, &str)]) {
        self.statement_with_ids(tokens);
    }

    /// Writes `tokens;` as one line and returns the ids of `tokens`.
    pub(crate) fn statement_with_ids(&mut self, tokens: &[(TokenKind, &str)]) -> Vec<TokenId> {
        self.indent();
        let ids = tokens
            .iter()
            .map(|(kind, text)| self.push(*kind, text))
            .collect();
        self.push(TokenKind::Semicolon, ";");
        self.builder.newline();
        ids
    }

    pub(crate) fn blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.builder.blank_line();
        }
    }

    pub(crate) fn whitespace_line(&mut self, text: &str) {
        self.push(TokenKind::Whitespace, text);
        self.builder.newline();
    }

    pub(crate) fn line_comment(&mut self, text: &str) {
        self.line(&[
            (TokenKind::StartLineComment, "//"),
            (TokenKind::Comment, text),
        ]);
    }

    /// `var s = '<text>';`
    pub(crate) fn string_single(&mut self, text: &str) {
        self.statement(&[
            (TokenKind::Keyword, "var"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "s"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Operator, "="),
            (TokenKind::Whitespace, " "),
            (TokenKind::SingleQuoteStringStart, "'"),
            (TokenKind::StringText, text),
            (TokenKind::SingleQuoteStringEnd, "'"),
        ]);
    }

    pub(crate) fn statement_return(&mut self, value: &str) {
        self.statement(&[
            (TokenKind::Keyword, "return"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, value),
        ]);
    }

    pub(crate) fn statement_bare_return(&mut self) {
        self.statement(&[(TokenKind::Keyword, "return")]);
    }

    pub(crate) fn statement_throw(&mut self) {
        self.statement(&[
            (TokenKind::Keyword, "throw"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "err"),
        ]);
    }

    /// `this.x = 1;`
    pub(crate) fn statement_this(&mut self) {
        self.statement(&[
            (TokenKind::Identifier, "this.x"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Operator, "="),
            (TokenKind::Whitespace, " "),
            (TokenKind::Number, "1"),
        ]);
    }

    /// A `/** ... */` block, one line per flag.
    pub(crate) fn doc(&mut self, lines: impl FnOnce(&mut DocLines<'_>)) {
        self.indent();
        self.push(TokenKind::StartDocComment, "/**");
        self.builder.newline();
        lines(&mut DocLines { js: self });
        self.indent();
        self.push(TokenKind::EndDocComment, " */");
        self.builder.newline();
    }

    /// `function <name>(<params>) { <body> }`
    pub(crate) fn function(&mut self, name: &str, params: &[&str], body: impl FnOnce(&mut Self)) {
        self.write_function(name, params, body, false);
    }

    /// `function <name>(<params>) { <body> }();`
    pub(crate) fn invoked_function(
        &mut self,
        name: &str,
        params: &[&str],
        body: impl FnOnce(&mut Self),
    ) {
        self.write_function(name, params, body, true);
    }

    fn write_function(
        &mut self,
        name: &str,
        params: &[&str],
        body: impl FnOnce(&mut Self),
        invoked: bool,
    ) {
        self.indent();
        let keyword = self.push(TokenKind::Keyword, "function");
        self.builder.attach(
            keyword,
            Attachment::Function(FunctionDecl::new(name, params.iter().copied())),
        );
        self.push(TokenKind::Whitespace, " ");
        self.push(TokenKind::Identifier, name);
        self.push(TokenKind::StartParen, "(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.push(TokenKind::Operator, ",");
                self.push(TokenKind::Whitespace, " ");
            }
            self.push(TokenKind::Identifier, param);
        }
        self.push(TokenKind::EndParen, ")");
        self.push(TokenKind::Whitespace, " ");
        self.push(TokenKind::StartBlock, "{");
        self.builder.newline();

        self.depth += 1;
        body(self);
        self.depth -= 1;

        self.indent();
        self.push(TokenKind::EndBlock, "}");
        if invoked {
            self.push(TokenKind::StartParen, "(");
            self.push(TokenKind::EndParen, ")");
            self.push(TokenKind::Semicolon, ";");
        }
        self.builder.newline();
    }
}

/// Lines inside a doc comment.
pub(crate) struct DocLines<'a> {
    js: &'a mut Js,
}

impl DocLines<'_> {
    /// ` * @<kind> {<type>} <name>`
    pub(crate) fn flag(&mut self, kind: FlagKind, type_text: Option<&str>, name: Option<&str>) {
        let flag = self.start_line(&kind);
        let mut doc_flag = DocFlag::new(kind, flag);
        if let Some(type_text) = type_text {
            self.js.push(TokenKind::Whitespace, " ");
            let end = self.write_type(type_text);
            doc_flag = doc_flag.with_type(type_text, Some(end));
        }
        if let Some(name) = name {
            self.js.push(TokenKind::Whitespace, " ");
            let id = self.js.push(TokenKind::DocText, name);
            doc_flag = doc_flag.with_name(name, Some(id));
        }
        self.finish_line(flag, doc_flag);
    }

    /// ` * @<kind> <name> {<type>}`
    pub(crate) fn flag_name_first(&mut self, kind: FlagKind, type_text: &str, name: &str) {
        let flag = self.start_line(&kind);
        self.js.push(TokenKind::Whitespace, " ");
        let name_id = self.js.push(TokenKind::DocText, name);
        self.js.push(TokenKind::Whitespace, " ");
        let end = self.write_type(type_text);
        let doc_flag = DocFlag::new(kind, flag)
            .with_type(type_text, Some(end))
            .with_name(name, Some(name_id));
        self.finish_line(flag, doc_flag);
    }

    /// ` * @<kind> {<type>}<name>`
    pub(crate) fn flag_tight(&mut self, kind: FlagKind, type_text: &str, name: &str) {
        let flag = self.start_line(&kind);
        self.js.push(TokenKind::Whitespace, " ");
        let end = self.write_type(type_text);
        let name_id = self.js.push(TokenKind::DocText, name);
        let doc_flag = DocFlag::new(kind, flag)
            .with_type(type_text, Some(end))
            .with_name(name, Some(name_id));
        self.finish_line(flag, doc_flag);
    }

    fn start_line(&mut self, kind: &FlagKind) -> TokenId {
        self.js.indent();
        self.js.push(TokenKind::DocPrefix, " *");
        self.js.push(TokenKind::Whitespace, " ");
        self.js.push(TokenKind::DocFlag, &kind.to_string())
    }

    fn write_type(&mut self, type_text: &str) -> TokenId {
        self.js.push(TokenKind::DocStartBrace, "{");
        if !type_text.is_empty() {
            self.js.push(TokenKind::DocText, type_text);
        }
        self.js.push(TokenKind::DocEndBrace, "}")
    }

    fn finish_line(&mut self, flag: TokenId, doc_flag: DocFlag) {
        self.js.builder.attach(flag, Attachment::DocFlag(doc_flag));
        self.js.builder.newline();
    }
}

pub(crate) fn check(stream: &TokenStream) -> Vec<Violation> {
    check_with(JavaScriptRules::new(), &Config::default(), stream)
}

pub(crate) fn check_with(rule: JavaScriptRules, config: &Config, stream: &TokenStream) -> Vec<Violation> {
    let path = PathBuf::from("test.js");
    run(rule, config, &FileContext::plain(&path), stream)
}

pub(crate) fn check_in(rule: JavaScriptRules, ctx: &FileContext<'_>, stream: &TokenStream) -> Vec<Violation> {
    run(rule, &Config::default(), ctx, stream)
}

fn run(
    rule: JavaScriptRules,
    config: &Config,
    ctx: &FileContext<'_>,
    stream: &TokenStream,
) -> Vec<Violation> {
    Checker::builder()
        .rule(rule)
        .config(config.clone())
        .build()
        .expect("checker should build")
        .check_stream(ctx, stream)
}

pub(crate) fn codes(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(|v| v.code.clone()).collect()
}
