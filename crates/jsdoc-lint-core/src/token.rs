//! Token stream model.
//!
//! Tokens are produced once by the tokenizer and are read-only to the rules.
//! They live in an arena ([`TokenStream`]) and are addressed by [`TokenId`];
//! the previous/next links of a token are its neighbouring indices, so the
//! stream order always matches source order.

use crate::doc::DocFlag;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `/**`
    StartDocComment,
    /// `*/` closing a documentation comment.
    EndDocComment,
    /// A documentation flag such as `@param`.
    DocFlag,
    /// The leading ` *` of a documentation comment line.
    DocPrefix,
    /// `{` opening a type inside a documentation comment.
    DocStartBrace,
    /// `}` closing a type inside a documentation comment.
    DocEndBrace,
    /// Free text, type text or names inside a documentation comment.
    DocText,
    /// `/*`
    StartBlockComment,
    /// `*/` closing a plain block comment.
    EndBlockComment,
    /// `//`
    StartLineComment,
    /// Text of a plain comment.
    Comment,
    /// `'` opening a string.
    SingleQuoteStringStart,
    /// `'` closing a string.
    SingleQuoteStringEnd,
    /// `"` opening a string.
    DoubleQuoteStringStart,
    /// `"` closing a string.
    DoubleQuoteStringEnd,
    /// Text between string delimiters.
    StringText,
    /// `{`
    StartBlock,
    /// `}`
    EndBlock,
    /// `(`
    StartParen,
    /// `)`
    EndParen,
    /// `[`
    StartBracket,
    /// `]`
    EndBracket,
    /// Any operator, including `,`.
    Operator,
    /// `;`
    Semicolon,
    /// Horizontal whitespace.
    Whitespace,
    /// An empty line.
    BlankLine,
    /// Identifier, possibly dotted (`goog.require`).
    Identifier,
    /// Reserved word (`function`, `return`, `this`, ...).
    Keyword,
    /// Numeric literal.
    Number,
    /// Anything else.
    Other,
}

impl TokenKind {
    /// Returns true for every comment variant, documentation tokens included.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::StartDocComment
                | Self::EndDocComment
                | Self::DocFlag
                | Self::DocPrefix
                | Self::DocStartBrace
                | Self::DocEndBrace
                | Self::DocText
                | Self::StartBlockComment
                | Self::EndBlockComment
                | Self::StartLineComment
                | Self::Comment
        )
    }

    /// Returns true for tokens that are not code: comments, whitespace and blank lines.
    #[must_use]
    pub fn is_non_code(self) -> bool {
        self.is_comment() || matches!(self, Self::Whitespace | Self::BlankLine)
    }

    /// Returns true for `(`, `[` and `{`.
    #[must_use]
    pub fn is_opener(self) -> bool {
        matches!(self, Self::StartParen | Self::StartBracket | Self::StartBlock)
    }

    /// Returns true for `)`, `]` and `}`.
    #[must_use]
    pub fn is_closer(self) -> bool {
        matches!(self, Self::EndParen | Self::EndBracket | Self::EndBlock)
    }

    /// Returns the counterpart of an opener or closer.
    #[must_use]
    pub fn matching(self) -> Option<Self> {
        match self {
            Self::StartParen => Some(Self::EndParen),
            Self::EndParen => Some(Self::StartParen),
            Self::StartBracket => Some(Self::EndBracket),
            Self::EndBracket => Some(Self::StartBracket),
            Self::StartBlock => Some(Self::EndBlock),
            Self::EndBlock => Some(Self::StartBlock),
            _ => None,
        }
    }
}

/// A function declaration as reported by the tokenizer.
///
/// Attached to the token that introduces the function (usually the
/// `function` keyword); the next block open is the function body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Fully qualified name (`app.Widget.prototype.render`).
    #[serde(default)]
    pub name: String,
    /// Declared parameter names, in order.
    #[serde(default)]
    pub params: Vec<String>,
}

impl FunctionDecl {
    /// Creates a declaration with the given name and parameters.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Semantic payload attached to a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Parsed documentation flag, on [`TokenKind::DocFlag`] tokens.
    DocFlag(DocFlag),
    /// Function declaration, on the token that introduces a function.
    Function(FunctionDecl),
}

/// Extra facts the tokenizer knows about a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenMetadata {
    /// The operator is used in a unary context (`-x`, `!ok`).
    pub unary_operator: bool,
}

/// Opaque index of a token within its [`TokenStream`].
///
/// Ordering follows source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(usize);

impl TokenId {
    /// Position of the token in its stream.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single lexical token.
#[derive(Debug, Clone)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// Literal text.
    pub text: String,
    /// Full text of the source line the token is on.
    pub line: Arc<str>,
    /// Line number (1-indexed).
    pub line_number: usize,
    /// Byte column within the line (0-indexed).
    pub column: usize,
    /// Byte offset within [`TokenStream::source`].
    pub offset: usize,
    /// Optional semantic payload.
    pub attachment: Option<Attachment>,
    /// Tokenizer metadata.
    pub metadata: TokenMetadata,
}

impl Token {
    /// Returns the attached documentation flag, if any.
    #[must_use]
    pub fn doc_flag(&self) -> Option<&DocFlag> {
        match &self.attachment {
            Some(Attachment::DocFlag(flag)) => Some(flag),
            _ => None,
        }
    }

    /// Returns the attached function declaration, if any.
    #[must_use]
    pub fn function_decl(&self) -> Option<&FunctionDecl> {
        match &self.attachment {
            Some(Attachment::Function(decl)) => Some(decl),
            _ => None,
        }
    }

    /// Returns true if the tokenizer marked this operator as unary.
    #[must_use]
    pub fn is_unary_operator(&self) -> bool {
        self.metadata.unary_operator
    }

    /// Returns true for any comment token.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Returns true if this is the operator `op`.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// Returns true if this is the keyword `word`.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }
}

/// An ordered, immutable sequence of tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    lines: Vec<Arc<str>>,
}

impl TokenStream {
    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns a cursor at `id`, or `None` if `id` is outside this stream.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<TokenRef<'_>> {
        self.tokens.get(id.0).map(|token| TokenRef {
            stream: self,
            id,
            token,
        })
    }

    /// Returns a cursor at the first token.
    #[must_use]
    pub fn first(&self) -> Option<TokenRef<'_>> {
        self.get(TokenId(0))
    }

    /// Iterates over all tokens in source order.
    pub fn iter(&self) -> impl Iterator<Item = TokenRef<'_>> {
        self.tokens
            .iter()
            .enumerate()
            .map(move |(i, token)| TokenRef {
                stream: self,
                id: TokenId(i),
                token,
            })
    }

    /// Source lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[Arc<str>] {
        &self.lines
    }

    /// Reconstructs the source text from the lines.
    #[must_use]
    pub fn source(&self) -> String {
        self.lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

/// A token together with its position in the stream.
///
/// Dereferences to [`Token`]; `next`/`previous` walk the stream.
#[derive(Debug, Clone, Copy)]
pub struct TokenRef<'a> {
    stream: &'a TokenStream,
    id: TokenId,
    token: &'a Token,
}

impl<'a> TokenRef<'a> {
    /// Id of this token.
    #[must_use]
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// The stream this token belongs to.
    #[must_use]
    pub fn stream(&self) -> &'a TokenStream {
        self.stream
    }

    /// The underlying token.
    #[must_use]
    pub fn token(&self) -> &'a Token {
        self.token
    }

    /// The following token.
    #[must_use]
    pub fn next(&self) -> Option<TokenRef<'a>> {
        self.stream.get(TokenId(self.id.0 + 1))
    }

    /// The preceding token.
    #[must_use]
    pub fn previous(&self) -> Option<TokenRef<'a>> {
        let index = self.id.0.checked_sub(1)?;
        self.stream.get(TokenId(index))
    }

    /// Returns true if no token follows on the same line.
    #[must_use]
    pub fn is_last_in_line(&self) -> bool {
        self.next()
            .map_or(true, |next| next.line_number != self.token.line_number)
    }

    /// Returns true if no token precedes on the same line.
    #[must_use]
    pub fn is_first_in_line(&self) -> bool {
        self.previous()
            .map_or(true, |prev| prev.line_number != self.token.line_number)
    }
}

impl Deref for TokenRef<'_> {
    type Target = Token;

    fn deref(&self) -> &Token {
        self.token
    }
}

/// Builds a [`TokenStream`] token by token, line by line.
///
/// Columns, offsets and line texts are derived from the pushed text, so the
/// tokens of a line must cover it completely.
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    lines: Vec<Arc<str>>,
    current_line: String,
    line_start_token: usize,
    line_offset: usize,
}

impl TokenStreamBuilder {
    /// Creates an empty builder positioned on line 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a token to the current line.
    pub fn push(&mut self, kind: TokenKind, text: impl Into<String>) -> TokenId {
        let text = text.into();
        let column = self.current_line.len();
        let id = TokenId(self.tokens.len());
        self.current_line.push_str(&text);
        self.tokens.push(Token {
            kind,
            text,
            line: Arc::from(""),
            line_number: self.lines.len() + 1,
            column,
            offset: self.line_offset + column,
            attachment: None,
            metadata: TokenMetadata::default(),
        });
        id
    }

    /// Ends the current line.
    pub fn newline(&mut self) {
        let line: Arc<str> = Arc::from(std::mem::take(&mut self.current_line));
        for token in &mut self.tokens[self.line_start_token..] {
            token.line = Arc::clone(&line);
        }
        self.line_offset += line.len() + 1;
        self.lines.push(line);
        self.line_start_token = self.tokens.len();
    }

    /// Pushes a [`TokenKind::BlankLine`] token and ends the line.
    pub fn blank_line(&mut self) -> TokenId {
        let id = self.push(TokenKind::BlankLine, "");
        self.newline();
        id
    }

    /// Attaches a payload to an already pushed token.
    pub fn attach(&mut self, id: TokenId, attachment: Attachment) {
        if let Some(token) = self.tokens.get_mut(id.0) {
            token.attachment = Some(attachment);
        }
    }

    /// Marks an already pushed operator as unary.
    pub fn mark_unary(&mut self, id: TokenId) {
        if let Some(token) = self.tokens.get_mut(id.0) {
            token.metadata.unary_operator = true;
        }
    }

    /// Id the next pushed token will receive.
    #[must_use]
    pub fn next_id(&self) -> TokenId {
        TokenId(self.tokens.len())
    }

    /// Finishes the stream, closing a trailing unterminated line.
    #[must_use]
    pub fn build(mut self) -> TokenStream {
        if !self.current_line.is_empty() || self.line_start_token < self.tokens.len() {
            self.newline();
        }
        TokenStream {
            tokens: self.tokens,
            lines: self.lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenStream {
        let mut b = TokenStreamBuilder::new();
        b.push(TokenKind::Identifier, "a");
        b.push(TokenKind::Operator, "+");
        b.push(TokenKind::Identifier, "b");
        b.newline();
        b.blank_line();
        b.push(TokenKind::Keyword, "return");
        b.build()
    }

    #[test]
    fn test_columns_and_lines() {
        let stream = sample();
        let plus = stream.iter().nth(1).unwrap();
        assert_eq!(plus.column, 1);
        assert_eq!(plus.line_number, 1);
        assert_eq!(&*plus.line, "a+b");

        let ret = stream.iter().last().unwrap();
        assert_eq!(ret.line_number, 3);
        assert_eq!(ret.offset, "a+b\n\n".len());
        assert_eq!(stream.source(), "a+b\n\nreturn");
    }

    #[test]
    fn test_links_follow_source_order() {
        let stream = sample();
        let first = stream.first().unwrap();
        assert!(first.previous().is_none());
        assert_eq!(first.next().unwrap().text, "+");
        assert!(first.is_first_in_line());
        assert!(!first.is_last_in_line());

        let b = first.next().unwrap().next().unwrap();
        assert!(b.is_last_in_line());
        assert!(b.id() > first.id());
    }

    #[test]
    fn test_kind_classification() {
        assert!(TokenKind::DocFlag.is_comment());
        assert!(TokenKind::BlankLine.is_non_code());
        assert!(!TokenKind::Identifier.is_non_code());
        assert_eq!(
            TokenKind::StartBracket.matching(),
            Some(TokenKind::EndBracket)
        );
        assert_eq!(TokenKind::Operator.matching(), None);
    }

    #[test]
    fn test_get_out_of_range() {
        let stream = sample();
        assert!(stream.get(TokenId(99)).is_none());
    }
}
