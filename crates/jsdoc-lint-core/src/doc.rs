//! Documentation comment model.
//!
//! A [`DocComment`] is the structured form of a `/** ... */` block; each
//! `@flag` inside it becomes a [`DocFlag`]. Parsing flag text is the
//! tokenizer's job: flags arrive already attached to their tokens.

use crate::token::TokenId;
use std::fmt;

/// Kind of a documentation flag, i.e. the word after `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlagKind {
    /// `@param`
    Param,
    /// `@return`
    Return,
    /// `@this`
    This,
    /// `@type`
    Type,
    /// `@typedef`
    Typedef,
    /// `@suppress`
    Suppress,
    /// `@enum`
    Enum,
    /// `@constructor`
    Constructor,
    /// `@interface`
    Interface,
    /// `@fileoverview`
    FileOverview,
    /// `@externs`
    Externs,
    /// `@inheritDoc`
    InheritDoc,
    /// `@override`
    Override,
    /// `@define`
    Define,
    /// `@extends`
    Extends,
    /// `@implements`
    Implements,
    /// `@throws`
    Throws,
    /// `@const`
    Const,
    /// `@private`
    Private,
    /// `@protected`
    Protected,
    /// `@deprecated`
    Deprecated,
    /// Any other flag, stored without the `@`.
    Other(String),
}

impl FlagKind {
    /// Parses a flag name, with or without the leading `@`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim_start_matches('@') {
            "param" => Self::Param,
            "return" => Self::Return,
            "this" => Self::This,
            "type" => Self::Type,
            "typedef" => Self::Typedef,
            "suppress" => Self::Suppress,
            "enum" => Self::Enum,
            "constructor" => Self::Constructor,
            "interface" => Self::Interface,
            "fileoverview" => Self::FileOverview,
            "externs" => Self::Externs,
            "inheritDoc" => Self::InheritDoc,
            "override" => Self::Override,
            "define" => Self::Define,
            "extends" => Self::Extends,
            "implements" => Self::Implements,
            "throws" => Self::Throws,
            "const" => Self::Const,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "deprecated" => Self::Deprecated,
            other => Self::Other(other.to_string()),
        }
    }

    /// Flag name without the `@`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Param => "param",
            Self::Return => "return",
            Self::This => "this",
            Self::Type => "type",
            Self::Typedef => "typedef",
            Self::Suppress => "suppress",
            Self::Enum => "enum",
            Self::Constructor => "constructor",
            Self::Interface => "interface",
            Self::FileOverview => "fileoverview",
            Self::Externs => "externs",
            Self::InheritDoc => "inheritDoc",
            Self::Override => "override",
            Self::Define => "define",
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::Throws => "throws",
            Self::Const => "const",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Deprecated => "deprecated",
            Self::Other(name) => name,
        }
    }

    /// Returns true for flags that declare a `{type}`.
    #[must_use]
    pub fn has_type(&self) -> bool {
        matches!(
            self,
            Self::Define
                | Self::Enum
                | Self::Extends
                | Self::Implements
                | Self::Param
                | Self::Return
                | Self::Suppress
                | Self::This
                | Self::Throws
                | Self::Type
                | Self::Typedef
        )
    }

    /// Returns true for typed flags whose type may be left out.
    ///
    /// Missing `@suppress` types are reported elsewhere; enums default to number.
    #[must_use]
    pub fn may_omit_type(&self) -> bool {
        matches!(self, Self::Suppress | Self::Enum)
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

/// A single `@flag` inside a documentation comment.
#[derive(Debug, Clone, PartialEq)]
pub struct DocFlag {
    /// Kind of flag.
    pub kind: FlagKind,
    /// The `@flag` token itself.
    pub flag_token: TokenId,
    /// Declared type, without braces.
    pub type_text: Option<String>,
    /// The token closing the type (`}`).
    pub type_end_token: Option<TokenId>,
    /// Declared name (`@param {T} name`).
    pub name: Option<String>,
    /// The token holding the name.
    pub name_token: Option<TokenId>,
}

impl DocFlag {
    /// Creates an untyped, unnamed flag.
    #[must_use]
    pub fn new(kind: FlagKind, flag_token: TokenId) -> Self {
        Self {
            kind,
            flag_token,
            type_text: None,
            type_end_token: None,
            name: None,
            name_token: None,
        }
    }

    /// Sets the declared type and the token that closes it.
    #[must_use]
    pub fn with_type(mut self, type_text: impl Into<String>, end: Option<TokenId>) -> Self {
        self.type_text = Some(type_text.into());
        self.type_end_token = end;
        self
    }

    /// Sets the declared name and its token.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>, token: Option<TokenId>) -> Self {
        self.name = Some(name.into());
        self.name_token = token;
        self
    }

    /// Returns the declared type unless it is empty or blank.
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.type_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// Returns true if the type annotation describes a record shape.
    ///
    /// More than one `{` in a single type string means a nested record,
    /// which is not understood by the checks.
    #[must_use]
    pub fn has_record_type(&self) -> bool {
        self.type_text
            .as_deref()
            .is_some_and(|t| t.matches('{').count() > 1)
    }
}

/// A parsed `/** ... */` block.
#[derive(Debug, Clone)]
pub struct DocComment {
    start_token: TokenId,
    end_token: Option<TokenId>,
    flags: Vec<DocFlag>,
    invalidated: bool,
}

impl DocComment {
    /// Creates an empty comment starting at `start_token`.
    #[must_use]
    pub fn new(start_token: TokenId) -> Self {
        Self {
            start_token,
            end_token: None,
            flags: Vec::new(),
            invalidated: false,
        }
    }

    /// Appends a flag.
    pub fn add_flag(&mut self, flag: DocFlag) {
        self.flags.push(flag);
    }

    /// Records the closing `*/` token.
    pub fn close(&mut self, end_token: TokenId) {
        self.end_token = Some(end_token);
    }

    /// The opening `/**` token.
    #[must_use]
    pub fn start_token(&self) -> TokenId {
        self.start_token
    }

    /// The closing `*/` token, once seen.
    #[must_use]
    pub fn end_token(&self) -> Option<TokenId> {
        self.end_token
    }

    /// All flags in declaration order.
    #[must_use]
    pub fn flags(&self) -> &[DocFlag] {
        &self.flags
    }

    /// Returns true if a flag of `kind` is present.
    #[must_use]
    pub fn has_flag(&self, kind: &FlagKind) -> bool {
        self.flags.iter().any(|f| &f.kind == kind)
    }

    /// Returns the first flag of `kind`.
    #[must_use]
    pub fn get_flag(&self, kind: &FlagKind) -> Option<&DocFlag> {
        self.flags.iter().find(|f| &f.kind == kind)
    }

    /// Returns true if a `@param` documents `name`.
    #[must_use]
    pub fn documents_param(&self, name: &str) -> bool {
        self.flags
            .iter()
            .any(|f| f.kind == FlagKind::Param && f.name.as_deref() == Some(name))
    }

    /// Returns true if the comment holds nothing but `@suppress` flags.
    #[must_use]
    pub fn is_suppression_only(&self) -> bool {
        !self.flags.is_empty() && self.flags.iter().all(|f| f.kind == FlagKind::Suppress)
    }

    /// Returns true if documentation comes from a supertype.
    #[must_use]
    pub fn inherits_documentation(&self) -> bool {
        self.has_flag(&FlagKind::InheritDoc) || self.has_flag(&FlagKind::Override)
    }

    /// Marks the comment as unparsable so that no further checks apply.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Returns true once [`invalidate`](Self::invalidate) was called.
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }
}
