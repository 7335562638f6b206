//! Mutable per-file analysis state.
//!
//! One [`AnalysisState`] exists per checking session. It is threaded
//! explicitly through every rule call and never shared between files.

use crate::context::FileContext;
use crate::doc::{DocComment, DocFlag, FlagKind};
use crate::token::TokenId;
use std::collections::HashSet;

/// Index of a [`DocComment`] owned by an [`AnalysisState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocCommentId(usize);

/// Facts about the function whose body is currently being walked.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    /// Fully qualified name.
    pub name: String,
    /// Declared parameter names.
    pub parameters: Vec<String>,
    /// The token that introduced the function.
    pub start_token: TokenId,
    /// The `{` opening the body.
    pub body_token: TokenId,
    /// Documentation block, if one directly preceded the function.
    pub doc: Option<DocCommentId>,
    /// Documented as `@constructor`.
    pub is_constructor: bool,
    /// Documented as `@interface`.
    pub is_interface: bool,
    /// Contains a `return` with a value.
    pub has_return: bool,
    /// Contains a `throw`.
    pub has_throw: bool,
    /// References `this`.
    pub has_this: bool,
    pub(crate) block_depth: usize,
}

/// State of one checking session.
#[derive(Debug, Default)]
pub struct AnalysisState {
    doc_comments: Vec<DocComment>,
    current_doc: Option<DocCommentId>,
    pending_doc: Option<DocCommentId>,
    functions: Vec<FunctionContext>,
    block_depth: usize,
    function_open: bool,
    function_close: bool,
    interface_names: HashSet<String>,
    limited_doc_checks: bool,
    markup: bool,
}

impl AnalysisState {
    /// Creates a fresh state for a plain script file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh state seeded from a file context.
    #[must_use]
    pub fn for_file(ctx: &FileContext<'_>) -> Self {
        Self {
            limited_doc_checks: ctx.limited_doc,
            markup: ctx.is_markup,
            ..Self::default()
        }
    }

    // --- functions ---

    /// Returns true inside a function body.
    #[must_use]
    pub fn in_function(&self) -> bool {
        !self.functions.is_empty()
    }

    /// The innermost enclosing function.
    #[must_use]
    pub fn function(&self) -> Option<&FunctionContext> {
        self.functions.last()
    }

    /// The innermost enclosing function, mutably.
    pub fn function_mut(&mut self) -> Option<&mut FunctionContext> {
        self.functions.last_mut()
    }

    /// Returns true while the current token opens the innermost function's body.
    #[must_use]
    pub fn is_function_open(&self) -> bool {
        self.function_open
    }

    /// Returns true while the current token closes the innermost function's body.
    #[must_use]
    pub fn is_function_close(&self) -> bool {
        self.function_close
    }

    /// Documentation block of the innermost function.
    #[must_use]
    pub fn function_doc(&self) -> Option<&DocComment> {
        self.function()
            .and_then(|f| f.doc)
            .and_then(|id| self.doc(id))
    }

    /// Returns true inside an interface or a prototype method of a known interface.
    #[must_use]
    pub fn in_interface_method(&self) -> bool {
        let Some(function) = self.function() else {
            return false;
        };
        if function.is_interface {
            return true;
        }
        function
            .name
            .find(".prototype.")
            .is_some_and(|i| self.interface_names.contains(&function.name[..i]))
    }

    // --- documentation comments ---

    /// The comment being read, or the most recently closed one.
    #[must_use]
    pub fn doc_comment(&self) -> Option<&DocComment> {
        self.current_doc.and_then(|id| self.doc(id))
    }

    /// Mutable access to the current comment.
    pub fn doc_comment_mut(&mut self) -> Option<&mut DocComment> {
        let id = self.current_doc?;
        self.doc_comments.get_mut(id.0)
    }

    /// Makes `doc` the current comment and returns its id.
    pub fn replace_doc_comment(&mut self, doc: DocComment) -> DocCommentId {
        let id = DocCommentId(self.doc_comments.len());
        self.doc_comments.push(doc);
        self.current_doc = Some(id);
        id
    }

    /// Looks a comment up by id.
    #[must_use]
    pub fn doc(&self, id: DocCommentId) -> Option<&DocComment> {
        self.doc_comments.get(id.0)
    }

    /// Invalidates the current comment; later checks treat it as done.
    pub fn invalidate_doc_comment(&mut self) {
        if let Some(doc) = self.doc_comment_mut() {
            doc.invalidate();
        }
    }

    // --- nesting ---

    /// Returns true outside every function.
    #[must_use]
    pub fn in_top_level(&self) -> bool {
        self.functions.is_empty()
    }

    /// Returns true inside any `{ ... }`.
    #[must_use]
    pub fn in_block(&self) -> bool {
        self.block_depth > 0
    }

    /// Current `{` nesting depth.
    #[must_use]
    pub fn block_depth(&self) -> usize {
        self.block_depth
    }

    // --- file modes ---

    /// Returns true when only limited documentation is required.
    #[must_use]
    pub fn limited_doc_checks(&self) -> bool {
        self.limited_doc_checks
    }

    /// Switches limited documentation checking on or off.
    pub fn set_limited_doc_checks(&mut self, limited: bool) {
        self.limited_doc_checks = limited;
    }

    /// Returns true when the script is embedded in markup.
    #[must_use]
    pub fn is_markup(&self) -> bool {
        self.markup
    }

    // --- tracker hooks ---

    pub(crate) fn reset_transients(&mut self) {
        self.function_open = false;
        self.function_close = false;
    }

    pub(crate) fn begin_doc_comment(&mut self, start: TokenId) {
        self.replace_doc_comment(DocComment::new(start));
    }

    pub(crate) fn add_flag(&mut self, flag: DocFlag) {
        if let Some(doc) = self.doc_comment_mut() {
            doc.add_flag(flag);
        }
    }

    pub(crate) fn end_doc_comment(&mut self, end: TokenId) {
        if let Some(doc) = self.doc_comment_mut() {
            doc.close(end);
        }
        self.pending_doc = self.current_doc;
    }

    pub(crate) fn clear_pending_doc(&mut self) {
        self.pending_doc = None;
    }

    pub(crate) fn open_block(&mut self) {
        self.block_depth += 1;
    }

    pub(crate) fn close_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    pub(crate) fn enter_function(
        &mut self,
        name: String,
        parameters: Vec<String>,
        start_token: TokenId,
        body_token: TokenId,
    ) {
        let doc = self.pending_doc.take();
        let (is_constructor, is_interface) = doc
            .and_then(|id| self.doc(id))
            .map_or((false, false), |d| {
                (
                    d.has_flag(&FlagKind::Constructor),
                    d.has_flag(&FlagKind::Interface),
                )
            });
        if is_interface {
            self.interface_names.insert(name.clone());
        }

        self.functions.push(FunctionContext {
            name,
            parameters,
            start_token,
            body_token,
            doc,
            is_constructor,
            is_interface,
            has_return: false,
            has_throw: false,
            has_this: false,
            block_depth: self.block_depth,
        });
        self.function_open = true;
    }

    /// Marks the function close if `}` at the current depth ends the innermost body.
    pub(crate) fn detect_function_close(&mut self) {
        self.function_close = self
            .functions
            .last()
            .is_some_and(|f| f.block_depth == self.block_depth);
    }

    pub(crate) fn exit_function(&mut self) {
        self.functions.pop();
    }
}
