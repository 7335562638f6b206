//! Maintains the [`AnalysisState`] while walking a token stream.
//!
//! The tracker is the generic half of the engine: it runs before the rules
//! for every token ([`StateTracker::handle_token`]) and again after them
//! ([`StateTracker::handle_after_token`]), so rules always see the state as
//! of the current token.

use crate::state::AnalysisState;
use crate::token::{FunctionDecl, TokenId, TokenKind, TokenRef};

/// Updates function, block and documentation state token by token.
#[derive(Debug, Default)]
pub struct StateTracker {
    pending_function: Option<(TokenId, FunctionDecl)>,
}

impl StateTracker {
    /// Creates a tracker for a new session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `state` for `token`, before the rules see it.
    pub fn handle_token(&mut self, token: TokenRef<'_>, state: &mut AnalysisState) {
        state.reset_transients();

        if let Some(decl) = token.function_decl() {
            self.pending_function = Some((token.id(), decl.clone()));
        }

        match token.kind {
            TokenKind::StartDocComment => state.begin_doc_comment(token.id()),
            TokenKind::DocFlag => {
                if let Some(flag) = token.doc_flag() {
                    state.add_flag(flag.clone());
                }
            }
            TokenKind::EndDocComment => state.end_doc_comment(token.id()),
            TokenKind::StartBlock => {
                state.open_block();
                if let Some((start, decl)) = self.pending_function.take() {
                    tracing::trace!("Entering function {}", decl.name);
                    state.enter_function(decl.name, decl.params, start, token.id());
                }
            }
            TokenKind::EndBlock => state.detect_function_close(),
            TokenKind::Semicolon => state.clear_pending_doc(),
            TokenKind::Keyword => match token.text.as_str() {
                "return" if has_return_value(token) => {
                    if let Some(f) = state.function_mut() {
                        f.has_return = true;
                    }
                }
                "throw" => {
                    if let Some(f) = state.function_mut() {
                        f.has_throw = true;
                    }
                }
                "this" => mark_this(state),
                _ => {}
            },
            TokenKind::Identifier if token.text == "this" || token.text.starts_with("this.") => {
                mark_this(state);
            }
            _ => {}
        }
    }

    /// Updates `state` for `token`, after the rules saw it.
    pub fn handle_after_token(&mut self, token: TokenRef<'_>, state: &mut AnalysisState) {
        if token.kind == TokenKind::EndBlock {
            if state.is_function_close() {
                tracing::trace!("Leaving function at line {}", token.line_number);
                state.exit_function();
            }
            state.close_block();
        }
    }
}

fn mark_this(state: &mut AnalysisState) {
    if let Some(f) = state.function_mut() {
        f.has_this = true;
    }
}

/// A `return` is non-trivial unless the next code token ends the statement.
fn has_return_value(token: TokenRef<'_>) -> bool {
    let mut next = token.next();
    while let Some(t) = next {
        if !t.kind.is_non_code() {
            return !matches!(t.kind, TokenKind::Semicolon | TokenKind::EndBlock);
        }
        next = t.next();
    }
    false
}
