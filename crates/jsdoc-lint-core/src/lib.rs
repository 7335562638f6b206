//! # jsdoc-lint-core
//!
//! Core framework for checking JavaScript documentation and style over a
//! pre-tokenized source file.
//!
//! This crate provides the foundational types for building token-stream
//! rules. It includes:
//!
//! - [`TokenStream`] and [`TokenRef`] for walking tokens with neighbours
//! - [`DocComment`] and [`DocFlag`] for parsed JsDoc blocks
//! - [`AnalysisState`] and [`StateTracker`] for per-file session state
//! - [`Rule`] trait for per-token rules
//! - [`Checker`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use jsdoc_lint_core::{Checker, FileContext};
//!
//! let checker = Checker::builder()
//!     .root("./build/tokens")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = checker.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod context;
mod dump;
mod errors;
mod report;
mod rule;
mod state;
mod tracker;
mod types;

/// Parsed documentation blocks and flags.
pub mod doc;
/// Token stream model.
pub mod token;

pub use checker::{CheckedDump, Checker, CheckerBuilder, CheckerError, SourceFilter};
pub use config::{CheckerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use doc::{DocComment, DocFlag, FlagKind};
pub use dump::{default_source_path, is_dump_file, DumpError, TokenDump, DUMP_SUFFIX};
pub use errors::ErrorKind;
pub use report::{ErrorReporter, Position, ViolationCollector};
pub use rule::{Rule, RuleBox};
pub use state::{AnalysisState, DocCommentId, FunctionContext};
pub use token::{
    Attachment, FunctionDecl, Token, TokenId, TokenKind, TokenRef, TokenStream,
    TokenStreamBuilder,
};
pub use tracker::StateTracker;
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
