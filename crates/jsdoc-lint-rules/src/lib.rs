//! # jsdoc-lint-rules
//!
//! JavaScript documentation and formatting rules for jsdoc-lint.
//!
//! All checks live in one token-dispatched rule, [`JavaScriptRules`]; each
//! violation kind can still be switched off or re-graded by name.
//!
//! ## Violations
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | JS001 | `missing-space` | Missing space after an operator or before a documented name |
//! | JS002 | `wrong-blank-line-count` | Wrong number of blank lines above a top-level block |
//! | JS003 | `unnecessary-single-quoted-string` | Single quotes where double quotes would do |
//! | JS004 | `jsdoc-missing-optional-prefix` | Optional parameter type without `opt_` name |
//! | JS005 | `jsdoc-missing-optional-type` | `opt_` parameter without `=` type |
//! | JS006 | `missing-jsdoc-tag-type` | Typed flag without a type |
//! | JS007 | `out-of-order-jsdoc-tag-type` | Flag type after the name |
//! | JS008 | `missing-return-documentation` | Returning function without `@return` |
//! | JS009 | `unnecessary-return-documentation` | `@return` on a function returning nothing |
//! | JS010 | `missing-jsdoc-tag-this` | Function using `this` without `@this` |
//! | JS011 | `missing-parameter-documentation` | Parameter without `@param` |
//!
//! ## Usage
//!
//! ```ignore
//! use jsdoc_lint_core::Checker;
//! use jsdoc_lint_rules::JavaScriptRules;
//!
//! let checker = Checker::builder()
//!     .root("./build/tokens")
//!     .rule(JavaScriptRules::new().bracket_adjacency(true))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod javascript;
mod presets;

#[cfg(test)]
mod fixtures;

pub use javascript::{JavaScriptRules, NAME};
pub use presets::{minimal_rules, recommended_rules, strict_rules, Preset};

/// Re-export core types for convenience.
pub use jsdoc_lint_core::{ErrorKind, Rule, Severity, Violation};
