//! Catalogue of violation kinds.

use crate::types::Severity;

/// Kind of style violation a rule can report.
///
/// | Code | Name |
/// |------|------|
/// | JS001 | `missing-space` |
/// | JS002 | `wrong-blank-line-count` |
/// | JS003 | `unnecessary-single-quoted-string` |
/// | JS004 | `jsdoc-missing-optional-prefix` |
/// | JS005 | `jsdoc-missing-optional-type` |
/// | JS006 | `missing-jsdoc-tag-type` |
/// | JS007 | `out-of-order-jsdoc-tag-type` |
/// | JS008 | `missing-return-documentation` |
/// | JS009 | `unnecessary-return-documentation` |
/// | JS010 | `missing-jsdoc-tag-this` |
/// | JS011 | `missing-parameter-documentation` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Two tokens that need a space between them have none.
    MissingSpace,
    /// A top-level block is preceded by the wrong number of blank lines.
    WrongBlankLineCount,
    /// A single-quoted string could be double-quoted.
    UnnecessarySingleQuotedString,
    /// Optional parameter type without the `opt_` name prefix.
    JsdocMissingOptionalPrefix,
    /// `opt_` parameter whose type lacks the trailing `=`.
    JsdocMissingOptionalType,
    /// A typed flag has no type.
    MissingJsdocTagType,
    /// A flag's type comes after its name.
    OutOfOrderJsdocTagType,
    /// A function returning a value has no `@return`.
    MissingReturnDocumentation,
    /// A function returning nothing documents a return value.
    UnnecessaryReturnDocumentation,
    /// A function using `this` has no `@this`.
    MissingJsdocTagThis,
    /// A declared parameter has no `@param`.
    MissingParameterDocumentation,
}

impl ErrorKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 11] = [
        Self::MissingSpace,
        Self::WrongBlankLineCount,
        Self::UnnecessarySingleQuotedString,
        Self::JsdocMissingOptionalPrefix,
        Self::JsdocMissingOptionalType,
        Self::MissingJsdocTagType,
        Self::OutOfOrderJsdocTagType,
        Self::MissingReturnDocumentation,
        Self::UnnecessaryReturnDocumentation,
        Self::MissingJsdocTagThis,
        Self::MissingParameterDocumentation,
    ];

    /// Stable code (e.g., "JS002").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingSpace => "JS001",
            Self::WrongBlankLineCount => "JS002",
            Self::UnnecessarySingleQuotedString => "JS003",
            Self::JsdocMissingOptionalPrefix => "JS004",
            Self::JsdocMissingOptionalType => "JS005",
            Self::MissingJsdocTagType => "JS006",
            Self::OutOfOrderJsdocTagType => "JS007",
            Self::MissingReturnDocumentation => "JS008",
            Self::UnnecessaryReturnDocumentation => "JS009",
            Self::MissingJsdocTagThis => "JS010",
            Self::MissingParameterDocumentation => "JS011",
        }
    }

    /// Kebab-case name, also the configuration key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MissingSpace => "missing-space",
            Self::WrongBlankLineCount => "wrong-blank-line-count",
            Self::UnnecessarySingleQuotedString => "unnecessary-single-quoted-string",
            Self::JsdocMissingOptionalPrefix => "jsdoc-missing-optional-prefix",
            Self::JsdocMissingOptionalType => "jsdoc-missing-optional-type",
            Self::MissingJsdocTagType => "missing-jsdoc-tag-type",
            Self::OutOfOrderJsdocTagType => "out-of-order-jsdoc-tag-type",
            Self::MissingReturnDocumentation => "missing-return-documentation",
            Self::UnnecessaryReturnDocumentation => "unnecessary-return-documentation",
            Self::MissingJsdocTagThis => "missing-jsdoc-tag-this",
            Self::MissingParameterDocumentation => "missing-parameter-documentation",
        }
    }

    /// Default severity before configuration overrides.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        match self {
            Self::UnnecessarySingleQuotedString | Self::WrongBlankLineCount => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// One-line fix hint shown with the violation.
    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::MissingSpace => "Insert a single space",
            Self::WrongBlankLineCount => {
                "File overviews take 1 blank line above, constructors and interfaces 3, other top-level blocks 2"
            }
            Self::UnnecessarySingleQuotedString => "Use double quotes unless the string contains one",
            Self::JsdocMissingOptionalPrefix => "Rename the parameter with an `opt_` prefix",
            Self::JsdocMissingOptionalType => "End the parameter type with `=`",
            Self::MissingJsdocTagType => "Declare the type in braces, e.g. `{string}`",
            Self::OutOfOrderJsdocTagType => "Move the `{type}` directly after the flag",
            Self::MissingReturnDocumentation => "Add `@return {Type} description`",
            Self::UnnecessaryReturnDocumentation => {
                "Remove `@return` or declare it as `{undefined}`/`{void}`"
            }
            Self::MissingJsdocTagThis => {
                "Add `@this {Type}`, or mark the function with `@constructor`"
            }
            Self::MissingParameterDocumentation => "Add `@param {Type} name description`",
        }
    }

    /// Looks a kind up by code or name.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == key || k.name() == key)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_and_names_are_unique() {
        let codes: HashSet<_> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
        let names: HashSet<_> = ErrorKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(codes.len(), ErrorKind::ALL.len());
        assert_eq!(names.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(ErrorKind::lookup("JS002"), Some(ErrorKind::WrongBlankLineCount));
        assert_eq!(
            ErrorKind::lookup("missing-space"),
            Some(ErrorKind::MissingSpace)
        );
        assert_eq!(ErrorKind::lookup("nope"), None);
    }
}
