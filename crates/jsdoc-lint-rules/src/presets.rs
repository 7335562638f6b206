//! Rule presets for common configurations.

use crate::JavaScriptRules;
use jsdoc_lint_core::{Config, RuleBox};

/// Preset configurations for jsdoc-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Strict rules, bracket spacing included.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Every preset, in documentation order.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Minimal];

    /// Looks a preset up by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Configuration name of the preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// One-line summary for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Recommended => "All checks except bracket spacing",
            Self::Strict => "All checks, bracket spacing included",
            Self::Minimal => "Type, quoting and operator spacing checks only",
        }
    }

    /// The JavaScript rule as configured by this preset.
    #[must_use]
    pub fn javascript(self) -> JavaScriptRules {
        match self {
            Self::Recommended => JavaScriptRules::new(),
            Self::Strict => JavaScriptRules::new().bracket_adjacency(true),
            Self::Minimal => JavaScriptRules::new()
                .blank_lines_at_top_level(false)
                .optional_type_marker(false)
                .parameter_docs(false),
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        vec![Box::new(self.javascript())]
    }

    /// Returns the rules for this preset with `[rules.javascript]` options applied.
    #[must_use]
    pub fn configured_rules(self, config: &Config) -> Vec<RuleBox> {
        let rule = match config.rule_config(crate::javascript::NAME) {
            Some(options) => self.javascript().configure(options),
            None => self.javascript(),
        };
        vec![Box::new(rule)]
    }
}

/// Returns the recommended set of rules.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the strict set of rules.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    Preset::Strict.rules()
}

/// Returns the minimal set of rules.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    Preset::Minimal.rules()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert!(!Preset::Recommended.rules().is_empty());
        assert!(!Preset::Strict.rules().is_empty());
        assert!(!Preset::Minimal.rules().is_empty());
    }

    #[test]
    fn test_preset_names() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("pedantic"), None);
    }

    #[test]
    fn test_preset_options() {
        assert!(!Preset::Recommended.javascript().bracket_adjacency);
        assert!(Preset::Strict.javascript().bracket_adjacency);

        let minimal = Preset::Minimal.javascript();
        assert!(!minimal.blank_lines_at_top_level);
        assert!(!minimal.optional_type_marker);
        assert!(!minimal.parameter_docs);
    }

    #[test]
    fn test_config_overrides_preset() {
        let config = Config::parse("[rules.javascript]\nparameter_docs = true\n").unwrap();
        let rules = Preset::Minimal.configured_rules(&config);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "javascript");
    }
}
