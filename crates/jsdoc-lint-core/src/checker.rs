//! Core checker for orchestrating lint execution.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::dump::{default_source_path, DumpError, TokenDump, DUMP_SUFFIX};
use crate::report::ViolationCollector;
use crate::rule::{Rule, RuleBox};
use crate::state::AnalysisState;
use crate::token::TokenStream;
use crate::tracker::StateTracker;
use crate::types::{LintResult, Violation};

use regex::Regex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during checking.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A token dump could not be loaded.
    #[error(transparent)]
    Dump(#[from] DumpError),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Predicate over source paths; see [`CheckerBuilder::skip_sources`].
pub type SourceFilter = Box<dyn Fn(&Path) -> bool + Send + Sync>;

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_invalid_dump: bool,
    skip_source: Option<SourceFilter>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to check.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the checker.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the checker.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, e.g. from a preset.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether an unreadable token dump aborts the run (default: false).
    #[must_use]
    pub fn fail_on_invalid_dump(mut self, fail: bool) -> Self {
        self.fail_on_invalid_dump = fail;
        self
    }

    /// Skips dumps whose source matches `skip`.
    ///
    /// The predicate sees the source the dump declares, resolved against the
    /// root, or the path derived from the dump name.
    #[must_use]
    pub fn skip_sources(mut self, skip: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.skip_source = Some(Box::new(skip));
        self
    }

    /// Builds the checker.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Checker, CheckerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.checker.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.checker.exclude.clone());
        }
        if exclude_patterns.is_empty() {
            exclude_patterns.push("**/node_modules/**".to_string());
        }

        Ok(Checker {
            root,
            rules: self.rules,
            exclude_patterns,
            config: self.config.unwrap_or_default(),
            fail_on_invalid_dump: self.fail_on_invalid_dump,
            skip_source: self.skip_source,
        })
    }
}

/// Runs rules over token streams.
///
/// Every file is checked in its own session: a fresh [`AnalysisState`] is
/// created per stream, so no state leaks between files. A rule that panics
/// on a token is logged and skipped for that token; the rest of the file is
/// still checked.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    fail_on_invalid_dump: bool,
    skip_source: Option<SourceFilter>,
}

/// Outcome of checking one dump.
#[derive(Debug, Clone)]
pub struct CheckedDump {
    /// Source path as reported, relative to the root when below it.
    pub source: PathBuf,
    /// Reconstructed source text.
    pub text: String,
    /// Violations found.
    pub violations: Vec<Violation>,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the root directory being checked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the configuration block for a rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }

    /// Line patterns exempt from the maximum line length, over all enabled rules.
    #[must_use]
    pub fn long_line_exceptions(&self) -> Vec<Regex> {
        self.enabled_rules()
            .flat_map(|rule| rule.long_line_exceptions())
            .collect()
    }

    fn enabled_rules(&self) -> impl Iterator<Item = &RuleBox> {
        self.rules.iter().filter(|rule| {
            let enabled = self.config.is_rule_enabled(rule.name());
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        })
    }

    /// Checks one token stream in a fresh session.
    #[must_use]
    pub fn check_stream(&self, ctx: &FileContext<'_>, stream: &TokenStream) -> Vec<Violation> {
        let rules: Vec<&RuleBox> = self.enabled_rules().collect();
        let mut state = AnalysisState::for_file(ctx);
        let mut tracker = StateTracker::new();
        let mut collector = ViolationCollector::new(ctx.relative_path.clone(), &self.config);

        for token in stream.iter() {
            tracker.handle_token(token, &mut state);
            for rule in &rules {
                let outcome = catch_unwind(AssertUnwindSafe(|| {
                    rule.check_token(token, &mut state, &mut collector);
                }));
                if outcome.is_err() {
                    warn!(
                        "Rule {} failed on {}:{} ({:?}); continuing",
                        rule.name(),
                        ctx.relative_path.display(),
                        token.line_number,
                        token.kind
                    );
                }
            }
            tracker.handle_after_token(token, &mut state);
        }

        for rule in &rules {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                rule.finalize(&mut state, &mut collector);
            }));
            if outcome.is_err() {
                warn!(
                    "Rule {} failed to finalize {}",
                    rule.name(),
                    ctx.relative_path.display()
                );
            }
        }

        collector.into_violations()
    }

    /// Source of a dump: the declared `source`, relative to the root, or the
    /// path derived from the dump name.
    fn source_of(&self, dump: &TokenDump, dump_path: &Path) -> PathBuf {
        match &dump.source {
            Some(declared) => self.root.join(declared),
            None => default_source_path(dump_path),
        }
    }

    /// Loads a token dump and checks it.
    ///
    /// Returns `None` when the dump's source is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the dump cannot be loaded.
    pub fn check_dump(&self, dump_path: &Path) -> Result<Option<CheckedDump>, CheckerError> {
        let dump = TokenDump::from_file(dump_path)?;
        let source = self.source_of(&dump, dump_path);
        if self.skip_source.as_ref().is_some_and(|skip| skip(&source)) {
            debug!("Skipping {} ({})", dump_path.display(), source.display());
            return Ok(None);
        }

        debug!("Checking: {}", dump_path.display());
        let stream = dump.into_stream(dump_path)?;
        let ctx = FileContext::new(&source, &self.root, &self.config.checker);
        let violations = self.check_stream(&ctx, &stream);
        Ok(Some(CheckedDump {
            source: ctx.relative_path,
            text: stream.source(),
            violations,
        }))
    }

    /// Checks the given token dumps, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a dump cannot be read and the checker was built
    /// with [`fail_on_invalid_dump`](CheckerBuilder::fail_on_invalid_dump).
    pub fn analyze_files(&self, files: &[PathBuf]) -> Result<LintResult, CheckerError> {
        info!("Checking {} files", files.len());

        let mut result = LintResult::new();
        for dump_path in files {
            match self.check_dump(dump_path) {
                Ok(Some(checked)) => {
                    result.violations.extend(checked.violations);
                    result.sources.insert(checked.source, checked.text);
                    result.files_checked += 1;
                }
                Ok(None) => {}
                Err(CheckerError::Dump(e)) if !self.fail_on_invalid_dump => {
                    warn!("Skipping {}: {}", dump_path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Check complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Discovers every token dump under the root and checks it.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails.
    pub fn analyze(&self) -> Result<LintResult, CheckerError> {
        info!("Starting check at {:?}", self.root);
        let files = self.discover_files()?;
        self.analyze_files(&files)
    }

    /// Discovers all token dumps to check.
    fn discover_files(&self) -> Result<Vec<PathBuf>, CheckerError> {
        let pattern = format!("{}/**/*{}", self.root.display(), DUMP_SUFFIX);
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| CheckerError::Io(e.into()))?;
            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path);
        }

        Ok(files)
    }

    /// Checks if a path should be excluded.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // "**/vendor/**" also matches as a plain substring
            let normalized_pattern = pattern.replace("**", "");
            if normalized_pattern.len() > 1 && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}
