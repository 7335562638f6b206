//! Check command implementation.

use anyhow::{Context, Result};
use jsdoc_lint_core::Checker;
use jsdoc_lint_rules::Preset;
use std::path::{Path, PathBuf};

use crate::blacklist::Blacklist;
use crate::{config_resolver, discovery, OutputFormat};

/// Preset used when neither the command line nor the config names one.
const DEFAULT_PRESET: &str = "recommended";

/// Options of the check command.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Preset name overriding the config.
    pub preset: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Fail on dumps that cannot be loaded.
    pub strict_dumps: bool,
}

/// Runs the check command; returns whether any error-severity violation was found.
pub fn run(paths: &[PathBuf], options: &CheckOptions, explicit_config: Option<&Path>) -> Result<bool> {
    let project_dir = project_dir(paths);
    let config = config_resolver::resolve(&project_dir, explicit_config).load()?;

    let preset_name = options
        .preset
        .as_deref()
        .or(config.preset.as_deref())
        .unwrap_or(DEFAULT_PRESET);
    let preset = Preset::from_name(preset_name).with_context(|| {
        format!("Unknown preset {preset_name:?} (expected recommended, strict or minimal)")
    })?;

    let blacklist = config
        .checker
        .blacklist
        .as_ref()
        .map(|path| Blacklist::from_file(&project_dir.join(path)))
        .transpose()?;

    let rules = preset.configured_rules(&config);
    let mut builder = Checker::builder()
        .root(&project_dir)
        .rules(rules)
        .excludes(options.exclude.iter().cloned())
        .config(config)
        .fail_on_invalid_dump(options.strict_dumps);
    if let Some(blacklist) = blacklist {
        tracing::debug!("Blacklist has {} entries", blacklist.len());
        builder = builder.skip_sources(move |source| blacklist.contains(source));
    }
    let checker = builder.build().context("Failed to build checker")?;

    let files: Vec<PathBuf> = discovery::dump_files(paths)?
        .into_iter()
        .filter(|dump| {
            let excluded = checker.should_exclude(dump);
            if excluded {
                tracing::debug!("Excluding: {}", dump.display());
            }
            !excluded
        })
        .collect();

    tracing::info!(
        "Checking {} dumps with preset {} ({} rules)",
        files.len(),
        preset.name(),
        checker.rule_count()
    );

    let result = checker.analyze_files(&files).context("Check failed")?;

    super::output::print(&result, options.format)?;

    Ok(result.has_errors())
}

/// Directory the config and blacklist are resolved against: the first path,
/// or the directory holding it when it is a file.
fn project_dir(paths: &[PathBuf]) -> PathBuf {
    let Some(first) = paths.first() else {
        return PathBuf::from(".");
    };
    if first.is_dir() {
        return first.clone();
    }
    first
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
