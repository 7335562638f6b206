//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "jsdoc-lint.toml";

const DEFAULT_CONFIG: &str = r#"# jsdoc-lint configuration

# Rule preset: "recommended", "strict" or "minimal"
preset = "recommended"

[checker]
# Root directory holding the token dumps (default: current directory)
# root = "./build/tokens"

# Glob patterns to exclude
exclude = [
    "**/node_modules/**",
    "**/third_party/**",
]

# Files that only get limited documentation checks
limited_doc_files = ["dummy.js", "externs.js"]

# Source extensions of scripts embedded in markup
markup_extensions = ["html", "htm"]

# Sources never to check, one path or glob per line
# blacklist = "lint-blacklist.txt"

[rules.javascript]
optional_type_marker = true
blank_lines_at_top_level = true
bracket_adjacency = false
parameter_docs = true
# module_linkage = ["goog.provide", "goog.require"]
# long_line_exceptions = ["^goog\\.(require|provide)\\("]

# Each violation kind can be disabled or have its severity overridden
# [rules.wrong-blank-line-count]
# severity = "error"

# [rules.unnecessary-single-quoted-string]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: jsdoc-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
