//! Shared output formatting for lint results.

use anyhow::Result;
use jsdoc_lint_core::{LintResult, Severity, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(delta) = violation.delta {
            println!("  = note: {} blank line(s)", format_delta(delta));
        }
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    print_summary(result);
}

/// `+2` to add lines, `-1` to remove one.
fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("add {delta}")
    } else {
        format!("remove {}", delta.unsigned_abs())
    }
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult) {
    for violation in &result.violations {
        match result.sources.get(&violation.location.file) {
            Some(source) => {
                let report = miette::Report::new(ViolationDiagnostic::new(violation, source));
                println!("{report:?}");
            }
            None => println!("{violation}"),
        }
    }

    print_summary(result);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_wording() {
        assert_eq!(format_delta(2), "add 2");
        assert_eq!(format_delta(-1), "remove 1");
    }
}
