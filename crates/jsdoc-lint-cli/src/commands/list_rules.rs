//! List rules command implementation.

use jsdoc_lint_core::ErrorKind;
use jsdoc_lint_rules::Preset;

/// Runs the list-rules command.
pub fn run() {
    println!("Violation kinds (rule: javascript):\n");
    println!("{:<8} {:<34} {:<9} Help", "Code", "Name", "Severity");
    println!("{}", "-".repeat(100));

    for kind in ErrorKind::ALL {
        println!(
            "{:<8} {:<34} {:<9} {}",
            kind.code(),
            kind.name(),
            kind.default_severity().to_string(),
            kind.help()
        );
    }

    println!("\nPresets:");
    for preset in Preset::ALL {
        println!("  {:<12} - {}", preset.name(), preset.description());
    }

    println!("\nConfigure a kind by name, e.g.:");
    println!("  [rules.wrong-blank-line-count]");
    println!("  severity = \"error\"");
}
