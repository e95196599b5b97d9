// ============================================================================
// vidbatch-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Summary and Error Styling
//
// Everything the user reads at the end of a run: the section header, the
// per-outcome counts, where failure diagnostics went, and fatal errors.
// Styling goes through `console`, which drops colors automatically when
// the stream is not a terminal.
//
// AI-ASSISTANT-INFO: Terminal UI components and styling for the CLI

// ---- External crate imports ----
use console::style;
use vidbatch_core::{BatchSummary, format_duration};

// ---- Standard library imports ----
use std::path::Path;

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    println!();
    println!(
        "{}{}{}",
        styling::SECTION_PREFIX,
        style(title.to_uppercase()).cyan().bold(),
        styling::SECTION_SUFFIX
    );
}

/// Formats a status line (key-value pair) with an aligned label.
pub fn format_status(label: &str, value: &str) -> String {
    let padding = 15usize.saturating_sub(label.len()).max(1);
    format!("{}{}:{}{}", styling::STATUS_INDENT, label, " ".repeat(padding), value)
}

/// Print a status line
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let value = if highlight {
        style(value).bold().to_string()
    } else {
        value.to_string()
    };
    println!("{}", format_status(label, &value));
}

/// Print the end-of-run summary.
pub fn print_summary(summary: &BatchSummary, output_dir: &Path) {
    print_section("Summary");
    print_status("Converted", &summary.converted.to_string(), summary.converted > 0);
    print_status("Failed", &summary.failed.to_string(), summary.failed > 0);
    print_status("Skipped", &summary.skipped.to_string(), false);
    print_status("Elapsed", &format_duration(summary.elapsed), false);
    print_status("Output", &output_dir.display().to_string(), false);

    println!();
    if summary.has_failures() {
        println!(
            "{} {} file(s) failed.",
            style(styling::ERROR_SYMBOL).red().bold(),
            summary.failed
        );
        if let Some(folder) = &summary.failed_folder {
            println!("Error information saved to: {}", folder.display());
        }
    } else {
        println!(
            "{} {}",
            style(styling::SUCCESS_SYMBOL).green(),
            "All files processed successfully."
        );
    }
}

/// Print a fatal error to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}
