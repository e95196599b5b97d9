// ============================================================================
// vidbatch-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Terminal progress for a batch run
//
// Implements the core `ProgressReporter` trait with an indicatif progress
// bar on stderr. Per-file lines ("Processing: ...", "Already processed: ...")
// are printed above the bar so they stay in the scrollback. When stderr is
// not a terminal the bar is hidden and the lines go to stdout instead.
//
// AI-ASSISTANT-INFO: CLI-specific progress reporting

// ---- External crate imports ----
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::warn;
use vidbatch_core::{BatchSummary, ProgressReporter};

// ---- Standard library imports ----
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

/// Progress bar over the files of one batch.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a reporter drawing to stderr.
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Creates a reporter that never draws, printing plain lines only.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        match ProgressStyle::with_template(BAR_TEMPLATE) {
            Ok(bar_style) => bar.set_style(bar_style.progress_chars("█▓▒░ ")),
            Err(e) => warn!("Invalid progress bar template: {e}"),
        }
        Self { bar }
    }

    fn line(&self, text: String) {
        if self.bar.is_hidden() {
            println!("{text}");
        } else {
            self.bar.println(text);
        }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliProgress {
    fn batch_started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        if !self.bar.is_hidden() {
            self.bar.enable_steady_tick(Duration::from_millis(120));
        }
    }

    fn file_skipped(&self, relative_path: &str) {
        self.line(format!("{} {relative_path}", style("Already processed:").dim()));
        self.bar.inc(1);
    }

    fn file_started(&self, relative_path: &str) {
        self.line(format!("{} {relative_path}", style("Processing:").bold()));
        self.bar.set_message(relative_path.to_string());
    }

    fn file_finished(&self, relative_path: &str, success: bool) {
        if !success {
            self.line(format!("  {} {relative_path}", style("✗ Failed:").red().bold()));
        }
        self.bar.set_message(String::new());
        self.bar.inc(1);
    }

    fn batch_finished(&self, _summary: &BatchSummary) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_counts_every_file() {
        let progress = CliProgress::hidden();
        progress.batch_started(3);
        progress.file_skipped("a.mp4");
        progress.file_started("b.mp4");
        progress.file_finished("b.mp4", true);
        progress.file_started("c.mp4");
        progress.file_finished("c.mp4", false);

        assert_eq!(progress.bar.position(), 3);
        assert_eq!(progress.bar.length(), Some(3));
    }
}
