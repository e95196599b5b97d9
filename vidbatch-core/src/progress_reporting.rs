//! Progress Reporting API
//!
//! This module lets the core library report batch progress without knowing
//! how (or whether) it is displayed. The CLI implements [`ProgressReporter`]
//! with a terminal progress bar; tests and library callers can pass
//! [`NullReporter`].
//!
//! # Design Decisions
//! - One trait, passed explicitly to `process_videos`
//! - Events carry forward-slash relative paths, never absolute ones
//! - No global reporter state

use std::time::Duration;

/// Aggregate result of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Where failure diagnostics were written; set only when `failed > 0`
    /// and that folder exists.
    pub failed_folder: Option<std::path::PathBuf>,
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Number of files the batch looked at.
    pub fn total(&self) -> usize {
        self.converted + self.failed + self.skipped
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Receives batch progress events, in order, from `process_videos`.
pub trait ProgressReporter {
    /// Batch begins with `total` candidate files.
    fn batch_started(&self, total: usize);

    /// A file was skipped because it is already up to date.
    fn file_skipped(&self, relative_path: &str);

    /// Conversion of a file begins.
    fn file_started(&self, relative_path: &str);

    /// Conversion of a file ended.
    fn file_finished(&self, relative_path: &str, success: bool);

    /// All files handled.
    fn batch_finished(&self, summary: &BatchSummary);
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn batch_started(&self, _total: usize) {}
    fn file_skipped(&self, _relative_path: &str) {}
    fn file_started(&self, _relative_path: &str) {}
    fn file_finished(&self, _relative_path: &str, _success: bool) {}
    fn batch_finished(&self, _summary: &BatchSummary) {}
}
