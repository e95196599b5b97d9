//! Single-file conversion through the external transcoder.
//!
//! [`convert`] never returns an error: anything that prevents a successful
//! conversion (unable to create the output directory, spawn failure,
//! non-zero exit) is folded into [`ConversionOutcome::Failed`] with text the
//! metadata store can persist as the failure diagnostics.

use crate::config::TranscodeConfig;
use crate::external::{TranscoderProcess, TranscoderSpawner, TranscoderStatus, build_transcode_args};

use log::{debug, warn};

use std::fs;
use std::path::Path;

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success,
    /// `error_output` is never empty.
    Failed { error_output: String },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success)
    }

    /// Diagnostic text for failed conversions, `None` on success.
    pub fn error_output(&self) -> Option<&str> {
        match self {
            ConversionOutcome::Success => None,
            ConversionOutcome::Failed { error_output } => Some(error_output),
        }
    }

    fn failed(error_output: impl Into<String>) -> Self {
        ConversionOutcome::Failed {
            error_output: error_output.into(),
        }
    }
}

/// Converts `input` into `output` using the settings in `config`.
///
/// The parent directory of `output` is created first, so callers need not
/// mirror the input directory structure themselves.
pub fn convert<S: TranscoderSpawner>(
    spawner: &S,
    input: &Path,
    output: &Path,
    config: &TranscodeConfig,
) -> ConversionOutcome {
    if let Some(parent) = output.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create output directory {}: {e}", parent.display());
            return ConversionOutcome::failed(format!(
                "Failed to create output directory {}: {e}",
                parent.display()
            ));
        }
    }

    let args = build_transcode_args(input, output, config);

    let mut process = match spawner.spawn(&args) {
        Ok(process) => process,
        Err(e) => {
            warn!("Could not start transcoder for {}: {e}", input.display());
            return ConversionOutcome::failed(e.to_string());
        }
    };

    // Drain the diagnostic stream before waiting so the child never blocks on a full pipe.
    let diagnostics = match process.collect_diagnostics() {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Failed to read transcoder diagnostics for {}: {e}", input.display());
            vec![e.to_string()]
        }
    };

    let status = match process.wait() {
        Ok(status) => status,
        Err(e) => return ConversionOutcome::failed(e.to_string()),
    };

    if status.success() {
        debug!("Transcoder finished successfully for {}", input.display());
        ConversionOutcome::Success
    } else {
        debug!("Transcoder failed for {} with {status}", input.display());
        ConversionOutcome::failed(diagnostic_text(&diagnostics, status))
    }
}

/// Joins diagnostic lines, substituting a placeholder when there are none.
fn diagnostic_text(lines: &[String], status: TranscoderStatus) -> String {
    let text = lines.join("\n");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        format!("transcoder exited with {status} and produced no diagnostic output")
    } else {
        trimmed.to_string()
    }
}
