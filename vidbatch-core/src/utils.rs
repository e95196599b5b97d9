//! Utility functions for formatting and path handling.
//!
//! Small helpers shared by the orchestrator and the CLI summary.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Formats a duration as HH:MM:SS (e.g. 3725s -> "01:02:05").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Mirrors `input` from `input_root` into `output_root`.
///
/// `input_root/sub/a.mp4` maps to `output_root/sub/a.mp4`.
pub fn mirror_output_path(input_root: &Path, output_root: &Path, input: &Path) -> CoreResult<PathBuf> {
    let relative = input.strip_prefix(input_root).map_err(|_| {
        CoreError::PathError(format!(
            "{} is not inside input directory {}",
            input.display(),
            input_root.display()
        ))
    })?;
    if relative.as_os_str().is_empty() {
        return Err(CoreError::PathError(format!(
            "{} is the input directory itself",
            input.display()
        )));
    }
    Ok(output_root.join(relative))
}
