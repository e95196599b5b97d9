//! Failure diagnostic artifacts under `<output>/failed_conversions/`.
//!
//! Each failed file gets one flat text file named after its relative path
//! with every separator replaced by `_`. Distinct paths can flatten to the
//! same name (`a/b.mp4` and `a_b.mp4`); the later one gets a numeric suffix
//! so no artifact is ever overwritten by another file's diagnostics.

use super::record::ProcessingRecord;

use log::{debug, warn};

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory (inside the output root) holding failure artifacts.
pub const FAILED_FOLDER_NAME: &str = "failed_conversions";

/// Flat artifact file name for a relative path: separators become `_`, plus `.txt`.
pub fn flat_artifact_name(relative_path: &str) -> String {
    let flat: String = relative_path
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{flat}.txt")
}

/// Picks the artifact path for `relative_path`.
///
/// A path that already owns an artifact keeps it. Otherwise the flat name is
/// used unless another record references it, in which case `-2`, `-3`, ...
/// is appended before the extension.
pub(crate) fn artifact_path_for(
    failed_folder: &Path,
    relative_path: &str,
    records: &BTreeMap<String, ProcessingRecord>,
) -> PathBuf {
    if let Some(existing) = records
        .get(relative_path)
        .and_then(|record| record.error_log_file_path.as_deref())
    {
        return PathBuf::from(existing);
    }

    let taken: HashSet<PathBuf> = records
        .iter()
        .filter(|(key, _)| key.as_str() != relative_path)
        .filter_map(|(_, record)| record.error_log_file_path.as_deref())
        .map(PathBuf::from)
        .collect();

    let name = flat_artifact_name(relative_path);
    let candidate = failed_folder.join(&name);
    if !taken.contains(&candidate) {
        return candidate;
    }

    let stem = name.trim_end_matches(".txt");
    (2u32..)
        .map(|n| failed_folder.join(format!("{stem}-{n}.txt")))
        .find(|path| !taken.contains(path))
        .unwrap_or(candidate)
}

/// Writes `text` plus a trailing newline, creating the folder if needed.
pub(crate) fn write_artifact(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{text}\n"))
}

/// Removes an artifact that no longer describes the current state.
pub(crate) fn remove_stale_artifact(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed stale error artifact {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove stale error artifact {}: {e}", path.display()),
    }
}
