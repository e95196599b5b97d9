//! File discovery module for finding video files to process.
//!
//! Walks the input root recursively and keeps regular files whose name ends
//! with one of the configured extensions. Extension matching is
//! case-sensitive. Symlinks to files are kept under their link path; links
//! to directories are not descended into. Platform sidecar files (names starting with `._`) are
//! always excluded. A second pass, [`filter_ignored`], drops files whose full
//! path matches any of the configured ignore patterns.

use crate::error::{CoreError, CoreResult};

use log::{debug, warn};
use regex::Regex;
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

/// Filename prefix of AppleDouble metadata files written next to media on
/// non-HFS volumes. These are never real videos.
pub const RESERVED_SIDECAR_PREFIX: &str = "._";

/// Finds candidate files under `input_dir`, recursively, in sorted path order.
///
/// # Arguments
///
/// * `input_dir` - Root directory to walk
/// * `extensions` - Extensions to accept, each including its leading dot
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Matching files; empty when nothing matches
/// * `Err(CoreError::PathError)` - If `input_dir` is missing or not a directory
/// * `Err(CoreError::Walkdir)` - If the root itself cannot be read
///
/// Unreadable entries below the root are logged and skipped.
///
/// # Examples
///
/// ```rust,no_run
/// use vidbatch_core::discover;
/// use std::path::Path;
///
/// let extensions = vec![".mp4".to_string(), ".MP4".to_string()];
/// let files = discover(Path::new("/path/to/videos"), &extensions).unwrap();
/// println!("Found {} video files", files.len());
/// ```
pub fn discover(input_dir: &Path, extensions: &[String]) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Input directory does not exist or is not a directory: {}",
            input_dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry during discovery: {e}");
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            if !entry.path().is_file() {
                debug!("Skipping symlink that is not a file: {}", entry.path().display());
                continue;
            }
        } else if !file_type.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping file with non UTF-8 name: {}", entry.path().display());
            continue;
        };

        if name.starts_with(RESERVED_SIDECAR_PREFIX) {
            debug!("Skipping sidecar metadata file: {}", entry.path().display());
            continue;
        }

        if has_matching_extension(name, extensions) {
            files.push(entry.into_path());
        }
    }

    debug!("Discovered {} candidate file(s) in {}", files.len(), input_dir.display());
    Ok(files)
}

/// Case-sensitive suffix match. The name must be longer than the extension
/// so a bare dotfile like `.mp4` is not picked up.
fn has_matching_extension(name: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext.as_str()))
}

/// Drops files whose full path string matches any of `patterns`.
///
/// Patterns are regular expressions searched anywhere in the path. Patterns
/// that fail to compile are logged and skipped.
pub fn filter_ignored(files: Vec<PathBuf>, patterns: &[String]) -> Vec<PathBuf> {
    let compiled: Vec<Regex> = patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Ignoring invalid ignore pattern '{pattern}': {e}");
                None
            }
        })
        .collect();

    if compiled.is_empty() {
        return files;
    }

    files
        .into_iter()
        .filter(|path| {
            let path_str = path.to_string_lossy();
            match compiled.iter().find(|re| re.is_match(&path_str)) {
                Some(re) => {
                    debug!("Ignoring {} (matched '{}')", path.display(), re.as_str());
                    false
                }
                None => true,
            }
        })
        .collect()
}
