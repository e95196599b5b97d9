//! Loading and atomically saving the metadata document.

use super::record::StoreDocument;
use crate::error::{CoreError, CoreResult};

use chrono::Local;
use log::{info, warn};
use tempfile::Builder;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Reads the document at `path`.
///
/// A missing file yields an empty document. A file that cannot be parsed is
/// renamed aside (see [`quarantine_path`]) and an empty document is returned,
/// so the run continues and the damaged data stays available for inspection.
pub(crate) fn load_document(path: &Path) -> StoreDocument {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No metadata file at {}, starting fresh", path.display());
            return StoreDocument::default();
        }
        Err(e) => {
            warn!(
                "Could not read metadata file {}: {e}. Starting with empty metadata.",
                path.display()
            );
            return StoreDocument::default();
        }
    };

    match serde_json::from_str::<StoreDocument>(&contents) {
        Ok(document) => {
            info!(
                "Loaded metadata for {} files from {}",
                document.processed_files.len(),
                path.display()
            );
            document
        }
        Err(e) => {
            let aside = quarantine_path(path);
            match fs::rename(path, &aside) {
                Ok(()) => warn!(
                    "Metadata file {} is corrupt ({e}); moved it to {} and starting with empty metadata",
                    path.display(),
                    aside.display()
                ),
                Err(rename_err) => warn!(
                    "Metadata file {} is corrupt ({e}) and could not be moved aside ({rename_err}); starting with empty metadata",
                    path.display()
                ),
            }
            StoreDocument::default()
        }
    }
}

/// `<file>.corrupt-<YYYYMMDD_HHMMSS>` next to the metadata file.
pub(crate) fn quarantine_path(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{stamp}"));
    path.with_file_name(name)
}

/// Replaces `path` with the serialized document.
///
/// The JSON goes to a temporary file in the same directory, is synced, and
/// then renamed over the target. Readers see either the old or the new
/// document. On error the temporary file is removed when it is dropped.
pub(crate) fn save_document(path: &Path, document: &StoreDocument) -> CoreResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = Builder::new()
        .prefix(".batch-video-metadata.")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    serde_json::to_writer_pretty(tmp.as_file_mut(), document)?;
    tmp.as_file_mut().write_all(b"\n")?;
    tmp.as_file().sync_all()?;

    tmp.persist(path)
        .map_err(|e| CoreError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;
    use crate::metadata::record::ProcessingRecord;

    #[test]
    fn test_missing_file_is_empty_document() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let document = load_document(&dir.path().join("absent.json"));
        assert_eq!(document, StoreDocument::default());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(".batch-video-metadata.json");

        let mut document = StoreDocument {
            input_dir: Some("/videos".to_string()),
            last_updated: Some(Local::now()),
            ..Default::default()
        };
        document
            .processed_files
            .insert("a.mp4".to_string(), ProcessingRecord::success(&sample_config()));

        save_document(&path, &document)?;
        assert_eq!(load_document(&path), document);

        let leftovers: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(".batch-video-metadata.json");
        fs::write(&path, "{ not json")?;

        let document = load_document(&path);

        assert_eq!(document, StoreDocument::default());
        assert!(!path.exists());
        let moved: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(Result::ok)
            .filter(|e| {
                e.file_name()
                    .to_string_lossy()
                    .starts_with(".batch-video-metadata.json.corrupt-")
            })
            .collect();
        assert_eq!(moved.len(), 1);
        assert_eq!(fs::read_to_string(moved[0].path())?, "{ not json");
        Ok(())
    }

    #[test]
    fn test_quarantine_name_format() {
        let aside = quarantine_path(Path::new("/out/.batch-video-metadata.json"));
        let name = aside.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let stamp = name.trim_start_matches(".batch-video-metadata.json.corrupt-");
        assert_eq!(stamp.len(), "YYYYMMDD_HHMMSS".len());
        assert_eq!(aside.parent(), Some(Path::new("/out")));
    }
}
