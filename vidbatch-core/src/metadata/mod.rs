// ============================================================================
// vidbatch-core/src/metadata/mod.rs
// ============================================================================
//
// METADATA STORE: Persistent Record of Processed Files
//
// The store lives in the output root as `.batch-video-metadata.json` and
// remembers, per input file, which transcode settings were used and whether
// the conversion succeeded. It drives the skip decision that makes repeated
// runs incremental.
//
// KEY COMPONENTS:
// - MetadataStore: load/bind, skip decision, record outcomes, flush
// - ProcessingRecord / StoreDocument: the persisted JSON shapes
// - Failure artifacts in `failed_conversions/`
//
// A store is bound to one input root. The first initialize binds it in
// memory; the binding reaches disk with the first recorded outcome. Any
// later initialize with a different root fails without touching the file.
//
// AI-ASSISTANT-INFO: Incremental-processing metadata store

mod artifacts;
mod persist;
mod record;

pub use artifacts::{FAILED_FOLDER_NAME, flat_artifact_name};
pub use record::{ProcessingRecord, RecordStatus, StoreDocument};

use crate::config::TranscodeConfig;
use crate::error::{CoreError, CoreResult};

use chrono::Local;
use log::{debug, error, info, warn};

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Name of the metadata file inside the output root.
pub const METADATA_FILENAME: &str = ".batch-video-metadata.json";

/// Resolves `path` to a canonical absolute form, falling back to the
/// lexically absolute path when it does not exist.
pub fn resolve_path(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Forward-slash form of `path` relative to `root`, `None` when `path` is
/// outside `root` or is `root` itself.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Persistent per-file record of processing outcomes for one output root.
#[derive(Debug)]
pub struct MetadataStore {
    output_dir: PathBuf,
    metadata_file: PathBuf,
    failed_folder: PathBuf,
    input_dir: Option<PathBuf>,
    document: StoreDocument,
}

impl MetadataStore {
    /// Creates an uninitialized store for `output_dir`. Nothing is read yet.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            metadata_file: output_dir.join(METADATA_FILENAME),
            failed_folder: output_dir.join(FAILED_FOLDER_NAME),
            output_dir,
            input_dir: None,
            document: StoreDocument::default(),
        }
    }

    /// Loads the metadata file and binds the store to `input_dir`.
    ///
    /// Never writes the metadata file. A corrupt file is moved aside and
    /// replaced by an empty in-memory store.
    ///
    /// # Errors
    ///
    /// [`CoreError::RootMismatch`] when this store or its file is already
    /// bound to a different input root. The store keeps its previous state
    /// in that case.
    pub fn initialize(&mut self, input_dir: &Path) -> CoreResult<()> {
        let requested = resolve_path(input_dir);
        if let Some(bound) = self.input_dir.as_ref().filter(|bound| **bound != requested) {
            return Err(CoreError::RootMismatch {
                stored: bound.clone(),
                requested,
                metadata_file: self.metadata_file.clone(),
            });
        }

        let mut document = persist::load_document(&self.metadata_file);

        match document.input_dir.as_deref().map(PathBuf::from) {
            Some(stored) if stored != requested => {
                return Err(CoreError::RootMismatch {
                    stored,
                    requested,
                    metadata_file: self.metadata_file.clone(),
                });
            }
            Some(_) => {}
            None => {
                info!("Binding metadata to input directory {}", requested.display());
                document.input_dir = Some(requested.to_string_lossy().into_owned());
            }
        }

        self.document = document;
        self.input_dir = Some(requested);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.input_dir.is_some()
    }

    /// Input root this store is bound to, once initialized.
    pub fn input_dir(&self) -> Option<&Path> {
        self.input_dir.as_deref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn metadata_file(&self) -> &Path {
        &self.metadata_file
    }

    pub fn failed_folder(&self) -> &Path {
        &self.failed_folder
    }

    /// Number of records currently held.
    pub fn processed_count(&self) -> usize {
        self.document.processed_files.len()
    }

    /// Record for a forward-slash relative path, if any.
    pub fn record(&self, relative_path: &str) -> Option<&ProcessingRecord> {
        self.document.processed_files.get(relative_path)
    }

    /// Relative key of `input_file` under the bound input root.
    ///
    /// The path as given is tried first so a symlink inside the root is
    /// keyed by its link path; the canonical path is the fallback.
    pub fn relative_path(&self, input_file: &Path) -> CoreResult<String> {
        let root = self.input_dir.as_deref().ok_or(CoreError::StoreNotInitialized)?;
        let lexical = std::path::absolute(input_file).unwrap_or_else(|_| input_file.to_path_buf());
        relative_key(root, &lexical)
            .or_else(|| relative_key(root, &resolve_path(input_file)))
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "{} is not inside input directory {}",
                    input_file.display(),
                    root.display()
                ))
            })
    }

    /// Whether converting `input_file` again would be redundant.
    ///
    /// True only when the output exists and the last attempt succeeded with
    /// exactly the current transcode settings.
    pub fn should_skip(
        &self,
        input_file: &Path,
        output_file: &Path,
        config: &TranscodeConfig,
    ) -> bool {
        let relative = match self.relative_path(input_file) {
            Ok(relative) => relative,
            Err(e) => {
                error!("Cannot check processing state of {}: {e}", input_file.display());
                return false;
            }
        };

        if !output_file.exists() {
            debug!("{relative}: output missing, will process");
            return false;
        }

        let Some(record) = self.document.processed_files.get(&relative) else {
            debug!("{relative}: no metadata record, will process");
            return false;
        };

        if record.is_failed() {
            info!("{relative}: previous attempt failed, retrying");
            return false;
        }

        if !record.matches_settings(config) {
            info!("{relative}: settings changed since last run, reprocessing");
            return false;
        }

        true
    }

    /// Records a successful conversion and flushes.
    ///
    /// Any artifact left by an earlier failure of the same file is removed.
    pub fn record_success(&mut self, input_file: &Path, config: &TranscodeConfig) -> CoreResult<()> {
        let relative = self.relative_path(input_file)?;

        if let Some(stale) = self
            .document
            .processed_files
            .get(&relative)
            .and_then(|r| r.error_log_file_path.as_deref())
        {
            artifacts::remove_stale_artifact(Path::new(stale));
        }

        self.document
            .processed_files
            .insert(relative.clone(), ProcessingRecord::success(config));
        debug!("Recorded success for {relative}");
        self.flush()
    }

    /// Records a failed conversion, writes its diagnostic artifact and flushes.
    ///
    /// If the artifact cannot be written the record is still stored, with no
    /// artifact path.
    pub fn record_failure(
        &mut self,
        input_file: &Path,
        config: &TranscodeConfig,
        error_output: &str,
    ) -> CoreResult<()> {
        let relative = self.relative_path(input_file)?;

        let artifact = artifacts::artifact_path_for(
            &self.failed_folder,
            &relative,
            &self.document.processed_files,
        );
        let artifact_path = match artifacts::write_artifact(&artifact, error_output) {
            Ok(()) => Some(artifact.to_string_lossy().into_owned()),
            Err(e) => {
                warn!(
                    "Could not write error artifact {} for {relative}: {e}",
                    artifact.display()
                );
                None
            }
        };

        self.document
            .processed_files
            .insert(relative.clone(), ProcessingRecord::failed(config, artifact_path));
        debug!("Recorded failure for {relative}");
        self.flush()
    }

    /// All records whose last attempt failed, keyed by relative path.
    pub fn failed_files(&self) -> BTreeMap<String, ProcessingRecord> {
        self.document
            .processed_files
            .iter()
            .filter(|(_, record)| record.is_failed())
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect()
    }

    /// Writes the whole store to disk atomically.
    ///
    /// On failure the in-memory state is kept and the error is returned; the
    /// on-disk file is left as it was.
    pub fn flush(&mut self) -> CoreResult<()> {
        if !self.is_initialized() {
            return Err(CoreError::StoreNotInitialized);
        }
        self.document.last_updated = Some(Local::now());
        persist::save_document(&self.metadata_file, &self.document).inspect_err(|e| {
            error!("Failed to save metadata to {}: {e}", self.metadata_file.display());
        })
    }
}
