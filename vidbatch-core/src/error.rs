// ============================================================================
// vidbatch-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the vidbatch-core Library
//
// This module defines the single error enum used throughout the core library
// together with a `CoreResult` alias. Fatal startup conditions (missing
// transcoder, bad configuration, input-root mismatch) and store I/O problems
// all surface through `CoreError`; per-file transcoder failures do not, they
// are reported as data (see `processing::convert`).
//
// AI-ASSISTANT-INFO: Error types for the vidbatch-core library

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::path::PathBuf;

/// Custom error types for vidbatch-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to walk input directory: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Required external command not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, String),

    #[error("Failed while waiting for command '{0}': {1}")]
    CommandWait(String, String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error(
        "Input directory mismatch: metadata shows '{}' but current input is '{}'. \
         Delete {} to process a different input directory.",
        stored.display(),
        requested.display(),
        metadata_file.display()
    )]
    RootMismatch {
        stored: PathBuf,
        requested: PathBuf,
        metadata_file: PathBuf,
    },

    #[error("Metadata store not initialized; call initialize() first")]
    StoreNotInitialized,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for vidbatch-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Shorthand for a validation error on a named config field.
pub(crate) fn config_validation_error(field: &str, message: impl Into<String>) -> CoreError {
    CoreError::ConfigValidation {
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_mismatch_message_names_both_paths_and_remedy() {
        let err = CoreError::RootMismatch {
            stored: PathBuf::from("/videos/a"),
            requested: PathBuf::from("/videos/b"),
            metadata_file: PathBuf::from("/out/.batch-video-metadata.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/videos/a"));
        assert!(msg.contains("/videos/b"));
        assert!(msg.contains("Delete /out/.batch-video-metadata.json"));
    }

    #[test]
    fn test_config_validation_error_names_field() {
        let err = config_validation_error("video.crf", "must be between 0 and 51");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'video.crf': must be between 0 and 51"
        );
    }
}
