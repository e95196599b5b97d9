//! Configuration structures for the vidbatch-core library.
//!
//! The configuration is loaded once per run from a TOML document (see
//! [`load_config`]) and is immutable afterwards. It describes the transcode
//! parameters handed to the external transcoder and the rules used to discover
//! input files.
//!
//! Only the `video`, `audio` and `processing` sections influence the bytes of a
//! converted file. [`TranscodeConfig::transcode_settings`] projects exactly
//! those sections into a [`TranscodeSettings`] value, which is what the metadata
//! store snapshots and compares when deciding whether a file can be skipped.

mod loader;
mod validation;

use serde::{Deserialize, Serialize};

pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config};

/// Video encoding parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Video codec id passed to `-c:v` (e.g. `hevc_videotoolbox`, `libx265`)
    pub codec: String,

    /// Constant Rate Factor, 0-51 (lower is higher quality)
    pub crf: u8,

    /// Pixel format passed to `-pix_fmt` (e.g. `p010le`)
    pub pixel_format: String,

    /// Container codec tag passed to `-tag:v` (e.g. `hvc1`)
    pub tag: String,
}

/// Audio encoding parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Audio codec id passed to `-c:a`
    pub codec: String,

    /// Audio bitrate passed to `-b:a` (e.g. `128k`)
    pub bitrate: String,
}

/// Output handling options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Whether the transcoder may overwrite an existing output file (`-y`)
    pub overwrite_output: bool,
}

/// Logging options. Never persisted in processing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level name: DEBUG, INFO, WARNING, ERROR (plus TRACE, CRITICAL and OFF)
    pub level: String,
}

impl LoggingSettings {
    /// Maps the configured level name onto a `log` filter. Case-insensitive.
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        match self.level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Some(log::LevelFilter::Trace),
            "DEBUG" => Some(log::LevelFilter::Debug),
            "INFO" => Some(log::LevelFilter::Info),
            "WARN" | "WARNING" => Some(log::LevelFilter::Warn),
            "ERROR" | "CRITICAL" => Some(log::LevelFilter::Error),
            "OFF" => Some(log::LevelFilter::Off),
            _ => None,
        }
    }
}

/// File discovery rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Extensions to pick up, each with its leading dot. Matching is
    /// case-sensitive, so `.mp4` and `.MP4` must both be listed if wanted.
    pub input_extensions: Vec<String>,

    /// Regular expressions matched against the full path of each candidate;
    /// any match excludes the file.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Complete, validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeConfig {
    pub video: VideoSettings,
    pub audio: AudioSettings,
    pub processing: ProcessingSettings,
    pub logging: LoggingSettings,
    pub files: FileSettings,
}

impl TranscodeConfig {
    /// Projects the sections that determine output bytes.
    ///
    /// New configuration fields are not compared by the metadata store until
    /// they are added here (and [`TranscodeSettings::VERSION`] is bumped).
    pub fn transcode_settings(&self) -> TranscodeSettings {
        TranscodeSettings {
            video: self.video.clone(),
            audio: self.audio.clone(),
            processing: self.processing.clone(),
        }
    }
}

/// The comparable subset of the configuration snapshotted into every
/// processing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeSettings {
    pub video: VideoSettings,
    pub audio: AudioSettings,
    pub processing: ProcessingSettings,
}

impl TranscodeSettings {
    /// Version of the projection. Records carrying a different version are
    /// always reprocessed.
    pub const VERSION: u32 = 1;
}
