//! Persisted data types of the metadata store.
//!
//! The on-disk document is plain JSON:
//!
//! ```json
//! {
//!   "input_dir": "/abs/path/to/input",
//!   "last_updated": "2024-06-01T12:30:45.123456+02:00",
//!   "processed_files": {
//!     "season1/episode1.mp4": {
//!       "video": { "codec": "libx265", "crf": 23, "pixel_format": "yuv420p10le", "tag": "hvc1" },
//!       "audio": { "codec": "aac", "bitrate": "128k" },
//!       "processing": { "overwrite_output": true },
//!       "settings_version": 1,
//!       "processed_at": "2024-06-01T12:30:45.123456+02:00",
//!       "status": "success",
//!       "error_log_file_path": null
//!     }
//!   }
//! }
//! ```
//!
//! Timestamps are written as RFC 3339. Timestamps without a UTC offset
//! (`2024-06-01T12:30:45.123456`) are also accepted and read as local time.

use crate::config::{TranscodeConfig, TranscodeSettings};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use std::collections::BTreeMap;

/// Outcome of the last processing attempt for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Failed,
}

/// Snapshot of the settings used for one file plus the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingRecord {
    /// The comparable configuration subset, stored as top-level
    /// `video` / `audio` / `processing` keys.
    #[serde(flatten)]
    pub settings: TranscodeSettings,

    /// Projection version the settings were captured with.
    #[serde(default = "first_settings_version")]
    pub settings_version: u32,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub processed_at: DateTime<Local>,

    pub status: RecordStatus,

    /// Diagnostic artifact for failed records; always `None` on success.
    #[serde(default)]
    pub error_log_file_path: Option<String>,
}

fn first_settings_version() -> u32 {
    1
}

impl ProcessingRecord {
    pub fn success(config: &TranscodeConfig) -> Self {
        Self {
            settings: config.transcode_settings(),
            settings_version: TranscodeSettings::VERSION,
            processed_at: Local::now(),
            status: RecordStatus::Success,
            error_log_file_path: None,
        }
    }

    pub fn failed(config: &TranscodeConfig, error_log_file_path: Option<String>) -> Self {
        Self {
            settings: config.transcode_settings(),
            settings_version: TranscodeSettings::VERSION,
            processed_at: Local::now(),
            status: RecordStatus::Failed,
            error_log_file_path,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == RecordStatus::Failed
    }

    /// True when the stored settings reproduce what `config` would produce.
    ///
    /// Bookkeeping fields (`processed_at`, `status`, `error_log_file_path`)
    /// take no part in the comparison.
    pub fn matches_settings(&self, config: &TranscodeConfig) -> bool {
        self.settings_version == TranscodeSettings::VERSION
            && self.settings == config.transcode_settings()
    }
}

/// Parses an RFC 3339 timestamp, or an offset-less ISO 8601 one as local time.
fn parse_timestamp(text: &str) -> Result<DateTime<Local>, String> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Ok(with_offset.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| format!("invalid timestamp '{text}': {e}"))?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("timestamp '{text}' does not exist in the local time zone"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text).map_err(serde::de::Error::custom)
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|text| parse_timestamp(&text))
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Whole metadata file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Input root this store is bound to; `None` until the first initialize.
    pub input_dir: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_updated: Option<DateTime<Local>>,

    /// Records keyed by forward-slash path relative to `input_dir`.
    #[serde(default)]
    pub processed_files: BTreeMap<String, ProcessingRecord>,
}
