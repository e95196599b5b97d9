// vidbatch-core/tests/common/mod.rs
//
// Helpers shared by the integration tests.

#![allow(dead_code)]

use vidbatch_core::TranscodeConfig;
use vidbatch_core::config::parse_config;

use std::fs;
use std::path::{Path, PathBuf};

pub const BASE_CONFIG: &str = r#"
[video]
codec = "libx265"
crf = 23
pixel_format = "yuv420p10le"
tag = "hvc1"

[audio]
codec = "aac"
bitrate = "128k"

[processing]
overwrite_output = true

[logging]
level = "INFO"

[files]
input_extensions = [".mp4", ".MP4"]
ignore = ["sample"]
"#;

/// Parses the base configuration with `(from, to)` text replacements applied.
pub fn config_with(replacements: &[(&str, &str)]) -> TranscodeConfig {
    let text = replacements
        .iter()
        .fold(BASE_CONFIG.to_string(), |text, (from, to)| text.replace(from, to));
    parse_config(&text, Path::new("test-config.toml")).expect("test config must be valid")
}

pub fn base_config() -> TranscodeConfig {
    config_with(&[])
}

/// Creates `dir/relative` (and its parents) with dummy content.
pub fn create_dummy_file(dir: &Path, relative: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(&path, b"dummy content").expect("Failed to write dummy content");
    path
}

/// Parsed metadata file of an output root.
pub fn read_metadata(output_dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(output_dir.join(vidbatch_core::metadata::METADATA_FILENAME))
        .expect("metadata file should exist");
    serde_json::from_str(&text).expect("metadata file should be valid JSON")
}
