// vidbatch-core/tests/test_config_file.rs

mod common;

use common::BASE_CONFIG;
use vidbatch_core::config::{DEFAULT_CONFIG_FILE, load_config};
use vidbatch_core::error::CoreError;

use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_config_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, BASE_CONFIG)?;

    let config = load_config(Some(&path))?;

    assert_eq!(config.video.codec, "libx265");
    assert_eq!(config.video.pixel_format, "yuv420p10le");
    assert_eq!(config.audio.codec, "aac");
    assert_eq!(config.logging.level_filter(), Some(log::LevelFilter::Info));
    assert_eq!(config.files.ignore, vec!["sample".to_string()]);
    Ok(())
}

#[test]
fn test_comparable_subset_excludes_logging_and_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, BASE_CONFIG)?;
    let base = load_config(Some(&path))?;

    fs::write(
        &path,
        BASE_CONFIG
            .replace("level = \"INFO\"", "level = \"ERROR\"")
            .replace("ignore = [\"sample\"]", "ignore = [\"extras\"]"),
    )?;
    let changed = load_config(Some(&path))?;

    assert_eq!(base.transcode_settings(), changed.transcode_settings());
    Ok(())
}

#[test]
fn test_missing_required_field_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, BASE_CONFIG.replace("tag = \"hvc1\"\n", ""))?;

    let result = load_config(Some(&path));

    assert!(matches!(result, Err(CoreError::ConfigParse { .. })));
    Ok(())
}

#[test]
fn test_missing_file_names_the_path() {
    let path = std::path::Path::new("no/such/dir/config.toml");
    match load_config(Some(path)) {
        Err(e @ CoreError::ConfigNotFound(_)) => assert!(e.to_string().contains("no/such/dir/config.toml")),
        other => panic!("expected ConfigNotFound, got {other:?}"),
    }
}
