// vidbatch-core/tests/process_videos_success_tests.rs

mod common;

use common::{base_config, config_with, create_dummy_file, read_metadata};
use vidbatch_core::discovery::{discover, filter_ignored};
use vidbatch_core::external::mocks::MockTranscoderSpawner;
use vidbatch_core::metadata::MetadataStore;
use vidbatch_core::process_videos;
use vidbatch_core::progress_reporting::NullReporter;

use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Discovery plus ignore filtering, as the CLI does it.
fn candidates(input: &Path, config: &vidbatch_core::TranscodeConfig) -> Vec<PathBuf> {
    let found = discover(input, &config.files.input_extensions).expect("discovery should succeed");
    filter_ignored(found, &config.files.ignore)
}

#[test]
fn test_batch_converts_matching_non_ignored_files() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    create_dummy_file(input.path(), "a.mp4");
    create_dummy_file(input.path(), "sub/b.MP4");
    create_dummy_file(input.path(), "sample_clip.mp4");
    create_dummy_file(input.path(), "notes.txt");
    let config = base_config();

    let files = candidates(input.path(), &config);
    assert_eq!(files.len(), 2);

    let spawner = MockTranscoderSpawner::always_succeeding();
    let mut store = MetadataStore::new(output.path());
    store.initialize(input.path())?;

    let summary = process_videos(&spawner, &mut store, &config, input.path(), output.path(), &files, &NullReporter)?;

    assert_eq!((summary.converted, summary.failed, summary.skipped), (2, 0, 0));
    assert!(output.path().join("a.mp4").exists());
    assert!(output.path().join("sub").join("b.MP4").exists());

    let doc = read_metadata(output.path());
    let records = doc["processed_files"].as_object().ok_or("processed_files missing")?;
    assert_eq!(records.len(), 2);
    assert_eq!(records["a.mp4"]["status"], "success");
    assert_eq!(records["sub/b.MP4"]["status"], "success");
    assert!(!records.contains_key("sample_clip.mp4"));
    assert!(!records.contains_key("notes.txt"));
    Ok(())
}

#[test]
fn test_second_run_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    create_dummy_file(input.path(), "a.mp4");
    create_dummy_file(input.path(), "season/ep1.mp4");
    let config = base_config();
    let files = candidates(input.path(), &config);
    let spawner = MockTranscoderSpawner::always_succeeding();

    let mut store = MetadataStore::new(output.path());
    store.initialize(input.path())?;
    process_videos(&spawner, &mut store, &config, input.path(), output.path(), &files, &NullReporter)?;
    let first = read_metadata(output.path());

    // New store instance, as a second invocation of the tool would have.
    let mut store = MetadataStore::new(output.path());
    store.initialize(input.path())?;
    let summary = process_videos(&spawner, &mut store, &config, input.path(), output.path(), &files, &NullReporter)?;

    assert_eq!((summary.converted, summary.skipped), (0, 2));
    assert_eq!(spawner.call_count(), 2);
    // Nothing was recorded, so nothing was flushed.
    assert_eq!(read_metadata(output.path()), first);
    Ok(())
}

#[test]
fn test_crf_change_reconverts_but_log_level_does_not() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    create_dummy_file(input.path(), "a.mp4");
    let config = base_config();
    let files = candidates(input.path(), &config);
    let spawner = MockTranscoderSpawner::always_succeeding();

    let mut store = MetadataStore::new(output.path());
    store.initialize(input.path())?;
    process_videos(&spawner, &mut store, &config, input.path(), output.path(), &files, &NullReporter)?;

    let chatty = config_with(&[("level = \"INFO\"", "level = \"DEBUG\"")]);
    let summary = process_videos(&spawner, &mut store, &chatty, input.path(), output.path(), &files, &NullReporter)?;
    assert_eq!(summary.skipped, 1);

    let sharper = config_with(&[("crf = 23", "crf = 20")]);
    let summary = process_videos(&spawner, &mut store, &sharper, input.path(), output.path(), &files, &NullReporter)?;
    assert_eq!(summary.converted, 1);

    let doc = read_metadata(output.path());
    assert_eq!(doc["processed_files"]["a.mp4"]["video"]["crf"], 20);

    let calls = spawner.get_received_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].windows(2).any(|w| w[0] == "-crf" && w[1] == "20"));
    Ok(())
}

#[test]
fn test_deleted_output_is_reconverted() -> Result<(), Box<dyn std::error::Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    create_dummy_file(input.path(), "a.mp4");
    let config = base_config();
    let files = candidates(input.path(), &config);
    let spawner = MockTranscoderSpawner::always_succeeding();

    let mut store = MetadataStore::new(output.path());
    store.initialize(input.path())?;
    process_videos(&spawner, &mut store, &config, input.path(), output.path(), &files, &NullReporter)?;

    std::fs::remove_file(output.path().join("a.mp4"))?;
    let summary = process_videos(&spawner, &mut store, &config, input.path(), output.path(), &files, &NullReporter)?;

    assert_eq!(summary.converted, 1);
    assert!(output.path().join("a.mp4").exists());
    Ok(())
}
