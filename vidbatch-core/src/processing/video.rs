// ============================================================================
// vidbatch-core/src/processing/video.rs
// ============================================================================
//
// VIDEO PROCESSING: Batch Orchestration
//
// This module drives one batch run: for every discovered file it asks the
// metadata store whether the file is already up to date, converts it if
// not, and records the outcome.
//
// WORKFLOW:
// 1. Verify the store is bound to an input root
// 2. For each video file:
//    a. Mirror its path into the output root
//    b. Skip it when the store says the existing output is current
//    c. Convert it with the external transcoder
//    d. Record success or failure (failure diagnostics go to disk)
// 3. Report the summary
//
// Per-file failures never abort the batch. Store flush failures are logged
// and the run continues with the in-memory state. The summary names the
// failure folder only when artifacts were actually written there.
//
// AI-ASSISTANT-INFO: Main batch orchestration module

// ---- Internal crate imports ----
use crate::config::TranscodeConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::TranscoderSpawner;
use crate::metadata::{MetadataStore, relative_key};
use crate::processing::convert::{ConversionOutcome, convert};
use crate::progress_reporting::{BatchSummary, ProgressReporter};
use crate::utils::{format_duration, mirror_output_path};

// ---- External crate imports ----
use log::{debug, error, info, warn};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Processes `files` from `input_root` into `output_root`.
///
/// Files are handled strictly in the order given. Each file is either
/// skipped, converted, or counted as failed.
///
/// # Errors
///
/// Only [`CoreError::StoreNotInitialized`] when `store` has not been bound
/// to an input root. Everything that goes wrong for a single file is
/// reflected in the returned [`BatchSummary`] instead.
///
/// # Examples
///
/// ```rust,no_run
/// use vidbatch_core::config::load_config;
/// use vidbatch_core::discovery::discover;
/// use vidbatch_core::external::SidecarSpawner;
/// use vidbatch_core::metadata::MetadataStore;
/// use vidbatch_core::progress_reporting::NullReporter;
/// use vidbatch_core::process_videos;
/// use std::path::Path;
///
/// # fn main() -> vidbatch_core::CoreResult<()> {
/// let config = load_config(None)?;
/// let input = Path::new("/videos/in");
/// let output = Path::new("/videos/out");
///
/// let mut store = MetadataStore::new(output);
/// store.initialize(input)?;
///
/// let files = discover(input, &config.files.input_extensions)?;
/// let summary = process_videos(
///     &SidecarSpawner::default(),
///     &mut store,
///     &config,
///     input,
///     output,
///     &files,
///     &NullReporter,
/// )?;
/// println!("{} converted, {} failed", summary.converted, summary.failed);
/// # Ok(())
/// # }
/// ```
pub fn process_videos<S: TranscoderSpawner>(
    spawner: &S,
    store: &mut MetadataStore,
    config: &TranscodeConfig,
    input_root: &Path,
    output_root: &Path,
    files: &[PathBuf],
    reporter: &dyn ProgressReporter,
) -> CoreResult<BatchSummary> {
    if !store.is_initialized() {
        return Err(CoreError::StoreNotInitialized);
    }

    let start = Instant::now();
    let mut converted = 0;
    let mut failed = 0;
    let mut skipped = 0;

    info!("Processing {} files from {}", files.len(), input_root.display());
    reporter.batch_started(files.len());

    for input in files {
        let display = relative_key(input_root, input).unwrap_or_else(|| input.display().to_string());

        let output = match mirror_output_path(input_root, output_root, input) {
            Ok(output) => output,
            Err(e) => {
                error!("Skipping {display}: {e}");
                reporter.file_started(&display);
                reporter.file_finished(&display, false);
                failed += 1;
                continue;
            }
        };

        if store.should_skip(input, &output, config) {
            debug!("Already processed: {display}");
            reporter.file_skipped(&display);
            skipped += 1;
            continue;
        }

        debug!("Processing: {display}");
        reporter.file_started(&display);

        let outcome = convert(spawner, input, &output, config);
        let recorded = match &outcome {
            ConversionOutcome::Success => {
                converted += 1;
                store.record_success(input, config)
            }
            ConversionOutcome::Failed { error_output } => {
                failed += 1;
                warn!("Conversion failed: {display}");
                store.record_failure(input, config, error_output)
            }
        };
        if let Err(e) = recorded {
            warn!("Outcome for {display} was not saved to metadata: {e}");
        }

        reporter.file_finished(&display, outcome.is_success());
    }

    let summary = BatchSummary {
        converted,
        failed,
        skipped,
        failed_folder: (failed > 0 && store.failed_folder().is_dir())
            .then(|| store.failed_folder().to_path_buf()),
        elapsed: start.elapsed(),
    };

    info!(
        "Batch finished in {}: {} converted, {} failed, {} skipped",
        format_duration(summary.elapsed),
        summary.converted,
        summary.failed,
        summary.skipped
    );
    reporter.batch_finished(&summary);

    Ok(summary)
}
