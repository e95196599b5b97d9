//! Implementation of a batch conversion run.
//!
//! Startup steps run in a fixed order and any failure among them aborts the
//! run before a single file is touched: configuration, logging, transcoder
//! check, input validation, output directory, metadata binding. After that
//! only per-file outcomes are reported; they never fail the run.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::logging::init_logging;
use crate::progress::CliProgress;

use vidbatch_core::external::SidecarSpawner;
use vidbatch_core::metadata::{MetadataStore, resolve_path};
use vidbatch_core::{BatchSummary, CoreError, check_dependency, discover, filter_ignored, load_config, process_videos};

use log::{LevelFilter, info, warn};

use std::fs;
use std::path::PathBuf;

/// Directories a run works on, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Checks the input directory and creates the output directory.
///
/// Both returned paths are absolute.
pub fn prepare_directories(args: &Cli) -> CliResult<RunPaths> {
    if !args.input_dir.exists() {
        return Err(CoreError::PathError(format!(
            "Input directory '{}' does not exist",
            args.input_dir.display()
        )));
    }
    if !args.input_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Input path '{}' is not a directory",
            args.input_dir.display()
        )));
    }

    fs::create_dir_all(&args.output_dir).cli_with_context(|| {
        format!("Failed to create output directory '{}'", args.output_dir.display())
    })?;

    Ok(RunPaths {
        input_dir: resolve_path(&args.input_dir),
        output_dir: resolve_path(&args.output_dir),
    })
}

/// Runs one batch and returns its summary.
pub fn run_convert(args: &Cli, progress: &CliProgress) -> CliResult<(BatchSummary, RunPaths)> {
    let config = load_config(args.config.as_deref())?;

    init_logging(config.logging.level_filter().unwrap_or(LevelFilter::Info));

    check_dependency(&args.ffmpeg)?;
    info!("Using transcoder: {}", args.ffmpeg.display());

    let paths = prepare_directories(args)?;
    info!("Input directory: {}", paths.input_dir.display());
    info!("Output directory: {}", paths.output_dir.display());

    let mut store = MetadataStore::new(&paths.output_dir);
    store.initialize(&paths.input_dir)?;

    let discovered = discover(&paths.input_dir, &config.files.input_extensions)?;
    let discovered_count = discovered.len();
    let files = filter_ignored(discovered, &config.files.ignore);
    info!(
        "Found {} file(s) to consider ({} ignored by pattern)",
        files.len(),
        discovered_count - files.len()
    );
    if files.is_empty() {
        warn!("No files with extensions {:?} found", config.files.input_extensions);
    }

    let spawner = SidecarSpawner::new(&args.ffmpeg);
    let summary = process_videos(
        &spawner,
        &mut store,
        &config,
        &paths.input_dir,
        &paths.output_dir,
        &files,
        progress,
    )?;

    Ok((summary, paths))
}
