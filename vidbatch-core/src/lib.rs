//! Core library for incremental batch video conversion using ffmpeg.
//!
//! This crate provides video file discovery, configuration loading, the
//! metadata store that remembers what was converted with which settings, and
//! the batch loop that ties them together.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidbatch_core::{MetadataStore, NullReporter, SidecarSpawner, discover, load_config, process_videos};
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("config.toml"))).unwrap();
//! let input = Path::new("/path/to/input");
//! let output = Path::new("/path/to/output");
//!
//! let mut store = MetadataStore::new(output);
//! store.initialize(input).unwrap();
//!
//! let files = discover(input, &config.files.input_extensions).unwrap();
//! let summary = process_videos(
//!     &SidecarSpawner::default(),
//!     &mut store,
//!     &config,
//!     input,
//!     output,
//!     &files,
//!     &NullReporter,
//! ).unwrap();
//! println!("{} converted, {} skipped", summary.converted, summary.skipped);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod metadata;
pub mod processing;
pub mod progress_reporting;
pub mod utils;

// Re-exports for public API
pub use config::{TranscodeConfig, TranscodeSettings, load_config};
pub use discovery::{discover, filter_ignored};
pub use error::{CoreError, CoreResult};
pub use external::{SidecarSpawner, check_dependency};
pub use metadata::{MetadataStore, ProcessingRecord, RecordStatus};
pub use processing::process_videos;
pub use progress_reporting::{BatchSummary, NullReporter, ProgressReporter};
pub use utils::format_duration;
