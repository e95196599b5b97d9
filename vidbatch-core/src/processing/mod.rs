//! Core video processing logic and orchestration.
//!
//! `convert` runs the transcoder for a single file; `video` walks a whole
//! batch, consulting and updating the metadata store.

/// Single-file conversion
pub mod convert;

/// Main batch orchestration logic
pub mod video;

pub use convert::{ConversionOutcome, convert};
pub use video::process_videos;
