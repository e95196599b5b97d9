// ============================================================================
// vidbatch-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the External Transcoder
//
// This module encapsulates everything that touches the external transcoder
// binary: checking that it is installed, building its argument list, and
// spawning it. Spawning goes through the `TranscoderSpawner` trait so the
// batch loop can be exercised in tests without a real ffmpeg.
//
// KEY COMPONENTS:
// - check_dependency: startup check that the transcoder runs at all
// - ffmpeg_builder: pure (config -> argument list) command construction
// - ffmpeg_executor: spawner/process traits and the ffmpeg-sidecar backend
// - mocks: scripted spawner for tests (feature "test-mocks")
//
// AI-ASSISTANT-INFO: External transcoder interactions and abstractions

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building logic
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing the transcoder
pub mod ffmpeg_executor;

/// Scripted spawner used by tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::{FfmpegArgsBuilder, build_transcode_args};
pub use ffmpeg_executor::{
    SidecarProcess, SidecarSpawner, TranscoderProcess, TranscoderSpawner, TranscoderStatus,
};

/// Name of the transcoder binary looked up on `PATH` by default.
pub const DEFAULT_TRANSCODER: &str = "ffmpeg";

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that the transcoder binary exists and runs.
///
/// Runs `<binary> -version` with output discarded. Both a missing binary and a
/// non-zero exit are reported as `CoreError::DependencyNotFound`, which the
/// CLI treats as fatal before any file is touched.
///
/// # Arguments
///
/// * `binary` - Name or path of the transcoder (e.g. "ffmpeg")
pub fn check_dependency(binary: &Path) -> CoreResult<()> {
    let name = binary.display().to_string();

    let result = Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {
            log::debug!("Found dependency: {name}");
            Ok(())
        }
        Ok(status) => {
            log::warn!("Dependency '{name}' exited with {status} on -version");
            Err(CoreError::DependencyNotFound(format!(
                "{name} (version check exited with {status})"
            )))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{name}' not found.");
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{name}': {e}");
            Err(CoreError::CommandStart(name, e.to_string()))
        }
    }
}
