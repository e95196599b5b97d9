// ============================================================================
// vidbatch-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Transcoder Process Management and Abstraction
//
// This module provides abstractions for spawning the external transcoder and
// collecting what the conversion pipeline needs from it: the diagnostic text
// it writes and its exit status. Nothing is read from stdout.
//
// ffmpeg-sidecar parses stderr into typed events. Every event that came from
// a stderr line is turned back into that line, so the collected diagnostics
// are the full stderr text in order.
//
// KEY COMPONENTS:
// - TranscoderProcess: Trait representing a running transcoder
// - TranscoderSpawner: Trait for starting one from an argument list
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - TranscoderStatus: Portable exit status
//
// AI-ASSISTANT-INFO: Transcoder process management and execution abstraction

use crate::error::{CoreError, CoreResult};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

// --- Exit Status ---

/// Exit status of a finished transcoder process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscoderStatus {
    code: Option<i32>,
}

impl TranscoderStatus {
    /// Status for a process that exited with `code`.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status for a process terminated without an exit code (e.g. by a signal).
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for TranscoderStatus {
    fn from(status: ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

impl fmt::Display for TranscoderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "no exit code (terminated by signal)"),
        }
    }
}

// --- Execution Abstraction ---

/// Trait representing an active transcoder process.
pub trait TranscoderProcess {
    /// Reads the diagnostic stream until it closes and returns its lines.
    fn collect_diagnostics(&mut self) -> CoreResult<Vec<String>>;

    /// Waits for the process to exit. There is no timeout.
    fn wait(&mut self) -> CoreResult<TranscoderStatus>;
}

/// Trait representing something that can start a transcoder process.
pub trait TranscoderSpawner {
    type Process: TranscoderProcess;

    /// Starts the transcoder with `args` (program name excluded).
    fn spawn(&self, args: &[String]) -> CoreResult<Self::Process>;

    /// Human readable program name for logs and errors.
    fn program(&self) -> String;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around an `ffmpeg_sidecar` child implementing `TranscoderProcess`.
pub struct SidecarProcess {
    child: FfmpegChild,
    program: String,
}

impl TranscoderProcess for SidecarProcess {
    fn collect_diagnostics(&mut self) -> CoreResult<Vec<String>> {
        let events = self
            .child
            .iter()
            .map_err(|e| CoreError::CommandWait(self.program.clone(), e.to_string()))?;

        Ok(events.filter_map(diagnostic_line).collect())
    }

    fn wait(&mut self) -> CoreResult<TranscoderStatus> {
        self.child
            .wait()
            .map(TranscoderStatus::from)
            .map_err(|e| CoreError::CommandWait(self.program.clone(), e.to_string()))
    }
}

/// The stderr text behind `event`, or `None` for events that carry none.
fn diagnostic_line(event: FfmpegEvent) -> Option<String> {
    match event {
        FfmpegEvent::Log(_, line)
        | FfmpegEvent::Error(line)
        | FfmpegEvent::ParsedStreamMapping(line) => Some(line),
        FfmpegEvent::ParsedVersion(version) => Some(version.raw_log_message),
        FfmpegEvent::ParsedConfiguration(configuration) => Some(configuration.raw_log_message),
        FfmpegEvent::ParsedInput(input) => Some(input.raw_log_message),
        FfmpegEvent::ParsedOutput(output) => Some(output.raw_log_message),
        FfmpegEvent::ParsedInputStream(stream) | FfmpegEvent::ParsedOutputStream(stream) => {
            Some(stream.raw_log_message)
        }
        FfmpegEvent::ParsedDuration(duration) => Some(duration.raw_log_message),
        FfmpegEvent::Progress(progress) => Some(progress.raw_log_message),
        _ => None,
    }
}

/// Concrete implementation of `TranscoderSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone)]
pub struct SidecarSpawner {
    binary: PathBuf,
}

impl SidecarSpawner {
    /// Spawner for the transcoder at `binary` (a name on `PATH` or a path).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for SidecarSpawner {
    fn default() -> Self {
        Self::new(super::DEFAULT_TRANSCODER)
    }
}

impl TranscoderSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, args: &[String]) -> CoreResult<Self::Process> {
        let mut cmd = FfmpegCommand::new_with_path(&self.binary);
        cmd.args(args);
        log::debug!("Running: {} {}", self.program(), args.join(" "));

        cmd.spawn()
            .map(|child| SidecarProcess {
                child,
                program: self.program(),
            })
            .map_err(|e| CoreError::CommandStart(self.program(), e.to_string()))
    }

    fn program(&self) -> String {
        self.binary.display().to_string()
    }
}
