//! FFmpeg argument list construction.
//!
//! Building the command line is a pure function of the input path, the
//! output path and the configuration, so it can be tested without running
//! anything. The program name is not part of the list; the spawner supplies
//! it.

use crate::config::TranscodeConfig;

use std::path::Path;

/// Builder for ffmpeg argument lists.
///
/// Options are emitted in the order they were added, between the input and
/// the output.
#[derive(Debug, Default)]
pub struct FfmpegArgsBuilder {
    input: Option<String>,
    options: Vec<String>,
    output: Option<String>,
}

impl FfmpegArgsBuilder {
    /// Creates an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input file (`-i <path>`)
    #[must_use]
    pub fn input(mut self, path: &Path) -> Self {
        self.input = Some(path.to_string_lossy().into_owned());
        self
    }

    /// Adds a flag followed by its value
    #[must_use]
    pub fn option(mut self, flag: &str, value: impl ToString) -> Self {
        self.options.push(flag.to_string());
        self.options.push(value.to_string());
        self
    }

    /// Adds a flag without a value when `enabled` is true
    #[must_use]
    pub fn flag_if(mut self, flag: &str, enabled: bool) -> Self {
        if enabled {
            self.options.push(flag.to_string());
        }
        self
    }

    /// Sets the output file, always the last argument
    #[must_use]
    pub fn output(mut self, path: &Path) -> Self {
        self.output = Some(path.to_string_lossy().into_owned());
        self
    }

    /// Builds the final argument list
    #[must_use]
    pub fn build(self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.options.len() + 3);
        if let Some(input) = self.input {
            args.push("-i".to_string());
            args.push(input);
        }
        args.extend(self.options);
        if let Some(output) = self.output {
            args.push(output);
        }
        args
    }
}

/// Builds the transcoder arguments for converting `input` into `output`.
///
/// `-y` is only added when `processing.overwrite_output` is set; without it
/// ffmpeg refuses to replace an existing output file.
#[must_use]
pub fn build_transcode_args(input: &Path, output: &Path, config: &TranscodeConfig) -> Vec<String> {
    FfmpegArgsBuilder::new()
        .input(input)
        .option("-c:v", &config.video.codec)
        .option("-crf", config.video.crf)
        .option("-pix_fmt", &config.video.pixel_format)
        .option("-c:a", &config.audio.codec)
        .option("-b:a", &config.audio.bitrate)
        .option("-tag:v", &config.video.tag)
        .flag_if("-y", config.processing.overwrite_output)
        .output(output)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;

    #[test]
    fn test_build_transcode_args_full_order() {
        let config = sample_config();
        let args = build_transcode_args(Path::new("/in/a.mp4"), Path::new("/out/a.mp4"), &config);
        assert_eq!(
            args,
            vec![
                "-i", "/in/a.mp4", "-c:v", "libx265", "-crf", "23", "-pix_fmt", "yuv420p10le",
                "-c:a", "aac", "-b:a", "128k", "-tag:v", "hvc1", "-y", "/out/a.mp4",
            ]
        );
    }

    #[test]
    fn test_overwrite_flag_gated_by_config() {
        let mut config = sample_config();
        config.processing.overwrite_output = false;
        let args = build_transcode_args(Path::new("in.mp4"), Path::new("out.mp4"), &config);
        assert!(!args.iter().any(|a| a == "-y"));
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }

    #[test]
    fn test_builder_empty() {
        assert!(FfmpegArgsBuilder::new().build().is_empty());
    }

    #[test]
    fn test_builder_keeps_option_order() {
        let args = FfmpegArgsBuilder::new()
            .option("-a", 1)
            .flag_if("-skipped", false)
            .option("-b", "two")
            .build();
        assert_eq!(args, vec!["-a", "1", "-b", "two"]);
    }
}
