//! Validation of a parsed configuration.
//!
//! Parsing guarantees every required field is present; this module checks
//! the values themselves.

use super::TranscodeConfig;
use crate::error::{CoreResult, config_validation_error};

/// Highest CRF value accepted by the supported encoders.
pub const MAX_CRF: u8 = 51;

impl TranscodeConfig {
    /// Checks value ranges and required non-empty strings.
    ///
    /// Ignore patterns are not compiled here; an invalid pattern is skipped
    /// with a warning by [`crate::discovery::filter_ignored`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.video.crf > MAX_CRF {
            return Err(config_validation_error(
                "video.crf",
                format!("must be between 0 and {MAX_CRF}, got {}", self.video.crf),
            ));
        }

        let required = [
            ("video.codec", &self.video.codec),
            ("video.pixel_format", &self.video.pixel_format),
            ("video.tag", &self.video.tag),
            ("audio.codec", &self.audio.codec),
            ("audio.bitrate", &self.audio.bitrate),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(config_validation_error(field, "must not be empty"));
            }
        }

        if self.logging.level_filter().is_none() {
            return Err(config_validation_error(
                "logging.level",
                format!(
                    "unknown level '{}' (expected DEBUG, INFO, WARNING or ERROR)",
                    self.logging.level
                ),
            ));
        }

        if self.files.input_extensions.is_empty() {
            return Err(config_validation_error(
                "files.input_extensions",
                "at least one extension is required",
            ));
        }
        for ext in &self.files.input_extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(config_validation_error(
                    "files.input_extensions",
                    format!("'{ext}' must start with a dot, e.g. '.mp4'"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::tests::sample_config;
    use crate::error::CoreError;

    fn field_of(result: crate::error::CoreResult<()>) -> String {
        match result {
            Err(CoreError::ConfigValidation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_config_is_valid() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_crf_bounds() {
        let mut config = sample_config();
        config.video.crf = 51;
        assert!(config.validate().is_ok());
        config.video.crf = 0;
        assert!(config.validate().is_ok());
        config.video.crf = 52;
        assert_eq!(field_of(config.validate()), "video.crf");
    }

    #[test]
    fn test_empty_codec_rejected() {
        let mut config = sample_config();
        config.audio.codec = "  ".to_string();
        assert_eq!(field_of(config.validate()), "audio.codec");
    }

    #[test]
    fn test_extension_needs_leading_dot() {
        let mut config = sample_config();
        config.files.input_extensions = vec!["mp4".to_string()];
        assert_eq!(field_of(config.validate()), "files.input_extensions");

        config.files.input_extensions = vec![];
        assert_eq!(field_of(config.validate()), "files.input_extensions");
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut config = sample_config();
        config.logging.level = "CHATTY".to_string();
        assert_eq!(field_of(config.validate()), "logging.level");
    }

    #[test]
    fn test_invalid_ignore_pattern_is_not_a_validation_error() {
        let mut config = sample_config();
        config.files.ignore = vec!["(unclosed".to_string()];
        assert!(config.validate().is_ok());
    }
}
