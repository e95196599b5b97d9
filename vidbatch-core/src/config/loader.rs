//! Loading the TOML configuration file.

use super::TranscodeConfig;
use crate::error::{CoreError, CoreResult};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads and validates the configuration.
///
/// Falls back to [`DEFAULT_CONFIG_FILE`] in the current directory when
/// `config_path` is `None`. Missing files, malformed TOML, missing required
/// fields and out-of-range values are all reported before any file is touched.
pub fn load_config(config_path: Option<&Path>) -> CoreResult<TranscodeConfig> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let contents = fs::read_to_string(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CoreError::ConfigNotFound(path.clone()),
        _ => CoreError::Io(e),
    })?;

    let config = parse_config(&contents, &path)?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parses and validates configuration text. `origin` is only used in errors.
pub fn parse_config(contents: &str, origin: &Path) -> CoreResult<TranscodeConfig> {
    let config: TranscodeConfig =
        toml::from_str(contents).map_err(|e| CoreError::ConfigParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}
