use crate::audio::{
    AudioError, PlaybackParams, DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, DEFAULT_VOLUME,
};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Default playback settings, overridden by command-line flags
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Clip length in seconds
    pub duration: f64,
    /// Sample rate in Hz
    pub sample_rate: i64,
    /// Peak level in percent
    pub volume: i64,
}

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Invalid configuration file {path}: {message}")]
    Parse { path: String, message: String },
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            duration: DEFAULT_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlaybackConfig {
    /// Validates these settings into playback parameters.
    pub fn to_params(&self) -> Result<PlaybackParams, AudioError> {
        PlaybackParams::new(self.duration, self.sample_rate, self.volume)
    }
}

/// Load configuration from config.toml in the working directory.
///
/// A missing file is not an error and yields the default configuration.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", CONFIG_FILE);
        return Ok(Config::default());
    }
    load_config_from(path)
}

/// Load configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&contents).map_err(|message| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    })?;

    tracing::debug!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
}

fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str(contents).map_err(|e| e.to_string())
}
