// Configuration tests
//
// These tests cover reading `config.toml` files:
// - Missing sections and keys fall back to the built-in defaults
// - Malformed files and missing explicit paths are reported as errors
// - Settings are clamped or rejected when turned into playback parameters

use audible_raman::audio::AudioError;
use audible_raman::config::{self, Config, ConfigError, PlaybackConfig};
use std::path::Path;

use test_utils::{CONFIG_EMPTY, CONFIG_FILE, CONFIG_INVALID, CONFIG_PARTIAL};

/// Test that a file without settings yields the defaults.
#[test]
fn test_empty_config_uses_defaults() {
    let config = config::load_config_from(Path::new(CONFIG_EMPTY)).expect("Failed to load config");
    assert_eq!(config, Config::default());
    assert_eq!(config.playback.duration, 1.0);
    assert_eq!(config.playback.sample_rate, 44100);
    assert_eq!(config.playback.volume, 50);
}

/// Test that a partial `[playback]` section keeps defaults for missing keys.
#[test]
fn test_partial_config() {
    let config =
        config::load_config_from(Path::new(CONFIG_PARTIAL)).expect("Failed to load config");
    assert_eq!(
        config.playback,
        PlaybackConfig {
            volume: 80,
            ..PlaybackConfig::default()
        }
    );
}

/// Test a file that sets every key.
#[test]
fn test_full_config() {
    let config = config::load_config_from(Path::new(CONFIG_FILE)).expect("Failed to load config");
    assert_eq!(config.playback.duration, 0.5);
    assert_eq!(config.playback.sample_rate, 8000);
    assert_eq!(config.playback.volume, 80);
}

/// Test that a value of the wrong type is a parse error naming the file.
#[test]
fn test_invalid_config() {
    match config::load_config_from(Path::new(CONFIG_INVALID)) {
        Err(err @ ConfigError::Parse { .. }) => {
            assert!(err.to_string().contains("config_invalid.toml"));
        }
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

/// Test that an explicitly named file must exist.
#[test]
fn test_missing_config_file() {
    let result = config::load_config_from(Path::new("tests/samples/no_such_config.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

/// Test that file settings go through the same clamping as CLI flags.
///
/// This test verifies:
/// - Duration and volume are clamped
/// - A zero or oversized sample rate is rejected
#[test]
fn test_config_to_params() {
    let params = PlaybackConfig {
        duration: 9.0,
        sample_rate: 22050,
        volume: 400,
    }
    .to_params()
    .expect("valid sample rate");
    assert_eq!(params.duration(), 5.0);
    assert_eq!(params.volume(), 100);

    for sample_rate in [0, 10_000_000] {
        let result = PlaybackConfig {
            sample_rate,
            ..PlaybackConfig::default()
        }
        .to_params();
        assert!(matches!(result, Err(AudioError::Config(_))));
    }
}
