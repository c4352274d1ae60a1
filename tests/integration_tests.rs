// Integration tests for the Raman sonifier
//
// These tests verify the end-to-end pipeline: loading a spectrum table,
// resolving playback settings from a configuration file, synthesizing the
// clip and writing it out. The command-line binary is exercised as well,
// except for device playback, which needs real audio hardware.

use audible_raman::audio;
use audible_raman::config;
use audible_raman::spectrum::{Spectrum, SpectrumError};
use std::path::Path;

use test_utils::{load, params, scratch_path, CONFIG_FILE, THREE_COLUMNS, TWO_LINES};

/// Test the reference example from file to clip.
///
/// This test verifies:
/// - `100.0\t1.0` and `200.0\t0.5` at 8000Hz for 0.1s give 800 samples
/// - The peak lands on 50% of full scale, truncated (16383.5 -> 16383)
#[test]
fn test_end_to_end_pipeline() {
    let spectrum = load(TWO_LINES);
    let buffer = audio::synthesize(&spectrum, &params(0.1, 8000, 50));

    assert_eq!(buffer.len(), 800);
    assert_eq!(buffer.sample_rate, 8000);
    assert_eq!(buffer.peak(), 16383);
    assert_eq!(buffer.to_le_bytes().len(), 1600);
}

/// Test that a malformed table stops the pipeline before synthesis.
#[test]
fn test_three_columns_rejected() {
    let result = Spectrum::from_table(Path::new(THREE_COLUMNS));
    assert!(matches!(result, Err(SpectrumError::Format(_))));
}

/// Test playback settings taken from a configuration file.
#[test]
fn test_config_file_settings() {
    let config = config::load_config_from(Path::new(CONFIG_FILE)).expect("Failed to load config");
    let params = config.playback.to_params().expect("Config should be valid");

    assert_eq!(params.duration(), 0.5);
    assert_eq!(params.sample_rate(), 8000);
    assert_eq!(params.volume(), 80);

    let buffer = audio::synthesize(&load(TWO_LINES), &params);
    assert_eq!(buffer.len(), 4000);
}

/// Test synthesizing a file and exporting the clip to WAV.
#[test]
fn test_pipeline_to_wav() {
    let buffer = audio::synthesize(&load(TWO_LINES), &params(0.1, 8000, 50));

    let path = scratch_path("pipeline.wav");
    audio::write_wav_file(&path, &buffer).expect("Failed to write WAV file");
    let read_back = audio::read_wav_file(&path).expect("Failed to read WAV file");
    let _ = std::fs::remove_file(&path);

    assert_eq!(read_back, buffer);
}

#[cfg(feature = "cli")]
mod cli {
    use super::test_utils::{scratch_path, LABSPEC_DUMP, THREE_COLUMNS, TWO_LINES};
    use audible_raman::audio;
    use std::process::Command;

    fn command() -> Command {
        Command::new(env!("CARGO_BIN_EXE_audible_raman"))
    }

    /// Test the `--info` flag prints a summary without playing anything.
    #[test]
    fn test_cli_info() {
        let output = command()
            .args([LABSPEC_DUMP, "--info"])
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Lines: 5"), "unexpected output: {}", stdout);
        assert!(stdout.contains("Strongest line: 520.70"));
    }

    /// Test writing a WAV file with clamped command-line settings.
    #[test]
    fn test_cli_output_wav() {
        let path = scratch_path("cli.wav");
        let output = command()
            .arg(TWO_LINES)
            .args(["-t", "0.01", "-r", "8000", "-v", "150", "-o"])
            .arg(&path)
            .output()
            .expect("Failed to run binary");
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let buffer = audio::read_wav_file(&path).expect("Failed to read WAV file");
        let _ = std::fs::remove_file(&path);

        // 0.01s clamps to 0.1s, volume 150 clamps to 100
        assert_eq!(buffer.len(), 800);
        assert_eq!(buffer.sample_rate, 8000);
        assert_eq!(buffer.peak(), 32767);
    }

    /// Test that negative volumes are accepted and clamped to silence.
    #[test]
    fn test_cli_negative_volume() {
        let path = scratch_path("cli_muted.wav");
        let output = command()
            .arg(TWO_LINES)
            .args(["--volume", "-10", "--sample-rate", "8000", "--output"])
            .arg(&path)
            .output()
            .expect("Failed to run binary");
        assert!(output.status.success());

        let buffer = audio::read_wav_file(&path).expect("Failed to read WAV file");
        let _ = std::fs::remove_file(&path);
        assert!(buffer.is_silent());
    }

    /// Test that errors exit with status 1 and a message.
    #[test]
    fn test_cli_errors() {
        let output = command()
            .args([THREE_COLUMNS, "--info"])
            .output()
            .expect("Failed to run binary");
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Format error"));

        let output = command()
            .args([TWO_LINES, "--sample-rate", "0", "--info"])
            .output()
            .expect("Failed to run binary");
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("sample rate must be positive"));
    }
}
