use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audible_raman::audio::{self, AudioError, PcmBuffer, PlaybackParams};
use audible_raman::config::{self, Config, ConfigError};
use audible_raman::spectrum::{Spectrum, SpectrumError, SpectrumSummary};

/// Play a Raman spectrum as sound
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raman spectrum file in LabSpec6's text dump format
    #[arg(required = true)]
    input: PathBuf,

    /// Duration to play (seconds); clipped to the range 0.1-5.0 [1.0]
    #[arg(short = 't', long, value_name = "0.1-5.0", allow_negative_numbers = true)]
    duration: Option<f64>,

    /// Sample rate (Hz) [44100]
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    sample_rate: Option<i64>,

    /// Playback volume (percent); clipped to the range 0-100 [50]
    #[arg(short = 'v', long, value_name = "0-100", allow_negative_numbers = true)]
    volume: Option<i64>,

    /// Write the clip to a WAV file instead of playing it
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show spectrum information and exit
    #[arg(short, long)]
    info: bool,

    /// Configuration file with default playback settings [config.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over the configuration file
    fn playback_params(&self, config: &Config) -> Result<PlaybackParams, AudioError> {
        let defaults = &config.playback;
        PlaybackParams::new(
            self.duration.unwrap_or(defaults.duration),
            self.sample_rate.unwrap_or(defaults.sample_rate),
            self.volume.unwrap_or(defaults.volume),
        )
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audible_raman=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
}

fn print_spectrum_info(path: &Path, summary: &SpectrumSummary) {
    println!("Spectrum Information:");
    println!("---------------------");
    println!("File: {}", path.display());
    println!("Lines: {}", summary.lines);
    if let Some((lo, hi)) = summary.wavenumber_range {
        println!("Wavenumber range: {:.2} - {:.2}", lo, hi);
    }
    if let Some((freq, intens)) = summary.strongest_line {
        println!("Strongest line: {:.2} (intensity {})", freq, intens);
    }
}

#[cfg(feature = "playback")]
fn play(buffer: &PcmBuffer) -> Result<(), AudioError> {
    audio::play_blocking(buffer)
}

#[cfg(not(feature = "playback"))]
fn play(_buffer: &PcmBuffer) -> Result<(), AudioError> {
    Err(AudioError::Playback(
        "this build has no audio output (enable the `playback` feature or use --output)"
            .to_string(),
    ))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(args.config.as_deref())?;
    // Validate parameters before touching the input file
    let params = args.playback_params(&config)?;

    let spectrum = Spectrum::from_table(&args.input)?;

    if args.info {
        print_spectrum_info(&args.input, &spectrum.summary());
        return Ok(());
    }

    tracing::info!(
        "Synthesizing {} lines: {:.2}s @ {}Hz, volume {}%",
        spectrum.len(),
        params.duration(),
        params.sample_rate(),
        params.volume()
    );
    let buffer = audio::synthesize(&spectrum, &params);

    match &args.output {
        Some(path) => audio::write_wav_file(path, &buffer)?,
        None => play(&buffer)?,
    }

    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(err) => {
            eprintln!("\nERROR: {}\n", err);
            match err.downcast_ref::<SpectrumError>() {
                Some(SpectrumError::Io(ref io_err)) if io_err.kind() == io::ErrorKind::NotFound => {
                    eprintln!("Please check that:");
                    eprintln!("1. The file path is correct");
                    eprintln!("2. The file exists");
                    eprintln!("3. You have permission to read the file");
                }
                Some(SpectrumError::Format(_)) | Some(SpectrumError::Parse { .. }) => {
                    eprintln!("The input must be a 2-column, tab-delimited table of numbers!");
                }
                _ => {}
            }
            process::exit(1);
        }
    }
}
