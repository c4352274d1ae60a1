/// Shortest clip that can be synthesized, in seconds
pub const MIN_DURATION: f64 = 0.1;
/// Longest clip that can be synthesized, in seconds
pub const MAX_DURATION: f64 = 5.0;
pub const MAX_VOLUME: i64 = 100;

/// Highest accepted sample rate in Hz; bounds the clip to a few million samples
pub const MAX_SAMPLE_RATE: i64 = 768_000;

pub const DEFAULT_DURATION: f64 = 1.0;
pub const DEFAULT_SAMPLE_RATE: i64 = 44100;
pub const DEFAULT_VOLUME: i64 = 50;

/// Full-scale amplitude of a signed 16-bit sample
pub const PCM_FULL_SCALE: f64 = 32767.0;

/// Parameters for synthesizing and playing a clip.
///
/// Duration and volume are clamped into range on construction; only the
/// sample rate can be rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackParams {
    duration: f64,
    sample_rate: u32,
    volume: u8,
}

/// A mono, signed 16-bit PCM clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    /// Samples in playback order
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

/// Errors that can occur during synthesis, export or playback
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid playback parameters
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Errors while reading or writing WAV files
    #[error("WAV error: {0}")]
    Wav(String),

    /// Errors from the audio output device
    #[error("Playback error: {0}")]
    Playback(String),
}

impl PlaybackParams {
    /// Creates a validated parameter set.
    ///
    /// # Arguments
    /// * `duration` - Clip length in seconds, clamped to [0.1, 5.0]
    /// * `sample_rate` - Sample rate in Hz, must be positive
    /// * `volume` - Peak level in percent of full scale, clamped to [0, 100]
    ///
    /// # Errors
    /// * `AudioError::Config` if the sample rate is not positive or exceeds
    ///   `MAX_SAMPLE_RATE`
    pub fn new(duration: f64, sample_rate: i64, volume: i64) -> Result<Self, AudioError> {
        if sample_rate <= 0 {
            return Err(AudioError::Config(format!(
                "sample rate must be positive (got {})",
                sample_rate
            )));
        }
        if sample_rate > MAX_SAMPLE_RATE {
            return Err(AudioError::Config(format!(
                "sample rate {} is too large (at most {})",
                sample_rate, MAX_SAMPLE_RATE
            )));
        }
        let sample_rate = sample_rate as u32;

        // NaN compares false everywhere and would survive `clamp`
        let duration = if duration.is_nan() {
            MIN_DURATION
        } else {
            duration.clamp(MIN_DURATION, MAX_DURATION)
        };

        Ok(PlaybackParams {
            duration,
            sample_rate,
            volume: volume.clamp(0, MAX_VOLUME) as u8,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Number of samples in the synthesized clip: `floor(duration * sample_rate)`
    pub fn sample_count(&self) -> usize {
        (self.duration * self.sample_rate as f64).floor() as usize
    }

    /// Peak sample magnitude the clip is normalized to
    pub fn peak_amplitude(&self) -> f64 {
        self.volume as f64 / 100.0 * PCM_FULL_SCALE
    }
}

impl Default for PlaybackParams {
    fn default() -> Self {
        PlaybackParams {
            duration: DEFAULT_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE as u32,
            volume: DEFAULT_VOLUME as u8,
        }
    }
}

impl PcmBuffer {
    /// Always mono
    pub const CHANNELS: u16 = 1;
    /// Bytes per sample
    pub const SAMPLE_WIDTH: u16 = 2;

    pub fn silent(len: usize, sample_rate: u32) -> Self {
        PcmBuffer {
            samples: vec![0; len],
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Raw little-endian byte stream, the layout audio sinks expect
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}
