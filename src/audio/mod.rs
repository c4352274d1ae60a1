/// Audio module for turning spectra into sound.
///
/// This module provides functionality to:
/// - Validate and clamp playback parameters
/// - Render a spectrum to a 16-bit PCM clip with additive synthesis
/// - Write clips to (and read them back from) WAV files
/// - Play clips on the default output device (`playback` feature)
#[cfg(feature = "playback")]
mod playback;
mod synthesis;
mod types;
mod wav;

#[cfg(feature = "playback")]
pub use playback::play_blocking;
pub use synthesis::synthesize;
pub use types::{
    AudioError, PcmBuffer, PlaybackParams, DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, DEFAULT_VOLUME,
    MAX_DURATION, MAX_SAMPLE_RATE, MAX_VOLUME, MIN_DURATION, PCM_FULL_SCALE,
};
pub use wav::{read_wav_file, write_wav_file};
