use super::types::{AudioError, PcmBuffer};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Time left for the device to flush its last buffer after the final sample
const DRAIN_TIME: Duration = Duration::from_millis(150);

/// Slack on top of the clip length before giving up on the device
const COMPLETION_GRACE: Duration = Duration::from_secs(2);

/// Plays a clip on the default output device and blocks until it finishes.
///
/// The device is opened at the clip's sample rate when it supports it.
/// Otherwise the device default rate is used and samples are stepped to
/// match. The mono signal is copied to every device channel.
///
/// # Errors
/// * If no output device is available
/// * If the device sample format is unsupported
/// * If the stream cannot be built or started, or stops early
pub fn play_blocking(buffer: &PcmBuffer) -> Result<(), AudioError> {
    if buffer.is_empty() {
        tracing::warn!("Nothing to play: clip has no samples");
        return Ok(());
    }

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AudioError::Playback("No audio output device found".to_string()))?;

    let supported = choose_config(&device, buffer.sample_rate)?;
    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.into();

    tracing::info!(
        "Audio: {} @ {}Hz, {} channel(s)",
        device.name().unwrap_or_else(|_| "Unknown".to_string()),
        config.sample_rate.0,
        config.channels
    );

    let cursor = PlaybackCursor::new(buffer, config.sample_rate.0);
    let (done_tx, done_rx) = mpsc::channel();

    let stream = match sample_format {
        SampleFormat::I16 => build_stream::<i16>(&device, &config, cursor, done_tx),
        SampleFormat::F32 => build_stream::<f32>(&device, &config, cursor, done_tx),
        SampleFormat::U16 => build_stream::<u16>(&device, &config, cursor, done_tx),
        other => {
            return Err(AudioError::Playback(format!(
                "Unsupported device sample format: {:?}",
                other
            )))
        }
    }
    .map_err(|e| AudioError::Playback(format!("Failed to build audio stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| AudioError::Playback(format!("Failed to start audio stream: {}", e)))?;

    let timeout = Duration::from_secs_f64(buffer.duration_secs()) + COMPLETION_GRACE;
    done_rx.recv_timeout(timeout).map_err(|_| {
        AudioError::Playback("Audio device stopped before playback finished".to_string())
    })?;
    thread::sleep(DRAIN_TIME);

    tracing::debug!("Playback finished");
    Ok(())
}

/// Picks a device config at `sample_rate`, preferring mono and 16-bit.
/// Falls back to the device default when the rate is not supported.
fn choose_config(
    device: &cpal::Device,
    sample_rate: u32,
) -> Result<SupportedStreamConfig, AudioError> {
    let rate = cpal::SampleRate(sample_rate);

    let matching = device
        .supported_output_configs()
        .map_err(|e| AudioError::Playback(format!("Failed to query audio configs: {}", e)))?
        .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
        .filter(|range| {
            matches!(
                range.sample_format(),
                SampleFormat::I16 | SampleFormat::F32 | SampleFormat::U16
            )
        })
        .min_by_key(|range| (range.channels(), range.sample_format() != SampleFormat::I16));

    if let Some(range) = matching {
        return Ok(range.with_sample_rate(rate));
    }

    tracing::debug!(
        "Device does not support {}Hz, falling back to its default rate",
        sample_rate
    );
    device
        .default_output_config()
        .map_err(|e| AudioError::Playback(format!("Failed to get audio config: {}", e)))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut cursor: PlaybackCursor,
    done_tx: mpsc::Sender<()>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = config.channels.max(1) as usize;
    let mut signalled = false;

    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value = match cursor.next_sample() {
                    Some(sample) => T::from_sample(sample),
                    None => T::EQUILIBRIUM,
                };
                frame.iter_mut().for_each(|out| *out = value);
            }

            if cursor.is_finished() && !signalled {
                signalled = true;
                let _ = done_tx.send(());
            }
        },
        |err| tracing::error!("Audio stream error: {}", err),
        None,
    )
}

/// Walks a clip at the device rate, stepping to the nearest earlier source sample.
struct PlaybackCursor {
    samples: Vec<i16>,
    source_rate: u64,
    device_rate: u64,
    frame: u64,
    total_frames: u64,
}

impl PlaybackCursor {
    fn new(buffer: &PcmBuffer, device_rate: u32) -> Self {
        let source_rate = u64::from(buffer.sample_rate.max(1));
        let device_rate = u64::from(device_rate.max(1));
        let total_frames = (buffer.len() as u64 * device_rate).div_ceil(source_rate);

        PlaybackCursor {
            samples: buffer.samples.clone(),
            source_rate,
            device_rate,
            frame: 0,
            total_frames,
        }
    }

    fn next_sample(&mut self) -> Option<i16> {
        if self.is_finished() {
            return None;
        }
        let index = self.frame * self.source_rate / self.device_rate;
        self.frame += 1;
        self.samples.get(index as usize).copied()
    }

    fn is_finished(&self) -> bool {
        self.frame >= self.total_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(cursor: &mut PlaybackCursor) -> Vec<i16> {
        std::iter::from_fn(|| cursor.next_sample()).collect()
    }

    #[test]
    fn test_cursor_same_rate() {
        let buffer = PcmBuffer {
            samples: vec![1, 2, 3, 4],
            sample_rate: 8000,
        };
        let mut cursor = PlaybackCursor::new(&buffer, 8000);
        assert_eq!(drain(&mut cursor), vec![1, 2, 3, 4]);
        assert!(cursor.is_finished());
        assert_eq!(cursor.next_sample(), None);
    }

    #[test]
    fn test_cursor_upsampling_repeats_samples() {
        let buffer = PcmBuffer {
            samples: vec![10, 20, 30],
            sample_rate: 8000,
        };
        let mut cursor = PlaybackCursor::new(&buffer, 16000);
        assert_eq!(drain(&mut cursor), vec![10, 10, 20, 20, 30, 30]);
    }

    #[test]
    fn test_cursor_downsampling_skips_samples() {
        let buffer = PcmBuffer {
            samples: vec![1, 2, 3, 4, 5, 6],
            sample_rate: 48000,
        };
        let mut cursor = PlaybackCursor::new(&buffer, 16000);
        assert_eq!(drain(&mut cursor), vec![1, 4]);
    }

    #[test]
    fn test_cursor_partial_frame_rounds_up() {
        let buffer = PcmBuffer {
            samples: vec![1, 2, 3, 4, 5],
            sample_rate: 44100,
        };
        let mut cursor = PlaybackCursor::new(&buffer, 48000);
        let played = drain(&mut cursor);
        // ceil(5 * 48000 / 44100) = 6 device frames
        assert_eq!(played.len(), 6);
        assert_eq!(played.first(), Some(&1));
        assert_eq!(played.last(), Some(&5));
    }
}
