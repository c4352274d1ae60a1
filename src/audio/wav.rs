use super::types::{AudioError, PcmBuffer};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Writes a clip to disk as a mono, 16-bit integer WAV file.
///
/// # Arguments
/// * `path` - Destination file, overwritten if it exists
/// * `buffer` - The clip to write
///
/// # Errors
/// * If the file cannot be created or written
pub fn write_wav_file(path: &Path, buffer: &PcmBuffer) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels: PcmBuffer::CHANNELS,
        sample_rate: buffer.sample_rate,
        bits_per_sample: PcmBuffer::SAMPLE_WIDTH * 8,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| AudioError::Wav(e.to_string()))?;
    for &sample in &buffer.samples {
        writer
            .write_sample(sample)
            .map_err(|e| AudioError::Wav(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| AudioError::Wav(e.to_string()))?;

    tracing::info!(
        "Wrote {} samples ({:.2}s @ {}Hz) to {}",
        buffer.len(),
        buffer.duration_secs(),
        buffer.sample_rate,
        path.display()
    );
    Ok(())
}

/// Reads a mono, 16-bit integer WAV file back into a clip.
///
/// # Errors
/// * If the file cannot be read or parsed
/// * If the file is not mono 16-bit integer PCM
pub fn read_wav_file(path: &Path) -> Result<PcmBuffer, AudioError> {
    let reader = WavReader::open(path).map_err(|e| AudioError::Wav(e.to_string()))?;
    let spec = reader.spec();

    if spec.channels != PcmBuffer::CHANNELS
        || spec.sample_format != SampleFormat::Int
        || spec.bits_per_sample != PcmBuffer::SAMPLE_WIDTH * 8
    {
        return Err(AudioError::Wav(format!(
            "Unsupported WAV format: {} channel(s), {:?} {}-bit",
            spec.channels, spec.sample_format, spec.bits_per_sample
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map_err(|e| AudioError::Wav(e.to_string())))
        .collect::<Result<Vec<i16>, AudioError>>()?;

    Ok(PcmBuffer {
        samples,
        sample_rate: spec.sample_rate,
    })
}
