use super::types::{PcmBuffer, PlaybackParams};
use crate::spectrum::Spectrum;
use std::f64::consts::PI;

/// Renders a spectrum as a mono 16-bit clip using additive synthesis.
///
/// This function performs the following steps:
/// 1. Builds a time axis of `floor(duration * sample_rate)` points over `[0, duration)`
/// 2. Adds `intensity * sin(2π * wavenumber * t)` for every spectral line
/// 3. Scales the sum so its peak reaches `volume` percent of full scale
/// 4. Truncates to signed 16-bit samples
///
/// Wavenumbers are used directly as frequencies in Hz. Normalization uses the
/// peak of the summed waveform, so a dominant line leaves minor lines quiet.
///
/// # Arguments
/// * `spectrum` - The spectral lines to render
/// * `params` - Duration, sample rate and volume of the clip
///
/// # Returns
/// * `PcmBuffer` - The rendered clip. An all-zero waveform (no lines, zero
///   intensities) or one that overflows `f64` comes back as silence.
pub fn synthesize(spectrum: &Spectrum, params: &PlaybackParams) -> PcmBuffer {
    let sample_count = params.sample_count();
    let sample_rate = params.sample_rate();

    let waveform = accumulate_lines(spectrum, params.duration(), sample_count);

    let peak = waveform.iter().fold(0.0_f64, |max, s| max.max(s.abs()));
    if peak == 0.0 || waveform.iter().any(|s| !s.is_finite()) {
        tracing::warn!(
            "Spectrum with {} lines produced a silent or overflowing waveform; output will be silence",
            spectrum.len()
        );
        return PcmBuffer::silent(sample_count, sample_rate);
    }

    // s / peak stays within [-1, 1] even when the peak is subnormal
    let amplitude = params.peak_amplitude();
    tracing::debug!(
        "Normalizing {} samples: peak {:.4e} -> {:.1}",
        sample_count,
        peak,
        amplitude
    );

    PcmBuffer {
        samples: waveform
            .iter()
            .map(|&s| (s / peak * amplitude) as i16)
            .collect(),
        sample_rate,
    }
}

/// Sums one sinusoid per spectral line over a half-open time axis.
fn accumulate_lines(spectrum: &Spectrum, duration: f64, sample_count: usize) -> Vec<f64> {
    let mut waveform = vec![0.0_f64; sample_count];
    if sample_count == 0 {
        return waveform;
    }

    let step = duration / sample_count as f64;
    for (freq, intens) in spectrum.lines() {
        let omega = 2.0 * PI * freq;
        for (i, sample) in waveform.iter_mut().enumerate() {
            let t = i as f64 * step;
            *sample += intens * (omega * t).sin();
        }
    }

    waveform
}
