//! Sonification of Raman spectra.
//!
//! A spectrum table is loaded with [`spectrum::Spectrum::from_table`], rendered
//! to a 16-bit clip with [`audio::synthesize`], then played with
//! `audio::play_blocking` or saved with [`audio::write_wav_file`].
pub mod audio;
pub mod config;
pub mod spectrum;
