/// Spectrum loading for tabulated Raman measurements.
///
/// This module provides functionality to:
/// - Parse two-column, tab-delimited wavenumber/intensity tables
/// - Validate the table shape and the equal-length invariant
/// - Summarize a loaded spectrum for display
mod loader;
mod types;

pub use types::{Spectrum, SpectrumError, SpectrumSummary};
