/// A measured Raman spectrum: paired wavenumbers and intensities.
///
/// The two sequences always have the same length. Once built, a spectrum
/// cannot be modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    wavenumbers: Vec<f64>,
    intensities: Vec<f64>,
}

/// Overview of a spectrum, as printed by the CLI `--info` flag
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSummary {
    /// Number of spectral lines
    pub lines: usize,
    /// Smallest and largest wavenumber, if any lines exist
    pub wavenumber_range: Option<(f64, f64)>,
    /// Wavenumber and intensity of the line with the largest |intensity|
    pub strongest_line: Option<(f64, f64)>,
}

/// Errors that can occur while loading a spectrum
#[derive(Debug, thiserror::Error)]
pub enum SpectrumError {
    /// IO errors when reading the input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The table does not have the expected two-column shape
    #[error("Format error: {0}")]
    Format(String),

    /// A cell could not be read as a finite number
    #[error("Parse error on line {line}, column {column}: '{value}' is not a finite number")]
    Parse {
        line: u64,
        column: usize,
        value: String,
    },

    /// Low-level errors from the table reader
    #[error("Table read error: {0}")]
    Csv(String),
}

impl Spectrum {
    /// Builds a spectrum from matching wavenumber and intensity sequences.
    ///
    /// # Errors
    /// * `SpectrumError::Format` if the sequences differ in length
    pub fn new(wavenumbers: Vec<f64>, intensities: Vec<f64>) -> Result<Self, SpectrumError> {
        if wavenumbers.len() != intensities.len() {
            return Err(SpectrumError::Format(format!(
                "wavenumber and intensity columns must have matching lengths ({} vs {})",
                wavenumbers.len(),
                intensities.len()
            )));
        }

        Ok(Spectrum {
            wavenumbers,
            intensities,
        })
    }

    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    /// Iterates over `(wavenumber, intensity)` pairs in file order.
    pub fn lines(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavenumbers
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.wavenumbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavenumbers.is_empty()
    }

    pub fn summary(&self) -> SpectrumSummary {
        let wavenumber_range = self.lines().fold(None, |range, (freq, _)| match range {
            None => Some((freq, freq)),
            Some((lo, hi)) => Some((f64::min(lo, freq), f64::max(hi, freq))),
        });

        let strongest_line = self.lines().fold(None, |best: Option<(f64, f64)>, line| {
            match best {
                Some(b) if b.1.abs() >= line.1.abs() => Some(b),
                _ => Some(line),
            }
        });

        SpectrumSummary {
            lines: self.len(),
            wavenumber_range,
            strongest_line,
        }
    }
}
