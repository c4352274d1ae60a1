use super::types::{Spectrum, SpectrumError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of columns a spectrum table must have: wavenumber, intensity.
const TABLE_COLUMNS: usize = 2;

impl Spectrum {
    /// Loads a spectrum from a tab-delimited text dump.
    ///
    /// The file is expected to hold one spectral line per row, wavenumber in
    /// the first column and intensity in the second. There is no header row.
    /// Everything from a `#` to the end of its line is a comment, and lines
    /// left blank are ignored.
    ///
    /// # Arguments
    /// * `path` - Path to the table to read
    ///
    /// # Returns
    /// * `Result<Spectrum, SpectrumError>` - The validated spectrum or an error
    ///
    /// # Errors
    /// * If the file cannot be opened or read
    /// * If any row does not have exactly two columns, or the table is empty
    /// * If any cell is not a finite number
    pub fn from_table(path: &Path) -> Result<Spectrum, SpectrumError> {
        let file = File::open(path)?;
        let spectrum = Self::from_reader(file)?;
        tracing::debug!(
            "Loaded {} spectral lines from {}",
            spectrum.len(),
            path.display()
        );
        Ok(spectrum)
    }

    /// Parses a spectrum table from any reader. See [`Spectrum::from_table`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Spectrum, SpectrumError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(reader);

        let mut wavenumbers = Vec::new();
        let mut intensities = Vec::new();

        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            let cells = strip_comment(&record);
            if cells.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if cells.len() != TABLE_COLUMNS {
                return Err(SpectrumError::Format(format!(
                    "the input file must be 2-column tab-delimited (line {} has {} columns)",
                    line,
                    cells.len()
                )));
            }

            wavenumbers.push(parse_cell(cells[0], 1, line)?);
            intensities.push(parse_cell(cells[1], 2, line)?);
        }

        if wavenumbers.is_empty() {
            return Err(SpectrumError::Format(
                "the input file contains no data rows".to_string(),
            ));
        }

        Spectrum::new(wavenumbers, intensities)
    }
}

/// Returns the trimmed cells of a row up to its first `#`.
///
/// A cell cut down to nothing by the comment is dropped, so `100\t1\t# peak`
/// still has two cells.
fn strip_comment(record: &StringRecord) -> Vec<&str> {
    let mut cells = Vec::with_capacity(record.len());
    for field in record.iter() {
        match field.find('#') {
            None => cells.push(field.trim()),
            Some(pos) => {
                let kept = field[..pos].trim();
                if !kept.is_empty() {
                    cells.push(kept);
                }
                break;
            }
        }
    }
    cells
}

fn parse_cell(text: &str, column: usize, line: u64) -> Result<f64, SpectrumError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SpectrumError::Parse {
            line,
            column,
            value: text.to_string(),
        }),
    }
}

fn csv_error(err: csv::Error) -> SpectrumError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => SpectrumError::Io(io_err),
        _ => SpectrumError::Csv(message),
    }
}
