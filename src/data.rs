//! Delimited-text dataset loader.
//!
//! Each data line holds `input_columns` feature values followed by
//! `target_columns` label values. Header lines are skipped by count. Rows with
//! the wrong number of columns, an empty interior cell, or a cell that is not a
//! number are skipped with a warning, never truncated or padded, so every
//! sample handed to the network has the configured widths. A single trailing
//! delimiter is tolerated.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shape of a delimited data file.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct CsvLayout {
    /// Number of leading lines to discard.
    pub skip_lines: usize,
    pub input_columns: usize,
    pub target_columns: usize,
    pub delimiter: char,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            skip_lines: 4,
            input_columns: 576,
            target_columns: 3,
            delimiter: ',',
        }
    }
}

impl CsvLayout {
    pub fn new(skip_lines: usize, input_columns: usize, target_columns: usize) -> Self {
        Self {
            skip_lines,
            input_columns,
            target_columns,
            ..Self::default()
        }
    }

    #[inline]
    pub fn row_width(&self) -> usize {
        self.input_columns + self.target_columns
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_columns == 0 || self.target_columns == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "layout needs at least one input and one target column, got {} and {}",
                self.input_columns, self.target_columns
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(Error::InvalidConfiguration(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Parallel feature/label vectors read from a data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
    skipped: usize,
}

impl Dataset {
    #[inline]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    #[inline]
    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    #[inline]
    pub fn targets(&self) -> &[Vec<f64>] {
        &self.targets
    }

    /// Number of data rows rejected as malformed.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Load a dataset from a file.
pub fn load_csv<P: AsRef<Path>>(path: P, layout: &CsvLayout) -> Result<Dataset> {
    let p = path.as_ref();
    let file =
        File::open(p).map_err(|e| Error::Io(format!("failed to open {}: {e}", p.display())))?;
    parse_csv(file, layout)
}

/// Parse a dataset from any reader.
pub fn parse_csv<R: Read>(reader: R, layout: &CsvLayout) -> Result<Dataset> {
    layout.validate()?;

    // Cells are numeric; a stray quote in a header must not swallow later lines.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(layout.delimiter as u8)
        .trim(Trim::All)
        .from_reader(reader);

    let mut data = Dataset::default();
    let width = layout.row_width();
    let skip_lines = layout.skip_lines as u64;

    for result in rdr.byte_records() {
        let record = result.map_err(read_error)?;
        let line_no = record.position().map_or(0, |pos| pos.line());
        if line_no <= skip_lines || is_blank(&record) {
            continue;
        }

        let row = match parse_record(&record) {
            Ok(row) => row,
            Err(col) => {
                warn!("line {line_no} skipped: column {col} is not a number");
                data.skipped += 1;
                continue;
            }
        };
        if row.len() != width {
            warn!(
                "line {line_no} skipped: {} columns, expected {width}",
                row.len()
            );
            data.skipped += 1;
            continue;
        }

        let (input, target) = row.split_at(layout.input_columns);
        data.inputs.push(input.to_vec());
        data.targets.push(target.to_vec());
    }

    Ok(data)
}

fn read_error(err: csv::Error) -> Error {
    if err.is_io_error() {
        Error::Io(format!("failed to read data: {err}"))
    } else {
        Error::InvalidData(format!("malformed data: {err}"))
    }
}

// Whitespace-only lines come through as one empty field.
fn is_blank(record: &ByteRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

/// Parse every cell of `record`, returning the 1-based column of the first
/// cell that is empty or not a number.
fn parse_record(record: &ByteRecord) -> std::result::Result<Vec<f64>, usize> {
    let mut cells = record.len();
    if cells > 1 && record[cells - 1].is_empty() {
        cells -= 1;
    }
    record
        .iter()
        .take(cells)
        .enumerate()
        .map(|(idx, cell)| parse_cell(cell).ok_or(idx + 1))
        .collect()
}

fn parse_cell(cell: &[u8]) -> Option<f64> {
    std::str::from_utf8(cell).ok()?.parse().ok()
}
