//! CSV dataset loading and splitting
//!
//! Reads comma-separated rows into [`Row`]s (numeric fields become
//! numbers, everything else a category) and provides deterministic
//! shuffling and train/test splitting.

use mltools_tree::{Row, Value};
use std::io::Read;
use std::path::Path;

use crate::deterministic;
use crate::errors::{Result, TrainerError};

/// CSV parsing options
#[derive(Clone, Debug)]
pub struct CsvOptions {
    /// Treat the first record as column names
    pub has_headers: bool,
    pub delimiter: u8,
    /// Skip records starting with this byte (off by default)
    pub comment: Option<u8>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: b',',
            comment: None,
        }
    }
}

/// Rows read from a CSV source
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedCsv {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Row>,
}

impl LoadedCsv {
    /// Number of fields per row
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Load a CSV file.
/// Blank lines are skipped, comment lines only when [`CsvOptions::comment`]
/// is set; every data row must have as many fields as the first one (or
/// the header).
pub fn load_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<LoadedCsv> {
    let file = std::fs::File::open(path.as_ref())?;
    parse_csv_reader(file, options)
}

/// Parse CSV data from any reader
pub fn parse_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<LoadedCsv> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .comment(options.comment)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Option<Vec<String>> = if options.has_headers {
        Some(reader.headers()?.iter().map(str::to_string).collect())
    } else {
        None
    };

    let mut expected = headers.as_ref().map(Vec::len);
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let width = *expected.get_or_insert(record.len());
        if record.len() != width {
            return Err(TrainerError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }
        rows.push(record.iter().map(Value::parse_field).collect());
    }

    if rows.is_empty() {
        return Err(TrainerError::Dataset("CSV contains no data rows".to_string()));
    }

    Ok(LoadedCsv { headers, rows })
}

/// Deterministically shuffle rows using seed
pub fn shuffle_rows(rows: &mut [Row], seed: u64) {
    deterministic::shuffle(rows, seed);
}

/// Split rows into `(train, test)`, moving the trailing
/// `round(len * test_fraction)` rows into the test set. At least one row
/// always stays in the training set.
pub fn train_test_split(mut rows: Vec<Row>, test_fraction: f64) -> Result<(Vec<Row>, Vec<Row>)> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(TrainerError::Dataset(format!(
            "test fraction must be in [0, 1), got {}",
            test_fraction
        )));
    }
    if rows.is_empty() {
        return Err(TrainerError::Dataset("cannot split an empty dataset".to_string()));
    }

    let test_len = ((rows.len() as f64 * test_fraction).round() as usize).min(rows.len() - 1);
    let test = rows.split_off(rows.len() - test_len);
    Ok((rows, test))
}
