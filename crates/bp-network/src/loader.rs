//! CSV sailing-matrix loader.
//!
//! # CSV format
//!
//! Header-less, one row per origin, one column per destination, cells are
//! non-negative integer ticks.  Row and column 0 are the port boundary.
//!
//! ```csv
//! 0,5,7
//! 5,0,4
//! 7,4,0
//! ```
//!
//! Surrounding whitespace is trimmed; blank lines are skipped.

use std::io::Read;
use std::path::Path;

use crate::{NetworkError, NetworkResult, SailingMatrix};

/// Load a square sailing-time matrix from a CSV file.
pub fn load_matrix_csv(path: &Path) -> NetworkResult<SailingMatrix> {
    let file = std::fs::File::open(path).map_err(NetworkError::Io)?;
    load_matrix_reader(file)
}

/// Like [`load_matrix_csv`] but accepts any `Read` source.
pub fn load_matrix_reader<R: Read>(reader: R) -> NetworkResult<SailingMatrix> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<u64>> = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                cell.parse::<u64>().map_err(|_| {
                    NetworkError::Parse(format!(
                        "invalid sailing time {cell:?} at row {row_idx}, column {col}"
                    ))
                })
            })
            .collect::<NetworkResult<Vec<u64>>>()?;
        rows.push(row);
    }

    SailingMatrix::from_rows(rows)
}
