//! `bp-output`: simulation output for the barge port simulator.
//!
//! | Type                  | Role                                                |
//! |-----------------------|-----------------------------------------------------|
//! | [`CsvWriter`]         | `events.csv` and `barges.csv` in one directory      |
//! | [`SimOutputObserver`] | `SimObserver` that forwards rows to an `OutputWriter` |
//! | [`RunSummary`]        | `SimObserver` collecting run statistics in memory   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use bp_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{BargeRow, EventRow};
pub use summary::{Descriptive, RunSummary};
pub use writer::OutputWriter;
