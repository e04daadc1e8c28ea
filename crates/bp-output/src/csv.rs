//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `events.csv`
//! - `barges.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{BargeRow, EventRow, OutputResult};

pub const EVENT_HEADER: [&str; 6] = ["tick", "barge", "terminal", "event", "expected", "deviation"];

pub const BARGE_HEADER: [&str; 14] = [
    "barge",
    "arrival",
    "leave",
    "visited",
    "expected_sojourn",
    "actual_sojourn",
    "waiting",
    "handling",
    "sailing",
    "leave_deviation",
    "waiting_fraction",
    "information_satisfaction",
    "waiting_satisfaction",
    "replans",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events:   Writer<File>,
    barges:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        let mut barges = Writer::from_path(dir.join("barges.csv"))?;
        barges.write_record(BARGE_HEADER)?;

        Ok(Self { events, barges, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.barge.to_string(),
            opt(row.terminal),
            row.kind.to_owned(),
            opt(row.expected),
            opt(row.deviation),
        ])?;
        Ok(())
    }

    fn write_barge(&mut self, row: &BargeRow) -> OutputResult<()> {
        let visited: Vec<String> = row.visited.iter().map(u32::to_string).collect();
        self.barges.write_record(&[
            row.barge.to_string(),
            row.arrival.to_string(),
            row.leave.to_string(),
            visited.join(";"),
            row.expected_sojourn.to_string(),
            row.actual_sojourn.to_string(),
            row.waiting.to_string(),
            row.handling.to_string(),
            row.sailing.to_string(),
            row.leave_deviation.to_string(),
            format!("{:.3}", row.waiting_fraction),
            row.information_satisfaction.to_string(),
            row.waiting_satisfaction.to_string(),
            row.replans.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.barges.flush()?;
        Ok(())
    }
}
