//! The `OutputWriter` trait implemented by output backends.

use crate::{BargeRow, EventRow, OutputResult};

/// Sink for the event log and per-barge rows.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_barge(&mut self, row: &BargeRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
