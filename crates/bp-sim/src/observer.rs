//! Simulation observer trait for the event log and per-barge statistics.

use bp_core::Tick;

use crate::{BargeSummary, EventRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as events are
/// dispatched.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers only read; nothing they do can
/// change the course of the run.
///
/// # Example: departure counter
///
/// ```rust,ignore
/// struct Departures(usize);
///
/// impl SimObserver for Departures {
///     fn on_barge_left(&mut self, _summary: &BargeSummary) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for every line of the event log, in dispatch order.
    fn on_event(&mut self, _record: &EventRecord) {}

    /// Called once per barge when it leaves the port.
    fn on_barge_left(&mut self, _summary: &BargeSummary) {}

    /// Called once after the last event of the run.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_event(&mut self, record: &EventRecord) {
        (**self).on_event(record);
    }

    fn on_barge_left(&mut self, summary: &BargeSummary) {
        (**self).on_barge_left(summary);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        (**self).on_sim_end(final_tick);
    }
}
