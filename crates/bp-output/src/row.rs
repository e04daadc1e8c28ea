//! Plain data row types written by output backends.

use bp_sim::{BargeSummary, EventRecord};

/// One line of the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:      u64,
    pub barge:     u32,
    /// `None` for port-level events.
    pub terminal:  Option<u32>,
    pub kind:      &'static str,
    pub expected:  Option<u64>,
    /// `expected - tick`; positive when early.
    pub deviation: Option<i64>,
}

impl From<&EventRecord> for EventRow {
    fn from(r: &EventRecord) -> Self {
        Self {
            tick:      r.tick.0,
            barge:     r.barge.0,
            terminal:  r.terminal.map(|t| t.0),
            kind:      r.kind.as_str(),
            expected:  r.expected.map(|t| t.0),
            deviation: r.deviation(),
        }
    }
}

/// Final statistics of one barge.
#[derive(Debug, Clone, PartialEq)]
pub struct BargeRow {
    pub barge:                    u32,
    pub arrival:                  u64,
    pub leave:                    u64,
    /// Visited terminals in order.
    pub visited:                  Vec<u32>,
    pub expected_sojourn:         u64,
    pub actual_sojourn:           u64,
    pub waiting:                  u64,
    pub handling:                 u64,
    pub sailing:                  u64,
    pub leave_deviation:          i64,
    pub waiting_fraction:         f64,
    pub information_satisfaction: u8,
    pub waiting_satisfaction:     u8,
    pub replans:                  u32,
}

impl From<&BargeSummary> for BargeRow {
    fn from(s: &BargeSummary) -> Self {
        Self {
            barge:                    s.barge.0,
            arrival:                  s.arrival.0,
            leave:                    s.leave.0,
            visited:                  s.visited.iter().map(|t| t.0).collect(),
            expected_sojourn:         s.expected_sojourn,
            actual_sojourn:           s.actual_sojourn,
            waiting:                  s.waiting,
            handling:                 s.handling,
            sailing:                  s.sailing,
            leave_deviation:          s.leave_deviation,
            waiting_fraction:         s.waiting_fraction,
            information_satisfaction: s.information_satisfaction,
            waiting_satisfaction:     s.waiting_satisfaction,
            replans:                  s.replans,
        }
    }
}
