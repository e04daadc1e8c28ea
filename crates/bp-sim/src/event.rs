//! Timeline events and the records handed to observers.

use std::fmt;

use bp_core::{BargeId, TerminalId, Tick};
use bp_schedule::Priority;

/// Payload of the simulation's [`EventQueue`](bp_schedule::EventQueue).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The arrival generator releases the next barge.
    PortArrival,
    TerminalArrival { barge: BargeId, terminal: TerminalId },
    FinishHandling { barge: BargeId, terminal: TerminalId },
    /// A terminal rejected `barge`; it plans again from the current tick.
    Replan { barge: BargeId },
    LeavePort { barge: BargeId },
}

impl Event {
    /// Same-tick tier: state that others read settles first, departures last.
    pub fn priority(&self) -> Priority {
        match self {
            Event::FinishHandling { .. } | Event::Replan { .. } => Priority::First,
            Event::PortArrival | Event::TerminalArrival { .. } => Priority::Normal,
            Event::LeavePort { .. } => Priority::Last,
        }
    }
}

// ── Observer records ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PortArrival,
    TerminalArrival,
    HandlingStarted,
    HandlingFinished,
    Rejected,
    Replanned,
    PortDeparture,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PortArrival => "port_arrival",
            EventKind::TerminalArrival => "terminal_arrival",
            EventKind::HandlingStarted => "handling_started",
            EventKind::HandlingFinished => "handling_finished",
            EventKind::Rejected => "rejected",
            EventKind::Replanned => "replanned",
            EventKind::PortDeparture => "port_departure",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the event log.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub tick:     Tick,
    pub barge:    BargeId,
    pub terminal: Option<TerminalId>,
    pub kind:     EventKind,
    /// Planned time of this moment, where one exists: LAT for a terminal
    /// arrival, LST for a handling start, announced leave time for the
    /// port departure, new leave time for a re-plan.
    pub expected: Option<Tick>,
}

impl EventRecord {
    /// `expected - actual`; positive when early.
    pub fn deviation(&self) -> Option<i64> {
        self.expected.map(|e| e.0 as i64 - self.tick.0 as i64)
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.tick, self.barge, self.kind)?;
        if let Some(t) = self.terminal {
            write!(f, " at {t}")?;
        }
        if let (Some(e), Some(d)) = (self.expected, self.deviation()) {
            write!(f, " (expected {e}, expected - actual = {d})")?;
        }
        Ok(())
    }
}

/// Final statistics of one barge, produced when it leaves the port.
#[derive(Clone, Debug, PartialEq)]
pub struct BargeSummary {
    pub barge:                    BargeId,
    pub arrival:                  Tick,
    pub leave:                    Tick,
    /// Terminals in the order they were actually visited.
    pub visited:                  Vec<TerminalId>,
    /// Sojourn announced by the first plan.
    pub expected_sojourn:         u64,
    pub actual_sojourn:           u64,
    pub waiting:                  u64,
    pub handling:                 u64,
    pub sailing:                  u64,
    /// Leave time announced by the first plan.
    pub expected_leave:           Tick,
    /// `expected_leave - leave`.
    pub leave_deviation:          i64,
    pub waiting_fraction:         f64,
    pub information_satisfaction: u8,
    pub waiting_satisfaction:     u8,
    pub replans:                  u32,
}
