//! The terminal admission controller.
//!
//! # States
//!
//! ```text
//!            admit                      finish, nobody admissible
//!   Idle ───────────────▶ Handling ───────────────────────────────▶ Idle
//!                            │  ▲
//!                            └──┘ finish, next barge admitted
//! ```
//!
//! Arrivals always join the FIFO queue first.  While the terminal is busy
//! nothing else happens; when it is idle (or just finished) the admission
//! rules of the configured [`AdmissionMode`] pick who starts next.
//!
//! # Reserved-mode rules for one queued barge `b` at time `now`
//!
//! 1. the book holds a single appointment: admit;
//! 2. `b` is the book head and arrived no later than its LAT: admit;
//! 3. `b` is the book head but late: admit if `now + handling` does not pass
//!    the second entry's LST, otherwise reject `b`;
//! 4. `b` is not the head: admit if `now + handling` does not pass the head's
//!    LST, or if the head's LAT has already gone by.
//!
//! Anything else stays queued.  A rescan walks the book in order and
//! admits the first queued barge the rules accept.

use std::collections::VecDeque;

use tracing::debug;

use bp_core::{AdmissionMode, BargeId, SlackPolicy, TerminalId, Tick};

use crate::{Appointment, AppointmentBook, WaitingProfile};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TerminalState {
    #[default]
    Idle,
    Handling,
}

/// A barge that has arrived and is waiting for admission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueuedBarge {
    pub barge:    BargeId,
    /// Actual arrival time at this terminal.
    pub arrived:  Tick,
    /// Planned handling duration, used for the admission checks.
    pub handling: u64,
}

/// Outcome of an admission decision, for the caller to act on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Handling of `barge` starts at `start`.  `handling` is the planned
    /// duration; the caller may perturb it.
    Admit { barge: BargeId, start: Tick, handling: u64 },
    /// `barge` was dropped from the queue and the book and must re-plan.
    Reject { barge: BargeId },
}

enum Check {
    Admit,
    Reject,
    Hold,
}

/// One terminal: appointment book, arrival queue, and service state.
#[derive(Clone, Debug)]
pub struct Terminal {
    pub id:         TerminalId,
    mode:           AdmissionMode,
    book:           AppointmentBook,
    queue:          VecDeque<QueuedBarge>,
    state:          TerminalState,
    handling_count: u32,
}

impl Terminal {
    pub fn new(id: TerminalId, mode: AdmissionMode) -> Self {
        Self {
            id,
            mode,
            book:           AppointmentBook::new(),
            queue:          VecDeque::new(),
            state:          TerminalState::Idle,
            handling_count: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn mode(&self) -> AdmissionMode {
        self.mode
    }

    pub fn book(&self) -> &AppointmentBook {
        &self.book
    }

    pub fn queue(&self) -> impl Iterator<Item = &QueuedBarge> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self) -> TerminalState {
        self.state
    }

    pub fn handling_count(&self) -> u32 {
        self.handling_count
    }

    // ── Appointments ──────────────────────────────────────────────────────

    /// Register an appointment; PST and EDT are derived from `lst`.
    pub fn add_appointment(&mut self, barge: BargeId, lat: Tick, lst: Tick, processing: u64) {
        let pos = self.book.insert(Appointment::new(barge, lat, lst, processing));
        debug!(terminal = %self.id, %barge, %lat, %lst, pos, "appointment registered");
    }

    pub fn remove_appointment(&mut self, barge: BargeId) -> Option<Appointment> {
        self.book.remove(barge)
    }

    /// Waiting profile of this terminal for a barge needing `handling`
    /// ticks, as seen at `now`.
    pub fn waiting_profile(&self, handling: u64, now: Tick, slack: SlackPolicy) -> WaitingProfile {
        if self.id.is_port() {
            return WaitingProfile::Boundary;
        }
        WaitingProfile::build(&self.book, handling, now, slack)
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// `barge` reached the terminal at `now`.
    pub fn on_arrival(&mut self, barge: BargeId, handling: u64, now: Tick) -> Vec<Decision> {
        self.queue.push_back(QueuedBarge { barge, arrived: now, handling });
        let mut out = Vec::new();
        if self.state != TerminalState::Idle {
            return out;
        }
        match self.mode {
            AdmissionMode::Unreserved => self.admit(barge, now, &mut out),
            AdmissionMode::Reserved => match self.check(barge, now) {
                Check::Admit => self.admit(barge, now, &mut out),
                Check::Reject => {
                    self.reject(barge, now, &mut out);
                    self.rescan(now, &mut out);
                }
                Check::Hold => self.rescan(now, &mut out),
            },
        }
        out
    }

    /// Re-evaluate the queue.  Does nothing while a barge is being handled.
    pub fn on_admission_check(&mut self, now: Tick) -> Vec<Decision> {
        let mut out = Vec::new();
        if self.handling_count == 0 {
            self.rescan(now, &mut out);
        }
        out
    }

    /// Handling of `barge` finished at `now`.  Its appointment is dropped
    /// and the next barge, if any, is picked.
    pub fn on_finish(&mut self, barge: BargeId, now: Tick) -> Vec<Decision> {
        self.book.remove(barge);
        self.handling_count = self.handling_count.saturating_sub(1);
        debug!(terminal = %self.id, %barge, %now, "handling finished");

        let mut out = Vec::new();
        self.rescan(now, &mut out);
        out
    }

    // ── Admission logic ───────────────────────────────────────────────────

    fn rescan(&mut self, now: Tick, out: &mut Vec<Decision>) {
        if self.queue.is_empty() {
            self.state = TerminalState::Idle;
            return;
        }
        match self.mode {
            AdmissionMode::Unreserved => {
                if let Some(head) = self.queue.front().map(|q| q.barge) {
                    self.admit(head, now, out);
                }
            }
            AdmissionMode::Reserved => {
                let order: Vec<BargeId> = self.book.iter().map(|a| a.barge).collect();
                for barge in order {
                    if !self.queue.iter().any(|q| q.barge == barge) {
                        continue;
                    }
                    match self.check(barge, now) {
                        Check::Admit => {
                            self.admit(barge, now, out);
                            return;
                        }
                        Check::Reject => self.reject(barge, now, out),
                        Check::Hold => {}
                    }
                }
                self.state = TerminalState::Idle;
            }
        }
    }

    fn check(&self, barge: BargeId, now: Tick) -> Check {
        let Some(queued) = self.queue.iter().find(|q| q.barge == barge) else {
            return Check::Hold;
        };
        let expected_end = now + queued.handling;

        if self.book.len() <= 1 {
            return Check::Admit;
        }
        let Some(head) = self.book.head() else {
            return Check::Admit;
        };

        if head.barge == barge {
            if queued.arrived <= head.lat {
                return Check::Admit;
            }
            match self.book.second() {
                Some(second) if expected_end <= second.lst => Check::Admit,
                _ => Check::Reject,
            }
        } else if expected_end <= head.lst || now > head.lat {
            Check::Admit
        } else {
            Check::Hold
        }
    }

    fn admit(&mut self, barge: BargeId, now: Tick, out: &mut Vec<Decision>) {
        let Some(pos) = self.queue.iter().position(|q| q.barge == barge) else {
            return;
        };
        let Some(queued) = self.queue.remove(pos) else {
            return;
        };
        self.state = TerminalState::Handling;
        self.handling_count += 1;
        debug!(terminal = %self.id, %barge, %now, waited = now.saturating_since(queued.arrived), "admitted");
        out.push(Decision::Admit { barge, start: now, handling: queued.handling });
    }

    fn reject(&mut self, barge: BargeId, now: Tick, out: &mut Vec<Decision>) {
        self.queue.retain(|q| q.barge != barge);
        self.book.remove(barge);
        debug!(terminal = %self.id, %barge, %now, "rejected, barge must re-plan");
        out.push(Decision::Reject { barge });
    }
}
