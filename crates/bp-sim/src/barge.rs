//! Per-barge planning state.
//!
//! A barge owns its remaining itinerary (local node 0 is always the port),
//! the sub-matrix restricted to that itinerary, one waiting profile per
//! local node, and the rotation it is currently sailing.  Planning is the
//! only operation that touches terminal state from here: it withdraws the
//! barge's old appointments and registers the new ones.

use rustc_hash::FxHashMap;
use tracing::debug;

use bp_core::{BargeId, SlackPolicy, TerminalId, Tick};
use bp_network::SailingMatrix;
use bp_route::{derive_legs, Leg, Rotation, RouteSolver};
use bp_terminal::{Terminal, WaitingProfile};

use crate::{SimError, SimResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BargeState {
    #[default]
    Sailing,
    Waiting,
    Handling,
    Left,
}

/// Appointment the barge currently holds at one terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlannedSlot {
    pub lat: Tick,
    pub lst: Tick,
}

/// Where the barge sails next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NextLeg {
    Terminal { terminal: TerminalId, planned_sail: u64 },
    Exit { planned_sail: u64 },
}

#[derive(Clone, Debug)]
pub struct Barge {
    pub id:           BargeId,
    /// Port arrival.
    pub arrival:      Tick,
    state:            BargeState,

    // ── Plan ──────────────────────────────────────────────────────────────
    /// Remaining stops; `itinerary[0]` is always the port.
    itinerary:        Vec<TerminalId>,
    handling:         Vec<u64>,
    matrix:           Option<SailingMatrix>,
    profiles:         Vec<WaitingProfile>,
    rotation:         Option<Rotation>,
    /// Index into `rotation.legs` of the leg being sailed or served.
    cursor:           usize,
    slots:            FxHashMap<TerminalId, PlannedSlot>,

    // ── Outcome ───────────────────────────────────────────────────────────
    visited:          Vec<TerminalId>,
    sailing:          u64,
    handled:          u64,
    expected_leave:   Option<Tick>,
    expected_sojourn: u64,
    replans:          u32,
}

impl Barge {
    /// Validate an itinerary and create an unplanned barge.
    ///
    /// `itinerary` lists the terminals to visit (port excluded) and
    /// `handling[i]` is the planned handling time at `itinerary[i]`.
    pub fn new(
        id:        BargeId,
        arrival:   Tick,
        itinerary: Vec<TerminalId>,
        handling:  Vec<u64>,
    ) -> SimResult<Self> {
        if handling.len() != itinerary.len() {
            return Err(SimError::LengthMismatch {
                expected: itinerary.len(),
                got:      handling.len(),
                what:     "handling times",
            });
        }
        for (i, t) in itinerary.iter().enumerate() {
            if t.is_port() {
                return Err(SimError::Itinerary(format!("{id} lists the port as a stop")));
            }
            if itinerary[..i].contains(t) {
                return Err(SimError::Itinerary(format!("{id} visits {t} twice")));
            }
        }

        let mut stops = Vec::with_capacity(itinerary.len() + 1);
        stops.push(TerminalId::PORT);
        stops.extend(itinerary);
        let mut times = Vec::with_capacity(handling.len() + 1);
        times.push(0);
        times.extend(handling);

        Ok(Self {
            id,
            arrival,
            state:            BargeState::Sailing,
            itinerary:        stops,
            handling:         times,
            matrix:           None,
            profiles:         Vec::new(),
            rotation:         None,
            cursor:           0,
            slots:            FxHashMap::default(),
            visited:          Vec::new(),
            sailing:          0,
            handled:          0,
            expected_leave:   None,
            expected_sojourn: 0,
            replans:          0,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> BargeState {
        self.state
    }

    /// Terminals not yet handled, port excluded.
    pub fn remaining(&self) -> &[TerminalId] {
        &self.itinerary[1..]
    }

    pub fn rotation(&self) -> Option<&Rotation> {
        self.rotation.as_ref()
    }

    pub fn profiles(&self) -> &[WaitingProfile] {
        &self.profiles
    }

    /// Appointment held at `terminal`, if any.
    pub fn slot(&self, terminal: TerminalId) -> Option<PlannedSlot> {
        self.slots.get(&terminal).copied()
    }

    pub fn visited(&self) -> &[TerminalId] {
        &self.visited
    }

    pub fn sailing_total(&self) -> u64 {
        self.sailing
    }

    pub fn handling_total(&self) -> u64 {
        self.handled
    }

    /// Leave time announced by the first plan.
    pub fn expected_leave(&self) -> Option<Tick> {
        self.expected_leave
    }

    pub fn expected_sojourn(&self) -> u64 {
        self.expected_sojourn
    }

    pub fn replans(&self) -> u32 {
        self.replans
    }

    /// Terminal of the leg currently being sailed or served.
    pub fn current_terminal(&self) -> Option<TerminalId> {
        let leg = self.rotation.as_ref()?.legs.get(self.cursor)?;
        Some(self.itinerary[leg.stop])
    }

    /// Planned handling time at `terminal`.
    pub fn planned_handling(&self, terminal: TerminalId) -> Option<u64> {
        let i = self.itinerary.iter().position(|&t| t == terminal)?;
        Some(self.handling[i])
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Plan (or re-plan) the rotation over the remaining terminals as seen
    /// at `now`.
    ///
    /// Withdraws every appointment this barge holds, forgets visited
    /// terminals, solves the route against fresh waiting profiles, then
    /// registers the chained appointments along the chosen order.  The plan
    /// always starts from local node 0.
    pub fn plan(
        &mut self,
        now:       Tick,
        terminals: &mut [Terminal],
        network:   &SailingMatrix,
        slack:     SlackPolicy,
        solver:    &mut RouteSolver,
    ) -> SimResult<&Rotation> {
        for &t in &self.itinerary[1..] {
            terminal_mut(terminals, t)?.remove_appointment(self.id);
        }
        self.slots.clear();

        let (itinerary, handling): (Vec<TerminalId>, Vec<u64>) = self
            .itinerary
            .iter()
            .zip(&self.handling)
            .filter(|(t, _)| !self.visited.contains(t))
            .map(|(&t, &h)| (t, h))
            .unzip();
        self.itinerary = itinerary;
        self.handling = handling;

        let matrix = network.restrict(&self.itinerary)?;
        let mut profiles = Vec::with_capacity(self.itinerary.len());
        for (i, &t) in self.itinerary.iter().enumerate() {
            let terminal = terminals.get(t.index()).ok_or(SimError::UnknownTerminal(t))?;
            profiles.push(terminal.waiting_profile(self.handling[i], now, slack));
        }

        let rotation = solver.solve(&matrix, &self.handling, &profiles, now)?;
        let legs = derive_legs(&matrix, &self.handling, &profiles, now, &rotation.stops());
        debug_assert_eq!(legs, rotation.legs);

        for Leg { stop, lat, lst } in &legs {
            let t = self.itinerary[*stop];
            terminal_mut(terminals, t)?.add_appointment(self.id, *lat, *lst, self.handling[*stop]);
            self.slots.insert(t, PlannedSlot { lat: *lat, lst: *lst });
        }

        if self.expected_leave.is_none() {
            self.expected_leave = Some(rotation.leave_time);
            self.expected_sojourn = rotation.leave_time.saturating_since(self.arrival);
        }
        debug!(
            barge = %self.id,
            %now,
            leave = %rotation.leave_time,
            stops = legs.len(),
            "planned rotation"
        );

        self.matrix = Some(matrix);
        self.profiles = profiles;
        self.cursor = 0;
        self.state = BargeState::Sailing;
        Ok(self.rotation.insert(rotation))
    }

    /// Count a re-plan triggered by a rejection.
    pub(crate) fn note_replan(&mut self) {
        self.replans += 1;
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Leg to sail from the current position.  After the last terminal this
    /// is the return to the port exit.
    pub fn next_leg(&self) -> Option<NextLeg> {
        let rotation = self.rotation.as_ref()?;
        let matrix = self.matrix.as_ref()?;
        let from = match self.cursor.checked_sub(1) {
            Some(prev) => rotation.legs[prev].stop,
            None => 0,
        };
        Some(match rotation.legs.get(self.cursor) {
            Some(leg) => NextLeg::Terminal {
                terminal:     self.itinerary[leg.stop],
                planned_sail: matrix.cost_at(from, leg.stop),
            },
            None => NextLeg::Exit { planned_sail: matrix.cost_at(from, 0) },
        })
    }

    pub(crate) fn set_state(&mut self, state: BargeState) {
        self.state = state;
    }

    pub(crate) fn add_sailing(&mut self, ticks: u64) {
        self.sailing += ticks;
    }

    pub(crate) fn add_handling(&mut self, ticks: u64) {
        self.handled += ticks;
    }

    /// Handling at `terminal` is done; advance to the next leg.
    pub(crate) fn finish_at(&mut self, terminal: TerminalId) {
        self.visited.push(terminal);
        self.slots.remove(&terminal);
        self.cursor += 1;
        self.state = BargeState::Sailing;
    }
}

fn terminal_mut(terminals: &mut [Terminal], id: TerminalId) -> SimResult<&mut Terminal> {
    terminals.get_mut(id.index()).ok_or(SimError::UnknownTerminal(id))
}
