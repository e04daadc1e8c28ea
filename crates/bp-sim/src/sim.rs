//! The `Sim` struct and its event loop.

use tracing::{debug, info};

use bp_core::{BargeId, PortConfig, SimRng, TerminalId, Tick, TravelTimeModel};
use bp_network::SailingMatrix;
use bp_route::RouteSolver;
use bp_schedule::{EventQueue, Scheduled};
use bp_terminal::{Decision, Terminal};

use crate::barge::{BargeState, NextLeg};
use crate::satisfaction::{information_satisfaction, waiting_fraction, waiting_satisfaction};
use crate::{
    Arrival, ArrivalGenerator, Barge, BargeSummary, Event, EventKind, EventRecord, SimError,
    SimObserver, SimResult,
};

/// Observer notifications produced inside handlers, delivered after the
/// handler returns.
enum Notice {
    Event(EventRecord),
    Left(BargeSummary),
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The port simulation.
///
/// Every state change happens inside exactly one event handler.  Handlers
/// never call each other across barges or terminals: a terminal hands back
/// [`Decision`]s and the simulation turns them into scheduled events.  A
/// rejection therefore becomes a [`Event::Replan`] at the current tick with
/// `First` priority rather than a nested call into the barge.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config:    PortConfig,

    /// Full sailing-time matrix indexed by `TerminalId`.
    pub network:   SailingMatrix,

    /// Indexed by `TerminalId`; slot 0 is the port and never holds
    /// appointments.
    pub terminals: Vec<Terminal>,

    /// Indexed by `BargeId`.  Departed barges stay in the registry.
    pub barges:    Vec<Barge>,

    pub queue:     EventQueue<Event>,

    /// Draws perturbed sailing and handling durations.
    pub rng:       SimRng,

    pub generator: Option<ArrivalGenerator>,

    solver:        RouteSolver,
    notices:       Vec<Notice>,
}

impl Sim {
    pub(crate) fn new(
        config:    PortConfig,
        network:   SailingMatrix,
        terminals: Vec<Terminal>,
        rng:       SimRng,
        generator: Option<ArrivalGenerator>,
    ) -> Self {
        Self {
            config,
            network,
            terminals,
            barges:  Vec::new(),
            queue:   EventQueue::new(),
            rng,
            generator,
            solver:  RouteSolver::new(),
            notices: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Tick of the most recently dispatched event.
    pub fn now(&self) -> Tick {
        self.queue.now()
    }

    pub fn barge(&self, id: BargeId) -> Option<&Barge> {
        self.barges.get(id.index())
    }

    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.get(id.index())
    }

    /// Register a barge entering the port at `arrival`, plan its rotation,
    /// and schedule the first leg.
    pub fn create_vessel(
        &mut self,
        arrival:   Tick,
        itinerary: Vec<TerminalId>,
        handling:  Vec<u64>,
    ) -> SimResult<BargeId> {
        if arrival < self.now() {
            return Err(SimError::ArrivalInPast { arrival, now: self.now() });
        }
        let id = BargeId::try_from(self.barges.len())
            .map_err(|_| SimError::Itinerary("barge registry is full".to_owned()))?;

        let mut barge = Barge::new(id, arrival, itinerary, handling)?;
        let rotation = barge.plan(
            arrival,
            &mut self.terminals,
            &self.network,
            self.config.slack,
            &mut self.solver,
        )?;
        debug!(barge = %id, %arrival, leave = %rotation.leave_time, "barge entered port");

        self.barges.push(barge);
        self.note(arrival, id, None, EventKind::PortArrival, None);
        self.sail_next(id, arrival)?;
        Ok(id)
    }

    /// Run until the queue is empty or the next event lies past
    /// `config.end_tick`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            terminals = self.terminals.len().saturating_sub(1),
            admission = ?self.config.admission,
            end = %self.config.end_tick,
            "simulation started"
        );
        self.run_until(self.config.end_tick, observer)?;
        let left = self.barges.iter().filter(|b| b.state() == BargeState::Left).count();
        info!(now = %self.now(), barges = self.barges.len(), left, "simulation finished");
        observer.on_sim_end(self.now());
        Ok(())
    }

    /// Dispatch every event scheduled at or before `until`.
    pub fn run_until<O: SimObserver>(&mut self, until: Tick, observer: &mut O) -> SimResult<()> {
        self.flush(observer);
        while self.queue.next_tick().is_some_and(|t| t <= until) {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Dispatch one event.  Returns `false` when the queue was empty.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<bool> {
        let Some(Scheduled { tick, event, .. }) = self.queue.pop() else {
            self.flush(observer);
            return Ok(false);
        };
        let outcome = self.dispatch(tick, event);
        self.flush(observer);
        outcome.map(|()| true)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch(&mut self, now: Tick, event: Event) -> SimResult<()> {
        match event {
            Event::PortArrival => self.on_port_arrival(now),
            Event::TerminalArrival { barge, terminal } => {
                self.on_terminal_arrival(barge, terminal, now)
            }
            Event::FinishHandling { barge, terminal } => self.on_finish(barge, terminal, now),
            Event::Replan { barge } => self.on_rejection(barge, now),
            Event::LeavePort { barge } => self.on_leave(barge, now),
        }
    }

    fn on_port_arrival(&mut self, now: Tick) -> SimResult<()> {
        let Some(generator) = self.generator.as_mut() else {
            return Ok(());
        };
        let Arrival { itinerary, handling } = generator.next_arrival(self.config.min_handling);
        let next = now + generator.next_gap();
        if next < self.config.end_tick {
            self.schedule(next, Event::PortArrival);
        }
        self.create_vessel(now, itinerary, handling)?;
        Ok(())
    }

    fn on_terminal_arrival(&mut self, id: BargeId, terminal: TerminalId, now: Tick) -> SimResult<()> {
        let barge = self.barges.get_mut(id.index()).ok_or(SimError::UnknownBarge(id))?;
        barge.set_state(BargeState::Waiting);
        let handling = barge.planned_handling(terminal).ok_or(SimError::UnknownTerminal(terminal))?;
        let lat = barge.slot(terminal).map(|s| s.lat);
        debug!(barge = %id, %terminal, %now, "arrived at terminal");
        self.note(now, id, Some(terminal), EventKind::TerminalArrival, lat);

        let decisions = self.terminal_mut(terminal)?.on_arrival(id, handling, now);
        self.apply_decisions(terminal, decisions, now)
    }

    fn on_finish(&mut self, id: BargeId, terminal: TerminalId, now: Tick) -> SimResult<()> {
        let barge = self.barges.get_mut(id.index()).ok_or(SimError::UnknownBarge(id))?;
        let edt = match (barge.slot(terminal), barge.planned_handling(terminal)) {
            (Some(slot), Some(h)) => Some(slot.lst + h),
            _ => None,
        };
        barge.finish_at(terminal);
        debug!(barge = %id, %terminal, %now, "handling finished");
        self.note(now, id, Some(terminal), EventKind::HandlingFinished, edt);
        self.sail_next(id, now)?;

        let decisions = self.terminal_mut(terminal)?.on_finish(id, now);
        self.apply_decisions(terminal, decisions, now)
    }

    /// Re-plan a rejected barge over its unvisited terminals, starting now.
    fn on_rejection(&mut self, id: BargeId, now: Tick) -> SimResult<()> {
        let barge = self.barges.get_mut(id.index()).ok_or(SimError::UnknownBarge(id))?;
        let released: Vec<TerminalId> = barge.remaining().to_vec();
        barge.note_replan();
        let rotation = barge.plan(
            now,
            &mut self.terminals,
            &self.network,
            self.config.slack,
            &mut self.solver,
        )?;
        let leave = rotation.leave_time;
        debug!(barge = %id, %now, %leave, "re-planned after rejection");
        self.note(now, id, None, EventKind::Replanned, Some(leave));
        self.sail_next(id, now)?;

        // Withdrawn appointments may unblock barges held at idle terminals.
        for terminal in released {
            let decisions = self.terminal_mut(terminal)?.on_admission_check(now);
            self.apply_decisions(terminal, decisions, now)?;
        }
        Ok(())
    }

    fn on_leave(&mut self, id: BargeId, now: Tick) -> SimResult<()> {
        let barge = self.barges.get_mut(id.index()).ok_or(SimError::UnknownBarge(id))?;
        barge.set_state(BargeState::Left);

        let actual_sojourn = now.saturating_since(barge.arrival);
        let handling = barge.handling_total();
        let sailing = barge.sailing_total();
        let waiting = actual_sojourn.saturating_sub(handling).saturating_sub(sailing);
        let expected_leave = barge.expected_leave().unwrap_or(now);
        let leave_deviation = expected_leave.0 as i64 - now.0 as i64;

        let summary = BargeSummary {
            barge: id,
            arrival: barge.arrival,
            leave: now,
            visited: barge.visited().to_vec(),
            expected_sojourn: barge.expected_sojourn(),
            actual_sojourn,
            waiting,
            handling,
            sailing,
            expected_leave,
            leave_deviation,
            waiting_fraction: waiting_fraction(waiting, handling),
            information_satisfaction: information_satisfaction(leave_deviation),
            waiting_satisfaction: waiting_satisfaction(waiting, handling),
            replans: barge.replans(),
        };
        debug!(barge = %id, %now, waiting, deviation = leave_deviation, "left port");
        self.note(now, id, None, EventKind::PortDeparture, Some(expected_leave));
        self.notices.push(Notice::Left(summary));
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Turn terminal decisions into scheduled events.
    fn apply_decisions(
        &mut self,
        terminal:  TerminalId,
        decisions: Vec<Decision>,
        now:       Tick,
    ) -> SimResult<()> {
        for decision in decisions {
            match decision {
                Decision::Admit { barge: id, start, handling } => {
                    let actual = realise(
                        self.config.travel_model,
                        &mut self.rng,
                        handling,
                        self.config.min_handling,
                    );
                    let barge = self.barges.get_mut(id.index()).ok_or(SimError::UnknownBarge(id))?;
                    barge.set_state(BargeState::Handling);
                    barge.add_handling(actual);
                    let lst = barge.slot(terminal).map(|s| s.lst);
                    debug!(barge = %id, %terminal, %start, handling = actual, "handling started");
                    self.note(start, id, Some(terminal), EventKind::HandlingStarted, lst);
                    self.schedule(start + actual, Event::FinishHandling { barge: id, terminal });
                }
                Decision::Reject { barge: id } => {
                    debug!(barge = %id, %terminal, %now, "rejected");
                    self.note(now, id, Some(terminal), EventKind::Rejected, None);
                    self.schedule(now, Event::Replan { barge: id });
                }
            }
        }
        Ok(())
    }

    /// Schedule the barge's next sailing leg from its current position.
    fn sail_next(&mut self, id: BargeId, now: Tick) -> SimResult<()> {
        let barge = self.barges.get_mut(id.index()).ok_or(SimError::UnknownBarge(id))?;
        let Some(next) = barge.next_leg() else {
            return Ok(());
        };
        let (planned, event) = match next {
            NextLeg::Terminal { terminal, planned_sail } => {
                (planned_sail, Event::TerminalArrival { barge: id, terminal })
            }
            NextLeg::Exit { planned_sail } => (planned_sail, Event::LeavePort { barge: id }),
        };
        let sail = realise(self.config.travel_model, &mut self.rng, planned, self.config.min_sailing);
        barge.add_sailing(sail);
        barge.set_state(BargeState::Sailing);
        self.schedule(now + sail, event);
        Ok(())
    }

    fn schedule(&mut self, tick: Tick, event: Event) {
        self.queue.push(tick, event.priority(), event);
    }

    fn terminal_mut(&mut self, id: TerminalId) -> SimResult<&mut Terminal> {
        self.terminals.get_mut(id.index()).ok_or(SimError::UnknownTerminal(id))
    }

    fn note(
        &mut self,
        tick:     Tick,
        barge:    BargeId,
        terminal: Option<TerminalId>,
        kind:     EventKind,
        expected: Option<Tick>,
    ) {
        self.notices.push(Notice::Event(EventRecord { tick, barge, terminal, kind, expected }));
    }

    fn flush<O: SimObserver>(&mut self, observer: &mut O) {
        for notice in self.notices.drain(..) {
            match notice {
                Notice::Event(record) => observer.on_event(&record),
                Notice::Left(summary) => observer.on_barge_left(&summary),
            }
        }
    }
}

/// Realised duration of a planned sailing leg or handling.
fn realise(model: TravelTimeModel, rng: &mut SimRng, planned: u64, floor: u64) -> u64 {
    match model {
        TravelTimeModel::Deterministic => planned,
        TravelTimeModel::Stochastic { sigma } => rng.normal_ticks(planned as f64, sigma, floor),
    }
}
