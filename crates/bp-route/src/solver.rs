//! Exact rotation search.
//!
//! Depth-first enumeration over an explicit stack.  Children are pushed in
//! descending node order so that popping visits ascending node order; the
//! shared `path` buffer is truncated back to the popped state's depth before
//! its own leg is appended, so the buffer always holds the route to the
//! state being expanded.
//!
//! Every complete state is closed by the return leg and compared with the
//! incumbent on `(leave_time, sailing_time)`; only a strictly smaller key
//! replaces it, which keeps the first-found rotation among exact ties.

use tracing::trace;

use bp_core::{MaxWait, Tick};
use bp_network::SailingMatrix;

use crate::{Leg, Rotation, RouteError, RouteResult, SearchState};

/// Largest itinerary (port excluded) the solver accepts.  The search is
/// factorial in this number.
pub const MAX_STOPS: usize = 10;

/// Counters from the last [`RouteSolver::solve`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// States popped from the stack (root included).
    pub expanded: u64,
    /// Complete rotations evaluated.
    pub accepted: u64,
}

/// Reusable solver.  Keeps its stack and path buffers between calls.
#[derive(Clone, Debug, Default)]
pub struct RouteSolver {
    stack: Vec<SearchState>,
    path:  Vec<Leg>,
    stats: SolveStats,
}

impl RouteSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Find the best rotation over local nodes `1..matrix.len()`.
    ///
    /// `handling[i]` and `profiles[i]` belong to local node `i`; index 0 is
    /// the port and its entries are never consulted.
    pub fn solve<W: MaxWait>(
        &mut self,
        matrix:   &SailingMatrix,
        handling: &[u64],
        profiles: &[W],
        start:    Tick,
    ) -> RouteResult<Rotation> {
        let nodes = matrix.len();
        if nodes == 0 {
            return Err(RouteError::EmptyProblem);
        }
        if handling.len() != nodes {
            return Err(RouteError::DimensionMismatch {
                what:     "handling times",
                expected: nodes,
                got:      handling.len(),
            });
        }
        if profiles.len() != nodes {
            return Err(RouteError::DimensionMismatch {
                what:     "waiting profiles",
                expected: nodes,
                got:      profiles.len(),
            });
        }
        let stops = nodes - 1;
        if stops > MAX_STOPS {
            return Err(RouteError::TooManyStops { got: stops, max: MAX_STOPS });
        }

        self.stack.clear();
        self.path.clear();
        self.stats = SolveStats::default();

        let mut best: Option<Rotation> = None;
        self.stack.push(SearchState::root(start));

        while let Some(state) = self.stack.pop() {
            self.stats.expanded += 1;

            if state.depth() > 0 {
                self.path.truncate(state.depth() - 1);
                self.path.push(Leg { stop: state.last(), lat: state.lat, lst: state.lst });
            }

            if state.is_complete(stops) {
                self.stats.accepted += 1;
                let back = matrix.cost_at(state.last(), 0);
                let leave_time = state.time + back;
                let sailing_time = state.sailing + back;
                let better = match &best {
                    None => true,
                    Some(b) => (leave_time, sailing_time) < (b.leave_time, b.sailing_time),
                };
                if better {
                    best = Some(Rotation { legs: self.path.clone(), start, leave_time, sailing_time });
                }
                continue;
            }

            let from = state.last();
            for next in (1..nodes).rev() {
                if state.is_visited(next) {
                    continue;
                }
                let sail = matrix.cost_at(from, next);
                let lat = state.time + sail;
                let lst = lat + profiles[next].max_waiting_time(lat);
                let time = lst + handling[next];
                self.stack.push(state.visit(next, sail, lat, lst, time));
            }
        }

        trace!(
            stops,
            expanded = self.stats.expanded,
            accepted = self.stats.accepted,
            "rotation search finished"
        );

        // The root alone is complete when there is nothing to visit, so the
        // search always produces at least one rotation.
        best.ok_or(RouteError::EmptyProblem)
    }
}
