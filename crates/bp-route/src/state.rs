//! Search state of the rotation solver.
//!
//! The visited set is a `u32` bitmask indexed by local node; bit 0 (the
//! port) is set from the root onwards.  Together with `last` this is the
//! whole combinatorial identity of a partial rotation; `time` and
//! `sailing` are the accumulated costs along the path that reached it.

use bp_core::Tick;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    visited: u32,
    last:    u8,
    depth:   u8,
    /// Departure time from `last` (after handling there).
    pub time:    Tick,
    /// Sailing accumulated so far, excluding the return leg.
    pub sailing: u64,
    /// Arrival time at `last`.
    pub lat:     Tick,
    /// Latest start of handling at `last`.
    pub lst:     Tick,
}

impl SearchState {
    /// The state "at the port, nothing visited yet" at `start`.
    pub fn root(start: Tick) -> Self {
        Self { visited: 1, last: 0, depth: 0, time: start, sailing: 0, lat: start, lst: start }
    }

    #[inline]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited & (1 << node) != 0
    }

    /// Whether all of `1..=stops` have been visited.
    #[inline]
    pub fn is_complete(&self, stops: usize) -> bool {
        let full = (1u32 << (stops + 1)) - 1;
        self.visited == full
    }

    #[inline]
    pub fn last(&self) -> usize {
        self.last as usize
    }

    /// Number of terminals visited (the port does not count).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    pub fn visited_count(&self) -> u32 {
        self.visited.count_ones() - 1
    }

    /// Child state after sailing to `node`.
    pub(crate) fn visit(&self, node: usize, sail: u64, lat: Tick, lst: Tick, time: Tick) -> Self {
        debug_assert!(!self.is_visited(node));
        Self {
            visited: self.visited | (1 << node),
            last:    node as u8,
            depth:   self.depth + 1,
            time,
            sailing: self.sailing + sail,
            lat,
            lst,
        }
    }
}
