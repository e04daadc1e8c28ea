//! Solver output and the appointment chaining rule.

use bp_core::{MaxWait, Tick};
use bp_network::SailingMatrix;

/// One planned visit: arrive no later than `lat`, start no later than `lst`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    /// Local node index (1-based; 0 is the port).
    pub stop: usize,
    pub lat:  Tick,
    pub lst:  Tick,
}

/// Best visiting order found for one barge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotation {
    pub legs:         Vec<Leg>,
    /// Time the plan starts (port arrival, or re-plan time).
    pub start:        Tick,
    /// Time the barge is back at the port exit.
    pub leave_time:   Tick,
    /// Planned sailing including the return leg.
    pub sailing_time: u64,
}

impl Rotation {
    /// Visiting order, port excluded.
    pub fn stops(&self) -> Vec<usize> {
        self.legs.iter().map(|l| l.stop).collect()
    }

    /// Full route including the port at both ends.
    pub fn route(&self) -> Vec<usize> {
        let mut r = Vec::with_capacity(self.legs.len() + 2);
        r.push(0);
        r.extend(self.legs.iter().map(|l| l.stop));
        r.push(0);
        r
    }

    pub fn sojourn(&self) -> u64 {
        self.leave_time.saturating_since(self.start)
    }
}

/// Chain appointments along `order` starting at `start`:
///
/// ```text
/// lat       = departure + sail(prev, stop)
/// lst       = lat + wait_stop(lat)
/// departure = lst + handling(stop)
/// ```
///
/// `order` holds local node indices without the port.
pub fn derive_legs<W: MaxWait>(
    matrix:   &SailingMatrix,
    handling: &[u64],
    profiles: &[W],
    start:    Tick,
    order:    &[usize],
) -> Vec<Leg> {
    let mut legs = Vec::with_capacity(order.len());
    let mut departure = start;
    let mut prev = 0;
    for &stop in order {
        let lat = departure + matrix.cost_at(prev, stop);
        let lst = lat + profiles[stop].max_waiting_time(lat);
        legs.push(Leg { stop, lat, lst });
        departure = lst + handling[stop];
        prev = stop;
    }
    legs
}
