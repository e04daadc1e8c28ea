//! The `MaxWait` seam between waiting profiles and the route solver.

use crate::Tick;

/// Anything that can answer "if a barge arrives at `arrival`, how long may it
/// wait before handling has to start?".
///
/// Implementations must return the same value for the same input for the
/// lifetime of one solve.
pub trait MaxWait {
    fn max_waiting_time(&self, arrival: Tick) -> u64;
}

/// A profile that never permits waiting.  Used for the port boundary and
/// in tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoWait;

impl MaxWait for NoWait {
    #[inline]
    fn max_waiting_time(&self, _arrival: Tick) -> u64 {
        0
    }
}

impl<W: MaxWait + ?Sized> MaxWait for &W {
    #[inline]
    fn max_waiting_time(&self, arrival: Tick) -> u64 {
        (**self).max_waiting_time(arrival)
    }
}
