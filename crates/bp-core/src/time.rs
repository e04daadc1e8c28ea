//! Simulation time model.
//!
//! Time is an integer `Tick` counter (one tick = one simulated minute in the
//! bundled demo, but nothing here depends on the unit).  Integer ticks keep
//! appointment arithmetic exact and comparisons O(1).
//!
//! `Tick::INFINITY` closes the last start interval of a waiting profile.
//! Every helper that can meet it saturates instead of wrapping, so an
//! "infinite" end never turns into a small number.

use std::fmt;

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Open upper bound of an interval.
    pub const INFINITY: Tick = Tick(u64::MAX);

    #[inline]
    pub fn is_infinite(self) -> bool {
        self == Self::INFINITY
    }

    /// Return the tick `n` steps after `self`, saturating at `INFINITY`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `self - n`, or `None` when that would precede tick 0.
    /// `INFINITY` stays infinite.
    #[inline]
    pub fn checked_rewind(self, n: u64) -> Option<Tick> {
        if self.is_infinite() {
            return Some(self);
        }
        self.0.checked_sub(n).map(Tick)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            write!(f, "T∞")
        } else {
            write!(f, "T{}", self.0)
        }
    }
}
