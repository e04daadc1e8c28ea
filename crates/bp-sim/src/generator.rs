//! Random barge arrivals for port-level runs.

use bp_core::{CoreError, CoreResult, SimRng, TerminalId};
use bp_route::MAX_STOPS;

/// Distribution parameters for generated barges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalProfile {
    /// Mean of the exponential inter-arrival time, in ticks.
    pub mean_interarrival: f64,
    /// Mean number of terminals per barge; draws are rounded.
    pub stops_mean:        f64,
    /// Standard deviation of the stop count.
    pub stops_std:         f64,
    /// Upper bound on terminals per barge, at most [`MAX_STOPS`].
    pub max_stops:         usize,
    /// Mean planned handling per terminal, in ticks; rounded and floored at
    /// the configured minimum.
    pub handling_mean:     f64,
    /// Standard deviation of the handling time, in ticks.
    pub handling_std:      f64,
}

impl Default for ArrivalProfile {
    fn default() -> Self {
        Self {
            mean_interarrival: 30.0,
            stops_mean:        5.0,
            stops_std:         1.0,
            max_stops:         8,
            handling_mean:     30.0,
            handling_std:      10.0,
        }
    }
}

impl ArrivalProfile {
    /// Reject profiles that would stall the clock or overflow the route
    /// solver.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.mean_interarrival.is_finite() && self.mean_interarrival > 0.0) {
            return Err(CoreError::Config(format!(
                "mean inter-arrival time must be positive, got {}",
                self.mean_interarrival
            )));
        }
        for (name, mean, std) in [
            ("stops", self.stops_mean, self.stops_std),
            ("handling", self.handling_mean, self.handling_std),
        ] {
            if !mean.is_finite() || !std.is_finite() || std < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} distribution needs a finite mean and non-negative std, got ({mean}, {std})"
                )));
            }
        }
        if !(1..=MAX_STOPS).contains(&self.max_stops) {
            return Err(CoreError::Config(format!(
                "max_stops must be in 1..={MAX_STOPS}, got {}",
                self.max_stops
            )));
        }
        Ok(())
    }
}

/// A generated barge: terminals to visit and planned handling per terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub itinerary: Vec<TerminalId>,
    pub handling:  Vec<u64>,
}

/// Draws inter-arrival gaps and itineraries from its own RNG stream.
pub struct ArrivalGenerator {
    profile:    ArrivalProfile,
    rng:        SimRng,
    candidates: Vec<TerminalId>,
}

impl ArrivalGenerator {
    /// `terminal_count` includes the port, which is never drawn.
    pub fn new(profile: ArrivalProfile, rng: SimRng, terminal_count: usize) -> Self {
        let candidates = (1..terminal_count as u32).map(TerminalId).collect();
        Self { profile, rng, candidates }
    }

    pub fn profile(&self) -> &ArrivalProfile {
        &self.profile
    }

    /// Ticks until the next barge enters the port.
    pub fn next_gap(&mut self) -> u64 {
        self.rng.exponential_ticks(self.profile.mean_interarrival)
    }

    /// Draw the next barge.  Handling times are floored at `min_handling`.
    pub fn next_arrival(&mut self, min_handling: u64) -> Arrival {
        let cap = self.profile.max_stops.min(MAX_STOPS).min(self.candidates.len());
        let drawn = self.rng.normal_ticks(self.profile.stops_mean, self.profile.stops_std, 1);
        let count = (drawn as usize).clamp(cap.min(1), cap);

        self.rng.shuffle(&mut self.candidates);
        let itinerary: Vec<TerminalId> = self.candidates[..count].to_vec();
        let handling = (0..count)
            .map(|_| {
                self.rng
                    .normal_ticks(self.profile.handling_mean, self.profile.handling_std, min_handling)
            })
            .collect();

        Arrival { itinerary, handling }
    }
}
