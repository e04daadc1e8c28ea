//! In-memory run statistics.

use std::fmt;

use bp_core::Tick;
use bp_sim::{BargeSummary, EventKind, EventRecord, SimObserver};

/// Streaming count, mean, sample standard deviation, min and max.
///
/// Mean and variance use Welford's update so long runs do not lose
/// precision.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Descriptive {
    count: u64,
    mean:  f64,
    m2:    f64,
    min:   Option<u64>,
    max:   Option<u64>,
}

impl Descriptive {
    pub fn push(&mut self, value: u64) {
        let x = value as f64;
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// 0 when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation; 0 with fewer than two values.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 { 0.0 } else { (self.m2 / (self.count - 1) as f64).sqrt() }
    }

    pub fn min(&self) -> Option<u64> {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }
}

impl fmt::Display for Descriptive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} mean={:.1} sd={:.1} min={} max={}",
            self.count,
            self.mean(),
            self.std_dev(),
            self.min.unwrap_or(0),
            self.max.unwrap_or(0),
        )
    }
}

/// A [`SimObserver`] that accumulates port-level statistics.
///
/// Barges that entered before `warmup` are counted in the port totals but
/// left out of the descriptive statistics and the satisfaction histograms.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub warmup:           Tick,
    pub entered:          u64,
    pub left:             u64,
    pub rejections:       u64,
    pub expected_sojourn: Descriptive,
    pub actual_sojourn:   Descriptive,
    pub waiting:          Descriptive,
    pub handling:         Descriptive,
    pub sailing:          Descriptive,
    /// `information[s - 1]` counts barges with information satisfaction `s`.
    pub information:      [u64; 7],
    /// `waiting_scores[s - 1]` counts barges with waiting satisfaction `s`.
    pub waiting_scores:   [u64; 7],
    pub final_tick:       Option<Tick>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warmup(warmup: Tick) -> Self {
        Self { warmup, ..Self::default() }
    }

    /// Barges still in the port.
    pub fn in_port(&self) -> u64 {
        self.entered.saturating_sub(self.left)
    }
}

fn bump(histogram: &mut [u64; 7], score: u8) {
    if let Some(slot) = (score as usize).checked_sub(1).and_then(|i| histogram.get_mut(i)) {
        *slot += 1;
    }
}

impl SimObserver for RunSummary {
    fn on_event(&mut self, record: &EventRecord) {
        match record.kind {
            EventKind::PortArrival => self.entered += 1,
            EventKind::Rejected => self.rejections += 1,
            _ => {}
        }
    }

    fn on_barge_left(&mut self, s: &BargeSummary) {
        self.left += 1;
        if s.arrival < self.warmup {
            return;
        }
        self.expected_sojourn.push(s.expected_sojourn);
        self.actual_sojourn.push(s.actual_sojourn);
        self.waiting.push(s.waiting);
        self.handling.push(s.handling);
        self.sailing.push(s.sailing);
        bump(&mut self.information, s.information_satisfaction);
        bump(&mut self.waiting_scores, s.waiting_satisfaction);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.final_tick = Some(final_tick);
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "barges: entered={} left={} in_port={} rejections={}",
            self.entered,
            self.left,
            self.in_port(),
            self.rejections
        )?;
        writeln!(f, "expected sojourn: {}", self.expected_sojourn)?;
        writeln!(f, "actual sojourn:   {}", self.actual_sojourn)?;
        writeln!(f, "waiting:          {}", self.waiting)?;
        writeln!(f, "handling:         {}", self.handling)?;
        writeln!(f, "sailing:          {}", self.sailing)?;
        writeln!(f, "information satisfaction (1..7): {:?}", self.information)?;
        write!(f, "waiting satisfaction (1..7):     {:?}", self.waiting_scores)
    }
}
