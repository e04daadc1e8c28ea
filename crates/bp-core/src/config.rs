//! Run-wide configuration.
//!
//! `PortConfig` is built once per run (from JSON in the demo, or by hand in
//! tests) and handed to the simulation by reference.  Name-based parsing
//! exists for the enumerated options so a bad option name fails fast at
//! startup with [`CoreError::Config`].

use std::str::FromStr;

use crate::{CoreError, CoreResult, Tick};

// ── AdmissionMode ─────────────────────────────────────────────────────────────

/// How a terminal decides whether an arriving barge may start handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdmissionMode {
    /// First come, first served.  Appointments are informational only.
    Unreserved,
    /// Deadline-aware admission against the appointment book; late barges
    /// that would push a later appointment past its LST are rejected.
    #[default]
    Reserved,
}

impl FromStr for AdmissionMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unreserved" => Ok(AdmissionMode::Unreserved),
            "reserved" => Ok(AdmissionMode::Reserved),
            other => Err(CoreError::Config(format!(
                "unknown admission mode {other:?}: expected \"unreserved\" or \"reserved\""
            ))),
        }
    }
}

// ── SlackPolicy ───────────────────────────────────────────────────────────────

/// Buffer added on top of the raw maximum waiting time of a profile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlackPolicy {
    /// Add a fixed number of ticks.
    Constant(u64),
    /// Add `⌊book_len / denominator⌋ × wait`.
    Factor { denominator: u64 },
}

impl Default for SlackPolicy {
    fn default() -> Self {
        SlackPolicy::Constant(0)
    }
}

impl SlackPolicy {
    /// Assemble a policy from a method name plus both numeric parameters,
    /// the shape in which command-line style configuration supplies them.
    pub fn from_parts(method: &str, constant: u64, denominator: u64) -> CoreResult<Self> {
        let policy = match method.trim().to_ascii_lowercase().as_str() {
            "constant" => SlackPolicy::Constant(constant),
            "factor" => SlackPolicy::Factor { denominator },
            other => {
                return Err(CoreError::Config(format!(
                    "unknown slack method {other:?}: expected \"constant\" or \"factor\""
                )));
            }
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> CoreResult<()> {
        match self {
            SlackPolicy::Factor { denominator: 0 } => Err(CoreError::Config(
                "slack denominator must be greater than zero".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Apply the policy to a raw waiting time.
    ///
    /// `book_len` is the size of the appointment book the profile was built
    /// from; only the `Factor` policy reads it.
    #[inline]
    pub fn apply(&self, wait: u64, book_len: usize) -> u64 {
        match *self {
            SlackPolicy::Constant(c) => wait.saturating_add(c),
            SlackPolicy::Factor { denominator } => {
                let factor = (book_len as u64).checked_div(denominator).unwrap_or(0);
                wait.saturating_add(factor.saturating_mul(wait))
            }
        }
    }
}

// ── TravelTimeModel ───────────────────────────────────────────────────────────

/// Whether realised sailing and handling durations deviate from the plan.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelTimeModel {
    #[default]
    Deterministic,
    /// Each leg and each handling is drawn from `Normal(planned, sigma)`.
    Stochastic { sigma: f64 },
}

impl TravelTimeModel {
    pub fn from_parts(name: &str, sigma: f64) -> CoreResult<Self> {
        let model = match name.trim().to_ascii_lowercase().as_str() {
            "deterministic" => TravelTimeModel::Deterministic,
            "stochastic" => TravelTimeModel::Stochastic { sigma },
            other => {
                return Err(CoreError::Config(format!(
                    "unknown travel time model {other:?}: expected \"deterministic\" or \"stochastic\""
                )));
            }
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> CoreResult<()> {
        match *self {
            TravelTimeModel::Stochastic { sigma } if !(sigma.is_finite() && sigma >= 0.0) => {
                Err(CoreError::Config(format!("travel time sigma must be finite and >= 0, got {sigma}")))
            }
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn is_stochastic(&self) -> bool {
        matches!(self, TravelTimeModel::Stochastic { .. })
    }
}

// ── PortConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PortConfig {
    pub admission:    AdmissionMode,
    pub slack:        SlackPolicy,
    pub travel_model: TravelTimeModel,

    /// Floor for a perturbed handling duration.
    pub min_handling: u64,

    /// Floor for a perturbed sailing leg.
    pub min_sailing:  u64,

    /// No port arrivals are generated at or after this tick, and the run
    /// stops dispatching events once the clock passes it.
    pub end_tick:     Tick,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed:         u64,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            admission:    AdmissionMode::default(),
            slack:        SlackPolicy::default(),
            travel_model: TravelTimeModel::default(),
            min_handling: 10,
            min_sailing:  1,
            end_tick:     Tick(10_000),
            seed:         42,
        }
    }
}

impl PortConfig {
    /// Fail fast on option combinations that can never run.
    pub fn validate(&self) -> CoreResult<()> {
        self.slack.validate()?;
        self.travel_model.validate()?;
        Ok(())
    }
}
