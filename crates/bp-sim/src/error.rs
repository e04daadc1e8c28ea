use thiserror::Error;

use bp_core::{BargeId, CoreError, TerminalId, Tick};
use bp_network::NetworkError;
use bp_route::RouteError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match itinerary length {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("sailing matrix has no port row")]
    EmptyNetwork,

    #[error("barge arrival {arrival} is before the current tick {now}")]
    ArrivalInPast { arrival: Tick, now: Tick },

    #[error("invalid itinerary: {0}")]
    Itinerary(String),

    #[error("barge {0} not found")]
    UnknownBarge(BargeId),

    #[error("terminal {0} not found")]
    UnknownTerminal(TerminalId),

    #[error("sailing matrix error: {0}")]
    Network(#[from] NetworkError),

    #[error("route planning failed: {0}")]
    Route(#[from] RouteError),
}

pub type SimResult<T> = Result<T, SimError>;
