use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("itinerary has {got} terminals, the solver handles at most {max}")]
    TooManyStops { got: usize, max: usize },

    #[error("{what} has length {got}, expected {expected}")]
    DimensionMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("route problem has no port node")]
    EmptyProblem,
}

pub type RouteResult<T> = Result<T, RouteError>;
