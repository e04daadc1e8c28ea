use thiserror::Error;

use bp_core::TerminalId;

/// Errors produced by `bp-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("matrix parse error: {0}")]
    Parse(String),

    #[error("matrix is not square: row {row} has {got} columns, expected {expected}")]
    NotSquare { row: usize, got: usize, expected: usize },

    #[error("terminal {0} is outside the sailing matrix")]
    UnknownTerminal(TerminalId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
