//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a
//! configuration or parse failure can surface through them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `bp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
