//! `bp-network`: the static sailing-time matrix between terminals.
//!
//! # Crate layout
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`matrix`]  | `SailingMatrix` (dense, square, row-major)        |
//! | [`loader`]  | `load_matrix_csv`, `load_matrix_reader`           |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                |
//!
//! Index 0 of the port-wide matrix is the port entrance/exit.  A barge works
//! on a restricted copy whose local index `i` maps to the `i`-th entry of
//! its itinerary, built with [`SailingMatrix::restrict`].

pub mod error;
pub mod loader;
pub mod matrix;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_matrix_csv, load_matrix_reader};
pub use matrix::SailingMatrix;
