//! `bp-route`: time-dependent rotation planning for a single barge.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`state`]    | `SearchState` (bitmask + last node + clock)               |
//! | [`rotation`] | `Leg`, `Rotation`, `derive_legs`                          |
//! | [`solver`]   | `RouteSolver`, `SolveStats`, `MAX_STOPS`                  |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                            |
//!
//! # Problem
//!
//! Local node 0 is the port; nodes `1..=n` are the terminals to visit.
//! Moving from `i` (departing at `t`) to `j` costs
//!
//! ```text
//! sail(i, j) + wait_j(t + sail(i, j)) + handling(j)
//! ```
//!
//! and the final return to the port costs `sail(last, 0)` with no waiting.
//! The solver enumerates every visiting order and keeps the one with the
//! earliest leave time, then the least sailing, then the first found.

pub mod error;
pub mod rotation;
pub mod solver;
pub mod state;


pub use error::{RouteError, RouteResult};
pub use rotation::{derive_legs, Leg, Rotation};
pub use solver::{RouteSolver, SolveStats, MAX_STOPS};
pub use state::SearchState;
