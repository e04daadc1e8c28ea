//! `bp-core`: foundational types for the barge port simulator.
//!
//! This crate is a dependency of every other `bp-*` crate.  It has no `bp-*`
//! dependencies and only a handful of external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `BargeId`, `TerminalId`                                    |
//! | [`time`]     | `Tick` and the `Tick::INFINITY` sentinel                   |
//! | [`rng`]      | `SimRng` with normal/exponential duration helpers          |
//! | [`config`]   | `PortConfig`, `AdmissionMode`, `SlackPolicy`, `TravelTimeModel` |
//! | [`wait`]     | `MaxWait` trait shared by profiles and the route solver    |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod wait;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AdmissionMode, PortConfig, SlackPolicy, TravelTimeModel};
pub use error::{CoreError, CoreResult};
pub use ids::{BargeId, TerminalId};
pub use rng::SimRng;
pub use time::Tick;
pub use wait::{MaxWait, NoWait};
