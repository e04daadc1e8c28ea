//! `bp-sim`: discrete-event orchestrator for the barge port.
//!
//! # Event loop
//!
//! ```text
//! pop (tick, priority, event) in order; FIFO within equal keys
//!   PortArrival       generate a barge, plan it, re-arm the generator
//!   TerminalArrival   barge queues at the terminal; admission decisions
//!   FinishHandling    barge sails on; terminal rescans its queue
//!   Replan            rejected barge plans again from this tick
//!   LeavePort         final statistics go to the observer
//! ```
//!
//! Same-tick tiers: `FinishHandling` and `Replan` run first so terminal
//! state settles before arrivals at that tick look at it; `LeavePort` runs
//! last.
//!
//! # Crate layout
//!
//! | Module           | Contents                                            |
//! |------------------|-----------------------------------------------------|
//! | [`barge`]        | `Barge` planning state, `BargeState`, `PlannedSlot` |
//! | [`sim`]          | `Sim` event loop and handlers                       |
//! | [`builder`]      | `SimBuilder`                                        |
//! | [`event`]        | `Event`, `EventRecord`, `BargeSummary`              |
//! | [`generator`]    | `ArrivalGenerator`, `ArrivalProfile`                |
//! | [`observer`]     | `SimObserver`, `NoopObserver`                       |
//! | [`satisfaction`] | 1..=7 satisfaction scores                           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bp_core::{PortConfig, TerminalId, Tick};
//! use bp_network::SailingMatrix;
//! use bp_sim::{NoopObserver, SimBuilder};
//!
//! let matrix = SailingMatrix::from_rows(vec![vec![0, 5], vec![5, 0]])?;
//! let mut sim = SimBuilder::new(PortConfig::default(), matrix).build()?;
//! sim.create_vessel(Tick(0), vec![TerminalId(1)], vec![20])?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod barge;
pub mod builder;
pub mod error;
pub mod event;
pub mod generator;
pub mod observer;
pub mod satisfaction;
pub mod sim;


pub use barge::{Barge, BargeState, NextLeg, PlannedSlot};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{BargeSummary, Event, EventKind, EventRecord};
pub use generator::{Arrival, ArrivalGenerator, ArrivalProfile};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
