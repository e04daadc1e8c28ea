//! `bp-schedule`: the discrete-event timeline.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`priority`] | `Priority` (`First`, `Normal`, `Last`)                   |
//! | [`queue`]    | `EventQueue<E>` (`BTreeMap<(Tick, Priority), VecDeque<E>>`) |
//!
//! # Dispatch order
//!
//! ```text
//! ascending tick
//!   └─ ascending priority   First → Normal → Last
//!        └─ insertion order (FIFO)
//! ```
//!
//! The queue is payload-agnostic; `bp-sim` instantiates it with its own
//! event enum.

pub mod priority;
pub mod queue;


pub use priority::Priority;
pub use queue::{EventQueue, Scheduled};
