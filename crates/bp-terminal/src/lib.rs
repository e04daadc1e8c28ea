//! `bp-terminal`: everything that lives at one terminal.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`appointment`] | `Appointment`, `AppointmentBook` (sorted by LST)          |
//! | [`profile`]     | `StartInterval`, `ProfileEntry`, `WaitingProfile`         |
//! | [`terminal`]    | `Terminal` admission controller, `QueuedBarge`, `Decision`|
//!
//! A terminal never schedules anything itself.  Each handler returns the
//! [`Decision`]s it reached (admit now, reject) and the caller turns them
//! into timeline events.  That keeps every state change inside exactly one
//! event handler.

pub mod appointment;
pub mod profile;
pub mod terminal;

#[cfg(test)]
mod tests;

pub use appointment::{Appointment, AppointmentBook};
pub use profile::{ProfileEntry, StartInterval, WaitingProfile};
pub use terminal::{Decision, QueuedBarge, Terminal, TerminalState};
