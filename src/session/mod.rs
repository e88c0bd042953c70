//! Breathing sessions
//!
//! Drives a [`CycleEngine`](crate::phase::CycleEngine) from a real clock
//! and routes user commands to it.

pub mod control;
pub mod driver;
pub mod input;

pub use control::{Affordances, ControlCommand, ControlSurface};
pub use driver::{DEFAULT_CADENCE, EndReason, Session, SessionOptions, SessionReport};
pub use input::forward_commands;
