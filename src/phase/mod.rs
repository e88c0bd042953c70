//! Phase cycle engine
//!
//! Drives a breathing pattern through its ordered, cyclic sequence of
//! timed phases from a continuous clock. The engine is fed timestamps by
//! an external driver and reports what to display through a
//! [`PresentationSink`].
//!
//! # Architecture
//!
//! - [`PhaseTable`] — Validated, immutable phase sequence and cycle length
//! - [`CycleState`] — Owned mutable position and elapsed-time accumulators
//! - [`CycleEngine`] — Orchestrator (start/stop/advance, sink notification)
//! - [`progress`] — Projections from elapsed time to display values

pub mod engine;
pub mod progress;
pub mod sink;
pub mod state;
pub mod table;

pub use engine::{AdvanceOutcome, CycleEngine};
pub use sink::{PhaseChange, PhaseUpdate, PresentationSink};
pub use state::CycleState;
pub use table::{Phase, PhaseTable};
