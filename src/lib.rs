//! `breathpace` - paced breathing driven by a continuous-clock phase engine
//!
//! The [`phase`] module holds the engine: a phase table, the cycle state
//! and the `advance` step that turns clock samples into display updates.
//! Everything else wires it to a terminal, a clock, and a command line.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod phase;
pub mod presentation;
pub mod session;
