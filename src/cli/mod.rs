//! Command-line interface
//!
//! Argument definitions and command handlers for the `breathpace` binary.

pub mod args;
pub mod commands;
