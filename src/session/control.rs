//! Control surface
//!
//! Maps user commands onto the engine and tracks which ones are currently
//! available: `start` only while idle, `stop` only while running. A
//! command whose affordance is disabled is rejected without touching the
//! engine.

use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ControlError;
use crate::phase::{CycleEngine, PresentationSink};

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Begin the exercise
    Start,
    /// Stop the exercise and return to idle
    Stop,
    /// End the session
    Quit,
}

impl ControlCommand {
    /// Command keyword as typed by the user.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Quit => "quit",
        }
    }
}

impl FromStr for ControlCommand {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Self::Start),
            "stop" | "x" => Ok(Self::Stop),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(ControlError::Unknown(other.to_string())),
        }
    }
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which commands are currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Affordances {
    /// `start` is accepted
    pub start: bool,
    /// `stop` is accepted
    pub stop: bool,
}

/// Owns the engine and gates commands by affordance.
#[derive(Debug)]
pub struct ControlSurface<S> {
    engine: CycleEngine<S>,
    last_run_cycles: u64,
}

impl<S: PresentationSink> ControlSurface<S> {
    /// Wraps an engine.
    #[must_use]
    pub const fn new(engine: CycleEngine<S>) -> Self {
        Self {
            engine,
            last_run_cycles: 0,
        }
    }

    /// Current affordance state.
    #[must_use]
    pub const fn affordances(&self) -> Affordances {
        let running = self.engine.is_running();
        Affordances {
            start: !running,
            stop: running,
        }
    }

    /// Starts the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Disabled`] if the engine is already running.
    pub fn start(&mut self) -> Result<(), ControlError> {
        if !self.affordances().start {
            return Err(self.disabled(ControlCommand::Start));
        }
        self.engine.start();
        Ok(())
    }

    /// Stops the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Disabled`] if the engine is idle.
    pub fn stop(&mut self) -> Result<(), ControlError> {
        if !self.affordances().stop {
            return Err(self.disabled(ControlCommand::Stop));
        }
        self.last_run_cycles = self.engine.cycles_completed();
        self.engine.stop();
        Ok(())
    }

    /// Applies a `start` or `stop` command. `quit` is handled by the
    /// session and is a no-op here.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Disabled`] if the command is not available.
    pub fn apply(&mut self, command: ControlCommand) -> Result<(), ControlError> {
        debug!(%command, "control command");
        match command {
            ControlCommand::Start => self.start(),
            ControlCommand::Stop => self.stop(),
            ControlCommand::Quit => Ok(()),
        }
    }

    /// Cycles completed by the current run, or by the last one if idle.
    #[must_use]
    pub const fn cycles_completed(&self) -> u64 {
        if self.engine.is_running() {
            self.engine.cycles_completed()
        } else {
            self.last_run_cycles
        }
    }

    /// The wrapped engine.
    #[must_use]
    pub const fn engine(&self) -> &CycleEngine<S> {
        &self.engine
    }

    /// Mutable access for feeding clock samples.
    pub const fn engine_mut(&mut self) -> &mut CycleEngine<S> {
        &mut self.engine
    }

    /// Unwraps the engine.
    #[must_use]
    pub fn into_engine(self) -> CycleEngine<S> {
        self.engine
    }

    fn disabled(&self, command: ControlCommand) -> ControlError {
        let state = if self.engine.is_running() {
            "running"
        } else {
            "idle"
        };
        info!(%command, state, "command rejected");
        ControlError::Disabled {
            command: command.as_str(),
            state,
        }
    }
}
