//! Session driver
//!
//! One task owns the engine and selects over three sources: an interval
//! that samples the clock, the control command channel, and a
//! cancellation token for shutdown signals. The engine never leaves the
//! task, so nothing around it is synchronized.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Pattern;
use crate::observability::{Event, EventEmitter};
use crate::phase::{CycleEngine, PresentationSink};

use super::control::{ControlCommand, ControlSurface};

/// Default clock sampling interval.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(50);

/// Session behaviour.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Interval between clock samples
    pub cadence: Duration,
    /// End the session once the running exercise completes this many cycles
    pub max_cycles: Option<u64>,
    /// Start the exercise immediately instead of waiting for `start`
    pub autostart: bool,
    /// End the session when the command channel closes
    pub end_on_input_close: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cadence: DEFAULT_CADENCE,
            max_cycles: None,
            autostart: true,
            end_on_input_close: false,
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The requested number of cycles was completed
    CyclesCompleted,
    /// A `quit` command was received
    Quit,
    /// The cancellation token fired (Ctrl+C, SIGTERM)
    Cancelled,
    /// Command input reached EOF
    InputClosed,
}

impl EndReason {
    /// Stable name used in events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CyclesCompleted => "cycles_completed",
            Self::Quit => "quit",
            Self::Cancelled => "cancelled",
            Self::InputClosed => "input_closed",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a finished session.
#[derive(Debug)]
pub struct SessionReport<S> {
    /// Why the session ended
    pub reason: EndReason,
    /// Cycles completed by the last run of the exercise
    pub cycles_completed: u64,
    /// The presentation sink, handed back for inspection
    pub sink: S,
}

/// A breathing session bound to one pattern.
#[derive(Debug)]
pub struct Session<S> {
    pattern_name: String,
    control: ControlSurface<S>,
    options: SessionOptions,
    emitter: Arc<EventEmitter>,
}

impl<S: PresentationSink> Session<S> {
    /// Creates a session; nothing runs until [`run`](Self::run).
    #[must_use]
    pub fn new(
        pattern: Pattern,
        sink: S,
        options: SessionOptions,
        emitter: Arc<EventEmitter>,
    ) -> Self {
        Self {
            pattern_name: pattern.name,
            control: ControlSurface::new(CycleEngine::new(pattern.table, sink)),
            options,
            emitter,
        }
    }

    /// Drives the session until it ends.
    ///
    /// On exit the engine is stopped if it was running, so the sink always
    /// ends on an idle event.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<ControlCommand>,
        cancel: CancellationToken,
    ) -> SessionReport<S> {
        self.emit_started();

        if self.options.autostart {
            self.handle(ControlCommand::Start);
        }

        let mut ticker = tokio::time::interval(self.options.cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut input_open = true;

        let reason = loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break EndReason::Cancelled,

                command = commands.recv(), if input_open => match command {
                    Some(ControlCommand::Quit) => break EndReason::Quit,
                    Some(command) => self.handle(command),
                    None => {
                        input_open = false;
                        if self.options.end_on_input_close {
                            break EndReason::InputClosed;
                        }
                    }
                },

                _ = ticker.tick() => {
                    if self.sample(Instant::now()) {
                        break EndReason::CyclesCompleted;
                    }
                }
            }
        };

        if let Err(e) = self.control.stop() {
            debug!(%e, "session ended with the exercise idle");
        }
        let cycles_completed = self.control.cycles_completed();

        info!(%reason, cycles_completed, "session ended");
        self.emitter.emit(Event::SessionEnded {
            timestamp: Utc::now(),
            reason: reason.to_string(),
            cycles_completed,
        });

        SessionReport {
            reason,
            cycles_completed,
            sink: self.control.into_engine().into_sink(),
        }
    }

    /// Feeds one clock sample. Returns `true` once the cycle target is met.
    fn sample(&mut self, now: Instant) -> bool {
        let engine = self.control.engine_mut();
        engine.advance(now.into_std());
        match self.options.max_cycles {
            Some(max) => engine.is_running() && engine.cycles_completed() >= max,
            None => false,
        }
    }

    fn handle(&mut self, command: ControlCommand) {
        if let Err(e) = self.control.apply(command) {
            warn!("{e}");
        }
    }

    fn emit_started(&self) {
        let table = self.control.engine().table();
        info!(
            pattern = %self.pattern_name,
            phases = table.len(),
            cadence_ms = self.options.cadence.as_millis(),
            "session started"
        );
        self.emitter.emit(Event::SessionStarted {
            timestamp: Utc::now(),
            pattern: self.pattern_name.clone(),
            phases: table.phases().iter().map(|p| p.name().to_string()).collect(),
            cycle_secs: table.cycle_length().as_secs_f64(),
        });
    }
}
