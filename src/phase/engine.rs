//! Phase cycle engine orchestration
//!
//! The `CycleEngine` owns the phase table, the cycle state and the
//! presentation sink. It is driven by an external clock calling
//! [`CycleEngine::advance`] with monotonic timestamps; every call resolves
//! phase transitions from the elapsed delta rather than counting calls, so
//! it stays correct at any sampling cadence.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::error::ConfigError;

use super::progress;
use super::sink::{PhaseUpdate, PresentationSink};
use super::state::CycleState;
use super::table::{Phase, PhaseTable};

/// Summary of a single `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The engine is idle; the sample was ignored.
    Idle,
    /// First sample after `start`; it only established the time baseline.
    Baseline,
    /// Time advanced and an update was emitted.
    Advanced {
        /// Phase boundaries reported to the sink during this call
        transitions: usize,
        /// Full cycles finished during this call
        cycles_completed: u64,
    },
}

impl AdvanceOutcome {
    /// Full cycles finished during this call.
    #[must_use]
    pub const fn cycles_completed(&self) -> u64 {
        match self {
            Self::Advanced {
                cycles_completed, ..
            } => *cycles_completed,
            Self::Idle | Self::Baseline => 0,
        }
    }

    /// Phase boundaries reported during this call.
    #[must_use]
    pub const fn transitions(&self) -> usize {
        match self {
            Self::Advanced { transitions, .. } => *transitions,
            Self::Idle | Self::Baseline => 0,
        }
    }
}

/// Phase engine cycling through a breathing pattern.
///
/// All calls are expected on one logical thread; the engine holds no
/// locks and performs no I/O beyond what the sink does.
pub struct CycleEngine<S> {
    /// Validated phase sequence
    table: PhaseTable,
    /// Current position and accumulators
    state: CycleState,
    /// Receiver of display updates
    sink: S,
}

impl<S: PresentationSink> CycleEngine<S> {
    /// Creates an idle engine for an already validated table.
    #[must_use]
    pub fn new(table: PhaseTable, sink: S) -> Self {
        debug!(
            phases = table.len(),
            cycle_secs = table.cycle_length().as_secs_f64(),
            "cycle engine created"
        );
        Self {
            table,
            state: CycleState::new(),
            sink,
        }
    }

    /// Creates an idle engine from a raw phase list.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the list is empty or a phase has a
    /// blank name or zero duration.
    pub fn from_phases(phases: Vec<Phase>, sink: S) -> Result<Self, ConfigError> {
        Ok(Self::new(PhaseTable::new(phases)?, sink))
    }

    /// Starts the exercise at phase 0.
    ///
    /// Emits an update for phase 0 at full duration and fraction 0 before
    /// any clock sample arrives. Does nothing if already running.
    pub fn start(&mut self) {
        if self.state.is_running() {
            debug!("start ignored; engine already running");
            return;
        }

        self.state.begin();
        info!(
            phase = self.table.phase(0).name(),
            cycle_secs = self.table.cycle_length().as_secs_f64(),
            "breathing cycle started"
        );

        let update = project(&self.table, &self.state);
        self.sink.on_update(&update);
    }

    /// Stops the exercise and resets to the idle baseline.
    ///
    /// Emits the idle event. Does nothing if already idle.
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            debug!("stop ignored; engine already idle");
            return;
        }

        info!(
            phase = self.table.phase(self.state.phase_index()).name(),
            cycles_completed = self.state.cycles_completed(),
            "breathing cycle stopped"
        );
        self.state.reset();
        self.sink.on_idle();
    }

    /// Feeds a clock sample to the engine.
    ///
    /// The first sample after `start` only sets the baseline. Later samples
    /// advance the accumulators by the delta since the previous sample
    /// (zero if the clock went backwards), report every phase boundary
    /// crossed, then emit the current display state. Samples arriving
    /// while idle are ignored.
    pub fn advance(&mut self, now: Instant) -> AdvanceOutcome {
        if !self.state.is_running() {
            trace!("sample ignored; engine idle");
            return AdvanceOutcome::Idle;
        }

        let Some(dt) = self.state.sample(now) else {
            return AdvanceOutcome::Baseline;
        };

        let cycles_before = self.state.cycles_completed();
        let cycle_length = self.table.cycle_length();
        self.state.accumulate(dt, cycle_length);

        if dt >= cycle_length {
            debug!(
                dt_secs = dt.as_secs_f64(),
                cycle_secs = cycle_length.as_secs_f64(),
                "large clock gap; reporting every boundary crossed"
            );
        }

        let mut transitions = 0;
        while let Some(change) = self.state.step(&self.table) {
            debug!(
                from = change.from_name,
                to = change.to_name,
                cycles_completed = change.cycles_completed,
                "phase transition"
            );
            self.sink.on_phase_changed(&change);
            transitions += 1;
        }

        let update = project(&self.table, &self.state);
        self.sink.on_update(&update);

        AdvanceOutcome::Advanced {
            transitions,
            cycles_completed: self.state.cycles_completed() - cycles_before,
        }
    }

    /// Current display state, or `None` when idle.
    #[must_use]
    pub fn snapshot(&self) -> Option<PhaseUpdate<'_>> {
        self.state
            .is_running()
            .then(|| project(&self.table, &self.state))
    }

    /// Whether the clock is advancing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Current phase index (0 when idle).
    #[must_use]
    pub const fn phase_index(&self) -> usize {
        self.state.phase_index()
    }

    /// Current phase (phase 0 when idle).
    #[must_use]
    pub fn current_phase(&self) -> &Phase {
        self.table.phase(self.state.phase_index())
    }

    /// Time spent in the current phase.
    #[must_use]
    pub const fn elapsed_in_phase(&self) -> Duration {
        self.state.elapsed_in_phase()
    }

    /// Time spent in the current cycle.
    #[must_use]
    pub const fn elapsed_in_cycle(&self) -> Duration {
        self.state.elapsed_in_cycle()
    }

    /// Exact time left in the current phase.
    #[must_use]
    pub fn remaining_in_phase(&self) -> Duration {
        self.current_phase()
            .duration()
            .saturating_sub(self.state.elapsed_in_phase())
    }

    /// Remaining time rounded up to whole seconds.
    #[must_use]
    pub fn remaining_display(&self) -> u64 {
        progress::ceil_seconds(self.remaining_in_phase())
    }

    /// Position within the cycle, in `[0, 1)`.
    #[must_use]
    pub fn cycle_fraction(&self) -> f64 {
        progress::fraction(self.state.elapsed_in_cycle(), self.table.cycle_length())
    }

    /// Full cycles completed since `start`.
    #[must_use]
    pub const fn cycles_completed(&self) -> u64 {
        self.state.cycles_completed()
    }

    /// Read-only view of the cycle state.
    #[must_use]
    pub const fn state(&self) -> &CycleState {
        &self.state
    }

    /// The phase table driving this engine.
    #[must_use]
    pub const fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// The presentation sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the presentation sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the engine, returning its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Projects the cycle state onto display values.
fn project<'t>(table: &'t PhaseTable, state: &CycleState) -> PhaseUpdate<'t> {
    let phase = table.phase(state.phase_index());
    let remaining = phase.duration().saturating_sub(state.elapsed_in_phase());
    PhaseUpdate {
        phase_index: state.phase_index(),
        phase_name: phase.name(),
        remaining_display: progress::ceil_seconds(remaining),
        remaining,
        cycle_fraction: progress::fraction(state.elapsed_in_cycle(), table.cycle_length()),
        phase_fraction: progress::fraction(state.elapsed_in_phase(), phase.duration()),
    }
}

impl<S> std::fmt::Debug for CycleEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleEngine")
            .field("num_phases", &self.table.len())
            .field("phase_index", &self.state.phase_index())
            .field("running", &self.state.is_running())
            .finish_non_exhaustive()
    }
}
