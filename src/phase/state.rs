//! Cycle state representation
//!
//! Plain owned state for the current position within the cycle. The engine
//! is single-threaded, so nothing here is atomic or locked; every mutation
//! goes through `&mut self`.

use std::time::{Duration, Instant};

use super::progress;
use super::sink::PhaseChange;
use super::table::PhaseTable;

/// Mutable position and elapsed-time accumulators.
///
/// While running, `elapsed_in_phase < table.phase(phase_index).duration()`
/// holds between calls, and `elapsed_in_cycle` equals the offset of the
/// current phase plus `elapsed_in_phase`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleState {
    running: bool,
    phase_index: usize,
    elapsed_in_phase: Duration,
    elapsed_in_cycle: Duration,
    last_sample: Option<Instant>,
    cycles_completed: u64,
}

impl CycleState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the clock is advancing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current phase index.
    #[must_use]
    pub const fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// Time spent in the current phase.
    #[must_use]
    pub const fn elapsed_in_phase(&self) -> Duration {
        self.elapsed_in_phase
    }

    /// Time spent in the current cycle.
    #[must_use]
    pub const fn elapsed_in_cycle(&self) -> Duration {
        self.elapsed_in_cycle
    }

    /// Last clock sample seen, if any since `start`.
    #[must_use]
    pub const fn last_sample(&self) -> Option<Instant> {
        self.last_sample
    }

    /// Full cycles completed since `start`.
    #[must_use]
    pub const fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// Resets to phase 0 with empty accumulators and marks running.
    pub fn begin(&mut self) {
        *self = Self {
            running: true,
            ..Self::default()
        };
    }

    /// Resets to the idle baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records a clock sample and returns the delta since the previous
    /// one.
    ///
    /// Returns `None` for the first sample after `begin` (it only sets the
    /// baseline). Backwards samples yield a zero delta.
    pub fn sample(&mut self, now: Instant) -> Option<Duration> {
        let last = self.last_sample.replace(now)?;
        Some(now.checked_duration_since(last).unwrap_or_else(|| {
            tracing::trace!("clock sample went backwards; treating as zero delta");
            Duration::ZERO
        }))
    }

    /// Adds `dt` to both accumulators, wrapping the cycle accumulator.
    pub fn accumulate(&mut self, dt: Duration, cycle_length: Duration) {
        self.elapsed_in_phase = self.elapsed_in_phase.saturating_add(dt);
        self.elapsed_in_cycle =
            progress::wrap(self.elapsed_in_cycle.saturating_add(dt), cycle_length);
    }

    /// Resolves a single phase boundary, if the current phase is complete.
    ///
    /// Call repeatedly until it returns `None`.
    pub fn step<'t>(&mut self, table: &'t PhaseTable) -> Option<PhaseChange<'t>> {
        let current = table.phase(self.phase_index);
        if self.elapsed_in_phase < current.duration() {
            return None;
        }

        self.elapsed_in_phase -= current.duration();
        let from_index = self.phase_index;
        let to_index = table.next_index(from_index);
        self.phase_index = to_index;
        if to_index == 0 {
            self.cycles_completed = self.cycles_completed.saturating_add(1);
        }

        Some(PhaseChange {
            from_index,
            from_name: current.name(),
            to_index,
            to_name: table.phase(to_index).name(),
            cycles_completed: self.cycles_completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::table::Phase;

    fn table() -> PhaseTable {
        PhaseTable::new(vec![
            Phase::from_secs("inhale", 4),
            Phase::from_secs("hold", 7),
            Phase::from_secs("exhale", 8),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = CycleState::new();
        assert!(!state.is_running());
        assert_eq!(state.phase_index(), 0);
        assert_eq!(state.elapsed_in_phase(), Duration::ZERO);
        assert!(state.last_sample().is_none());
    }

    #[test]
    fn test_first_sample_sets_baseline() {
        let mut state = CycleState::new();
        state.begin();
        let t0 = Instant::now();
        assert!(state.sample(t0).is_none());
        assert_eq!(state.last_sample(), Some(t0));
        assert_eq!(
            state.sample(t0 + Duration::from_millis(16)),
            Some(Duration::from_millis(16))
        );
    }

    #[test]
    fn test_backwards_sample_is_zero_delta() {
        let mut state = CycleState::new();
        state.begin();
        let t0 = Instant::now() + Duration::from_secs(10);
        state.sample(t0);
        assert_eq!(
            state.sample(t0 - Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_accumulate_wraps_cycle() {
        let mut state = CycleState::new();
        state.begin();
        state.accumulate(Duration::from_secs(20), Duration::from_secs(19));
        assert_eq!(state.elapsed_in_cycle(), Duration::from_secs(1));
        assert_eq!(state.elapsed_in_phase(), Duration::from_secs(20));
    }

    #[test]
    fn test_step_below_boundary() {
        let table = table();
        let mut state = CycleState::new();
        state.begin();
        state.accumulate(Duration::from_secs(3), table.cycle_length());
        assert!(state.step(&table).is_none());
        assert_eq!(state.phase_index(), 0);
    }

    #[test]
    fn test_step_on_exact_boundary() {
        let table = table();
        let mut state = CycleState::new();
        state.begin();
        state.accumulate(Duration::from_secs(4), table.cycle_length());
        let change = state.step(&table).unwrap();
        assert_eq!(change.from_name, "inhale");
        assert_eq!(change.to_name, "hold");
        assert_eq!(state.elapsed_in_phase(), Duration::ZERO);
        assert!(state.step(&table).is_none());
    }

    #[test]
    fn test_step_wraps_and_counts_cycle() {
        let table = table();
        let mut state = CycleState::new();
        state.begin();
        state.accumulate(Duration::from_secs(19), table.cycle_length());
        let changes: Vec<usize> =
            std::iter::from_fn(|| state.step(&table).map(|c| c.to_index)).collect();
        assert_eq!(changes, vec![1, 2, 0]);
        assert_eq!(state.cycles_completed(), 1);
        assert_eq!(state.elapsed_in_cycle(), Duration::ZERO);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut state = CycleState::new();
        state.begin();
        state.sample(Instant::now());
        state.accumulate(Duration::from_secs(2), Duration::from_secs(19));
        state.reset();
        assert_eq!(state, CycleState::new());
    }
}
