//! Presentation sink contract
//!
//! The engine supplies only names and numbers; rendering, colour and audio
//! cue selection belong to the sink.

use std::time::Duration;

/// Per-sample display state.
///
/// Emitted on `start()` and on every clock sample while running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseUpdate<'a> {
    /// Index of the current phase
    pub phase_index: usize,
    /// Label of the current phase
    pub phase_name: &'a str,
    /// Remaining time in the phase, rounded up to whole seconds (never 0
    /// while running)
    pub remaining_display: u64,
    /// Exact remaining time in the phase
    pub remaining: Duration,
    /// Position within the full cycle, in `[0, 1)`
    pub cycle_fraction: f64,
    /// Position within the current phase, in `[0, 1)`
    pub phase_fraction: f64,
}

/// A discrete phase boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange<'a> {
    /// Index of the phase that just ended
    pub from_index: usize,
    /// Label of the phase that just ended
    pub from_name: &'a str,
    /// Index of the phase just entered
    pub to_index: usize,
    /// Label of the phase just entered
    pub to_name: &'a str,
    /// Number of full cycles completed since `start()`, including this
    /// crossing
    pub cycles_completed: u64,
}

impl PhaseChange<'_> {
    /// `true` when this crossing closes a cycle.
    #[must_use]
    pub const fn wraps_cycle(&self) -> bool {
        self.to_index == 0
    }
}

/// Consumer of engine output.
pub trait PresentationSink {
    /// Called with the current display state.
    fn on_update(&mut self, update: &PhaseUpdate<'_>);

    /// Called once per phase boundary crossed, before the update of the
    /// same sample.
    fn on_phase_changed(&mut self, change: &PhaseChange<'_>);

    /// Called when the engine stops.
    fn on_idle(&mut self);
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn on_update(&mut self, update: &PhaseUpdate<'_>) {
        (**self).on_update(update);
    }

    fn on_phase_changed(&mut self, change: &PhaseChange<'_>) {
        (**self).on_phase_changed(change);
    }

    fn on_idle(&mut self) {
        (**self).on_idle();
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn on_update(&mut self, update: &PhaseUpdate<'_>) {
        (**self).on_update(update);
    }

    fn on_phase_changed(&mut self, change: &PhaseChange<'_>) {
        (**self).on_phase_changed(change);
    }

    fn on_idle(&mut self) {
        (**self).on_idle();
    }
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_update(&mut self, _update: &PhaseUpdate<'_>) {}

    fn on_phase_changed(&mut self, _change: &PhaseChange<'_>) {}

    fn on_idle(&mut self) {}
}
