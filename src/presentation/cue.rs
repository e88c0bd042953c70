//! Cue selection
//!
//! The engine emits an update on every sample. Sinks that play sounds or
//! write discrete events need fewer, more salient signals: one when a phase
//! is entered and one each time the displayed second changes.

use crate::phase::{PhaseChange, PhaseUpdate};

/// A discrete signal derived from engine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// The exercise started in its first phase.
    Start,
    /// A phase boundary was crossed.
    Phase,
    /// The displayed countdown moved to a new whole second.
    Tick,
}

/// Tracks the last displayed `(phase, seconds)` pair to derive cues.
#[derive(Debug, Default, Clone)]
pub struct CueTracker {
    /// Last displayed phase and second; the second is `None` right after a
    /// phase change.
    last: Option<(usize, Option<u64>)>,
}

impl CueTracker {
    /// Creates a tracker in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes a per-sample update.
    ///
    /// The first update after idle yields [`Cue::Start`]. Within a phase, a
    /// new displayed second yields [`Cue::Tick`]. The first update after a
    /// phase change yields nothing, since [`observe_change`] already
    /// produced the phase cue.
    ///
    /// [`observe_change`]: Self::observe_change
    pub fn observe_update(&mut self, update: &PhaseUpdate<'_>) -> Option<Cue> {
        let secs = update.remaining_display;
        let cue = match self.last {
            None => Some(Cue::Start),
            Some((phase, Some(last_secs))) if phase == update.phase_index && last_secs != secs => {
                Some(Cue::Tick)
            }
            Some(_) => None,
        };
        self.last = Some((update.phase_index, Some(secs)));
        cue
    }

    /// Observes a phase boundary crossing.
    pub fn observe_change(&mut self, change: &PhaseChange<'_>) -> Cue {
        self.last = Some((change.to_index, None));
        Cue::Phase
    }

    /// Returns to the idle state.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
