//! In-memory sink
//!
//! Records every engine callback as an owned value so that tests can make
//! assertions about the exact sequence of emissions.

use std::time::Duration;

use crate::phase::{PhaseChange, PhaseUpdate, PresentationSink};

/// Owned copy of a [`PhaseUpdate`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecord {
    /// Index of the current phase
    pub phase_index: usize,
    /// Label of the current phase
    pub phase_name: String,
    /// Displayed remaining seconds
    pub remaining_display: u64,
    /// Exact remaining time
    pub remaining: Duration,
    /// Position within the cycle
    pub cycle_fraction: f64,
    /// Position within the phase
    pub phase_fraction: f64,
}

impl From<&PhaseUpdate<'_>> for UpdateRecord {
    fn from(update: &PhaseUpdate<'_>) -> Self {
        Self {
            phase_index: update.phase_index,
            phase_name: update.phase_name.to_owned(),
            remaining_display: update.remaining_display,
            remaining: update.remaining,
            cycle_fraction: update.cycle_fraction,
            phase_fraction: update.phase_fraction,
        }
    }
}

/// Owned copy of a [`PhaseChange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Phase that ended
    pub from_index: usize,
    /// Label of the phase that ended
    pub from_name: String,
    /// Phase entered
    pub to_index: usize,
    /// Label of the phase entered
    pub to_name: String,
    /// Cycles completed including this crossing
    pub cycles_completed: u64,
}

impl From<&PhaseChange<'_>> for ChangeRecord {
    fn from(change: &PhaseChange<'_>) -> Self {
        Self {
            from_index: change.from_index,
            from_name: change.from_name.to_owned(),
            to_index: change.to_index,
            to_name: change.to_name.to_owned(),
            cycles_completed: change.cycles_completed,
        }
    }
}

/// One recorded sink callback.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    /// `on_update`
    Update(UpdateRecord),
    /// `on_phase_changed`
    PhaseChanged(ChangeRecord),
    /// `on_idle`
    Idle,
}

/// Sink that stores every callback in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<RecordedEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded callback, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Recorded updates, oldest first.
    pub fn updates(&self) -> impl Iterator<Item = &UpdateRecord> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::Update(u) => Some(u),
            _ => None,
        })
    }

    /// Recorded phase changes, oldest first.
    pub fn phase_changes(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::PhaseChanged(c) => Some(c),
            _ => None,
        })
    }

    /// The most recent update, if any.
    #[must_use]
    pub fn last_update(&self) -> Option<&UpdateRecord> {
        self.events.iter().rev().find_map(|e| match e {
            RecordedEvent::Update(u) => Some(u),
            _ => None,
        })
    }

    /// Number of idle events recorded.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Idle))
            .count()
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationSink for RecordingSink {
    fn on_update(&mut self, update: &PhaseUpdate<'_>) {
        self.events.push(RecordedEvent::Update(update.into()));
    }

    fn on_phase_changed(&mut self, change: &PhaseChange<'_>) {
        self.events.push(RecordedEvent::PhaseChanged(change.into()));
    }

    fn on_idle(&mut self) {
        self.events.push(RecordedEvent::Idle);
    }
}
