//! Phase table representation
//!
//! A breathing pattern is an ordered, non-empty list of named phases with
//! positive durations. The table is validated once at construction and is
//! immutable afterwards.

use std::time::Duration;

use crate::error::ConfigError;

/// A named, fixed-duration segment of the breathing cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    name: String,
    duration: Duration,
}

impl Phase {
    /// Creates a phase. Validation happens when the phase is placed in a
    /// [`PhaseTable`].
    #[must_use]
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    /// Convenience constructor taking whole seconds.
    #[must_use]
    pub fn from_secs(name: impl Into<String>, secs: u64) -> Self {
        Self::new(name, Duration::from_secs(secs))
    }

    /// Display label of the phase.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How long the phase lasts.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

/// Validated, ordered phase sequence.
///
/// Guarantees at least one phase, every name non-empty, and every duration
/// strictly positive. `cycle_length` is the sum of all durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTable {
    phases: Vec<Phase>,
    cycle_length: Duration,
}

impl PhaseTable {
    /// Builds a table from an ordered phase list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPhases`] for an empty list,
    /// [`ConfigError::EmptyName`] for a blank name, and
    /// [`ConfigError::NonPositiveDuration`] for a zero duration.
    pub fn new(phases: Vec<Phase>) -> Result<Self, ConfigError> {
        if phases.is_empty() {
            return Err(ConfigError::NoPhases);
        }

        let mut cycle_length = Duration::ZERO;
        for (index, phase) in phases.iter().enumerate() {
            if phase.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if phase.duration.is_zero() {
                return Err(ConfigError::NonPositiveDuration {
                    name: phase.name.clone(),
                    index,
                });
            }
            cycle_length = cycle_length.saturating_add(phase.duration);
        }

        Ok(Self {
            phases,
            cycle_length,
        })
    }

    /// Number of phases (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Sum of all phase durations.
    #[must_use]
    pub const fn cycle_length(&self) -> Duration {
        self.cycle_length
    }

    /// All phases in order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Returns the phase at `index`, wrapping around the cycle.
    #[must_use]
    pub fn phase(&self, index: usize) -> &Phase {
        &self.phases[index % self.phases.len()]
    }

    /// Index of the phase following `index`.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phases.len()
    }

    /// Total duration of all phases before `index`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Duration {
        self.phases
            .iter()
            .take(index)
            .map(Phase::duration)
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl TryFrom<Vec<Phase>> for PhaseTable {
    type Error = ConfigError;

    fn try_from(phases: Vec<Phase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}
