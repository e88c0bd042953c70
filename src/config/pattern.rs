//! Resolved patterns and built-in presets

use std::time::Duration;

use serde::Serialize;

use crate::error::ConfigError;
use crate::phase::{Phase, PhaseTable};

/// Name of the preset used when none is requested.
pub const DEFAULT_PRESET: &str = "4-7-8";

/// Idle text used when a pattern does not set its own.
pub const DEFAULT_IDLE_LABEL: &str = "Press start to begin";

/// A named, validated breathing pattern ready to drive an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Pattern name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Text shown while idle
    pub idle_label: String,
    /// The phase sequence
    pub table: PhaseTable,
}

impl Pattern {
    /// Creates a pattern with the default idle label.
    #[must_use]
    pub fn new(name: impl Into<String>, table: PhaseTable) -> Self {
        Self {
            name: name.into(),
            description: None,
            idle_label: DEFAULT_IDLE_LABEL.to_string(),
            table,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Serializable summary for listings.
    #[must_use]
    pub fn summary(&self) -> PatternSummary {
        PatternSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            cycle_secs: self.table.cycle_length().as_secs_f64(),
            phases: self
                .table
                .phases()
                .iter()
                .map(|p| PhaseSummary {
                    name: p.name().to_string(),
                    secs: p.duration().as_secs_f64(),
                })
                .collect(),
        }
    }
}

/// JSON-friendly view of a [`Pattern`].
#[derive(Debug, Clone, Serialize)]
pub struct PatternSummary {
    /// Pattern name
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cycle length in seconds
    pub cycle_secs: f64,
    /// Phases in order
    pub phases: Vec<PhaseSummary>,
}

/// JSON-friendly view of a [`Phase`].
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSummary {
    /// Phase label
    pub name: String,
    /// Duration in seconds
    pub secs: f64,
}

// ============================================================================
// Presets
// ============================================================================

const PRESETS: &[(&str, &str, &[(&str, u64)])] = &[
    (
        "4-7-8",
        "Relaxing breath: inhale 4s, hold 7s, exhale 8s",
        &[("inhale", 4000), ("hold", 7000), ("exhale", 8000)],
    ),
    (
        "box",
        "Box breathing: four equal 4s sides",
        &[("inhale", 4000), ("hold", 4000), ("exhale", 4000), ("rest", 4000)],
    ),
    (
        "coherent",
        "Coherent breathing at about 5.5 breaths per minute",
        &[("inhale", 5500), ("exhale", 5500)],
    ),
    (
        "triangle",
        "Triangle breathing: inhale, hold, exhale for 4s each",
        &[("inhale", 4000), ("hold", 4000), ("exhale", 4000)],
    ),
];

/// Names of all built-in presets.
#[must_use]
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _, _)| *name).collect()
}

/// Looks up a built-in preset.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPattern`] if no preset has this name.
pub fn preset(name: &str) -> Result<Pattern, ConfigError> {
    let (name, description, phases) = PRESETS
        .iter()
        .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownPattern {
            name: name.to_string(),
            available: preset_names().join(", "),
        })?;

    let table = PhaseTable::new(
        phases
            .iter()
            .map(|(label, ms)| Phase::new(*label, Duration::from_millis(*ms)))
            .collect(),
    )?;
    Ok(Pattern::new(*name, table).with_description(*description))
}

/// All built-in presets, in listing order.
///
/// # Errors
///
/// Propagates construction errors; the preset table is static, so this
/// only fails if it was edited into an invalid state.
pub fn presets() -> Result<Vec<Pattern>, ConfigError> {
    preset_names().into_iter().map(preset).collect()
}
