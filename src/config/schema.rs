//! Pattern file schema
//!
//! These types mirror the YAML layout of a pattern file. They are checked
//! by the [`Validator`](super::validation::Validator) before being turned
//! into a [`PhaseTable`](crate::phase::PhaseTable).

use serde::{Deserialize, Serialize};

// ============================================================================
// Top-Level File
// ============================================================================

/// Root of a pattern file.
///
/// ```yaml
/// pattern:
///   name: relaxing-breath
/// phases:
///   - name: inhale
///     duration: 4s
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternFile {
    /// Descriptive metadata
    #[serde(default)]
    pub pattern: PatternMeta,

    /// Ordered phase list
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
}

/// Pattern metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternMeta {
    /// Pattern name shown in listings and session events
    #[serde(default)]
    pub name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Text shown while the exercise is idle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_label: Option<String>,
}

// ============================================================================
// Phases
// ============================================================================

/// One phase as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseSpec {
    /// Display label
    pub name: String,

    /// Phase length
    pub duration: DurationSpec,
}

/// A duration as written: either bare seconds or a humantime string.
///
/// `4`, `5.5`, `"4s"`, `"1500ms"` and `"1m 30s"` are all accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    /// Number of seconds, possibly fractional
    Seconds(f64),
    /// Human-readable text
    Text(String),
}

impl std::fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seconds(s) => write!(f, "{s}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let yaml = r"
pattern:
  name: relaxing-breath
  description: slow exhale
  idle_label: Ready when you are
phases:
  - name: inhale
    duration: 4s
  - name: hold
    duration: 7
  - name: exhale
    duration: 8.5
";
        let file: PatternFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.pattern.name, "relaxing-breath");
        assert_eq!(file.pattern.idle_label.as_deref(), Some("Ready when you are"));
        assert_eq!(file.phases.len(), 3);
        assert_eq!(file.phases[0].duration, DurationSpec::Text("4s".into()));
        assert_eq!(file.phases[1].duration, DurationSpec::Seconds(7.0));
        assert_eq!(file.phases[2].duration, DurationSpec::Seconds(8.5));
    }

    #[test]
    fn test_metadata_is_optional() {
        let yaml = "phases:\n  - name: in\n    duration: 1s\n";
        let file: PatternFile = serde_yaml::from_str(yaml).unwrap();
        assert!(file.pattern.name.is_empty());
        assert!(file.pattern.description.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "phases:\n  - name: in\n    duration: 1s\n    colour: red\n";
        assert!(serde_yaml::from_str::<PatternFile>(yaml).is_err());
    }

    #[test]
    fn test_duration_spec_display() {
        assert_eq!(DurationSpec::Text("4s".into()).to_string(), "4s");
        assert_eq!(DurationSpec::Seconds(5.5).to_string(), "5.5");
    }
}
