//! Pattern validation
//!
//! Checks a parsed [`PatternFile`] and collects every problem instead of
//! stopping at the first, so `breathpace validate` can report them all in
//! one pass.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{Severity, ValidationIssue};

use super::duration::resolve;
use super::loader::ConfigLimits;
use super::schema::PatternFile;

/// Phases longer than this are probably a typo (`40` instead of `4`).
pub const LONG_PHASE_THRESHOLD: Duration = Duration::from_secs(120);

const MAX_NAME_LENGTH: usize = 64;

/// Result of validating a pattern file.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,

    /// Resolved durations, one per phase; `None` where resolution failed.
    pub durations: Vec<Option<Duration>>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Pattern validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a pattern file and returns every issue found.
    pub fn validate(&mut self, file: &PatternFile, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_metadata(file);
        let durations = self.validate_phases(file, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
            durations,
        }
    }

    fn validate_metadata(&mut self, file: &PatternFile) {
        let name = file.pattern.name.trim();
        if name.is_empty() {
            self.add_warning("pattern.name", "pattern has no name");
        } else if name.chars().count() > MAX_NAME_LENGTH {
            self.add_warning(
                "pattern.name",
                &format!("name is longer than {MAX_NAME_LENGTH} characters"),
            );
        }

        if let Some(label) = &file.pattern.idle_label {
            if label.trim().is_empty() {
                self.add_warning("pattern.idle_label", "idle label is empty");
            }
        }
    }

    fn validate_phases(
        &mut self,
        file: &PatternFile,
        limits: &ConfigLimits,
    ) -> Vec<Option<Duration>> {
        if file.phases.is_empty() {
            self.add_error("phases", "a breathing pattern needs at least one phase");
            return Vec::new();
        }

        if file.phases.len() > limits.max_phases {
            self.add_error(
                "phases",
                &format!(
                    "{} phases exceeds the limit of {}",
                    file.phases.len(),
                    limits.max_phases
                ),
            );
        }

        let mut seen = HashSet::new();
        let mut durations = Vec::with_capacity(file.phases.len());

        for (i, phase) in file.phases.iter().enumerate() {
            let name = phase.name.trim();
            if name.is_empty() {
                self.add_error(&format!("phases[{i}].name"), "phase name is empty");
            } else if !seen.insert(name) {
                self.add_warning(
                    &format!("phases[{i}].name"),
                    &format!("phase name '{name}' is used more than once"),
                );
            }

            let path = format!("phases[{i}].duration");
            match resolve(&phase.duration) {
                Ok(d) if d.is_zero() => {
                    self.add_error(&path, "duration must be positive");
                    durations.push(None);
                }
                Ok(d) => {
                    if d > LONG_PHASE_THRESHOLD {
                        self.add_warning(
                            &path,
                            &format!(
                                "{} is unusually long for a breathing phase",
                                humantime::format_duration(d)
                            ),
                        );
                    }
                    durations.push(Some(d));
                }
                Err(e) => {
                    self.add_error(&path, &e.to_string());
                    durations.push(None);
                }
            }
        }

        durations
    }

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DurationSpec, PatternMeta, PhaseSpec};

    fn limits() -> ConfigLimits {
        ConfigLimits {
            max_phases: 4,
            max_config_size: 1024,
        }
    }

    fn phase(name: &str, duration: DurationSpec) -> PhaseSpec {
        PhaseSpec {
            name: name.to_string(),
            duration,
        }
    }

    fn file(phases: Vec<PhaseSpec>) -> PatternFile {
        PatternFile {
            pattern: PatternMeta {
                name: "calm".to_string(),
                ..PatternMeta::default()
            },
            phases,
        }
    }

    fn secs(s: f64) -> DurationSpec {
        DurationSpec::Seconds(s)
    }

    #[test]
    fn test_valid_file() {
        let result = Validator::new().validate(
            &file(vec![phase("inhale", secs(4.0)), phase("exhale", secs(4.0))]),
            &limits(),
        );
        assert!(!result.has_errors());
        assert!(!result.has_warnings());
        assert_eq!(
            result.durations,
            vec![Some(Duration::from_secs(4)), Some(Duration::from_secs(4))]
        );
    }

    #[test]
    fn test_empty_phases() {
        let result = Validator::new().validate(&file(vec![]), &limits());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "phases");
    }

    #[test]
    fn test_collects_all_errors() {
        let result = Validator::new().validate(
            &file(vec![
                phase("", secs(4.0)),
                phase("hold", secs(0.0)),
                phase("exhale", DurationSpec::Text("eventually".into())),
            ]),
            &limits(),
        );
        let paths: Vec<_> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            ["phases[0].name", "phases[1].duration", "phases[2].duration"]
        );
        assert_eq!(result.durations[0], Some(Duration::from_secs(4)));
        assert_eq!(result.durations[1], None);
    }

    #[test]
    fn test_too_many_phases() {
        let phases = (0..5).map(|i| phase(&format!("p{i}"), secs(1.0))).collect();
        let result = Validator::new().validate(&file(phases), &limits());
        assert!(result.has_errors());
        assert!(result.errors[0].message.contains("exceeds the limit of 4"));
    }

    #[test]
    fn test_duplicate_name_warns() {
        let result = Validator::new().validate(
            &file(vec![
                phase("hold", secs(4.0)),
                phase("inhale", secs(4.0)),
                phase("hold", secs(4.0)),
            ]),
            &limits(),
        );
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "phases[2].name");
    }

    #[test]
    fn test_long_phase_warns() {
        let result = Validator::new().validate(
            &file(vec![phase("hold", DurationSpec::Text("5m".into()))]),
            &limits(),
        );
        assert!(!result.has_errors());
        assert!(result.warnings[0].message.contains("unusually long"));
    }

    #[test]
    fn test_missing_name_warns() {
        let mut f = file(vec![phase("in", secs(1.0))]);
        f.pattern.name = String::new();
        let result = Validator::new().validate(&f, &limits());
        assert_eq!(result.warnings[0].path, "pattern.name");
    }

    #[test]
    fn test_validator_is_reusable() {
        let mut validator = Validator::new();
        let bad = validator.validate(&file(vec![]), &limits());
        assert!(bad.has_errors());
        let good = validator.validate(&file(vec![phase("in", secs(1.0))]), &limits());
        assert!(!good.has_errors());
    }
}
