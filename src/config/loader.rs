//! Pattern file loading
//!
//! Runs the pipeline from a YAML file on disk to a validated [`Pattern`]:
//! size check, YAML parse, validation, table construction.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ConfigError, ValidationIssue};
use crate::phase::{Phase, PhaseTable};

use super::pattern::{DEFAULT_IDLE_LABEL, Pattern};
use super::schema::PatternFile;
use super::validation::{ValidationResult, Validator};

/// Loader options.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Resource limits.
    pub config_limits: ConfigLimits,
}

/// Limits applied while loading a pattern file.
///
/// Defaults can be overridden via `BREATHPACE_MAX_*` environment variables.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum number of phases.
    pub max_phases: usize,

    /// Maximum pattern file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_phases: env_or("BREATHPACE_MAX_PHASES", 32),
            max_config_size: env_or("BREATHPACE_MAX_CONFIG_SIZE", 64 * 1024),
        }
    }
}

/// Result of loading a pattern file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded pattern.
    pub pattern: Pattern,

    /// Warnings found during validation.
    pub warnings: Vec<ValidationIssue>,
}

/// Pattern file loader.
#[derive(Debug, Default)]
pub struct PatternLoader {
    options: LoaderOptions,
}

impl PatternLoader {
    /// Creates a loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads and validates a pattern file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file cannot be read,
    /// [`ConfigError::FileTooLarge`] above the size limit,
    /// [`ConfigError::ParseError`] for malformed YAML and
    /// [`ConfigError::ValidationError`] carrying every issue found.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let text = self.read(path)?;
        self.load_str(&text, path)
    }

    /// Reads a pattern file after checking it against the size limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file cannot be read and
    /// [`ConfigError::FileTooLarge`] above the size limit.
    pub fn read(&self, path: &Path) -> Result<String, ConfigError> {
        let limit = self.options.config_limits.max_config_size;
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let size = metadata.len();
        if !usize::try_from(size).is_ok_and(|s| s <= limit) {
            return Err(ConfigError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: limit as u64,
            });
        }

        debug!(path = %path.display(), bytes = size, "reading pattern file");
        std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })
    }

    /// Loads a pattern from YAML text. `origin` is used in error messages.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file-system errors.
    pub fn load_str(&self, text: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let file = parse(text, origin)?;
        let result = self.check(&file);

        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: origin.display().to_string(),
                errors: result.errors,
            });
        }

        for warning in &result.warnings {
            warn!(path = %origin.display(), "{warning}");
        }

        let pattern = build(file, &result.durations, origin)?;
        Ok(LoadResult {
            pattern,
            warnings: result.warnings,
        })
    }

    /// Validates YAML text without building a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] when the text is not a pattern
    /// file at all; validation issues are returned in the result.
    pub fn validate_str(&self, text: &str, origin: &Path) -> Result<ValidationResult, ConfigError> {
        let file = parse(text, origin)?;
        Ok(self.check(&file))
    }

    fn check(&self, file: &PatternFile) -> ValidationResult {
        Validator::new().validate(file, &self.options.config_limits)
    }
}

fn parse(text: &str, origin: &Path) -> Result<PatternFile, ConfigError> {
    if text.trim().is_empty() {
        return Err(ConfigError::ParseError {
            path: origin.to_path_buf(),
            line: None,
            message: "pattern file is empty".to_string(),
        });
    }

    serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: origin.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

fn build(
    file: PatternFile,
    durations: &[Option<std::time::Duration>],
    origin: &Path,
) -> Result<Pattern, ConfigError> {
    let phases = file
        .phases
        .into_iter()
        .zip(durations)
        .map(|(spec, duration)| {
            duration
                .map(|d| Phase::new(spec.name.trim(), d))
                .ok_or_else(|| ConfigError::InvalidDuration {
                    value: spec.duration.to_string(),
                    message: "unresolved duration".to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let name = if file.pattern.name.trim().is_empty() {
        origin
            .file_stem()
            .map_or_else(|| "custom".to_string(), |s| s.to_string_lossy().into_owned())
    } else {
        file.pattern.name.trim().to_string()
    };

    Ok(Pattern {
        name,
        description: file.pattern.description,
        idle_label: file
            .pattern
            .idle_label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IDLE_LABEL.to_string()),
        table: PhaseTable::new(phases)?,
    })
}

/// Reads an environment variable and parses it, falling back to `default`.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
