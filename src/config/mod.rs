//! Pattern configuration
//!
//! Built-in presets and YAML pattern files, both resolved to a validated
//! [`Pattern`].

pub mod duration;
pub mod loader;
pub mod pattern;
pub mod schema;
pub mod validation;

use std::path::Path;

pub use loader::{ConfigLimits, LoadResult, LoaderOptions, PatternLoader};
pub use pattern::{DEFAULT_PRESET, Pattern, PatternSummary, preset, preset_names, presets};
pub use schema::{DurationSpec, PatternFile, PatternMeta, PhaseSpec};
pub use validation::{ValidationResult, Validator};

use crate::error::ConfigError;

/// Where a session's pattern comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource<'a> {
    /// A built-in preset by name
    Preset(&'a str),
    /// A YAML pattern file
    File(&'a Path),
}

/// Resolves a pattern from a preset name or file.
///
/// # Errors
///
/// Returns any [`ConfigError`] raised by preset lookup or file loading.
pub fn resolve_pattern(
    source: PatternSource<'_>,
    options: LoaderOptions,
) -> Result<LoadResult, ConfigError> {
    match source {
        PatternSource::Preset(name) => Ok(LoadResult {
            pattern: preset(name)?,
            warnings: Vec::new(),
        }),
        PatternSource::File(path) => PatternLoader::new(options).load(path),
    }
}
