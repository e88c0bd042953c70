//! Error types for `breathpace`
//!
//! The phase engine itself cannot fail once constructed; everything here
//! covers pattern configuration, the control surface, and the I/O done by
//! the command-line front end.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `breathpace` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid pattern, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `breathpace` operations.
///
/// Aggregates the domain errors and maps each one to an exit code.
#[derive(Debug, Error)]
pub enum BreathpaceError {
    /// Pattern loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Control surface rejected a command
    #[error(transparent)]
    Control(#[from] ControlError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BreathpaceError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Control(_) => ExitCode::ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Pattern construction, loading and validation errors.
///
/// Raised before a session starts; none of them are recoverable by the
/// engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The phase list is empty
    #[error("a breathing pattern needs at least one phase")]
    NoPhases,

    /// A phase has a zero duration
    #[error("phase '{name}' (index {index}) must have a positive duration")]
    NonPositiveDuration {
        /// Name of the offending phase
        name: String,
        /// Position of the phase in the table
        index: usize,
    },

    /// A phase has an empty name
    #[error("phase at index {index} has an empty name")]
    EmptyName {
        /// Position of the phase in the table
        index: usize,
    },

    /// A duration string could not be parsed
    #[error("invalid duration '{value}': {message}")]
    InvalidDuration {
        /// The raw value from the configuration
        value: String,
        /// Parser message
        message: String,
    },

    /// No built-in preset has this name
    #[error("unknown pattern '{name}' (available: {available})")]
    UnknownPattern {
        /// The requested name
        name: String,
        /// Comma-separated list of known presets
        available: String,
    },

    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the pattern file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Pattern validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the pattern file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced pattern file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Pattern file exceeds the configured size limit
    #[error("{path} is {size} bytes (limit: {limit})")]
    FileTooLarge {
        /// Path to the pattern file
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found while validating a pattern file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "phases[2].duration")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Prevents the pattern from being used
    Error,
    /// Reported but does not block loading
    Warning,
}

// ============================================================================
// Control Errors
// ============================================================================

/// Errors raised by the control surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    /// The requested command's affordance is currently disabled
    #[error("'{command}' is not available while {state}")]
    Disabled {
        /// The rejected command
        command: &'static str,
        /// Human-readable engine state ("running" or "idle")
        state: &'static str,
    },

    /// An unrecognised command line was entered
    #[error("unknown command '{0}' (expected start, stop or quit)")]
    Unknown(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `breathpace` operations.
pub type Result<T> = std::result::Result<T, BreathpaceError>;

// ============================================================================
// Tests
// ============================================================================
