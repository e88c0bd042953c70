//! Pattern file validation
//!
//! Checks one or more pattern files and reports every issue found, in
//! human or JSON form. Exits with a configuration error if any file fails.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{LoaderOptions, PatternLoader};
use crate::error::{BreathpaceError, ConfigError, Severity, ValidationIssue};

/// Validation outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// The file checked
    pub file: String,
    /// Whether the file passed
    pub valid: bool,
    /// Errors and warnings, in the order found
    pub issues: Vec<ValidationIssue>,
}

/// Validate every file named on the command line.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] listing every error if any
/// file is invalid (or has warnings under `--strict`).
pub fn run(args: &ValidateArgs) -> Result<(), BreathpaceError> {
    let loader = PatternLoader::new(LoaderOptions::default());
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(&loader, path, args.strict))
        .collect();

    match args.format {
        OutputFormat::Human => {
            for report in &reports {
                print_human(report);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    let failed: Vec<&FileReport> = reports.iter().filter(|r| !r.valid).collect();
    if failed.is_empty() {
        return Ok(());
    }

    Err(ConfigError::ValidationError {
        path: failed
            .iter()
            .map(|r| r.file.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        errors: failed
            .iter()
            .flat_map(|r| r.issues.iter().cloned())
            .collect(),
    }
    .into())
}

/// Validates a single file without failing fast.
pub fn check_file(loader: &PatternLoader, path: &Path, strict: bool) -> FileReport {
    tracing::info!(file = %path.display(), "validating pattern");
    let file = path.display().to_string();

    let result = loader
        .read(path)
        .and_then(|text| loader.validate_str(&text, path));

    match result {
        Ok(result) => {
            let valid = !result.has_errors() && !(strict && result.has_warnings());
            let mut issues = result.errors;
            issues.extend(result.warnings);
            FileReport {
                file,
                valid,
                issues,
            }
        }
        Err(e) => FileReport {
            file,
            valid: false,
            issues: vec![ValidationIssue {
                path: issue_path(&e),
                message: e.to_string(),
                severity: Severity::Error,
            }],
        },
    }
}

fn issue_path(error: &ConfigError) -> String {
    match error {
        ConfigError::ParseError {
            line: Some(line), ..
        } => format!("line {line}"),
        _ => "<file>".to_string(),
    }
}

fn print_human(report: &FileReport) {
    let mark = if report.valid { "ok" } else { "FAILED" };
    println!("{}: {mark}", report.file);
    for issue in &report.issues {
        println!("  {issue}");
    }
}
