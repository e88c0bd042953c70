//! Preset listing
//!
//! Prints the built-in breathing patterns with their phases.

use std::fmt::Write;

use crate::cli::args::{OutputFormat, PatternsArgs};
use crate::config::{DEFAULT_PRESET, PatternSummary, presets};
use crate::error::BreathpaceError;

/// List the built-in patterns.
///
/// # Errors
///
/// Returns a configuration error if a preset fails to build, or a JSON
/// error if serialization fails.
pub fn run(args: &PatternsArgs) -> Result<(), BreathpaceError> {
    let summaries: Vec<PatternSummary> = presets()?.iter().map(|p| p.summary()).collect();

    match args.format {
        OutputFormat::Human => {
            for summary in &summaries {
                println!("{}", render(summary));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }
    Ok(())
}

/// One human-readable line per pattern.
fn render(summary: &PatternSummary) -> String {
    let mut line = format!("{:<10} {:>5}s  ", summary.name, secs(summary.cycle_secs));
    for (i, phase) in summary.phases.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        let _ = write!(line, "{} {}s", phase.name, secs(phase.secs));
    }
    if summary.name == DEFAULT_PRESET {
        line.push_str("  (default)");
    }
    line
}

/// Formats seconds without a trailing `.0` for whole values.
fn secs(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
