//! Version information display
//!
//! Prints version and build metadata in human or JSON format.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::config::{DEFAULT_PRESET, preset_names};
use crate::error::BreathpaceError;

/// Print version and build information.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), BreathpaceError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version}");
        }
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": name,
                "version": version,
                "default_pattern": DEFAULT_PRESET,
                "presets": preset_names(),
            });
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}
