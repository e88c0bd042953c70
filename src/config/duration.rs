//! Duration parsing
//!
//! Phase durations may be written as bare seconds (`4`, `5.5`), as
//! humantime text (`4s`, `1500ms`, `1m 30s`) or as fractional seconds
//! with a unit (`5.5s`).

use std::time::Duration;

use crate::error::ConfigError;

use super::schema::DurationSpec;

/// Converts a [`DurationSpec`] into a [`Duration`].
///
/// Zero is accepted here; rejecting it is the validator's job so that the
/// issue can be reported against the right field.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] for negative, non-finite or
/// unparsable values.
pub fn resolve(spec: &DurationSpec) -> Result<Duration, ConfigError> {
    match spec {
        DurationSpec::Seconds(secs) => from_secs_f64(*secs, &spec.to_string()),
        DurationSpec::Text(text) => parse_duration(text),
    }
}

/// Parses a duration string.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] if the text is not a duration.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<f64>() {
        return from_secs_f64(secs, s);
    }

    match humantime::parse_duration(s) {
        Ok(d) => Ok(d),
        Err(e) => {
            // humantime only takes integers; allow "5.5s"
            if let Some(secs) = s.strip_suffix('s').and_then(|n| n.trim().parse::<f64>().ok()) {
                return from_secs_f64(secs, s);
            }
            Err(ConfigError::InvalidDuration {
                value: s.to_string(),
                message: e.to_string(),
            })
        }
    }
}

fn from_secs_f64(secs: f64, raw: &str) -> Result<Duration, ConfigError> {
    if secs.is_sign_negative() && secs != 0.0 {
        return Err(ConfigError::InvalidDuration {
            value: raw.to_string(),
            message: "duration cannot be negative".to_string(),
        });
    }
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidDuration {
        value: raw.to_string(),
        message: e.to_string(),
    })
}
