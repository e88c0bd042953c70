//! Time projections
//!
//! Pure functions turning the engine's elapsed-time accumulators into the
//! values a display needs. All arithmetic on accumulators is done on whole
//! nanoseconds so that a cycle's worth of samples lands exactly on the
//! cycle boundary.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest `f64` strictly below 1.0.
const JUST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Rounds a duration up to whole seconds.
///
/// A 4s phase with 3.2s remaining displays 4; with exactly 3s remaining it
/// displays 3.
#[must_use]
pub const fn ceil_seconds(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

/// Reduces `d` modulo `period`. A zero period yields zero.
#[must_use]
pub fn wrap(d: Duration, period: Duration) -> Duration {
    let period = period.as_nanos();
    if period == 0 {
        return Duration::ZERO;
    }
    from_nanos(d.as_nanos() % period)
}

/// Ratio `part / whole` clamped into `[0, 1)`.
#[must_use]
pub fn fraction(part: Duration, whole: Duration) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    let ratio = part.as_secs_f64() / whole.as_secs_f64();
    ratio.clamp(0.0, JUST_BELOW_ONE)
}

/// Maps a cycle fraction onto a clock face angle in degrees.
///
/// Fraction 0 points at 12 o'clock (-90°) and the indicator moves
/// clockwise.
#[must_use]
pub fn indicator_angle(fraction: f64) -> f64 {
    fraction.mul_add(360.0, -90.0)
}

#[allow(clippy::cast_possible_truncation)]
fn from_nanos(nanos: u128) -> Duration {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    // always < 1e9
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Duration::new(secs, subsec)
}
