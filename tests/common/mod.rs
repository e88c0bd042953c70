//! Shared integration-test harness for running the `breathpace` binary and
//! building engines against a recording sink.

#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::time::Instant;

use breathpace::phase::{CycleEngine, Phase};
use breathpace::presentation::RecordingSink;
use tempfile::NamedTempFile;

/// Helpers for spawning the compiled binary.
pub struct BreathpaceProcess;

impl BreathpaceProcess {
    /// Path to the compiled binary.
    #[must_use]
    pub fn bin() -> &'static str {
        env!("CARGO_BIN_EXE_breathpace")
    }

    /// Runs the binary with `args`, stdin closed, and collects its output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(Self::bin())
            .args(args)
            .env_remove("BREATHPACE_PATTERN")
            .env_remove("BREATHPACE_CONFIG")
            .env_remove("BREATHPACE_CADENCE")
            .env_remove("BREATHPACE_EVENTS_FILE")
            .env_remove("BREATHPACE_COLOR")
            .env_remove("BREATHPACE_LOG_LEVEL")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .output()
            .expect("failed to spawn breathpace")
    }

    /// Runs the binary feeding `input` on stdin.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_with_input(args: &[&str], input: &str) -> Output {
        let mut child = Command::new(Self::bin())
            .args(args)
            .env_remove("BREATHPACE_PATTERN")
            .env_remove("BREATHPACE_CONFIG")
            .env_remove("BREATHPACE_EVENTS_FILE")
            .env_remove("BREATHPACE_LOG_LEVEL")
            .env("NO_COLOR", "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn breathpace");

        child
            .stdin
            .take()
            .expect("stdin not captured")
            .write_all(input.as_bytes())
            .expect("failed to write stdin");

        child.wait_with_output().expect("failed to wait for breathpace")
    }
}

/// Writes `content` to a temporary `.yaml` file.
#[allow(clippy::missing_panics_doc)]
pub fn pattern_file(content: &str) -> NamedTempFile {
    let mut f = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("failed to create temp file");
    f.write_all(content.as_bytes()).expect("failed to write temp file");
    f.flush().expect("failed to flush temp file");
    f
}

/// The relaxing-breath table: inhale 4s, hold 7s, exhale 8s.
#[must_use]
pub fn relaxing_phases() -> Vec<Phase> {
    vec![
        Phase::from_secs("inhale", 4),
        Phase::from_secs("hold", 7),
        Phase::from_secs("exhale", 8),
    ]
}

/// An engine over [`relaxing_phases`] recording into memory.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn relaxing_engine() -> CycleEngine<RecordingSink> {
    CycleEngine::from_phases(relaxing_phases(), RecordingSink::new()).expect("valid table")
}

/// Starts `engine` and feeds the baseline sample at `t0`.
pub fn start_at(engine: &mut CycleEngine<RecordingSink>, t0: Instant) {
    engine.start();
    engine.advance(t0);
}

/// Asserts two floats are within `1e-4`.
#[allow(clippy::missing_panics_doc)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
