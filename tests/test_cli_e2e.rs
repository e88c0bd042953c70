mod common;

use common::{BreathpaceProcess, pattern_file};

const QUICK: &str = r"
pattern:
  name: quick
phases:
  - name: inhale
    duration: 200ms
  - name: exhale
    duration: 300ms
";

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// version / completions
// ============================================================================

#[test]
fn version_human() {
    let output = BreathpaceProcess::spawn_command(&["version"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("breathpace "), "{out}");
    assert!(out.contains('.'), "version output should contain a version number: {out}");
}

#[test]
fn version_json() {
    let output = BreathpaceProcess::spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("version JSON should be valid");
    assert_eq!(parsed["name"], "breathpace");
    assert_eq!(parsed["default_pattern"], "4-7-8");
}

#[test]
fn completions_bash() {
    let output = BreathpaceProcess::spawn_command(&["completions", "bash"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("breathpace"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = BreathpaceProcess::spawn_command(&["run", "--tempo", "fast"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn pattern_and_config_conflict() {
    let output =
        BreathpaceProcess::spawn_command(&["run", "--pattern", "box", "--config", "x.yaml"]);
    assert_eq!(output.status.code(), Some(64));
}

// ============================================================================
// patterns
// ============================================================================

#[test]
fn patterns_human_lists_presets() {
    let output = BreathpaceProcess::spawn_command(&["patterns"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    for name in ["4-7-8", "box", "coherent", "triangle"] {
        assert!(out.contains(name), "missing {name}: {out}");
    }
    assert!(out.contains("(default)"));
}

#[test]
fn patterns_json() {
    let output = BreathpaceProcess::spawn_command(&["patterns", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[0]["name"], "4-7-8");
    assert_eq!(list[0]["cycle_secs"], 19.0);
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn validate_valid_file() {
    let f = pattern_file(QUICK);
    let output = BreathpaceProcess::spawn_command(&["validate", f.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains(": ok"));
}

#[test]
fn validate_invalid_file_reports_all_issues() {
    let f = pattern_file("phases:\n  - name: ''\n    duration: 4s\n  - name: b\n    duration: -1\n");
    let output = BreathpaceProcess::spawn_command(&["validate", f.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("FAILED"), "{out}");
    assert!(out.contains("phases[0].name"), "{out}");
    assert!(out.contains("phases[1].duration"), "{out}");
}

#[test]
fn validate_json_output() {
    let good = pattern_file(QUICK);
    let bad = pattern_file("phases: []\n");
    let output = BreathpaceProcess::spawn_command(&[
        "validate",
        "--format",
        "json",
        good.path().to_str().unwrap(),
        bad.path().to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed[0]["valid"], true);
    assert_eq!(parsed[1]["valid"], false);
    assert_eq!(parsed[1]["issues"][0]["path"], "phases");
}

#[test]
fn validate_strict_rejects_warnings() {
    let f = pattern_file("phases:\n  - name: in\n    duration: 4s\n");
    let path = f.path().to_str().unwrap();
    assert!(BreathpaceProcess::spawn_command(&["validate", path]).status.success());
    let strict = BreathpaceProcess::spawn_command(&["validate", "--strict", path]);
    assert_eq!(strict.status.code(), Some(2));
}

#[test]
fn validate_missing_file() {
    let output = BreathpaceProcess::spawn_command(&["validate", "/nonexistent/calm.yaml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("file not found"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn run_fixed_cycles_from_file() {
    let f = pattern_file(QUICK);
    let dir = tempfile::tempdir().unwrap();
    let events = dir.path().join("events.jsonl");

    let output = BreathpaceProcess::spawn_command(&[
        "run",
        "--config",
        f.path().to_str().unwrap(),
        "--cycles",
        "2",
        "--cadence",
        "20ms",
        "--no-bell",
        "--events-file",
        events.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("inhale"), "{out}");
    assert!(out.contains("exhale"), "{out}");
    assert!(!out.contains('\x07'), "bell should be disabled");

    let lines: Vec<serde_json::Value> = std::fs::read_to_string(&events)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = lines.iter().map(|v| v["type"].as_str().unwrap()).collect();
    assert_eq!(kinds.first(), Some(&"SessionStarted"));
    assert_eq!(kinds.last(), Some(&"SessionEnded"));
    assert_eq!(kinds[kinds.len() - 2], "ExerciseStopped");
    // the start plus one entry per boundary: in, out, in, out, in
    assert!(kinds.iter().filter(|k| **k == "PhaseEntered").count() >= 5);
    assert_eq!(lines.last().unwrap()["reason"], "cycles_completed");
    assert_eq!(lines.last().unwrap()["cycles_completed"], 2);

    let sequences: Vec<u64> = lines
        .iter()
        .map(|v| v["sequence"].as_u64().unwrap())
        .collect();
    assert!(sequences.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn run_unknown_preset() {
    let output = BreathpaceProcess::spawn_command(&["run", "--pattern", "square"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown pattern 'square'"));
}

#[test]
fn run_invalid_config() {
    let f = pattern_file("phases:\n  - name: in\n    duration: 0s\n");
    let output =
        BreathpaceProcess::spawn_command(&["run", "--config", f.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("validation failed"));
}

#[test]
fn run_interactive_quit() {
    let f = pattern_file(QUICK);
    let output = BreathpaceProcess::spawn_with_input(
        &[
            "run",
            "--config",
            f.path().to_str().unwrap(),
            "--interactive",
        ],
        "pause\nstart\nquit\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("unknown command 'pause'"));
    assert!(stdout(&output).contains("inhale"));
}
