mod common;

use std::sync::Arc;
use std::time::Duration;

use breathpace::config::{Pattern, preset};
use breathpace::observability::EventEmitter;
use breathpace::phase::{Phase, PhaseTable};
use breathpace::presentation::{RecordedEvent, RecordingSink};
use breathpace::session::{ControlCommand, EndReason, Session, SessionOptions};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn quick_pattern() -> Pattern {
    Pattern::new(
        "quick",
        PhaseTable::new(vec![Phase::from_secs("in", 1), Phase::from_secs("out", 2)]).unwrap(),
    )
}

fn session(pattern: Pattern, options: SessionOptions) -> Session<RecordingSink> {
    Session::new(
        pattern,
        RecordingSink::new(),
        options,
        Arc::new(EventEmitter::noop()),
    )
}

fn closed_channel() -> mpsc::Receiver<ControlCommand> {
    let (_tx, rx) = mpsc::channel(1);
    rx
}

#[tokio::test(start_paused = true)]
async fn runs_requested_cycles_then_goes_idle() {
    let options = SessionOptions {
        max_cycles: Some(1),
        ..SessionOptions::default()
    };
    let report = session(preset("4-7-8").unwrap(), options)
        .run(closed_channel(), CancellationToken::new())
        .await;

    assert_eq!(report.reason, EndReason::CyclesCompleted);
    assert_eq!(report.cycles_completed, 1);

    let targets: Vec<_> = report
        .sink
        .phase_changes()
        .map(|c| c.to_name.clone())
        .collect();
    assert_eq!(targets, ["hold", "exhale", "inhale"]);
    assert_eq!(report.sink.events().last(), Some(&RecordedEvent::Idle));
}

#[tokio::test(start_paused = true)]
async fn several_cycles_at_coarse_cadence() {
    let options = SessionOptions {
        cadence: Duration::from_millis(700),
        max_cycles: Some(3),
        ..SessionOptions::default()
    };
    let report = session(quick_pattern(), options)
        .run(closed_channel(), CancellationToken::new())
        .await;

    assert_eq!(report.cycles_completed, 3);
    assert_eq!(report.sink.phase_changes().count(), 6);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_the_exercise() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5_500)).await;
        trigger.cancel();
    });

    let report = session(preset("4-7-8").unwrap(), SessionOptions::default())
        .run(closed_channel(), cancel)
        .await;

    assert_eq!(report.reason, EndReason::Cancelled);
    assert_eq!(report.cycles_completed, 0);
    assert_eq!(report.sink.idle_count(), 1);
    let last = report.sink.last_update().unwrap();
    assert_eq!(last.phase_name, "hold");
}

#[tokio::test(start_paused = true)]
async fn interactive_start_stop_quit() {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        tx.send(ControlCommand::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        tx.send(ControlCommand::Stop).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        tx.send(ControlCommand::Quit).await.unwrap();
    });

    let options = SessionOptions {
        autostart: false,
        end_on_input_close: true,
        ..SessionOptions::default()
    };
    let report = session(quick_pattern(), options)
        .run(rx, CancellationToken::new())
        .await;

    assert_eq!(report.reason, EndReason::Quit);
    assert_eq!(report.sink.idle_count(), 1);
    assert_eq!(report.sink.phase_changes().count(), 1);
    // the engine was already idle at quit, so the idle event came from `stop`
    assert_eq!(report.sink.events().last(), Some(&RecordedEvent::Idle));
}

#[tokio::test(start_paused = true)]
async fn second_start_is_rejected_without_reset() {
    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        tx.send(ControlCommand::Start).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        tx.send(ControlCommand::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        tx.send(ControlCommand::Quit).await.unwrap();
    });

    let options = SessionOptions {
        autostart: false,
        ..SessionOptions::default()
    };
    let report = session(preset("4-7-8").unwrap(), options)
        .run(rx, CancellationToken::new())
        .await;

    // 3.5s into the 4s inhale; a reset at 2s would show 3
    let last = report.sink.last_update().unwrap();
    assert_eq!(last.phase_name, "inhale");
    assert_eq!(last.remaining_display, 1);
}

#[tokio::test(start_paused = true)]
async fn closed_input_ends_interactive_session() {
    let options = SessionOptions {
        autostart: false,
        end_on_input_close: true,
        ..SessionOptions::default()
    };
    let report = session(quick_pattern(), options)
        .run(closed_channel(), CancellationToken::new())
        .await;

    assert_eq!(report.reason, EndReason::InputClosed);
    assert!(report.sink.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn session_events_bracket_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let emitter = Arc::new(EventEmitter::from_file(&path).unwrap());

    let options = SessionOptions {
        max_cycles: Some(1),
        ..SessionOptions::default()
    };
    let report = Session::new(quick_pattern(), RecordingSink::new(), options, emitter)
        .run(closed_channel(), CancellationToken::new())
        .await;
    assert_eq!(report.reason, EndReason::CyclesCompleted);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "SessionStarted");
    assert_eq!(lines[0]["pattern"], "quick");
    assert_eq!(lines[0]["phases"], serde_json::json!(["in", "out"]));
    assert_eq!(lines[0]["sequence"], 0);
    assert_eq!(lines[1]["type"], "SessionEnded");
    assert_eq!(lines[1]["reason"], "cycles_completed");
    assert_eq!(lines[1]["cycles_completed"], 1);
}
