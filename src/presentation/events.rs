//! Event stream sink
//!
//! Bridges engine output onto the JSONL [`EventEmitter`]. Per-sample updates
//! are far too frequent for a log, so only cues are written: phase entries
//! and changes of the displayed second.

use std::sync::Arc;

use chrono::Utc;

use crate::observability::{Event, EventEmitter};
use crate::phase::{PhaseChange, PhaseUpdate, PresentationSink};

use super::cue::{Cue, CueTracker};

/// Sink writing discrete session events.
#[derive(Debug)]
pub struct EventSink {
    emitter: Arc<EventEmitter>,
    cues: CueTracker,
}

impl EventSink {
    /// Creates a sink sharing `emitter` with the session.
    #[must_use]
    pub fn new(emitter: Arc<EventEmitter>) -> Self {
        Self {
            emitter,
            cues: CueTracker::new(),
        }
    }
}

impl PresentationSink for EventSink {
    fn on_update(&mut self, update: &PhaseUpdate<'_>) {
        match self.cues.observe_update(update) {
            Some(Cue::Start) => self.emitter.emit(Event::PhaseEntered {
                timestamp: Utc::now(),
                phase_name: update.phase_name.to_owned(),
                phase_index: update.phase_index,
                cycles_completed: 0,
            }),
            Some(Cue::Tick) => self.emitter.emit(Event::CountdownTick {
                timestamp: Utc::now(),
                phase_name: update.phase_name.to_owned(),
                remaining_secs: update.remaining_display,
                cycle_fraction: update.cycle_fraction,
            }),
            Some(Cue::Phase) | None => {}
        }
    }

    fn on_phase_changed(&mut self, change: &PhaseChange<'_>) {
        self.cues.observe_change(change);
        self.emitter.emit(Event::PhaseEntered {
            timestamp: Utc::now(),
            phase_name: change.to_name.to_owned(),
            phase_index: change.to_index,
            cycles_completed: change.cycles_completed,
        });
    }

    fn on_idle(&mut self) {
        self.cues.reset();
        self.emitter.emit(Event::ExerciseStopped {
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::events::tests::TestWriter;
    use crate::phase::{CycleEngine, Phase};
    use std::time::{Duration, Instant};

    fn lines(tw: &TestWriter) -> Vec<serde_json::Value> {
        tw.contents()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn emits_phase_entries_and_ticks() {
        let tw = TestWriter::new();
        let emitter = Arc::new(EventEmitter::new(Box::new(tw.clone())));
        let mut engine = CycleEngine::from_phases(
            vec![Phase::from_secs("inhale", 2), Phase::from_secs("exhale", 2)],
            EventSink::new(Arc::clone(&emitter)),
        )
        .unwrap();

        let t0 = Instant::now();
        engine.start();
        engine.advance(t0);
        for ms in (100..=3000).step_by(100) {
            engine.advance(t0 + Duration::from_millis(ms));
        }
        engine.stop();

        let kinds: Vec<String> = lines(&tw)
            .iter()
            .map(|v| v["type"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "PhaseEntered",
                "CountdownTick",
                "PhaseEntered",
                "CountdownTick",
                "ExerciseStopped",
            ]
        );

        let parsed = lines(&tw);
        assert_eq!(parsed[0]["phase_name"], "inhale");
        assert_eq!(parsed[1]["remaining_secs"], 1);
        assert_eq!(parsed[2]["phase_name"], "exhale");
    }
}
