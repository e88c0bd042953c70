#![no_main]

use std::time::{Duration, Instant};

use breathpace::phase::{CycleEngine, Phase, PhaseTable};
use breathpace::presentation::RecordingSink;
use libfuzzer_sys::fuzz_target;

// First byte: phase count. Next bytes: phase durations in 10ms units.
// Remaining byte pairs: signed sample offsets in ms, so clocks may run backwards.
fuzz_target!(|data: &[u8]| {
    let Some((&count, rest)) = data.split_first() else {
        return;
    };
    let count = usize::from(count % 6) + 1;
    if rest.len() < count {
        return;
    }
    let (durations, samples) = rest.split_at(count);

    let phases = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| Phase::new(format!("p{i}"), Duration::from_millis(u64::from(d) * 10)))
        .collect();
    let Ok(table) = PhaseTable::new(phases) else {
        return;
    };

    let mut engine = CycleEngine::new(table, RecordingSink::new());
    engine.start();

    let base = Instant::now() + Duration::from_secs(3_600);
    let mut at = base;
    for pair in samples.chunks_exact(2) {
        let step = i16::from_le_bytes([pair[0], pair[1]]);
        let delta = Duration::from_millis(u64::from(step.unsigned_abs()));
        let next = if step < 0 {
            at.checked_sub(delta)
        } else {
            at.checked_add(delta)
        };
        let Some(next) = next else {
            return;
        };
        at = next;
        engine.advance(at);

        assert!(engine.elapsed_in_phase() < engine.current_phase().duration());
        assert!(engine.elapsed_in_cycle() < engine.table().cycle_length());
        assert!(engine.remaining_display() >= 1);
    }
});
