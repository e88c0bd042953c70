//! Session runner
//!
//! Resolves the pattern, wires the terminal and event sinks, and drives a
//! [`Session`] until it ends.

use std::io::IsTerminal;
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{ColorChoice, RunArgs};
use crate::config::{LoaderOptions, PatternSource, resolve_pattern};
use crate::error::BreathpaceError;
use crate::observability::EventEmitter;
use crate::observability::logging::use_ansi;
use crate::presentation::{EventSink, MultiSink, TerminalOptions, TerminalSink};
use crate::session::{Session, SessionOptions, forward_commands};

const COMMAND_BUFFER: usize = 16;

/// Run a breathing session.
///
/// # Errors
///
/// Returns a configuration error if the pattern cannot be resolved, or an
/// I/O error if the events file cannot be opened.
pub async fn run(
    args: &RunArgs,
    color: ColorChoice,
    cancel: CancellationToken,
) -> Result<(), BreathpaceError> {
    let source = args
        .config
        .as_deref()
        .map_or(PatternSource::Preset(&args.pattern), PatternSource::File);
    let loaded = resolve_pattern(source, LoaderOptions::default())?;
    let pattern = loaded.pattern;

    let emitter = Arc::new(match &args.events_file {
        Some(path) => EventEmitter::from_file(path)?,
        None => EventEmitter::noop(),
    });

    let terminal = TerminalSink::new(
        std::io::stdout(),
        TerminalOptions {
            ansi: use_ansi(color, std::io::stdout().is_terminal()),
            phase_bell: !args.no_bell,
            tick_bell: args.tick_bell,
            idle_label: pattern.idle_label.clone(),
            ..TerminalOptions::default()
        },
    );
    let mut sink = MultiSink::new().with(terminal);
    if args.events_file.is_some() {
        sink.push(EventSink::new(Arc::clone(&emitter)));
    }

    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    if args.interactive {
        eprintln!("{}  (type start, stop or quit)", pattern.idle_label);
        tokio::spawn(async move {
            if let Err(e) = forward_commands(BufReader::new(tokio::io::stdin()), tx).await {
                tracing::warn!(error = %e, "failed to read commands from stdin");
            }
        });
    } else {
        drop(tx);
    }

    let options = SessionOptions {
        cadence: args.cadence,
        max_cycles: args.cycles,
        autostart: !args.interactive,
        end_on_input_close: args.interactive,
    };

    let report = Session::new(pattern, sink, options, Arc::clone(&emitter))
        .run(rx, cancel)
        .await;

    tracing::info!(
        reason = %report.reason,
        cycles = report.cycles_completed,
        events = emitter.event_count(),
        "run finished"
    );
    Ok(())
}
