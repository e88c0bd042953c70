//! Terminal renderer
//!
//! Redraws a single status line per phase: the phase name, the whole-second
//! countdown, a bar for the position within the cycle and the clock-face
//! angle of the indicator. Phase changes leave the finished line in the
//! scrollback and ring the terminal bell.

use std::io::Write;

use tracing::debug;

use crate::config::pattern::DEFAULT_IDLE_LABEL;
use crate::phase::progress::indicator_angle;
use crate::phase::{PhaseChange, PhaseUpdate, PresentationSink};

use super::cue::{Cue, CueTracker};

const CLEAR_LINE: &str = "\r\x1b[2K";
const RESET: &str = "\x1b[0m";
const BELL: &str = "\x07";
const PALETTE: [&str; 4] = ["\x1b[36m", "\x1b[33m", "\x1b[35m", "\x1b[32m"];

/// Rendering options for [`TerminalSink`].
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Emit ANSI colour and line-clearing sequences.
    pub ansi: bool,
    /// Ring the bell when a phase starts.
    pub phase_bell: bool,
    /// Ring the bell on every displayed second.
    pub tick_bell: bool,
    /// Width of the cycle bar in characters.
    pub bar_width: usize,
    /// Text shown when the exercise is idle.
    pub idle_label: String,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            ansi: false,
            phase_bell: true,
            tick_bell: false,
            bar_width: 24,
            idle_label: DEFAULT_IDLE_LABEL.to_owned(),
        }
    }
}

/// Sink drawing the exercise on a terminal.
pub struct TerminalSink<W: Write> {
    writer: W,
    options: TerminalOptions,
    cues: CueTracker,
    last_line: String,
    write_failed: bool,
}

impl<W: Write> TerminalSink<W> {
    /// Creates a renderer writing to `writer`.
    #[must_use]
    pub fn new(writer: W, options: TerminalOptions) -> Self {
        Self {
            writer,
            options,
            cues: CueTracker::new(),
            last_line: String::new(),
            write_failed: false,
        }
    }

    /// Consumes the sink, returning the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Formats the status line for an update, without control sequences.
    #[must_use]
    pub fn status_line(&self, update: &PhaseUpdate<'_>) -> String {
        format!(
            "{:<10} {:>3}s [{}] {:>4}°",
            update.phase_name,
            update.remaining_display,
            bar(update.cycle_fraction, self.options.bar_width),
            rounded_angle(update.cycle_fraction),
        )
    }

    fn write(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            if !self.write_failed {
                debug!(error = %e, "terminal write failed; further failures are silent");
                self.write_failed = true;
            }
        }
    }

    fn redraw(&mut self, update: &PhaseUpdate<'_>) {
        let line = self.status_line(update);
        if line == self.last_line {
            return;
        }

        let framed = if self.options.ansi {
            let color = PALETTE[update.phase_index % PALETTE.len()];
            format!("{CLEAR_LINE}{color}{line}{RESET}")
        } else {
            // pad over any longer previous line
            let width = self.last_line.chars().count();
            format!("\r{line:<width$}")
        };
        self.write(&framed);
        self.last_line = line;
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn on_update(&mut self, update: &PhaseUpdate<'_>) {
        let cue = self.cues.observe_update(update);
        if cue == Some(Cue::Tick) && self.options.tick_bell {
            self.write(BELL);
        }
        self.redraw(update);
    }

    fn on_phase_changed(&mut self, change: &PhaseChange<'_>) {
        self.cues.observe_change(change);
        let mut text = String::from("\n");
        if self.options.phase_bell {
            text.push_str(BELL);
        }
        self.write(&text);
        self.last_line.clear();
    }

    fn on_idle(&mut self) {
        self.cues.reset();
        let label = self.options.idle_label.clone();
        let text = if self.options.ansi {
            format!("{CLEAR_LINE}{label}\n")
        } else {
            format!("\n{label}\n")
        };
        self.write(&text);
        self.last_line.clear();
    }
}

impl<W: Write> std::fmt::Debug for TerminalSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("options", &self.options)
            .field("last_line", &self.last_line)
            .finish_non_exhaustive()
    }
}

/// Renders `fraction` as a filled bar of `width` characters.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

#[allow(clippy::cast_possible_truncation)]
fn rounded_angle(fraction: f64) -> i32 {
    indicator_angle(fraction).round() as i32
}
