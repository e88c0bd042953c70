//! Presentation sinks
//!
//! Implementations of [`PresentationSink`](crate::phase::PresentationSink)
//! that turn engine output into something a person (or a machine) can
//! follow:
//!
//! - [`TerminalSink`] — redraws a status line with countdown, cycle bar and
//!   indicator angle, ringing the terminal bell on cues
//! - [`EventSink`] — forwards phase entries and countdown ticks to the JSONL
//!   event stream
//! - [`MultiSink`] — fans out to several sinks
//! - [`RecordingSink`] — keeps every call in memory, for tests and tooling

pub mod cue;
pub mod events;
pub mod multi;
pub mod recording;
pub mod terminal;

pub use cue::{Cue, CueTracker};
pub use events::EventSink;
pub use multi::MultiSink;
pub use recording::{ChangeRecord, RecordedEvent, RecordingSink, UpdateRecord};
pub use terminal::{TerminalOptions, TerminalSink};
