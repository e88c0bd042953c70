//! Observability module
//!
//! Logging and structured event infrastructure. Logs go to stderr; the
//! event stream goes wherever the user points it, so stdout stays free for
//! the terminal display.

pub mod events;
pub mod logging;

pub use events::{Event, EventEmitter};
pub use logging::{LogFormat, init_logging};
