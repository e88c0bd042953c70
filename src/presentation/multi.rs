//! Fan-out sink

use crate::phase::{PhaseChange, PhaseUpdate, PresentationSink};

/// Forwards every callback to each contained sink, in insertion order.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn PresentationSink + Send>>,
}

impl MultiSink {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink, builder style.
    #[must_use]
    pub fn with(mut self, sink: impl PresentationSink + Send + 'static) -> Self {
        self.push(sink);
        self
    }

    /// Adds a sink.
    pub fn push(&mut self, sink: impl PresentationSink + Send + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Number of contained sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sinks were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl PresentationSink for MultiSink {
    fn on_update(&mut self, update: &PhaseUpdate<'_>) {
        for sink in &mut self.sinks {
            sink.on_update(update);
        }
    }

    fn on_phase_changed(&mut self, change: &PhaseChange<'_>) {
        for sink in &mut self.sinks {
            sink.on_phase_changed(change);
        }
    }

    fn on_idle(&mut self) {
        for sink in &mut self.sinks {
            sink.on_idle();
        }
    }
}

impl std::fmt::Debug for MultiSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
