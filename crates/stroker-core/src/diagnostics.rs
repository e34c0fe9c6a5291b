//! Optional insight into what a generator derived from its configuration.
//!
//! Generators report through a [`DiagnosticSink`]. The default sink drops
//! everything; [`TracingSink`] forwards to `tracing` and [`RecordingSink`]
//! keeps events for inspection.

use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};

#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// In/out split of the full stroke time, in seconds.
    StrokeTiming { in_stroke: f64, out_stroke: f64 },
    /// Fraction of a stroke spent accelerating (and again decelerating).
    RampFraction { sensation: f64, fraction: f64 },
    /// Number of strokes in one depth ramp.
    RampLength { strokes: u32 },
    /// Insertion amplitude of the current ramp stroke.
    RampStep { amplitude: i32, cycle_index: u32 },
    /// Stroke series finished; the next series has `strokes` strokes.
    SeriesLength { strokes: u32 },
    PauseStarted { duration: Duration },
    /// Speed of the slow final push.
    SlowSpeed { speed: i32, pause: Duration },
}

pub trait DiagnosticSink: Send {
    fn record(&mut self, pattern: &'static str, event: Diagnostic);
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _pattern: &'static str, _event: Diagnostic) {}
}

/// Emits every event as a `tracing` debug record.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, pattern: &'static str, event: Diagnostic) {
        match event {
            Diagnostic::StrokeTiming {
                in_stroke,
                out_stroke,
            } => tracing::debug!(pattern, in_stroke, out_stroke, "stroke timing"),
            Diagnostic::RampFraction {
                sensation,
                fraction,
            } => tracing::debug!(pattern, sensation, fraction, "ramp fraction"),
            Diagnostic::RampLength { strokes } => {
                tracing::debug!(pattern, strokes, "ramp length")
            }
            Diagnostic::RampStep {
                amplitude,
                cycle_index,
            } => tracing::debug!(pattern, amplitude, cycle_index, "ramp step"),
            Diagnostic::SeriesLength { strokes } => {
                tracing::debug!(pattern, strokes, "next stroke series")
            }
            Diagnostic::PauseStarted { duration } => {
                tracing::debug!(pattern, ?duration, "pause started")
            }
            Diagnostic::SlowSpeed { speed, pause } => {
                tracing::debug!(pattern, speed, ?pause, "slow phase")
            }
        }
    }
}

/// Collects events. Clones share the same buffer, so a clone kept outside
/// the generator can read what the generator recorded.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<(&'static str, Diagnostic)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(&'static str, Diagnostic)> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<(&'static str, Diagnostic)> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&mut self, pattern: &'static str, event: Diagnostic) {
        self.events.lock().push((pattern, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_shares_buffer() {
        let sink = RecordingSink::new();
        let mut inner = sink.clone();
        inner.record("Deeper", Diagnostic::RampLength { strokes: 11 });
        assert_eq!(
            sink.events(),
            vec![("Deeper", Diagnostic::RampLength { strokes: 11 })]
        );
        assert_eq!(sink.take().len(), 1);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn null_and_tracing_sinks_accept_events() {
        NullSink.record("Knot", Diagnostic::RampLength { strokes: 2 });
        TracingSink.record(
            "Knot",
            Diagnostic::PauseStarted {
                duration: Duration::from_millis(5),
            },
        );
    }
}
