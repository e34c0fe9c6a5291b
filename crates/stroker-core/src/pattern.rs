//! The contract every stroke generator implements.

use crate::{
    clock::Clock,
    delay::DelayTimer,
    diagnostics::{Diagnostic, DiagnosticSink, NullSink},
    motion::MotionTarget,
};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Longest pattern name a controller has to be able to store, in bytes.
pub const MAX_NAME_LEN: usize = 64;

/// Machine ceilings as reported by the controller. Generators do not clamp
/// against these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedLimit {
    pub max_speed: u32,
    pub max_acceleration: u32,
    pub steps_per_mm: u32,
}

/// User-facing parameters of a generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Amplitude of a full stroke in steps. Expected to be `<= depth`.
    pub stroke: i32,
    /// Position of full insertion in steps.
    pub depth: i32,
    /// Seconds for one full in-and-out cycle.
    pub time_of_stroke: f64,
    /// `-100..=100`, `0` is neutral.
    pub sensation: f64,
    pub speed_limit: SpeedLimit,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            stroke: 0,
            depth: 0,
            time_of_stroke: 1.0,
            sensation: 0.0,
            speed_limit: SpeedLimit::default(),
        }
    }
}

impl PatternConfig {
    /// The fully inserted end of travel.
    pub fn in_position(&self) -> i32 {
        self.depth
    }

    /// The withdrawn end of travel.
    pub fn out_position(&self) -> i32 {
        self.depth - self.stroke
    }

    /// Time of a single direction when in and out share the cycle equally.
    pub fn half_time(&self) -> f64 {
        0.5 * self.time_of_stroke
    }
}

/// Odd indices withdraw, even indices insert.
pub const fn is_out_stroke(index: u32) -> bool {
    index % 2 == 1
}

/// State every generator carries regardless of its algorithm.
pub struct PatternBase {
    pub config: PatternConfig,
    /// Last index passed to `next_target`.
    pub index: Option<u32>,
    pub delay: DelayTimer,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl PatternBase {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            config: PatternConfig::default(),
            index: None,
            delay: DelayTimer::new(clock),
            diagnostics: Box::new(NullSink),
        }
    }

    pub fn emit(&mut self, pattern: &'static str, event: Diagnostic) {
        self.diagnostics.record(pattern, event);
    }

    /// Start the pause timer and report it.
    pub fn start_pause(&mut self, pattern: &'static str) {
        self.delay.start();
        let duration = self.delay.duration();
        self.emit(pattern, Diagnostic::PauseStarted { duration });
    }
}

impl fmt::Debug for PatternBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternBase")
            .field("config", &self.config)
            .field("index", &self.index)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// A stroke generator.
///
/// Setters may be called in any order and at any time; each one refreshes
/// the generator's derived quantities through [`Pattern::reconfigure`].
/// Session counters (ramp position, series length, half/full toggle) are
/// left alone, so a change mid-session can produce a visible jump.
///
/// `next_target` expects a gap-free index sequence starting at `0`. Several
/// generators advance hidden counters on every non-skip call, so replaying
/// an index does not replay its output. Re-polling an index that returned a
/// skip is fine: skips never advance anything.
pub trait Pattern: fmt::Debug + Send {
    fn name(&self) -> &'static str;

    fn base(&self) -> &PatternBase;

    fn base_mut(&mut self) -> &mut PatternBase;

    /// Recompute whatever the generator derives from its configuration.
    fn reconfigure(&mut self) {}

    fn next_target(&mut self, index: u32) -> MotionTarget;

    fn config(&self) -> &PatternConfig {
        &self.base().config
    }

    fn set_time_of_stroke(&mut self, seconds: f64) {
        self.base_mut().config.time_of_stroke = seconds;
        self.reconfigure();
    }

    fn set_stroke(&mut self, stroke: i32) {
        self.base_mut().config.stroke = stroke;
        self.reconfigure();
    }

    fn set_depth(&mut self, depth: i32) {
        self.base_mut().config.depth = depth;
        self.reconfigure();
    }

    fn set_sensation(&mut self, sensation: f64) {
        self.base_mut().config.sensation = sensation;
        self.reconfigure();
    }

    fn set_speed_limit(&mut self, limit: SpeedLimit) {
        self.base_mut().config.speed_limit = limit;
        self.reconfigure();
    }

    /// Apply a whole configuration at once.
    fn configure(&mut self, config: &PatternConfig) {
        self.base_mut().config = *config;
        self.reconfigure();
    }

    fn set_diagnostics(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.base_mut().diagnostics = sink;
    }

    fn last_index(&self) -> Option<u32> {
        self.base().index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity() {
        assert!(!is_out_stroke(0));
        assert!(is_out_stroke(1));
        assert!(!is_out_stroke(2));
        assert!(is_out_stroke(u32::MAX));
    }

    #[test]
    fn config_positions() {
        let config = PatternConfig {
            stroke: 800,
            depth: 1000,
            time_of_stroke: 2.0,
            ..PatternConfig::default()
        };
        assert_eq!(config.in_position(), 1000);
        assert_eq!(config.out_position(), 200);
        assert_eq!(config.half_time(), 1.0);
    }

    #[test]
    fn config_defaults_from_empty_json() {
        let config: PatternConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PatternConfig::default());
    }
}
