//! Stroke pattern generation for reciprocating linear actuators.
//!
//! Every generator turns a handful of user parameters (stroke, depth, time
//! of a full stroke and a `sensation` knob) into the next [`MotionTarget`].
//! Unit conversion and machine limits belong to the caller; this crate
//! works in steps and seconds only and never clamps.

pub mod clock;
pub mod delay;
pub mod diagnostics;
pub mod motion;
pub mod pattern;
pub mod patterns;
pub mod scale;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, RecordingSink, TracingSink};
pub use motion::MotionTarget;
pub use pattern::{MAX_NAME_LEN, Pattern, PatternBase, PatternConfig, SpeedLimit};
pub use patterns::{PatternError, PatternKind};
