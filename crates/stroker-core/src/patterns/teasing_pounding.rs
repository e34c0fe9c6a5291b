// Teasing or Pounding: sensation skews the in/out time split

use crate::{
    clock::Clock,
    diagnostics::Diagnostic,
    motion::MotionTarget,
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
    scale::scale,
};
use std::sync::Arc;

/// Per-direction durations of one full stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InOutTiming {
    pub in_stroke: f64,
    pub out_stroke: f64,
}

impl InOutTiming {
    /// Split `time_of_stroke` so the faster side runs up to 5x the neutral
    /// half-stroke pace. Positive sensation speeds up the in-stroke,
    /// negative the out-stroke. The total always equals `time_of_stroke`.
    pub fn split(time_of_stroke: f64, sensation: f64) -> Self {
        let fast = 0.5 * time_of_stroke / scale(0.0, 100.0, 1.0, 5.0, sensation.abs(), 0.0);
        let slow = time_of_stroke - fast;
        if sensation > 0.0 {
            Self {
                in_stroke: fast,
                out_stroke: slow,
            }
        } else {
            Self {
                in_stroke: slow,
                out_stroke: fast,
            }
        }
    }

    /// Report the split to the generator's diagnostics.
    pub(crate) fn emit(&self, base: &mut PatternBase, pattern: &'static str) {
        base.emit(
            pattern,
            Diagnostic::StrokeTiming {
                in_stroke: self.in_stroke,
                out_stroke: self.out_stroke,
            },
        );
    }
}

/// Full strokes whose in and out halves run at different speeds while the
/// overall stroke time stays fixed. Fast in-strokes feel pounding, fast
/// out-strokes teasing.
#[derive(Debug)]
pub struct TeasingPounding {
    base: PatternBase,
    timing: InOutTiming,
}

impl TeasingPounding {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            timing: InOutTiming {
                in_stroke: 0.5,
                out_stroke: 0.5,
            },
        };
        pattern.reconfigure();
        pattern
    }

    pub fn timing(&self) -> InOutTiming {
        self.timing
    }
}

impl Pattern for TeasingPounding {
    fn name(&self) -> &'static str {
        PatternKind::TeasingPounding.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let config = &self.base.config;
        self.timing = InOutTiming::split(config.time_of_stroke, config.sensation);
        self.timing.emit(&mut self.base, PatternKind::TeasingPounding.name());
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        let config = &self.base.config;
        let stroke = f64::from(config.stroke);
        let target = if is_out_stroke(index) {
            MotionTarget::trapezoidal(config.out_position(), stroke, self.timing.out_stroke)
        } else {
            MotionTarget::trapezoidal(config.in_position(), stroke, self.timing.in_stroke)
        };

        self.base.index = Some(index);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, diagnostics::RecordingSink};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn neutral_split_is_symmetric() {
        let timing = InOutTiming::split(2.0, 0.0);
        assert!(approx(timing.in_stroke, 1.0));
        assert!(approx(timing.out_stroke, 1.0));
    }

    #[test]
    fn sign_picks_the_fast_side() {
        let pounding = InOutTiming::split(2.0, 100.0);
        assert!(approx(pounding.in_stroke, 0.2));
        assert!(approx(pounding.out_stroke, 1.8));

        let teasing = InOutTiming::split(2.0, -100.0);
        assert!(approx(teasing.in_stroke, 1.8));
        assert!(approx(teasing.out_stroke, 0.2));

        let half = InOutTiming::split(2.0, 50.0);
        assert!(approx(half.in_stroke + half.out_stroke, 2.0));
        assert!(approx(half.in_stroke, 1.0 / 3.0));
    }

    #[test]
    fn targets_use_their_own_duration() {
        let mut p = TeasingPounding::new(Arc::new(ManualClock::new()));
        p.set_depth(1000);
        p.set_stroke(1000);
        p.set_time_of_stroke(2.0);
        p.set_sensation(100.0);

        // in: 1000 steps in 0.2s
        assert_eq!(p.next_target(0), MotionTarget::new(1000, 7500, 112500));
        // out: 1000 steps in 1.8s
        assert_eq!(p.next_target(1), MotionTarget::new(0, 833, 1388));
    }

    #[test]
    fn reports_timing_on_change() {
        let sink = RecordingSink::new();
        let mut p = TeasingPounding::new(Arc::new(ManualClock::new()));
        p.set_diagnostics(Box::new(sink.clone()));
        p.set_time_of_stroke(4.0);
        assert_eq!(
            sink.events(),
            vec![(
                "Teasing or Pounding",
                Diagnostic::StrokeTiming {
                    in_stroke: 2.0,
                    out_stroke: 2.0
                }
            )]
        );
    }
}
