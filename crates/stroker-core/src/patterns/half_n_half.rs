// Half'n'Half: Teasing or Pounding with every other stroke at half length

use crate::{
    clock::Clock,
    motion::MotionTarget,
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::{PatternKind, teasing_pounding::InOutTiming},
};
use std::sync::Arc;

/// Alternates half and full strokes, starting with a half one. Half strokes
/// start from the withdrawn end and stop halfway in. The in/out time split
/// follows [`InOutTiming`], and a half stroke takes as long as a full one.
#[derive(Debug)]
pub struct HalfnHalf {
    base: PatternBase,
    timing: InOutTiming,
    half: bool,
}

impl HalfnHalf {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            timing: InOutTiming {
                in_stroke: 0.5,
                out_stroke: 0.5,
            },
            half: true,
        };
        pattern.reconfigure();
        pattern
    }

    pub fn timing(&self) -> InOutTiming {
        self.timing
    }
}

impl Pattern for HalfnHalf {
    fn name(&self) -> &'static str {
        PatternKind::HalfnHalf.name()
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
        self.timing.emit(&mut self.base, PatternKind::HalfnHalf.name());
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        if index == 0 {
            self.half = true;
        }

        let config = &self.base.config;
        let amplitude = if self.half {
            (config.stroke / 2).max(1)
        } else {
            config.stroke
        };

        let target = if is_out_stroke(index) {
            let target = MotionTarget::trapezoidal(
                config.out_position(),
                f64::from(amplitude),
                self.timing.out_stroke,
            );
            self.half = !self.half;
            target
        } else {
            MotionTarget::trapezoidal(
                config.out_position() + amplitude,
                f64::from(amplitude),
                self.timing.in_stroke,
            )
        };

        self.base.index = Some(index);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn pattern() -> HalfnHalf {
        let mut p = HalfnHalf::new(Arc::new(ManualClock::new()));
        p.set_depth(1000);
        p.set_stroke(1000);
        p.set_time_of_stroke(2.0);
        p
    }

    #[test]
    fn alternates_half_and_full() {
        let mut p = pattern();
        let positions: Vec<i32> = (0..8).map(|i| p.next_target(i).position).collect();
        assert_eq!(positions, vec![500, 0, 1000, 0, 500, 0, 1000, 0]);
    }

    #[test]
    fn half_strokes_move_at_half_speed() {
        let mut p = pattern();
        assert_eq!(p.next_target(0), MotionTarget::new(500, 750, 2250));
        assert_eq!(p.next_target(1), MotionTarget::new(0, 750, 2250));
        assert_eq!(p.next_target(2), MotionTarget::new(1000, 1500, 4500));
        assert_eq!(p.next_target(3), MotionTarget::new(0, 1500, 4500));
    }

    #[test]
    fn one_step_stroke_still_alternates_direction() {
        let mut p = HalfnHalf::new(Arc::new(ManualClock::new()));
        p.set_depth(5);
        p.set_stroke(1);
        p.set_time_of_stroke(2.0);
        for i in 0..4 {
            let t = p.next_target(i);
            let expected = if is_out_stroke(i) { 4 } else { 5 };
            assert_eq!(t.position, expected, "#{i}");
            assert!(t.speed > 0 && t.acceleration > 0, "#{i}: {t:?}");
        }
    }

    #[test]
    fn index_zero_restarts_with_half() {
        let mut p = pattern();
        for i in 0..3 {
            p.next_target(i);
        }
        // toggle now points at a full stroke
        assert_eq!(p.next_target(0).position, 500);
    }

    #[test]
    fn shares_teasing_pounding_split() {
        let mut p = pattern();
        p.set_sensation(-100.0);
        assert_eq!(p.timing(), InOutTiming::split(2.0, -100.0));
    }
}
