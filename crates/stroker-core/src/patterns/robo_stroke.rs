// Robo Stroke: sensation morphs the acceleration/cruise ratio

use crate::{
    clock::Clock,
    diagnostics::Diagnostic,
    motion::{MotionTarget, whole_steps},
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
    scale::scale,
};
use std::sync::Arc;

const NEUTRAL_FRACTION: f64 = 1.0 / 3.0;

/// Full strokes where sensation changes how much of each stroke is spent
/// accelerating. Positive sensation grows the ramps up to a triangle
/// profile, negative shrinks them down to an almost constant, robotic speed.
#[derive(Debug)]
pub struct RoboStroke {
    base: PatternBase,
    /// Share of the stroke time spent accelerating, `0.05..=0.5`.
    fraction: f64,
}

impl RoboStroke {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            fraction: NEUTRAL_FRACTION,
        };
        pattern.reconfigure();
        pattern
    }

    pub fn ramp_fraction(&self) -> f64 {
        self.fraction
    }
}

impl Pattern for RoboStroke {
    fn name(&self) -> &'static str {
        PatternKind::RoboStroke.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let sensation = self.base.config.sensation;
        self.fraction = if sensation >= 0.0 {
            scale(0.0, 100.0, NEUTRAL_FRACTION, 0.5, sensation, 0.0)
        } else {
            scale(0.0, 100.0, NEUTRAL_FRACTION, 0.05, -sensation, 0.0)
        };
        let fraction = self.fraction;
        self.base.emit(
            PatternKind::RoboStroke.name(),
            Diagnostic::RampFraction {
                sensation,
                fraction,
            },
        );
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        let config = &self.base.config;
        let time = config.half_time();
        let speed = f64::from(config.stroke) / ((1.0 - self.fraction) * time);
        let acceleration = speed / (self.fraction * time);
        let position = if is_out_stroke(index) {
            config.out_position()
        } else {
            config.in_position()
        };
        let target = MotionTarget::new(position, whole_steps(speed), whole_steps(acceleration));

        self.base.index = Some(index);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn pattern(sensation: f64) -> RoboStroke {
        let mut p = RoboStroke::new(Arc::new(ManualClock::new()));
        p.set_depth(1000);
        p.set_stroke(1000);
        p.set_time_of_stroke(2.0);
        p.set_sensation(sensation);
        p
    }

    #[test]
    fn fraction_range() {
        assert!((pattern(0.0).ramp_fraction() - NEUTRAL_FRACTION).abs() < 1e-12);
        assert!((pattern(100.0).ramp_fraction() - 0.5).abs() < 1e-12);
        assert!((pattern(-100.0).ramp_fraction() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn neutral_matches_simple_stroke() {
        let mut p = pattern(0.0);
        let t = p.next_target(0);
        assert_eq!(t.position, 1000);
        // 1500 steps/s reached in 1/3 s, give or take float truncation
        assert!((1499..=1500).contains(&t.speed));
        assert!((4499..=4500).contains(&t.acceleration));
    }

    #[test]
    fn triangle_profile_at_positive_extreme() {
        let mut p = pattern(100.0);
        let t = p.next_target(1);
        assert_eq!(t.position, 0);
        assert_eq!(t.speed, 2000);
        assert_eq!(t.acceleration, 4000);
    }

    #[test]
    fn robotic_at_negative_extreme() {
        let mut p = pattern(-100.0);
        let t = p.next_target(0);
        // almost all cruise: 1000 / 0.95
        assert_eq!(t.speed, 1052);
        assert!(t.acceleration > 20 * t.speed);
    }
}
