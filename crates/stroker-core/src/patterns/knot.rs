// Knot: five-phase cycle with two pauses

use crate::{
    clock::Clock,
    diagnostics::Diagnostic,
    motion::{MotionTarget, whole_steps},
    pattern::{Pattern, PatternBase},
    patterns::{
        PatternKind,
        slammin::{pause_millis, stroke_compensation},
    },
    scale::scale,
};
use std::{sync::Arc, time::Duration};

const MIN_SLOW_SPEED: i32 = 50;
const PARTIAL_DEPTH: f64 = 0.7;

/// Position of an index within the Knot cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnotPhase {
    /// Full out-stroke.
    Withdraw,
    /// In-stroke to 70% of the stroke at reduced speed.
    PartialPush,
    /// Hold at 70% while the first pause runs.
    FirstPause,
    /// The rest of the way in at the sensation-controlled slow speed.
    FinalPush,
    /// Hold at `depth` while the second pause runs.
    SecondPause,
}

impl KnotPhase {
    pub const CYCLE: u32 = 5;

    pub const fn from_index(index: u32) -> Self {
        match index % Self::CYCLE {
            0 => KnotPhase::Withdraw,
            1 => KnotPhase::PartialPush,
            2 => KnotPhase::FirstPause,
            3 => KnotPhase::FinalPush,
            _ => KnotPhase::SecondPause,
        }
    }
}

/// Imitates a knot passing through: withdraw, push in partway, pause, push
/// the rest of the way slowly, pause again. Sensation (either sign) slows
/// the final push.
///
/// The pause phases return a zero-distance hold at the current position and
/// start the pause; the phase after a pause is skipped until it runs out.
/// This generator follows its own five-phase cycle rather than even/odd
/// direction parity.
#[derive(Debug)]
pub struct Knot {
    base: PatternBase,
    slow_speed: i32,
}

impl Knot {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            slow_speed: MIN_SLOW_SPEED,
        };
        pattern.reconfigure();
        pattern
    }

    pub fn slow_speed(&self) -> i32 {
        self.slow_speed
    }

    fn withdraw(&self) -> MotionTarget {
        let config = &self.base.config;
        let time = config.half_time();
        let speed = whole_steps(f64::from(config.stroke) / time);
        let acceleration = whole_steps(2.0 * f64::from(speed) / time);
        MotionTarget::new(config.out_position(), speed, acceleration)
    }

    fn partial_push(&self) -> MotionTarget {
        let config = &self.base.config;
        let time = config.half_time();
        let stroke = f64::from(config.stroke);
        let speed = whole_steps(0.8 * stroke / time);
        let acceleration = whole_steps(2.0 * f64::from(speed) / time);
        let position = (f64::from(config.out_position()) + stroke * PARTIAL_DEPTH) as i32;
        MotionTarget::new(position, speed, acceleration)
    }

    fn final_push(&self) -> MotionTarget {
        let config = &self.base.config;
        let acceleration = whole_steps(2.3 * f64::from(self.slow_speed) / config.half_time());
        MotionTarget::new(config.in_position(), self.slow_speed, acceleration)
    }
}

impl Pattern for Knot {
    fn name(&self) -> &'static str {
        PatternKind::Knot.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let config = &self.base.config;
        let sensation_factor = scale(0.0, 100.0, 0.5, 0.05, config.sensation.abs(), 0.0);
        let base_speed = f64::from(config.stroke) / config.half_time();
        let speed = base_speed * sensation_factor * stroke_compensation(config.stroke);
        self.slow_speed = (speed as i32).max(MIN_SLOW_SPEED);

        let pause = pause_millis(config.time_of_stroke, 550.0);
        self.base.delay.set_millis(pause);

        let speed = self.slow_speed;
        self.base.emit(
            PatternKind::Knot.name(),
            Diagnostic::SlowSpeed {
                speed,
                pause: Duration::from_millis(pause),
            },
        );
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        if self.base.delay.is_active() {
            return MotionTarget::skip();
        }

        let target = match KnotPhase::from_index(index) {
            KnotPhase::Withdraw => self.withdraw(),
            KnotPhase::PartialPush => self.partial_push(),
            KnotPhase::FirstPause => {
                self.base.start_pause(PatternKind::Knot.name());
                self.partial_push()
            }
            KnotPhase::FinalPush => self.final_push(),
            KnotPhase::SecondPause => {
                self.base.start_pause(PatternKind::Knot.name());
                self.final_push()
            }
        };

        self.base.index = Some(index);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn pattern(clock: &ManualClock, sensation: f64) -> Knot {
        let mut p = Knot::new(Arc::new(clock.clone()));
        p.set_depth(1000);
        p.set_stroke(1000);
        p.set_time_of_stroke(2.0);
        p.set_sensation(sensation);
        p
    }

    #[test]
    fn phase_from_index() {
        assert_eq!(KnotPhase::from_index(0), KnotPhase::Withdraw);
        assert_eq!(KnotPhase::from_index(7), KnotPhase::FirstPause);
        assert_eq!(KnotPhase::from_index(5 * 1_000_000 + 3), KnotPhase::FinalPush);
        assert_eq!(KnotPhase::from_index(u32::MAX), KnotPhase::Withdraw);
        assert_eq!(KnotPhase::from_index(u32::MAX - 1), KnotPhase::SecondPause);
    }

    #[test]
    fn slow_speed_from_sensation() {
        let clock = ManualClock::new();
        // 1000 steps/s base, compensation 1.5
        assert_eq!(pattern(&clock, 0.0).slow_speed(), 750);
        // 75 before truncation
        assert_eq!(pattern(&clock, 100.0).slow_speed(), 74);
        assert_eq!(pattern(&clock, -100.0).slow_speed(), 74);

        let mut short = pattern(&clock, 100.0);
        short.set_stroke(100);
        assert_eq!(short.slow_speed(), MIN_SLOW_SPEED);
    }

    #[test]
    fn full_cycle() {
        let clock = ManualClock::new();
        let mut p = pattern(&clock, 0.0);
        let pause = Duration::from_millis(pause_millis(2.0, 550.0));

        assert_eq!(p.next_target(0), MotionTarget::new(0, 1000, 2000));
        assert_eq!(p.next_target(1), MotionTarget::new(700, 800, 1600));

        // pause starts with a hold at the partial depth
        assert_eq!(p.next_target(2), MotionTarget::new(700, 800, 1600));
        assert!(p.next_target(3).skip);
        clock.advance(pause);
        assert_eq!(p.next_target(3), MotionTarget::new(1000, 750, 1724));

        assert_eq!(p.next_target(4), MotionTarget::new(1000, 750, 1724));
        assert!(p.next_target(5).skip);
        clock.advance(pause);
        assert_eq!(p.next_target(5), MotionTarget::new(0, 1000, 2000));
    }

    #[test]
    fn no_skip_before_first_pause() {
        let clock = ManualClock::new();
        let mut p = pattern(&clock, 50.0);
        assert!(!p.next_target(0).skip);
        assert!(!p.next_target(1).skip);
        assert!(!p.next_target(2).skip);
    }
}
