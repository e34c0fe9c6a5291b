// Slammin': hard in-stroke, pause, then a slower way back

use crate::{
    clock::Clock,
    motion::{MotionTarget, whole_steps},
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
    scale::scale,
};
use std::sync::Arc;

const MIN_OUT_SPEED: i32 = 100;

/// Pause after each in-stroke, in ms, for a full stroke taking `time` seconds.
pub(crate) fn pause_millis(time: f64, offset: f64) -> u64 {
    ((350_000.0 * time + 60_000.0).sqrt() + offset) as u64
}

/// Longer strokes get a proportionally faster slow phase.
pub(crate) fn stroke_compensation(stroke: i32) -> f64 {
    if stroke > 0 {
        (f64::from(stroke) / 1000.0).sqrt() + 0.5
    } else {
        1.0
    }
}

/// Aggressive in-strokes followed by a pause and a slower out-stroke.
/// Sensation sets the out-stroke speed; positive values slow it down.
#[derive(Debug)]
pub struct Slammin {
    base: PatternBase,
    out_speed: i32,
}

impl Slammin {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            out_speed: MIN_OUT_SPEED,
        };
        pattern.reconfigure();
        pattern
    }

    pub fn out_stroke_speed(&self) -> i32 {
        self.out_speed
    }
}

impl Pattern for Slammin {
    fn name(&self) -> &'static str {
        PatternKind::Slammin.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let config = &self.base.config;
        let sensation_factor = scale(-100.0, 100.0, 1.0, 0.3, config.sensation, 0.0);
        let base_speed = 1.5 * f64::from(config.stroke) / config.half_time();
        let speed = base_speed * sensation_factor * stroke_compensation(config.stroke);
        self.out_speed = (speed as i32).max(MIN_OUT_SPEED);

        let pause = pause_millis(config.time_of_stroke, 125.0);
        self.base.delay.set_millis(pause);
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        if self.base.delay.is_active() {
            return MotionTarget::skip();
        }

        let config = self.base.config;
        let time = config.half_time();
        let target = if is_out_stroke(index) {
            let acceleration = whole_steps(1.1 * f64::from(self.out_speed) / time);
            MotionTarget::new(config.out_position(), self.out_speed, acceleration)
        } else {
            let speed = whole_steps(1.6 * f64::from(config.stroke) / time);
            let acceleration = whole_steps(2.8 * f64::from(speed) / time);
            self.base.start_pause(PatternKind::Slammin.name());
            MotionTarget::new(config.in_position(), speed, acceleration)
        };

        self.base.index = Some(index);
        target
    }
}
