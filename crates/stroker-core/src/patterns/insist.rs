// Insist: shortened strokes at full-stroke speed

use crate::{
    clock::Clock,
    motion::{MotionTarget, whole_steps},
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
};
use std::sync::Arc;

/// Sensation shortens the stroke while speed stays that of a full stroke,
/// which turns into a vibration at high values. Positive sensation keeps
/// the short stroke at the front (`depth`), negative at the back.
#[derive(Debug)]
pub struct Insist {
    base: PatternBase,
    speed: i32,
    acceleration: i32,
    real_stroke: i32,
    stroke_fraction: f64,
    in_front: bool,
}

impl Insist {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            speed: 0,
            acceleration: 0,
            real_stroke: 0,
            stroke_fraction: 1.0,
            in_front: false,
        };
        pattern.reconfigure();
        pattern
    }

    /// Length of the shortened stroke in steps.
    pub fn real_stroke(&self) -> i32 {
        self.real_stroke
    }
}

impl Pattern for Insist {
    fn name(&self) -> &'static str {
        PatternKind::Insist.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let config = &self.base.config;
        let time = config.half_time();
        let stroke = f64::from(config.stroke);

        self.stroke_fraction = (100.0 - config.sensation.abs()) / 100.0;
        self.in_front = config.sensation > 0.0;

        // Full-stroke cruise speed, reached within the first third of the
        // shortened stroke.
        self.speed = whole_steps(1.5 * stroke / time);
        self.acceleration =
            whole_steps(3.0 * f64::from(self.speed) / (time * self.stroke_fraction));
        // only full sensation collapses the stroke entirely
        self.real_stroke = if self.stroke_fraction > 0.0 {
            ((stroke * self.stroke_fraction).round() as i32).max(1)
        } else {
            0
        };
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        let config = &self.base.config;
        let position = match (self.in_front, is_out_stroke(index)) {
            (true, true) => config.in_position() - self.real_stroke,
            (true, false) => config.in_position(),
            (false, true) => config.out_position(),
            (false, false) => config.out_position() + self.real_stroke,
        };
        let target = MotionTarget::new(position, self.speed, self.acceleration);

        self.base.index = Some(index);
        target
    }
}
