// Simple Stroke: symmetric trapezoid, sensation has no effect

use crate::{
    clock::Clock,
    motion::MotionTarget,
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
};
use std::sync::Arc;

/// Full strokes with 1/3 acceleration, 1/3 cruise, 1/3 deceleration.
#[derive(Debug)]
pub struct SimpleStroke {
    base: PatternBase,
}

impl SimpleStroke {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            base: PatternBase::new(clock),
        }
    }
}

impl Pattern for SimpleStroke {
    fn name(&self) -> &'static str {
        PatternKind::SimpleStroke.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        let config = &self.base.config;
        let position = if is_out_stroke(index) {
            config.out_position()
        } else {
            config.in_position()
        };
        let target =
            MotionTarget::trapezoidal(position, f64::from(config.stroke), config.half_time());

        self.base.index = Some(index);
        target
    }
}
