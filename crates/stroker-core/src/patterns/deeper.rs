// Deeper: insertion depth ramps up over a series of strokes

use crate::{
    clock::Clock,
    diagnostics::Diagnostic,
    motion::MotionTarget,
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
    scale::map_range,
};
use std::sync::Arc;

/// Each full stroke goes a bit deeper than the last until it reaches
/// `depth`, then the ramp starts over from the shallowest stroke. Sensation
/// sets the ramp length, from 2 strokes at -100 over 11 at 0 to 32 at 100.
///
/// Changing the sensation mid-ramp may make the insertion depth jump.
#[derive(Debug)]
pub struct Deeper {
    base: PatternBase,
    ramp_length: u32,
}

impl Deeper {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            ramp_length: 2,
        };
        pattern.reconfigure();
        pattern
    }

    /// Number of full strokes in one ramp.
    pub fn ramp_length(&self) -> u32 {
        self.ramp_length
    }
}

impl Pattern for Deeper {
    fn name(&self) -> &'static str {
        PatternKind::Deeper.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let sensation = self.base.config.sensation;
        let strokes = if sensation < 0.0 {
            map_range(sensation, -100.0, 0.0, 2.0, 11.0)
        } else {
            map_range(sensation, 0.0, 100.0, 11.0, 32.0)
        };
        // a ramp needs at least one stroke
        self.ramp_length = strokes.max(1) as u32;
        let strokes = self.ramp_length;
        self.base
            .emit(PatternKind::Deeper.name(), Diagnostic::RampLength { strokes });
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        let config = self.base.config;
        let cycle_index = (index / 2) % self.ramp_length + 1;
        // never shallower than one step, so short strokes still go in
        let amplitude = i64::from(config.stroke) * i64::from(cycle_index)
            / i64::from(self.ramp_length);
        let amplitude = (amplitude as i32).max(1);

        let position = if is_out_stroke(index) {
            config.out_position()
        } else {
            config.out_position() + amplitude
        };
        let target = MotionTarget::trapezoidal(position, f64::from(amplitude), config.half_time());

        self.base.emit(
            PatternKind::Deeper.name(),
            Diagnostic::RampStep {
                amplitude,
                cycle_index,
            },
        );
        self.base.index = Some(index);
        target
    }
}
