// Stop'n'Go: series of strokes separated by pauses

use crate::{
    clock::Clock,
    diagnostics::Diagnostic,
    motion::MotionTarget,
    pattern::{Pattern, PatternBase, is_out_stroke},
    patterns::PatternKind,
    scale::map_range,
};
use std::sync::Arc;

const MAX_SERIES_LENGTH: u32 = 5;

/// Full strokes in series of 1, 2, .. 5, 4, .. 1, 2, .. strokes with a
/// pause after each series. Sensation sets the pause from 100 ms at -100 to
/// 10 s at 100.
#[derive(Debug)]
pub struct StopNGo {
    base: PatternBase,
    /// Strokes in the current series.
    series_length: u32,
    /// In-strokes completed in the current series.
    strokes_done: u32,
    counting_up: bool,
}

impl StopNGo {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut pattern = Self {
            base: PatternBase::new(clock),
            series_length: 1,
            strokes_done: 0,
            counting_up: true,
        };
        pattern.reconfigure();
        pattern
    }

    pub fn series_length(&self) -> u32 {
        self.series_length
    }

    fn finish_series(&mut self) {
        self.strokes_done = 0;
        if self.series_length >= MAX_SERIES_LENGTH {
            self.counting_up = false;
        }
        if self.series_length <= 1 {
            self.counting_up = true;
        }
        if self.counting_up {
            self.series_length += 1;
        } else {
            self.series_length -= 1;
        }

        let strokes = self.series_length;
        let name = PatternKind::StopNGo.name();
        self.base.emit(name, Diagnostic::SeriesLength { strokes });
        self.base.start_pause(name);
    }
}

impl Pattern for StopNGo {
    fn name(&self) -> &'static str {
        PatternKind::StopNGo.name()
    }

    fn base(&self) -> &PatternBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PatternBase {
        &mut self.base
    }

    fn reconfigure(&mut self) {
        let millis = map_range(self.base.config.sensation, -100.0, 100.0, 100.0, 10_000.0);
        self.base.delay.set_millis(millis.max(0) as u64);
    }

    fn next_target(&mut self, index: u32) -> MotionTarget {
        if self.base.delay.is_active() {
            return MotionTarget::skip();
        }

        let config = self.base.config;
        let stroke = f64::from(config.stroke);
        let target = if is_out_stroke(index) {
            if self.strokes_done >= self.series_length {
                self.finish_series();
            }
            MotionTarget::trapezoidal(config.out_position(), stroke, config.half_time())
        } else {
            self.strokes_done += 1;
            MotionTarget::trapezoidal(config.in_position(), stroke, config.half_time())
        };

        self.base.index = Some(index);
        target
    }
}
