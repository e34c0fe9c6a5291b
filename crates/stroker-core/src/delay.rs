//! Inter-stroke pause timer.

use crate::clock::Clock;
use std::{sync::Arc, time::Duration};

/// Pause timer polled from `next_target`; it never blocks.
///
/// The duration may be changed while a pause runs. The start point stays
/// where it was, so the change applies to the pause in progress.
#[derive(Debug)]
pub struct DelayTimer {
    clock: Arc<dyn Clock>,
    started_at: Option<Duration>,
    duration: Duration,
}

impl DelayTimer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            started_at: None,
            duration: Duration::ZERO,
        }
    }

    /// Start (or restart) the pause at the current time.
    pub fn start(&mut self) {
        self.started_at = Some(self.clock.now());
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_millis(&mut self, millis: u64) {
        self.set_duration(Duration::from_millis(millis));
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// True while `now < start + duration`. A timer never started is idle.
    pub fn is_active(&self) -> bool {
        match self.started_at {
            Some(start) => self.clock.now() < start + self.duration,
            None => false,
        }
    }

    /// Time left in the current pause.
    pub fn remaining(&self) -> Duration {
        match self.started_at {
            Some(start) => (start + self.duration).saturating_sub(self.clock.now()),
            None => Duration::ZERO,
        }
    }
}
