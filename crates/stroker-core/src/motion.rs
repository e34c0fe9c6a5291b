//! The value handed to the motion controller for every stroke.

use serde::{Deserialize, Serialize};

/// Truncate a rate to whole steps. A move always gets at least one step per
/// second (or per second squared), however slow it was asked to be.
pub fn whole_steps(rate: f64) -> i32 {
    (rate as i32).max(1)
}

/// Next move for the controller.
///
/// `position` is absolute, in steps. When `skip` is set the controller must
/// not move this cycle and the other fields carry no meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionTarget {
    pub position: i32,
    /// Cruise speed in steps/s.
    pub speed: i32,
    /// Acceleration and deceleration in steps/s².
    pub acceleration: i32,
    pub skip: bool,
}

impl MotionTarget {
    pub const fn new(position: i32, speed: i32, acceleration: i32) -> Self {
        Self {
            position,
            speed,
            acceleration,
            skip: false,
        }
    }

    /// No move this cycle.
    pub const fn skip() -> Self {
        Self {
            position: 0,
            speed: 0,
            acceleration: 0,
            skip: true,
        }
    }

    /// Symmetric trapezoid covering `amplitude` in `duration` seconds with
    /// equal thirds of acceleration, cruise and deceleration.
    ///
    /// Speed is truncated to whole steps before the acceleration is derived
    /// from it.
    pub fn trapezoidal(position: i32, amplitude: f64, duration: f64) -> Self {
        let speed = whole_steps(1.5 * amplitude / duration);
        let acceleration = whole_steps(3.0 * f64::from(speed) / duration);
        Self::new(position, speed, acceleration)
    }

    pub fn is_move(&self) -> bool {
        !self.skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_thirds() {
        // 1000 steps in 0.5s: cruise 3000 steps/s, reached in 1/6 s
        let t = MotionTarget::trapezoidal(1000, 1000.0, 0.5);
        assert_eq!(t.speed, 3000);
        assert_eq!(t.acceleration, 18000);
        assert_eq!(t.position, 1000);
        assert!(t.is_move());
    }

    #[test]
    fn speed_truncates_before_acceleration() {
        // 1.5 * 10 / 4 = 3.75 -> 3, then 3 * 3 / 4 = 2.25 -> 2
        let t = MotionTarget::trapezoidal(0, 10.0, 4.0);
        assert_eq!(t.speed, 3);
        assert_eq!(t.acceleration, 2);
    }

    #[test]
    fn slow_moves_keep_a_minimum_rate() {
        // 1.5 * 1 / 100 = 0.015 steps/s
        assert_eq!(
            MotionTarget::trapezoidal(7, 1.0, 100.0),
            MotionTarget::new(7, 1, 1)
        );
        assert_eq!(whole_steps(0.0), 1);
        assert_eq!(whole_steps(f64::NAN), 1);
        assert_eq!(whole_steps(f64::INFINITY), i32::MAX);
        assert_eq!(whole_steps(2.9), 2);
    }

    #[test]
    fn skip_is_not_a_move() {
        assert!(!MotionTarget::skip().is_move());
    }
}
