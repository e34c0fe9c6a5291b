//! A stand-in for the motion controller that consumes pattern targets.
//!
//! It polls the pattern the way real firmware does: the stroke index only
//! advances once a move has been issued, and a skipped poll is retried one
//! control interval later. Each move is clamped to the machine ceilings and
//! travel range, timed as a trapezoid, and then simulated time jumps ahead
//! by that duration.

use crate::config::Config;
use anyhow::Result;
use serde::Serialize;
use std::{fmt::Write as _, sync::Arc, time::Duration};
use stroker_core::{
    Clock, DiagnosticSink, ManualClock, MotionTarget, Pattern, PatternKind, SpeedLimit,
};

/// One thing the controller did.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Move {
        index: u32,
        at_ms: f64,
        from: i32,
        to: i32,
        speed: i32,
        acceleration: i32,
        duration_ms: f64,
        /// Speed, acceleration or position had to be cut to machine limits.
        clamped: bool,
    },
    Pause {
        index: u32,
        at_ms: f64,
        waited_ms: f64,
    },
}

/// Time to cover `distance` with a symmetric trapezoid limited by `speed`
/// and `acceleration`, falling back to a triangle when cruise speed is
/// never reached.
pub fn move_duration(distance: f64, speed: f64, acceleration: f64) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }
    // distance spent accelerating plus decelerating at full speed
    let ramps = speed * speed / acceleration;
    if ramps >= distance {
        2.0 * (distance / acceleration).sqrt()
    } else {
        2.0 * speed / acceleration + (distance - ramps) / speed
    }
}

fn ceiling(value: i32, limit: u32) -> i32 {
    if limit == 0 {
        value
    } else {
        value.min(i32::try_from(limit).unwrap_or(i32::MAX))
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

pub struct Simulator {
    clock: ManualClock,
    pattern: Box<dyn Pattern>,
    limit: SpeedLimit,
    depth: i32,
    position: i32,
    control_interval: Duration,
    max_duration: Duration,
}

impl Simulator {
    /// Build the simulator for a validated configuration. The actuator
    /// starts fully withdrawn.
    pub fn new(config: &Config, kind: PatternKind) -> Self {
        let clock = ManualClock::new();
        let mut pattern = kind.build(Arc::new(clock.clone()));
        pattern.configure(&config.pattern_config());

        Self {
            clock,
            pattern,
            limit: config.speed_limit(),
            depth: config.motion.depth,
            position: config.motion.depth - config.motion.stroke,
            control_interval: config.simulation.control_interval(),
            max_duration: config.simulation.max_duration(),
        }
    }

    pub fn set_diagnostics(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.pattern.set_diagnostics(sink);
    }

    pub fn pattern(&self) -> &dyn Pattern {
        self.pattern.as_ref()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now()
    }

    /// Issue `strokes` moves, recording each move and each pause.
    pub fn run(&mut self, strokes: u32) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut paused_since = None;
        let mut index = 0;

        while index < strokes {
            let now = self.clock.now();
            if now > self.max_duration {
                anyhow::bail!(
                    "{} did not finish {strokes} strokes within {:?}, stuck at stroke {index}",
                    self.pattern.name(),
                    self.max_duration
                );
            }

            let target = self.pattern.next_target(index);
            if !target.is_move() {
                if paused_since.is_none() {
                    let remaining = self.pattern.base().delay.remaining();
                    tracing::debug!(index, ?remaining, "pattern paused");
                    paused_since = Some(now);
                }
                self.clock.advance(self.control_interval);
                continue;
            }

            if let Some(since) = paused_since.take() {
                tracing::debug!(index, waited = ?(now - since), "pause finished");
                events.push(Event::Pause {
                    index,
                    at_ms: millis(since),
                    waited_ms: millis(now - since),
                });
            }

            events.push(self.execute(index, target)?);
            index += 1;
        }

        Ok(events)
    }

    fn execute(&mut self, index: u32, target: MotionTarget) -> Result<Event> {
        let to = target.position.clamp(0, self.depth);
        let speed = ceiling(target.speed, self.limit.max_speed);
        let acceleration = ceiling(target.acceleration, self.limit.max_acceleration);
        let clamped = to != target.position
            || speed != target.speed
            || acceleration != target.acceleration;

        let distance = f64::from(to.abs_diff(self.position));
        if speed <= 0 || acceleration <= 0 {
            anyhow::bail!(
                "{} produced an impossible move at stroke {index}: {target:?}",
                self.pattern.name()
            );
        }

        let duration = if distance > 0.0 {
            Duration::from_secs_f64(move_duration(
                distance,
                f64::from(speed),
                f64::from(acceleration),
            ))
        } else {
            Duration::ZERO
        };

        let at = self.clock.now();
        let from = self.position;
        tracing::debug!(index, from, to, speed, acceleration, ?duration, "move");
        if clamped {
            tracing::debug!(index, ?target, "target clamped to machine limits");
        }

        self.clock.advance(duration);
        self.position = to;

        Ok(Event::Move {
            index,
            at_ms: millis(at),
            from,
            to,
            speed,
            acceleration,
            duration_ms: millis(duration),
            clamped,
        })
    }
}

/// Human-readable rendering of a simulation run.
pub fn render_table(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        let _ = match event {
            Event::Move {
                index,
                at_ms,
                from,
                to,
                speed,
                acceleration,
                duration_ms,
                clamped,
            } => writeln!(
                out,
                "{index:<5} {at_ms:>10.1}ms  move  {from:>6} -> {to:<6} v={speed:<6} a={acceleration:<7} {duration_ms:.1}ms{}",
                if *clamped { " (clamped)" } else { "" }
            ),
            Event::Pause {
                index,
                at_ms,
                waited_ms,
            } => writeln!(out, "{index:<5} {at_ms:>10.1}ms  pause {waited_ms:.1}ms"),
        };
    }
    out
}
