// Stroke generators and the catalog used to select them by name

use crate::{clock::Clock, pattern::Pattern};
use std::{fmt, str::FromStr, sync::Arc};
use thiserror::Error;

// One generator per module
pub mod deeper;
pub mod half_n_half;
pub mod insist;
pub mod knot;
pub mod robo_stroke;
pub mod simple_stroke;
pub mod slammin;
pub mod stop_n_go;
pub mod teasing_pounding;

pub use deeper::Deeper;
pub use half_n_half::HalfnHalf;
pub use insist::Insist;
pub use knot::{Knot, KnotPhase};
pub use robo_stroke::RoboStroke;
pub use simple_stroke::SimpleStroke;
pub use slammin::Slammin;
pub use stop_n_go::StopNGo;
pub use teasing_pounding::{InOutTiming, TeasingPounding};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),
}

/// Every generator this crate provides, in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    SimpleStroke,
    TeasingPounding,
    RoboStroke,
    HalfnHalf,
    Deeper,
    StopNGo,
    Insist,
    Slammin,
    Knot,
}

impl PatternKind {
    pub const ALL: [PatternKind; 9] = [
        PatternKind::SimpleStroke,
        PatternKind::TeasingPounding,
        PatternKind::RoboStroke,
        PatternKind::HalfnHalf,
        PatternKind::Deeper,
        PatternKind::StopNGo,
        PatternKind::Insist,
        PatternKind::Slammin,
        PatternKind::Knot,
    ];

    /// Display name, at most [`crate::MAX_NAME_LEN`] bytes.
    pub const fn name(self) -> &'static str {
        match self {
            PatternKind::SimpleStroke => "Simple Stroke",
            PatternKind::TeasingPounding => "Teasing or Pounding",
            PatternKind::RoboStroke => "Robo Stroke",
            PatternKind::HalfnHalf => "Half'n'Half",
            PatternKind::Deeper => "Deeper",
            PatternKind::StopNGo => "Stop'n'Go",
            PatternKind::Insist => "Insist",
            PatternKind::Slammin => "Slammin'",
            PatternKind::Knot => "Knot",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            PatternKind::SimpleStroke => "simple-stroke",
            PatternKind::TeasingPounding => "teasing-pounding",
            PatternKind::RoboStroke => "robo-stroke",
            PatternKind::HalfnHalf => "half-n-half",
            PatternKind::Deeper => "deeper",
            PatternKind::StopNGo => "stop-n-go",
            PatternKind::Insist => "insist",
            PatternKind::Slammin => "slammin",
            PatternKind::Knot => "knot",
        }
    }

    /// Create a fresh generator with default configuration.
    pub fn build(self, clock: Arc<dyn Clock>) -> Box<dyn Pattern> {
        match self {
            PatternKind::SimpleStroke => Box::new(SimpleStroke::new(clock)),
            PatternKind::TeasingPounding => Box::new(TeasingPounding::new(clock)),
            PatternKind::RoboStroke => Box::new(RoboStroke::new(clock)),
            PatternKind::HalfnHalf => Box::new(HalfnHalf::new(clock)),
            PatternKind::Deeper => Box::new(Deeper::new(clock)),
            PatternKind::StopNGo => Box::new(StopNGo::new(clock)),
            PatternKind::Insist => Box::new(Insist::new(clock)),
            PatternKind::Slammin => Box::new(Slammin::new(clock)),
            PatternKind::Knot => Box::new(Knot::new(clock)),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternKind {
    type Err = PatternError;

    /// Accepts a slug or a display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.slug().eq_ignore_ascii_case(wanted)
                    || kind.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| PatternError::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, pattern::MAX_NAME_LEN};
    use insta::assert_snapshot;

    #[test]
    fn catalog_listing() {
        let listing = PatternKind::ALL
            .iter()
            .map(|kind| format!("{:<17} {}", kind.slug(), kind.name()))
            .collect::<Vec<_>>()
            .join("\n");
        assert_snapshot!(listing, @r"
        simple-stroke     Simple Stroke
        teasing-pounding  Teasing or Pounding
        robo-stroke       Robo Stroke
        half-n-half       Half'n'Half
        deeper            Deeper
        stop-n-go         Stop'n'Go
        insist            Insist
        slammin           Slammin'
        knot              Knot
        ");
    }

    #[test]
    fn names_fit_controller_buffer() {
        for kind in PatternKind::ALL {
            assert!(kind.name().len() <= MAX_NAME_LEN, "{kind}");
        }
    }

    #[test]
    fn parses_slug_and_name() {
        assert_eq!("knot".parse::<PatternKind>(), Ok(PatternKind::Knot));
        assert_eq!("Stop'n'Go".parse::<PatternKind>(), Ok(PatternKind::StopNGo));
        assert_eq!("teasing or pounding".parse::<PatternKind>(), Ok(PatternKind::TeasingPounding));
        assert_eq!(" HALF-N-HALF ".parse::<PatternKind>(), Ok(PatternKind::HalfnHalf));
        assert_eq!(
            "wiggle".parse::<PatternKind>(),
            Err(PatternError::UnknownPattern("wiggle".into()))
        );
    }

    #[test]
    fn built_generators_report_their_name() {
        let clock = Arc::new(ManualClock::new());
        for kind in PatternKind::ALL {
            let pattern = kind.build(clock.clone());
            assert_eq!(pattern.name(), kind.name());
            assert_eq!(pattern.last_index(), None);
        }
    }
}
