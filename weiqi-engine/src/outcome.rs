use serde::Serialize;
use std::fmt;

use crate::engine::Phase;
use crate::point::Point;
use crate::stone::Stone;

/// A human-facing event produced by an engine operation. Hosts decide how
/// (and whether) to show these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Played { stone: Stone, point: Point },
    Captured { by: Stone, count: u32 },
    Ko { point: Point },
    Passed { stone: Stone, next: Option<Stone> },
    ScoringStarted { komi: f64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Played { stone, point } => write!(f, "{stone} played {point}"),
            Notice::Captured { by, count } => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(f, "{by} captured {count} stone{plural}")
            }
            Notice::Ko { point } => write!(f, "Ko at {point}, no immediate recapture"),
            Notice::Passed {
                stone,
                next: Some(next),
            } => write!(f, "{stone} passed, {next} to play"),
            Notice::Passed { stone, next: None } => write!(f, "{stone} passed"),
            Notice::ScoringStarted { komi } => write!(
                f,
                "Both players passed, scoring begins (komi {komi}); mark dead stones then confirm the score"
            ),
        }
    }
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub point: Point,
    pub stone: Stone,
    pub captured: Vec<Point>,
    pub ko: Option<Point>,
    pub notices: Vec<Notice>,
}

/// Result of a successful pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassOutcome {
    pub stone: Stone,
    pub phase: Phase,
    pub notices: Vec<Notice>,
}
