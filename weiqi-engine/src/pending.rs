use serde::Serialize;

use crate::goban::Goban;
use crate::ko::Ko;
use crate::point::Point;
use crate::rules::Captures;
use crate::stone::Stone;

/// Where an optimistic move stands with the move authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    LocalApplied,
    Confirmed,
    RolledBack,
}

/// State taken immediately before an optimistic move, restored verbatim if
/// the authority refuses it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MoveSnapshot {
    pub(crate) goban: Goban,
    pub(crate) captures: Captures,
    pub(crate) to_move: Stone,
    pub(crate) move_count: u32,
    pub(crate) last_move: Option<Point>,
    pub(crate) ko: Option<Ko>,
    pub(crate) consecutive_passes: u8,
}

/// A locally applied move awaiting the authority's verdict.
///
/// At most one exists per engine. It is kept apart from the undo history:
/// rolling back only removes the history entry its own application pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    point: Point,
    stone: Stone,
    pub(crate) snapshot: MoveSnapshot,
    pub(crate) history_len: usize,
}

impl PendingMove {
    pub(crate) fn new(point: Point, stone: Stone, snapshot: MoveSnapshot, history_len: usize) -> Self {
        PendingMove {
            point,
            stone,
            snapshot,
            history_len,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn stone(&self) -> Stone {
        self.stone
    }
}
