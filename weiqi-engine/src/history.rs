use std::collections::HashSet;

use crate::engine::Phase;
use crate::goban::Goban;
use crate::ko::Ko;
use crate::point::Point;
use crate::rules::Captures;
use crate::stone::Stone;

/// Everything an undo needs to put the game back, captured before a
/// state-changing action.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub goban: Goban,
    pub to_move: Stone,
    pub captures: Captures,
    pub ko: Option<Ko>,
    pub move_count: u32,
    pub last_move: Option<Point>,
    pub consecutive_passes: u8,
    pub dead_stones: HashSet<Point>,
    pub phase: Phase,
    pub komi: f64,
}

/// Undo stack, most recent snapshot last.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot above `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.snapshots.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(move_count: u32) -> Snapshot {
        Snapshot {
            goban: Goban::with_size(3),
            to_move: Stone::Black,
            captures: Captures::new(),
            ko: None,
            move_count,
            last_move: None,
            consecutive_passes: 0,
            dead_stones: HashSet::new(),
            phase: Phase::Playing,
            komi: 0.0,
        }
    }

    #[test]
    fn pops_most_recent_first() {
        let mut history = History::new();
        history.push(snapshot(1));
        history.push(snapshot(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|s| s.move_count), Some(2));
        assert_eq!(history.pop().map(|s| s.move_count), Some(2));
        assert_eq!(history.pop().map(|s| s.move_count), Some(1));
        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn truncate_keeps_older_entries() {
        let mut history = History::new();
        for i in 0..4 {
            history.push(snapshot(i));
        }
        history.truncate(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|s| s.move_count), Some(1));
    }
}
