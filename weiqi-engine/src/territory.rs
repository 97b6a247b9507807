use std::collections::HashSet;

use serde::Serialize;

use crate::goban::Goban;
use crate::point::Point;
use crate::rules::Captures;
use crate::stone::{Cell, Stone};

/// Ownership of every point on the board after a flood-fill.
///
/// Only empty points (including points under dead stones) can be owned;
/// live stones and neutral points are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Territory {
    owners: Vec<Option<Stone>>,
    size: u8,
}

impl Territory {
    /// A map with no owned points.
    pub fn neutral(size: u8) -> Self {
        Territory {
            owners: vec![None; size as usize * size as usize],
            size,
        }
    }

    pub fn owner(&self, point: Point) -> Option<Stone> {
        if point.row >= self.size || point.col >= self.size {
            return None;
        }
        self.owners[point.row as usize * self.size as usize + point.col as usize]
    }

    pub fn count(&self, stone: Stone) -> u32 {
        self.owners.iter().filter(|&&o| o == Some(stone)).count() as u32
    }

    /// Flat row-major ownership: `1` Black, `-1` White, `0` neutral.
    pub fn to_ints(&self) -> Vec<i8> {
        self.owners.iter().map(|&o| Cell::from(o).to_int()).collect()
    }

    pub fn size(&self) -> u8 {
        self.size
    }
}

/// Flood-fill territory with `dead_stones` treated as empty.
///
/// A maximal empty region belongs to a colour only when every stone
/// bordering any point of it is that colour. Regions touching both colours
/// (dame) or no stones at all stay neutral.
pub fn compute_territory(goban: &Goban, dead_stones: &HashSet<Point>) -> Territory {
    let size = goban.size();

    // Board with dead stones removed
    let mut virtual_board = goban.clone();
    for &pt in dead_stones {
        virtual_board.set(pt, Cell::Empty);
    }

    let mut territory = Territory::neutral(size);
    let mut visited = vec![false; goban.cells().len()];

    for start in goban.points() {
        let si = goban.idx(start);
        if visited[si] || !virtual_board.cell(start).is_empty() {
            continue;
        }

        let mut region = Vec::new();
        let mut border_colors: u8 = 0; // bit 0 = Black seen, bit 1 = White seen
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            let pi = goban.idx(p);
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            region.push(pi);

            for n in goban.neighbors(p) {
                match virtual_board.stone_at(n) {
                    Some(Stone::Black) => border_colors |= 1,
                    Some(Stone::White) => border_colors |= 2,
                    None if !visited[goban.idx(n)] => stack.push(n),
                    None => {}
                }
            }
        }

        let owner = match border_colors {
            1 => Some(Stone::Black),
            2 => Some(Stone::White),
            _ => None,
        };

        for pi in region {
            territory.owners[pi] = owner;
        }
    }

    territory
}

/// Flip the dead/alive status of the whole group at `point`.
///
/// The clicked stone decides the direction: if it is currently dead the
/// group becomes alive, otherwise the group becomes dead. No-op on an empty
/// point.
pub fn toggle_dead_chain(goban: &Goban, dead_stones: &mut HashSet<Point>, point: Point) {
    if goban.stone_at(point).is_none() {
        return;
    }

    let chain = goban.chain(point);

    if dead_stones.contains(&point) {
        for pt in &chain {
            dead_stones.remove(pt);
        }
    } else {
        dead_stones.extend(chain);
    }
}

/// One side's score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerScore {
    /// Stones on the board not marked dead.
    pub stones: u32,
    pub territory: u32,
    pub captures: u32,
    /// This side's own stones marked dead.
    pub dead_stones: u32,
    /// Opponent stones marked dead.
    pub opponent_dead_stones: u32,
    /// Komi charged to this side (Black only).
    pub komi: f64,
    pub total: f64,
}

/// Full score for both players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameScore {
    pub black: PlayerScore,
    pub white: PlayerScore,
}

impl GameScore {
    pub fn black_total(&self) -> f64 {
        self.black.total
    }

    pub fn white_total(&self) -> f64 {
        self.white.total
    }

    /// The side with the strictly greater total, `None` on a draw.
    pub fn winner(&self) -> Option<Stone> {
        if self.black.total > self.white.total {
            Some(Stone::Black)
        } else if self.white.total > self.black.total {
            Some(Stone::White)
        } else {
            None
        }
    }

    pub fn result(&self) -> String {
        format_result(self.black.total, self.white.total)
    }
}

/// Compute the final score:
///
/// `total = (stones - dead) + territory + captures - komi (Black only)`
pub fn score(
    goban: &Goban,
    territory: &Territory,
    dead_stones: &HashSet<Point>,
    captures: &Captures,
    komi: f64,
) -> GameScore {
    let mut dead_black: u32 = 0;
    let mut dead_white: u32 = 0;

    for &pt in dead_stones {
        match goban.stone_at(pt) {
            Some(Stone::Black) => dead_black += 1,
            Some(Stone::White) => dead_white += 1,
            None => {}
        }
    }

    let side = |stone: Stone, dead: u32, opponent_dead: u32, komi: f64| {
        let stones = goban.count(stone) - dead;
        let territory = territory.count(stone);
        let captures = captures.get(stone);
        PlayerScore {
            stones,
            territory,
            captures,
            dead_stones: dead,
            opponent_dead_stones: opponent_dead,
            komi,
            total: (stones + territory + captures) as f64 - komi,
        }
    };

    GameScore {
        black: side(Stone::Black, dead_black, dead_white, komi),
        white: side(Stone::White, dead_white, dead_black, 0.0),
    }
}

/// Format the result as `"B+{diff}"`, `"W+{diff}"` or `"Draw"`.
pub fn format_result(black_score: f64, white_score: f64) -> String {
    let diff = black_score - white_score;
    if diff > 0.0 {
        format!("B+{}", diff)
    } else if diff < 0.0 {
        format!("W+{}", -diff)
    } else {
        "Draw".to_string()
    }
}
