use serde::{Deserialize, Serialize};

use crate::error::GoError;
use crate::goban::Goban;
use crate::ko::Ko;
use crate::point::Point;
use crate::stone::{Cell, Stone};

/// Stones removed from the board, indexed by the colour that captured them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    pub(crate) fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }

    pub fn total(&self) -> u32 {
        self.black + self.white
    }
}

/// What a successful placement did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub captured: Vec<Point>,
    pub ko: Option<Ko>,
}

/// Place `stone` at `point`, resolve captures and compute the new ko.
///
/// The stone is placed speculatively; if it captures nothing and its group
/// ends up without liberties the placement is reverted and `Suicide` is
/// returned. On any error the board is unchanged.
pub fn play(
    goban: &mut Goban,
    point: Point,
    stone: Stone,
    ko: Option<&Ko>,
) -> Result<Placement, GoError> {
    if !goban.on_board(point) {
        return Err(GoError::NotOnBoard);
    }

    if goban.stone_at(point).is_some() {
        return Err(GoError::Occupied);
    }

    if ko.is_some_and(|ko| ko.pos == point) {
        return Err(GoError::KoViolation);
    }

    goban.set(point, Cell::from(stone));

    let dead_chains: Vec<Vec<Point>> = goban
        .neighbor_chains(point, stone.opp())
        .into_iter()
        .filter(|chain| !goban.has_liberties(chain))
        .collect();

    // A capture always frees at least one liberty, so only a capture-free
    // placement can be suicide.
    if dead_chains.is_empty() && goban.liberties(point).is_empty() {
        goban.set(point, Cell::Empty);
        return Err(GoError::Suicide);
    }

    let captured: Vec<Point> = dead_chains.into_iter().flatten().collect();
    for &pt in &captured {
        goban.set(pt, Cell::Empty);
    }

    let ko = detect_ko(goban, &captured, point, stone);

    Ok(Placement { captured, ko })
}

/// Check a placement without touching `goban`.
pub fn check(goban: &Goban, point: Point, stone: Stone, ko: Option<&Ko>) -> Result<(), GoError> {
    let mut scratch = goban.clone();
    play(&mut scratch, point, stone, ko).map(|_| ())
}

fn detect_ko(goban: &Goban, captured: &[Point], point: Point, stone: Stone) -> Option<Ko> {
    let [ko_point] = captured else {
        return None;
    };

    let chain = goban.chain(point);
    let liberties = goban.chain_liberties(&chain);

    if chain.len() == 1 && liberties == [*ko_point] {
        Some(Ko {
            pos: *ko_point,
            illegal: stone.opp(),
        })
    } else {
        None
    }
}
