use arrayvec::ArrayVec;

use crate::config::MAX_SIZE;
use crate::error::GoError;
use crate::point::Point;
use crate::stone::{Cell, Stone};

/// A square Go board stored as a flat row-major array.
///
/// This is a plain container: it never checks legality. Group and liberty
/// queries are pure functions of the current cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goban {
    board: Vec<Cell>,
    size: u8,
}

impl Goban {
    /// Create an empty `size`×`size` board.
    pub fn with_size(size: u8) -> Self {
        Goban {
            board: vec![Cell::Empty; size as usize * size as usize],
            size,
        }
    }

    /// Build a board from a square matrix of cells.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GoError> {
        let size = rows.len();
        if size == 0 || size > MAX_SIZE as usize || rows.iter().any(|r| r.len() != size) {
            return Err(GoError::InvalidBoardSize);
        }

        Ok(Goban {
            board: rows.into_iter().flatten().collect(),
            size: size as u8,
        })
    }

    // -- Accessors --

    pub fn cells(&self) -> &[Cell] {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn on_board(&self, point: Point) -> bool {
        point.row < self.size && point.col < self.size
    }

    /// The cell at `point`; off-board points read as empty.
    pub fn cell(&self, point: Point) -> Cell {
        if self.on_board(point) {
            self.board[self.idx(point)]
        } else {
            Cell::Empty
        }
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.cell(point).stone()
    }

    pub fn set(&mut self, point: Point, cell: Cell) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = cell;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|c| c.is_empty())
    }

    /// Number of stones of `stone` colour on the board.
    pub fn count(&self, stone: Stone) -> u32 {
        let cell = Cell::from(stone);
        self.board.iter().filter(|&&c| c == cell).count() as u32
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Point::new(row, col)))
    }

    // -- Graph algorithms --

    /// The 4-connected neighbours that are on the board. Off-board points
    /// have none.
    pub fn neighbors(&self, point: Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if !self.on_board(point) {
            return result;
        }

        let Point { row, col } = point;
        if row > 0 {
            result.push(Point::new(row - 1, col));
        }
        if row + 1 < self.size {
            result.push(Point::new(row + 1, col));
        }
        if col > 0 {
            result.push(Point::new(row, col - 1));
        }
        if col + 1 < self.size {
            result.push(Point::new(row, col + 1));
        }
        result
    }

    /// Flood-fill the group of same-coloured stones containing `point`.
    /// Empty if there is no stone there.
    pub fn chain(&self, point: Point) -> Vec<Point> {
        let mut visited = vec![false; self.board.len()];
        self.chain_from(point, &mut visited)
    }

    /// Liberties of the group containing `point`.
    pub fn liberties(&self, point: Point) -> Vec<Point> {
        let chain = self.chain(point);
        self.chain_liberties(&chain)
    }

    /// Liberties of a pre-computed group.
    pub fn chain_liberties(&self, chain: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.board.len()];
        let mut libs = Vec::new();
        for &p in chain {
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.board[ni].is_empty() {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    /// Whether the group has at least one liberty. Stops at the first one found.
    pub fn has_liberties(&self, chain: &[Point]) -> bool {
        chain
            .iter()
            .any(|&p| self.neighbors(p).iter().any(|&n| self.cell(n).is_empty()))
    }

    /// Distinct groups of `stone` colour touching `point`.
    pub fn neighbor_chains(&self, point: Point, stone: Stone) -> Vec<Vec<Point>> {
        let mut chains = Vec::new();
        let mut visited = vec![false; self.board.len()];

        for n in self.neighbors(point) {
            if self.stone_at(n) != Some(stone) || visited[self.idx(n)] {
                continue;
            }
            let ch = self.chain_from(n, &mut visited);
            if !ch.is_empty() {
                chains.push(ch);
            }
        }

        chains
    }

    /// Chain flood-fill using a shared visited bitset.
    pub(crate) fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let stone = match self.stone_at(point) {
            Some(s) => s,
            None => return Vec::new(),
        };

        let mut result = Vec::new();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            result.push(p);
            for n in self.neighbors(p) {
                if self.stone_at(n) == Some(stone) && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }

        result
    }

    #[inline]
    pub(crate) fn idx(&self, point: Point) -> usize {
        point.row as usize * self.size as usize + point.col as usize
    }

    /// Build a board from an ASCII layout. 'B' = Black, 'W' = White, anything else empty.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &[&str]) -> Goban {
        let rows = layout
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'B' => Cell::Black,
                        'W' => Cell::White,
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        Goban::from_rows(rows).unwrap()
    }
}
