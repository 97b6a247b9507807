use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based board coordinate.
///
/// Hosts and the move authority speak one-based `(row, col)`; convert at the
/// boundary with [`Point::from_one_based`] and [`Point::to_one_based`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: u8,
    pub col: u8,
}

impl Point {
    pub const fn new(row: u8, col: u8) -> Self {
        Point { row, col }
    }

    /// Convert one-based coordinates, returning `None` when they fall outside
    /// a `size`×`size` board.
    pub fn from_one_based(row: i32, col: i32, size: u8) -> Option<Self> {
        let size = size as i32;
        if row < 1 || col < 1 || row > size || col > size {
            return None;
        }
        Some(Point::new((row - 1) as u8, (col - 1) as u8))
    }

    pub fn to_one_based(self) -> (i32, i32) {
        (self.row as i32 + 1, self.col as i32 + 1)
    }

    /// Human notation, `x{col},y{row}` with one-based numbers.
    pub fn notation(self) -> String {
        let (row, col) = self.to_one_based();
        format!("x{col},y{row}")
    }

    /// Parse [`Point::notation`] output. Also accepts bare pairs such as
    /// `"5,3"` or `"5 3"` (column first).
    pub fn parse_notation(s: &str, size: u8) -> Option<Self> {
        let cleaned: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|&c| c != 'x' && c != 'y')
            .collect();
        let mut parts = cleaned
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let x: i32 = parts.next()?.parse().ok()?;
        let y: i32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        Point::from_one_based(y, x, size)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
