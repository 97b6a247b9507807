use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;

/// A player's colour. Serialized as `"black"` / `"white"`, matching the
/// authority's move records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl Neg for Stone {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}

impl std::str::FromStr for Stone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Stone::Black),
            "white" | "w" => Ok(Stone::White),
            _ => Err(format!("invalid stone: {s}")),
        }
    }
}

/// Contents of a single intersection. Serialized as a signed byte
/// (`1` Black, `-1` White, `0` empty) so whole boards stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = -1,
}

impl Cell {
    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Stone::Black),
            Cell::White => Some(Stone::White),
        }
    }

    pub fn to_int(self) -> i8 {
        self as i8
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Stone> for Cell {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Cell::Black,
            Stone::White => Cell::White,
        }
    }
}

impl From<Option<Stone>> for Cell {
    fn from(stone: Option<Stone>) -> Self {
        stone.map_or(Cell::Empty, Cell::from)
    }
}
