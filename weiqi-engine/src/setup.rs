use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DEFAULT_KOMI;
use crate::stone::Stone;

/// Decided outcome of a persisted game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Option<Stone>> for Winner {
    fn from(stone: Option<Stone>) -> Self {
        match stone {
            Some(Stone::Black) => Winner::Black,
            Some(Stone::White) => Winner::White,
            None => Winner::Draw,
        }
    }
}

/// One persisted stone, one-based as stored by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStone {
    pub row: i32,
    pub col: i32,
    pub color: Stone,
}

/// Payload for restoring a game loaded from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    pub size: u8,
    #[serde(default = "default_komi")]
    pub komi: f64,
    #[serde(default, alias = "intersections")]
    pub placements: Vec<SetupStone>,
    #[serde(default, deserialize_with = "deserialize_winner")]
    pub winner: Option<Winner>,
}

impl GameSetup {
    pub fn new(size: u8, komi: f64) -> Self {
        GameSetup {
            size,
            komi,
            placements: Vec::new(),
            winner: None,
        }
    }

    pub fn with_stone(mut self, row: i32, col: i32, color: Stone) -> Self {
        self.placements.push(SetupStone { row, col, color });
        self
    }
}

fn default_komi() -> f64 {
    DEFAULT_KOMI
}

/// The server stores "no winner yet" as null or an empty string, and any
/// other non-colour value as a draw.
fn deserialize_winner<'de, D>(deserializer: D) -> Result<Option<Winner>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("black") => Some(Winner::Black),
        Some(s) if s.eq_ignore_ascii_case("white") => Some(Winner::White),
        Some(_) => Some(Winner::Draw),
    })
}
