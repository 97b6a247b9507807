pub mod config;
pub mod engine;
pub mod error;
pub mod goban;
pub mod history;
pub mod ko;
pub mod outcome;
pub mod pending;
pub mod point;
pub mod rules;
pub mod setup;
pub mod stone;
pub mod territory;

pub use config::GameConfig;
pub use engine::{Engine, GameState, Phase};
pub use error::{GoError, ValidationKind};
pub use goban::Goban;
pub use history::{History, Snapshot};
pub use ko::Ko;
pub use outcome::{MoveOutcome, Notice, PassOutcome};
pub use pending::{PendingMove, Resolution};
pub use point::Point;
pub use rules::{Captures, Placement};
pub use setup::{GameSetup, SetupStone, Winner};
pub use stone::{Cell, Stone};
pub use territory::{GameScore, PlayerScore, Territory};
