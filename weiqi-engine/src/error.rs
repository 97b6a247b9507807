use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How the move authority classified a refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Validation,
    Permission,
    RateLimit,
    Auth,
    Network,
    Unknown,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::Validation => write!(f, "validation"),
            ValidationKind::Permission => write!(f, "permission"),
            ValidationKind::RateLimit => write!(f, "rate_limit"),
            ValidationKind::Auth => write!(f, "auth"),
            ValidationKind::Network => write!(f, "network"),
            ValidationKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Every way an engine operation can be refused. None of these are fatal:
/// the engine state is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoError {
    #[error("point is already occupied")]
    Occupied,
    #[error("suicide")]
    Suicide,
    #[error("ko violation")]
    KoViolation,
    #[error("not allowed in the current phase")]
    WrongPhase,
    #[error("nothing to undo")]
    NoHistory,
    #[error("komi must be between 0 and 15")]
    InvalidKomi,
    #[error("move rejected ({kind}): {message}")]
    ValidationRejected {
        kind: ValidationKind,
        message: String,
    },
    #[error("move authority unavailable")]
    NetworkUnavailable,
    #[error("move validation cancelled")]
    Cancelled,
    #[error("not on board")]
    NotOnBoard,
    #[error("board size must be between 1 and 25")]
    InvalidBoardSize,
    #[error("a move is awaiting confirmation")]
    MovePending,
    #[error("no move is awaiting confirmation")]
    NoPendingMove,
}
