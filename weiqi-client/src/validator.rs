use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use weiqi_engine::{GoError, Stone, ValidationKind};

/// A move as persisted by the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: i64,
    pub game: i64,
    /// One-based.
    pub row: i32,
    /// One-based.
    pub col: i32,
    pub color: Stone,
    pub placed_at: DateTime<Utc>,
}

/// Why the authority refused (or could not be asked about) a move.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        ValidationError {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ValidationKind::Network, message)
    }

    /// Classify an HTTP failure from the authority. `detail` is the server's
    /// message, used as-is for validation failures.
    pub fn from_status(status: u16, detail: Option<&str>) -> Self {
        match status {
            400 => Self::new(
                ValidationKind::Validation,
                detail.unwrap_or("move is not valid"),
            ),
            401 => Self::new(ValidationKind::Auth, "authentication failed, log in again"),
            403 => Self::new(
                ValidationKind::Permission,
                "you may not play in this game",
            ),
            429 => Self::new(
                ValidationKind::RateLimit,
                "moving too fast, try again shortly",
            ),
            _ => Self::new(
                ValidationKind::Unknown,
                detail.unwrap_or("move failed, try again"),
            ),
        }
    }
}

impl From<ValidationError> for GoError {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ValidationKind::Network => GoError::NetworkUnavailable,
            kind => GoError::ValidationRejected {
                kind,
                message: err.message,
            },
        }
    }
}

/// The server-side authority that accepts or refuses moves.
///
/// Coordinates are one-based, as the authority stores them.
pub trait MoveValidator: Send + Sync {
    fn validate_move(
        &self,
        game_id: i64,
        row: i32,
        col: i32,
        color: Stone,
    ) -> impl Future<Output = Result<MoveRecord, ValidationError>> + Send;
}
