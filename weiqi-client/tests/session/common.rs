#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Notify;
use weiqi_client::{ClientConfig, GameSession, MoveRecord, MoveValidator, ValidationError};
use weiqi_engine::{GameConfig, Stone};

pub const GAME_ID: i64 = 42;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn record(id: i64, game: i64, row: i32, col: i32, color: Stone) -> MoveRecord {
    MoveRecord {
        id,
        game,
        row,
        col,
        color,
        placed_at: Utc::now(),
    }
}

/// A 9x9 session with a short validation timeout.
pub fn session<V: MoveValidator>(validator: V) -> GameSession<V> {
    init_tracing();
    let config = ClientConfig {
        validation_timeout: Duration::from_millis(200),
    };
    GameSession::new(GAME_ID, GameConfig::new(9, 3.75), validator, config).unwrap()
}

/// Yield until a move is waiting on the authority.
pub async fn wait_for_pending<V: MoveValidator>(session: &GameSession<V>) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !session.has_pending_move() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("move never became pending");
}

/// Accepts every move and remembers what it was asked.
#[derive(Default)]
pub struct Recording {
    next_id: AtomicI64,
    pub calls: Mutex<Vec<(i64, i32, i32, Stone)>>,
}

impl Recording {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl MoveValidator for Recording {
    async fn validate_move(
        &self,
        game_id: i64,
        row: i32,
        col: i32,
        color: Stone,
    ) -> Result<MoveRecord, ValidationError> {
        self.calls.lock().unwrap().push((game_id, row, col, color));
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(record(id, game_id, row, col, color))
    }
}

/// Answers from a script, accepting once the script runs out.
#[derive(Default)]
pub struct Scripted {
    verdicts: Mutex<VecDeque<Option<ValidationError>>>,
}

impl Scripted {
    pub fn new(verdicts: impl IntoIterator<Item = Option<ValidationError>>) -> Self {
        Scripted {
            verdicts: Mutex::new(verdicts.into_iter().collect()),
        }
    }
}

impl MoveValidator for Scripted {
    async fn validate_move(
        &self,
        game_id: i64,
        row: i32,
        col: i32,
        color: Stone,
    ) -> Result<MoveRecord, ValidationError> {
        let next = self.verdicts.lock().unwrap().pop_front().flatten();
        match next {
            Some(err) => Err(err),
            None => Ok(record(1, game_id, row, col, color)),
        }
    }
}

/// Takes `delay` to accept.
pub struct Slow(pub Duration);

impl MoveValidator for Slow {
    async fn validate_move(
        &self,
        game_id: i64,
        row: i32,
        col: i32,
        color: Stone,
    ) -> Result<MoveRecord, ValidationError> {
        tokio::time::sleep(self.0).await;
        Ok(record(1, game_id, row, col, color))
    }
}

/// Holds each move until `release` is notified.
#[derive(Default)]
pub struct Gated {
    pub release: Notify,
}

impl MoveValidator for Gated {
    async fn validate_move(
        &self,
        game_id: i64,
        row: i32,
        col: i32,
        color: Stone,
    ) -> Result<MoveRecord, ValidationError> {
        self.release.notified().await;
        Ok(record(1, game_id, row, col, color))
    }
}

/// Never answers.
pub struct Silent;

impl MoveValidator for Silent {
    async fn validate_move(
        &self,
        _game_id: i64,
        _row: i32,
        _col: i32,
        _color: Stone,
    ) -> Result<MoveRecord, ValidationError> {
        std::future::pending().await
    }
}
