use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use weiqi_engine::{Engine, GameConfig, GameSetup, GameState, GoError, Point};

use crate::config::ClientConfig;
use crate::validator::{MoveRecord, MoveValidator};

/// A game played against a remote move authority.
///
/// Moves are applied to the local engine straight away, then confirmed or
/// rolled back once the authority answers. The engine lock is never held
/// across an await, so hosts can read the board while a move is in flight.
pub struct GameSession<V> {
    game_id: i64,
    engine: Arc<Mutex<Engine>>,
    validator: Arc<V>,
    config: ClientConfig,
    cancel: Arc<Notify>,
}

impl<V> Clone for GameSession<V> {
    fn clone(&self) -> Self {
        GameSession {
            game_id: self.game_id,
            engine: Arc::clone(&self.engine),
            validator: Arc::clone(&self.validator),
            config: self.config,
            cancel: Arc::clone(&self.cancel),
        }
    }
}

impl<V: MoveValidator> GameSession<V> {
    pub fn new(
        game_id: i64,
        game: GameConfig,
        validator: V,
        config: ClientConfig,
    ) -> Result<Self, GoError> {
        Ok(Self::with_engine_state(game_id, Engine::new(game)?, validator, config))
    }

    /// Resume a game loaded from the authority.
    pub fn load(
        game_id: i64,
        setup: &GameSetup,
        validator: V,
        config: ClientConfig,
    ) -> Result<Self, GoError> {
        Ok(Self::with_engine_state(game_id, Engine::from_setup(setup)?, validator, config))
    }

    fn with_engine_state(game_id: i64, engine: Engine, validator: V, config: ClientConfig) -> Self {
        GameSession {
            game_id,
            engine: Arc::new(Mutex::new(engine)),
            validator: Arc::new(validator),
            config,
            cancel: Arc::new(Notify::new()),
        }
    }

    pub fn game_id(&self) -> i64 {
        self.game_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Run `f` against the engine. Keep it short: the lock is shared with
    /// in-flight moves.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        f(&mut lock(&self.engine))
    }

    pub fn state(&self) -> GameState {
        lock(&self.engine).state()
    }

    /// Play `point` for the side to move and wait for the authority.
    ///
    /// The stone is on the board as soon as this is called. It stays there if
    /// the authority accepts, and is removed again on rejection, timeout,
    /// cancellation, or if this future is dropped before it completes.
    pub async fn play(&self, point: Point) -> Result<MoveRecord, GoError> {
        // Registered before the move goes down so a cancel() right after is not lost.
        let cancelled = self.cancel.notified();

        let stone = lock(&self.engine).apply_optimistic(point)?.stone;
        let mut guard = RollbackGuard::new(&self.engine);

        let (row, col) = point.to_one_based();
        tracing::debug!(game_id = self.game_id, %point, %stone, "move applied, awaiting authority");

        let validation = tokio::time::timeout(
            self.config.validation_timeout,
            self.validator.validate_move(self.game_id, row, col, stone),
        );

        let verdict = tokio::select! {
            result = validation => match result {
                Ok(verdict) => verdict.map_err(GoError::from),
                Err(_) => {
                    tracing::warn!(
                        game_id = self.game_id,
                        %point,
                        timeout_ms = self.config.validation_timeout.as_millis() as u64,
                        "move validation timed out"
                    );
                    Err(GoError::NetworkUnavailable)
                }
            },
            _ = cancelled => Err(GoError::Cancelled),
        };

        match verdict {
            Ok(record) => {
                guard.disarm();
                lock(&self.engine).confirm_pending()?;
                tracing::info!(game_id = self.game_id, move_id = record.id, %point, "move confirmed");
                Ok(record)
            }
            Err(err) => {
                guard.rollback(&err);
                Err(err)
            }
        }
    }

    /// Abort the move currently waiting on the authority, if any. The waiting
    /// `play` call rolls the move back and returns [`GoError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.notify_waiters();
    }

    pub fn has_pending_move(&self) -> bool {
        lock(&self.engine).pending().is_some()
    }
}

fn lock(engine: &Mutex<Engine>) -> MutexGuard<'_, Engine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Rolls the optimistic move back unless disarmed.
struct RollbackGuard<'a> {
    engine: &'a Mutex<Engine>,
    armed: bool,
}

impl<'a> RollbackGuard<'a> {
    fn new(engine: &'a Mutex<Engine>) -> Self {
        RollbackGuard {
            engine,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    fn rollback(&mut self, reason: &GoError) {
        self.armed = false;
        match lock(self.engine).rollback_pending() {
            Ok(point) => tracing::warn!(%point, %reason, "move rolled back"),
            Err(e) => tracing::warn!(%reason, "nothing to roll back: {e}"),
        }
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.rollback(&GoError::Cancelled);
        }
    }
}
