use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{self, GameConfig};
use crate::error::GoError;
use crate::goban::Goban;
use crate::history::{History, Snapshot};
use crate::ko::Ko;
use crate::outcome::{MoveOutcome, Notice, PassOutcome};
use crate::pending::{MoveSnapshot, PendingMove, Resolution};
use crate::point::Point;
use crate::rules::{self, Captures};
use crate::setup::{GameSetup, Winner};
use crate::stone::{Cell, Stone};
use crate::territory::{self, GameScore, Territory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    Scoring,
    Over,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Playing => write!(f, "playing"),
            Phase::Scoring => write!(f, "scoring"),
            Phase::Over => write!(f, "over"),
        }
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(Phase::Playing),
            "scoring" => Ok(Phase::Scoring),
            "over" => Ok(Phase::Over),
            _ => Err(format!("unknown phase: {s}")),
        }
    }
}

/// Serializable view of the whole game for hosts.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameState {
    pub size: u8,
    pub board: Vec<Cell>,
    pub to_move: Stone,
    pub captures: Captures,
    pub ko: Option<Ko>,
    pub move_count: u32,
    pub last_move: Option<Point>,
    pub consecutive_passes: u8,
    pub dead_stones: Vec<Point>,
    pub phase: Phase,
    pub komi: f64,
    pub marking_mode: bool,
    pub territory: Option<Vec<i8>>,
    pub winner: Option<Winner>,
    pub pending: Option<Point>,
}

/// A single game: board, turn order, scoring phase, undo history and the
/// optimistic move awaiting confirmation.
///
/// Every mutating method runs to completion and leaves the state untouched
/// when it returns an error.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    goban: Goban,
    to_move: Stone,
    captures: Captures,
    ko: Option<Ko>,
    move_count: u32,
    last_move: Option<Point>,
    consecutive_passes: u8,
    dead_stones: HashSet<Point>,
    phase: Phase,
    komi: f64,
    marking_mode: bool,
    territory: Option<Territory>,
    winner: Option<Winner>,
    history: History,
    pending: Option<PendingMove>,
    resolution: Option<Resolution>,
}

impl Engine {
    pub fn new(config: GameConfig) -> Result<Self, GoError> {
        config.validate()?;
        Ok(Self::create(config))
    }

    pub fn with_size(size: u8) -> Result<Self, GoError> {
        Self::new(GameConfig {
            size,
            ..GameConfig::default()
        })
    }

    fn create(config: GameConfig) -> Self {
        Engine {
            config,
            goban: Goban::with_size(config.size),
            to_move: Stone::Black,
            captures: Captures::new(),
            ko: None,
            move_count: 0,
            last_move: None,
            consecutive_passes: 0,
            dead_stones: HashSet::new(),
            phase: Phase::Playing,
            komi: config.komi,
            marking_mode: false,
            territory: None,
            winner: None,
            history: History::new(),
            pending: None,
            resolution: None,
        }
    }

    /// Restore a game from a server payload.
    ///
    /// Placements are written straight onto the board without capture
    /// resolution, since persisted boards only hold surviving stones.
    /// Out-of-range entries are skipped. The side to move follows from the
    /// number of stones placed.
    pub fn from_setup(setup: &GameSetup) -> Result<Self, GoError> {
        let config = GameConfig::new(setup.size, setup.komi);
        config.validate()?;
        let mut engine = Self::create(config);

        for stone in &setup.placements {
            let Some(point) = Point::from_one_based(stone.row, stone.col, setup.size) else {
                tracing::warn!(
                    "skipping placement outside {}x{} board: ({}, {})",
                    setup.size,
                    setup.size,
                    stone.row,
                    stone.col
                );
                continue;
            };
            engine.goban.set(point, Cell::from(stone.color));
            engine.last_move = Some(point);
            engine.move_count += 1;
        }

        engine.to_move = if engine.move_count % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        };

        if let Some(winner) = setup.winner {
            engine.winner = Some(winner);
            engine.phase = Phase::Over;
        }

        tracing::debug!(
            moves = engine.move_count,
            phase = %engine.phase,
            "restored game from setup"
        );

        Ok(engine)
    }

    /// Start a new game on the same board size, keeping the current komi.
    pub fn reset(&mut self) {
        let komi = self.komi;
        *self = Self::create(GameConfig::new(self.config.size, komi));
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> u8 {
        self.goban.size()
    }

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.goban.stone_at(point)
    }

    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn ko(&self) -> Option<&Ko> {
        self.ko.as_ref()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn dead_stones(&self) -> &HashSet<Point> {
        &self.dead_stones
    }

    pub fn is_dead(&self, point: Point) -> bool {
        self.dead_stones.contains(&point)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn marking_mode(&self) -> bool {
        self.marking_mode
    }

    /// Last computed territory; `None` outside scoring or after an undo.
    pub fn territory(&self) -> Option<&Territory> {
        self.territory.as_ref()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    /// Status of the most recent optimistic move.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    // -- Configuration --

    /// Change komi. Only allowed while playing.
    pub fn set_komi(&mut self, komi: f64) -> Result<(), GoError> {
        config::validate_komi(komi)?;
        if self.phase != Phase::Playing {
            return Err(GoError::WrongPhase);
        }
        self.ensure_no_pending()?;
        self.komi = komi;
        Ok(())
    }

    // -- Game actions --

    /// Play a stone for the side to move.
    pub fn try_move(&mut self, point: Point) -> Result<MoveOutcome, GoError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending()?;
        self.apply_move(point)
    }

    /// Whether the side to move may play at `point`, without changing anything.
    pub fn is_legal(&self, point: Point) -> Result<(), GoError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending()?;
        rules::check(&self.goban, point, self.to_move, self.ko.as_ref())
    }

    fn apply_move(&mut self, point: Point) -> Result<MoveOutcome, GoError> {
        let stone = self.to_move;
        let snapshot = self.snapshot();

        let placement = rules::play(&mut self.goban, point, stone, self.ko.as_ref())?;
        self.history.push(snapshot);

        let count = placement.captured.len() as u32;
        self.captures.add(stone, count);
        self.ko = placement.ko;
        self.move_count += 1;
        self.consecutive_passes = 0;
        self.to_move = stone.opp();
        self.last_move = Some(point);

        let mut notices = vec![Notice::Played { stone, point }];
        if count > 0 {
            notices.push(Notice::Captured { by: stone, count });
        }
        if let Some(ko) = &self.ko {
            notices.push(Notice::Ko { point: ko.pos });
        }

        Ok(MoveOutcome {
            point,
            stone,
            captured: placement.captured,
            ko: self.ko.map(|ko| ko.pos),
            notices,
        })
    }

    /// Pass for the side to move. The second consecutive pass starts scoring.
    pub fn pass(&mut self) -> Result<PassOutcome, GoError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending()?;

        let stone = self.to_move;
        let snapshot = self.snapshot();
        self.history.push(snapshot);

        self.consecutive_passes += 1;
        self.last_move = None;
        self.ko = None;

        let mut notices = Vec::new();
        if self.consecutive_passes >= 2 {
            notices.push(Notice::Passed { stone, next: None });
            self.enter_scoring();
            notices.push(Notice::ScoringStarted { komi: self.komi });
        } else {
            self.to_move = stone.opp();
            notices.push(Notice::Passed {
                stone,
                next: Some(self.to_move),
            });
        }

        Ok(PassOutcome {
            stone,
            phase: self.phase,
            notices,
        })
    }

    fn enter_scoring(&mut self) {
        self.phase = Phase::Scoring;
        self.compute_territory();
        tracing::debug!(komi = self.komi, "entered scoring phase");
    }

    /// Route a click on the board: a move while playing, a dead-stone toggle
    /// while marking. Returns the move outcome when a stone was played.
    pub fn handle_point(&mut self, point: Point) -> Result<Option<MoveOutcome>, GoError> {
        match self.phase {
            Phase::Playing => self.try_move(point).map(Some),
            Phase::Scoring if self.marking_mode => self.toggle_dead(point).map(|_| None),
            _ => Err(GoError::WrongPhase),
        }
    }

    // -- Scoring --

    /// Flip the dead/alive status of the group at `point`. No-op on an empty point.
    pub fn toggle_dead(&mut self, point: Point) -> Result<(), GoError> {
        self.ensure_phase(Phase::Scoring)?;
        if self.goban.stone_at(point).is_none() {
            return Ok(());
        }

        let snapshot = self.snapshot();
        self.history.push(snapshot);
        territory::toggle_dead_chain(&self.goban, &mut self.dead_stones, point);
        self.compute_territory();
        Ok(())
    }

    pub fn set_marking_mode(&mut self, on: bool) -> Result<(), GoError> {
        self.ensure_phase(Phase::Scoring)?;
        let leaving = self.marking_mode && !on;
        self.marking_mode = on;
        if leaving {
            self.compute_territory();
        }
        Ok(())
    }

    /// Flip marking mode, returning the new value.
    pub fn toggle_marking_mode(&mut self) -> Result<bool, GoError> {
        self.set_marking_mode(!self.marking_mode)?;
        Ok(self.marking_mode)
    }

    /// Recompute territory from the board and the current dead-stone marks.
    pub fn compute_territory(&mut self) -> &Territory {
        self.territory
            .insert(territory::compute_territory(&self.goban, &self.dead_stones))
    }

    /// Score the current position without ending the game.
    pub fn score(&self) -> GameScore {
        let territory = territory::compute_territory(&self.goban, &self.dead_stones);
        territory::score(
            &self.goban,
            &territory,
            &self.dead_stones,
            &self.captures,
            self.komi,
        )
    }

    /// End the game and return the final score.
    pub fn confirm_score(&mut self) -> Result<GameScore, GoError> {
        self.ensure_phase(Phase::Scoring)?;

        self.marking_mode = false;
        self.compute_territory();
        let score = self.score();

        self.phase = Phase::Over;
        self.winner = Some(Winner::from(score.winner()));
        tracing::debug!(result = %score.result(), "game over");

        Ok(score)
    }

    // -- History --

    /// Restore the state before the last move, pass or dead-stone toggle.
    ///
    /// Policy: the game always comes back in `Playing` with marking mode off
    /// and no territory, even when the snapshot was taken during scoring.
    pub fn undo(&mut self) -> Result<(), GoError> {
        self.ensure_no_pending()?;
        let snapshot = self.history.pop().ok_or(GoError::NoHistory)?;
        self.restore(snapshot);

        // Dead marks only exist while scoring.
        self.phase = Phase::Playing;
        self.dead_stones.clear();
        self.marking_mode = false;
        self.territory = None;
        self.winner = None;

        tracing::debug!(history = self.history.len(), "undo");
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            goban: self.goban.clone(),
            to_move: self.to_move,
            captures: self.captures,
            ko: self.ko,
            move_count: self.move_count,
            last_move: self.last_move,
            consecutive_passes: self.consecutive_passes,
            dead_stones: self.dead_stones.clone(),
            phase: self.phase,
            komi: self.komi,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.goban = snapshot.goban;
        self.to_move = snapshot.to_move;
        self.captures = snapshot.captures;
        self.ko = snapshot.ko;
        self.move_count = snapshot.move_count;
        self.last_move = snapshot.last_move;
        self.consecutive_passes = snapshot.consecutive_passes;
        self.dead_stones = snapshot.dead_stones;
        self.phase = snapshot.phase;
        self.komi = snapshot.komi;
    }

    // -- Optimistic moves --

    /// Apply a move locally ahead of the authority's verdict.
    ///
    /// Exactly one optimistic move may be outstanding; it must be resolved
    /// with [`Engine::confirm_pending`] or [`Engine::rollback_pending`]
    /// before the next action.
    pub fn apply_optimistic(&mut self, point: Point) -> Result<MoveOutcome, GoError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending()?;

        let snapshot = MoveSnapshot {
            goban: self.goban.clone(),
            captures: self.captures,
            to_move: self.to_move,
            move_count: self.move_count,
            last_move: self.last_move,
            ko: self.ko,
            consecutive_passes: self.consecutive_passes,
        };
        let history_len = self.history.len();

        let outcome = self.apply_move(point)?;
        self.pending = Some(PendingMove::new(point, outcome.stone, snapshot, history_len));
        self.resolution = Some(Resolution::LocalApplied);
        Ok(outcome)
    }

    /// Accept the outstanding optimistic move.
    pub fn confirm_pending(&mut self) -> Result<Point, GoError> {
        let pending = self.pending.take().ok_or(GoError::NoPendingMove)?;
        self.resolution = Some(Resolution::Confirmed);
        Ok(pending.point())
    }

    /// Put back the state from just before the outstanding optimistic move.
    /// Only the history entry pushed by that move is dropped.
    pub fn rollback_pending(&mut self) -> Result<Point, GoError> {
        let pending = self.pending.take().ok_or(GoError::NoPendingMove)?;
        let point = pending.point();
        let snapshot = pending.snapshot;

        self.goban = snapshot.goban;
        self.captures = snapshot.captures;
        self.to_move = snapshot.to_move;
        self.move_count = snapshot.move_count;
        self.last_move = snapshot.last_move;
        self.ko = snapshot.ko;
        self.consecutive_passes = snapshot.consecutive_passes;
        self.history.truncate(pending.history_len);
        self.resolution = Some(Resolution::RolledBack);

        Ok(point)
    }

    // -- Serialization --

    pub fn state(&self) -> GameState {
        let mut dead_stones: Vec<Point> = self.dead_stones.iter().copied().collect();
        dead_stones.sort();

        GameState {
            size: self.goban.size(),
            board: self.goban.cells().to_vec(),
            to_move: self.to_move,
            captures: self.captures,
            ko: self.ko,
            move_count: self.move_count,
            last_move: self.last_move,
            consecutive_passes: self.consecutive_passes,
            dead_stones,
            phase: self.phase,
            komi: self.komi,
            marking_mode: self.marking_mode,
            territory: self.territory.as_ref().map(Territory::to_ints),
            winner: self.winner,
            pending: self.pending.as_ref().map(PendingMove::point),
        }
    }

    // -- Guards --

    fn ensure_phase(&self, phase: Phase) -> Result<(), GoError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GoError::WrongPhase)
        }
    }

    fn ensure_no_pending(&self) -> Result<(), GoError> {
        if self.pending.is_some() {
            Err(GoError::MovePending)
        } else {
            Ok(())
        }
    }
}
