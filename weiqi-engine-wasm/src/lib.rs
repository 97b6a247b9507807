use serde::Serialize;
use wasm_bindgen::prelude::*;
use weiqi_engine::{Engine, GameConfig, GameSetup, GoError, Point, Stone};

#[wasm_bindgen]
pub struct WasmGame {
    inner: Engine,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8, komi: f64) -> Result<WasmGame, JsError> {
        let inner = Engine::new(GameConfig::new(size, komi))?;
        Ok(Self { inner })
    }

    /// Restore a game from the server's JSON payload:
    /// `{ size, komi?, intersections?: [{row, col, color}], winner? }`
    pub fn from_setup(setup_json: &str) -> Result<WasmGame, JsError> {
        let setup: GameSetup = serde_json::from_str(setup_json)?;
        let inner = Engine::from_setup(&setup)?;
        Ok(Self { inner })
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    // -- Game actions --

    /// Returns the move outcome as JSON, or `{ "error": ... }`.
    pub fn try_move(&mut self, row: u8, col: u8) -> String {
        to_json(self.inner.try_move(Point::new(row, col)))
    }

    pub fn is_legal(&self, row: u8, col: u8) -> bool {
        self.inner.is_legal(Point::new(row, col)).is_ok()
    }

    pub fn pass(&mut self) -> String {
        to_json(self.inner.pass())
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo().is_ok()
    }

    /// Play or mark dead depending on the phase. Returns `null` when a stone
    /// was marked rather than played.
    pub fn handle_point(&mut self, row: u8, col: u8) -> String {
        to_json(self.inner.handle_point(Point::new(row, col)))
    }

    pub fn set_komi(&mut self, komi: f64) -> bool {
        self.inner.set_komi(komi).is_ok()
    }

    // -- Remote moves --

    /// Apply a move before the server has accepted it.
    pub fn begin_remote_move(&mut self, row: u8, col: u8) -> String {
        to_json(self.inner.apply_optimistic(Point::new(row, col)))
    }

    pub fn confirm_remote_move(&mut self) -> bool {
        self.inner.confirm_pending().is_ok()
    }

    pub fn rollback_remote_move(&mut self) -> bool {
        self.inner.rollback_pending().is_ok()
    }

    pub fn has_pending_move(&self) -> bool {
        self.inner.pending().is_some()
    }

    /// `"local_applied"`, `"confirmed"`, `"rolled_back"` or empty string.
    pub fn resolution(&self) -> String {
        match self.inner.resolution() {
            Some(r) => serde_json::to_value(r)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    // -- Scoring --

    pub fn toggle_dead(&mut self, row: u8, col: u8) -> bool {
        self.inner.toggle_dead(Point::new(row, col)).is_ok()
    }

    pub fn set_marking_mode(&mut self, on: bool) -> bool {
        self.inner.set_marking_mode(on).is_ok()
    }

    /// Returns the new marking mode, unchanged when not scoring.
    pub fn toggle_marking_mode(&mut self) -> bool {
        self.inner
            .toggle_marking_mode()
            .unwrap_or(self.inner.marking_mode())
    }

    pub fn marking_mode(&self) -> bool {
        self.inner.marking_mode()
    }

    /// Ownership per point (1=Black, -1=White, 0=neutral), recomputed now.
    pub fn compute_territory(&mut self) -> js_sys::Int8Array {
        let owners = self.inner.compute_territory().to_ints();
        js_sys::Int8Array::from(owners.as_slice())
    }

    /// Last computed ownership, empty when none is available.
    pub fn territory(&self) -> js_sys::Int8Array {
        let owners = self
            .inner
            .territory()
            .map(|t| t.to_ints())
            .unwrap_or_default();
        js_sys::Int8Array::from(owners.as_slice())
    }

    /// Score preview as JSON without ending the game.
    pub fn score(&self) -> String {
        let score = self.inner.score();
        to_json(Ok::<_, GoError>(ScoreView::new(&score)))
    }

    pub fn confirm_score(&mut self) -> String {
        let result = self.inner.confirm_score();
        to_json(result.as_ref().map(ScoreView::new).map_err(Clone::clone))
    }

    // -- Accessors (WASM-friendly types) --

    pub fn board(&self) -> js_sys::Int8Array {
        js_sys::Int8Array::from(board_ints(&self.inner).as_slice())
    }

    pub fn size(&self) -> u8 {
        self.inner.size()
    }

    pub fn to_move(&self) -> i8 {
        stone_int(self.inner.to_move())
    }

    pub fn phase(&self) -> String {
        self.inner.phase().to_string()
    }

    pub fn komi(&self) -> f64 {
        self.inner.komi()
    }

    pub fn captures_black(&self) -> u32 {
        self.inner.captures().get(Stone::Black)
    }

    pub fn captures_white(&self) -> u32 {
        self.inner.captures().get(Stone::White)
    }

    pub fn move_count(&self) -> u32 {
        self.inner.move_count()
    }

    pub fn has_ko(&self) -> bool {
        self.inner.ko().is_some()
    }

    pub fn ko_row(&self) -> i8 {
        self.inner.ko().map(|ko| ko.pos.row as i8).unwrap_or(-1)
    }

    pub fn ko_col(&self) -> i8 {
        self.inner.ko().map(|ko| ko.pos.col as i8).unwrap_or(-1)
    }

    pub fn last_move_row(&self) -> i8 {
        self.inner.last_move().map(|p| p.row as i8).unwrap_or(-1)
    }

    pub fn last_move_col(&self) -> i8 {
        self.inner.last_move().map(|p| p.col as i8).unwrap_or(-1)
    }

    /// Human-readable position such as `x4,y16`.
    pub fn notation(&self, row: u8, col: u8) -> String {
        Point::new(row, col).notation()
    }

    pub fn can_undo(&self) -> bool {
        self.inner.history_len() > 0 && self.inner.pending().is_none()
    }

    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.inner.state()).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Serialize)]
struct ErrorView {
    error: String,
    code: &'static str,
}

#[derive(Serialize)]
struct ScoreView<'a> {
    #[serde(flatten)]
    score: &'a weiqi_engine::GameScore,
    result: String,
    winner: Option<Stone>,
}

impl<'a> ScoreView<'a> {
    fn new(score: &'a weiqi_engine::GameScore) -> Self {
        ScoreView {
            score,
            result: score.result(),
            winner: score.winner(),
        }
    }
}

fn to_json<T: Serialize>(result: Result<T, GoError>) -> String {
    let rendered = match result {
        Ok(value) => serde_json::to_string(&value),
        Err(e) => serde_json::to_string(&ErrorView {
            code: error_code(&e),
            error: e.to_string(),
        }),
    };
    rendered.unwrap_or_else(|e| format!(r#"{{"error":"{}","code":"internal"}}"#, e))
}

fn error_code(err: &GoError) -> &'static str {
    match err {
        GoError::Occupied => "occupied",
        GoError::Suicide => "suicide",
        GoError::KoViolation => "ko",
        GoError::WrongPhase => "wrong_phase",
        GoError::NoHistory => "no_history",
        GoError::InvalidKomi => "invalid_komi",
        GoError::ValidationRejected { .. } => "rejected",
        GoError::NetworkUnavailable => "network",
        GoError::Cancelled => "cancelled",
        GoError::NotOnBoard => "not_on_board",
        GoError::InvalidBoardSize => "invalid_size",
        GoError::MovePending => "move_pending",
        GoError::NoPendingMove => "no_pending_move",
    }
}

fn board_ints(engine: &Engine) -> Vec<i8> {
    engine.goban().cells().iter().map(|c| c.to_int()).collect()
}

fn stone_int(stone: Stone) -> i8 {
    weiqi_engine::Cell::from(stone).to_int()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_with_code() {
        let json = to_json::<()>(Err(GoError::KoViolation));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "ko");
        assert!(value["error"].as_str().unwrap().contains("ko"));
    }

    #[test]
    fn board_ints_follow_cells() {
        let mut engine = Engine::new(GameConfig::new(3, 0.0)).unwrap();
        engine.try_move(Point::new(0, 0)).unwrap();
        engine.try_move(Point::new(1, 1)).unwrap();
        assert_eq!(board_ints(&engine), vec![1, 0, 0, 0, -1, 0, 0, 0, 0]);
    }

    #[test]
    fn score_view_flattens_players() {
        let engine = Engine::new(GameConfig::new(9, 3.75)).unwrap();
        let score = engine.score();
        let json = serde_json::to_value(ScoreView::new(&score)).unwrap();
        assert_eq!(json["black"]["total"], -3.75);
        assert_eq!(json["result"], "W+3.75");
        assert_eq!(json["winner"], "white");
    }

    #[test]
    fn stone_ints() {
        assert_eq!(stone_int(Stone::Black), 1);
        assert_eq!(stone_int(Stone::White), -1);
    }
}
