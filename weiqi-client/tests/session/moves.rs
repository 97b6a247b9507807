use weiqi_engine::{GameSetup, GoError, Point, Resolution, Stone};
use weiqi_client::{ClientConfig, GameSession};

use crate::common::{GAME_ID, Recording, init_tracing, session};

fn p(row: u8, col: u8) -> Point {
    Point::new(row, col)
}

#[tokio::test]
async fn accepted_move_stays_on_board() {
    let session = session(Recording::default());

    let record = session.play(p(2, 3)).await.unwrap();
    assert_eq!(record.game, GAME_ID);
    assert_eq!(record.color, Stone::Black);

    // The authority sees one-based coordinates.
    let calls = session.validator().calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(GAME_ID, 3, 4, Stone::Black)]);

    session.with_engine(|engine| {
        assert_eq!(engine.stone_at(p(2, 3)), Some(Stone::Black));
        assert_eq!(engine.to_move(), Stone::White);
        assert_eq!(engine.resolution(), Some(Resolution::Confirmed));
        assert!(engine.pending().is_none());
        assert_eq!(engine.history_len(), 1);
    });
}

#[tokio::test]
async fn capture_through_the_authority() {
    let session = session(Recording::default());
    let moves = [(4, 4), (4, 5), (3, 5), (3, 4), (5, 5), (0, 0), (4, 6)];
    for (row, col) in moves {
        session.play(p(row, col)).await.unwrap();
    }

    let state = session.state();
    assert_eq!(state.captures.black, 1);
    assert_eq!(state.captures.white, 0);
    assert_eq!(state.move_count, 7);
    session.with_engine(|engine| assert_eq!(engine.stone_at(p(4, 5)), None));
}

#[tokio::test]
async fn illegal_move_never_reaches_authority() {
    let session = session(Recording::default());
    session.play(p(0, 0)).await.unwrap();

    assert_eq!(session.play(p(0, 0)).await, Err(GoError::Occupied));
    assert_eq!(session.play(p(9, 9)).await, Err(GoError::NotOnBoard));
    assert_eq!(session.validator().call_count(), 1);
    assert!(!session.has_pending_move());
}

#[tokio::test]
async fn local_actions_between_remote_moves() {
    let session = session(Recording::default());
    session.play(p(2, 2)).await.unwrap();

    session.with_engine(|engine| engine.pass()).unwrap();
    let record = session.play(p(6, 6)).await.unwrap();
    assert_eq!(record.color, Stone::Black);

    session.with_engine(|engine| engine.undo()).unwrap();
    assert_eq!(session.state().to_move, Stone::Black);
}

#[tokio::test]
async fn loaded_game_continues_with_the_right_colour() {
    init_tracing();
    let setup = GameSetup::new(9, 6.5)
        .with_stone(3, 3, Stone::Black)
        .with_stone(7, 7, Stone::White)
        .with_stone(3, 7, Stone::Black);
    let session = GameSession::load(GAME_ID, &setup, Recording::default(), ClientConfig::default())
        .unwrap();

    let record = session.play(p(6, 2)).await.unwrap();
    assert_eq!(record.color, Stone::White);
    assert_eq!((record.row, record.col), (7, 3));

    let state = session.state();
    assert_eq!(state.move_count, 4);
    assert_eq!(state.komi, 6.5);
}
