use std::time::Duration;

use weiqi_client::ValidationError;
use weiqi_engine::{GoError, Point, Resolution, Stone, ValidationKind};

use crate::common::{Scripted, Slow, session};

fn p(row: u8, col: u8) -> Point {
    Point::new(row, col)
}

#[tokio::test]
async fn rejected_move_is_removed() {
    let session = session(Scripted::new([Some(ValidationError::from_status(403, None))]));

    let err = session.play(p(3, 3)).await.unwrap_err();
    assert!(matches!(
        err,
        GoError::ValidationRejected {
            kind: ValidationKind::Permission,
            ..
        }
    ));

    session.with_engine(|engine| {
        assert!(engine.goban().is_empty());
        assert_eq!(engine.to_move(), Stone::Black);
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.history_len(), 0);
        assert_eq!(engine.resolution(), Some(Resolution::RolledBack));
    });

    // The point is free again and the next attempt goes through.
    session.play(p(3, 3)).await.unwrap();
}

#[tokio::test]
async fn network_failure_is_unavailable() {
    let session = session(Scripted::new([Some(ValidationError::network("connection reset"))]));
    assert_eq!(session.play(p(0, 0)).await, Err(GoError::NetworkUnavailable));
    assert!(!session.has_pending_move());
}

#[tokio::test]
async fn rejected_capture_puts_stones_back() {
    let mut script = vec![None; 6];
    script.push(Some(ValidationError::new(ValidationKind::RateLimit, "slow down")));
    let session = session(Scripted::new(script));

    for (row, col) in [(4, 4), (4, 5), (3, 5), (3, 4), (5, 5), (0, 0)] {
        session.play(p(row, col)).await.unwrap();
    }
    let before = session.state();

    let err = session.play(p(4, 6)).await.unwrap_err();
    assert_eq!(
        err,
        GoError::ValidationRejected {
            kind: ValidationKind::RateLimit,
            message: "slow down".to_string(),
        }
    );

    let after = session.state();
    assert_eq!(after.board, before.board);
    assert_eq!(after.captures, before.captures);
    assert_eq!(after.last_move, Some(p(0, 0)));
    assert_eq!(after.move_count, 6);
    session.with_engine(|engine| {
        assert_eq!(engine.stone_at(p(4, 5)), Some(Stone::White));
        assert_eq!(engine.history_len(), 6);
    });
}

#[tokio::test]
async fn rollback_keeps_earlier_history() {
    let session = session(Scripted::new([
        None,
        None,
        Some(ValidationError::from_status(400, Some("bad move"))),
    ]));

    session.play(p(0, 0)).await.unwrap();
    session.play(p(8, 8)).await.unwrap();
    assert!(session.play(p(4, 4)).await.is_err());

    session.with_engine(|engine| {
        assert_eq!(engine.history_len(), 2);
        engine.undo().unwrap();
        assert_eq!(engine.stone_at(p(8, 8)), None);
        assert_eq!(engine.stone_at(p(0, 0)), Some(Stone::Black));
        engine.undo().unwrap();
        assert!(engine.goban().is_empty());
        assert_eq!(engine.undo(), Err(GoError::NoHistory));
    });
}

#[tokio::test]
async fn timeout_rolls_back() {
    let session = session(Slow(Duration::from_secs(5)));

    assert_eq!(session.play(p(2, 2)).await, Err(GoError::NetworkUnavailable));
    session.with_engine(|engine| {
        assert!(engine.goban().is_empty());
        assert!(engine.pending().is_none());
        assert_eq!(engine.resolution(), Some(Resolution::RolledBack));
    });
}
