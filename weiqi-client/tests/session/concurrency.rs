use weiqi_engine::{GoError, Point, Resolution, Stone};

use crate::common::{Gated, Recording, Silent, session, wait_for_pending};

fn p(row: u8, col: u8) -> Point {
    Point::new(row, col)
}

#[tokio::test]
async fn second_move_refused_while_pending() {
    let session = session(Gated::default());

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.play(p(3, 3)).await })
    };
    wait_for_pending(&session).await;

    // The board is readable while the authority is thinking.
    session.with_engine(|engine| {
        assert_eq!(engine.stone_at(p(3, 3)), Some(Stone::Black));
        assert_eq!(engine.resolution(), Some(Resolution::LocalApplied));
        assert_eq!(engine.pass().err(), Some(GoError::MovePending));
        assert_eq!(engine.undo(), Err(GoError::MovePending));
    });
    assert_eq!(session.play(p(5, 5)).await, Err(GoError::MovePending));

    session.validator().release.notify_one();
    let record = first.await.unwrap().unwrap();
    assert_eq!((record.row, record.col), (4, 4));

    session.with_engine(|engine| {
        assert!(engine.pending().is_none());
        assert_eq!(engine.stone_at(p(5, 5)), None);
        assert_eq!(engine.to_move(), Stone::White);
    });
}

#[tokio::test]
async fn cancel_rolls_back() {
    let session = session(Silent);

    let play = {
        let session = session.clone();
        tokio::spawn(async move { session.play(p(4, 4)).await })
    };
    wait_for_pending(&session).await;

    session.cancel();
    assert_eq!(play.await.unwrap(), Err(GoError::Cancelled));
    session.with_engine(|engine| {
        assert!(engine.goban().is_empty());
        assert_eq!(engine.to_move(), Stone::Black);
        assert_eq!(engine.resolution(), Some(Resolution::RolledBack));
    });
}

#[tokio::test]
async fn dropped_play_rolls_back() {
    let session = session(Silent);

    let play = {
        let session = session.clone();
        tokio::spawn(async move { session.play(p(4, 4)).await })
    };
    wait_for_pending(&session).await;

    play.abort();
    assert!(play.await.unwrap_err().is_cancelled());

    assert!(!session.has_pending_move());
    session.with_engine(|engine| {
        assert!(engine.goban().is_empty());
        assert_eq!(engine.history_len(), 0);
    });
}

#[tokio::test]
async fn cancel_with_nothing_pending_is_forgotten() {
    let session = session(Recording::default());
    session.cancel();
    session.play(p(0, 0)).await.unwrap();
    assert_eq!(session.validator().call_count(), 1);
}

#[tokio::test]
async fn sessions_do_not_share_pending_moves() {
    let first = session(Silent);
    let second = session(Recording::default());

    let pending = {
        let first = first.clone();
        tokio::spawn(async move { first.play(p(0, 0)).await })
    };
    wait_for_pending(&first).await;

    second.play(p(0, 0)).await.unwrap();
    assert!(!second.has_pending_move());

    first.cancel();
    assert_eq!(pending.await.unwrap(), Err(GoError::Cancelled));
}
