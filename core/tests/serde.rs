#![cfg(feature = "serde")]

use chess_core::{Board, GameStatus, Move, MoveKind, Square};

#[test]
fn move_json_round_trip() {
    let mv = Move::new(Square::new(6, 4), Square::new(4, 4), MoveKind::DoublePawnPush);
    let json = serde_json::to_string(&mv).unwrap();
    assert_eq!(serde_json::from_str::<Move>(&json).unwrap(), mv);
}

#[test]
fn board_json_round_trip_keeps_state() {
    let mut board = Board::starting_position();
    let mv = board.parse_move("e2e4").unwrap();
    board.make_move(mv).unwrap();

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
    assert!(restored.parse_move("d7d5").is_ok());
}

#[test]
fn off_board_squares_are_rejected() {
    let none: Square = serde_json::from_str(r#"{"row":-1,"col":-1}"#).unwrap();
    assert_eq!(none, Square::NONE);
    assert!(serde_json::from_str::<Square>(r#"{"row":127,"col":0}"#).is_err());
    assert!(serde_json::from_str::<Square>(r#"{"row":3,"col":8}"#).is_err());

    let json = serde_json::to_string(&Board::starting_position()).unwrap();
    let corrupted = json.replacen(r#""row":7"#, r#""row":120"#, 1);
    assert_ne!(corrupted, json);
    assert!(serde_json::from_str::<Board>(&corrupted).is_err());
}

#[test]
fn status_serializes_by_name() {
    let json = serde_json::to_value(GameStatus::Stalemate).unwrap();
    assert_eq!(json, serde_json::json!("Stalemate"));
}
