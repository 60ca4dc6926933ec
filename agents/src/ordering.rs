//! Move ordering for alpha-beta: likely-good moves first so cutoffs come early.

use chess_core::{Board, Move, MoveKind, PieceKind};
use std::cmp::Reverse;

/// Lifts every capture above every quiet move, whatever the trade.
const CAPTURE_BASE: i32 = 100_000;
const PROMOTION_BONUS: i32 = 800;

/// Heuristic ordering score. Captures rank by MVV-LVA (victim × 10 − attacker)
/// and promotions get a flat bonus.
pub fn score_move(board: &Board, mv: Move) -> i32 {
    let mut score = 0;

    if mv.is_capture() {
        // The en-passant victim is not on the destination square.
        let victim = match mv.kind {
            MoveKind::EnPassant => PieceKind::Pawn.value(),
            _ => board.piece_at(mv.to).map_or(0, |p| p.value()),
        };
        let attacker = board.piece_at(mv.from).map_or(0, |p| p.value());
        score += CAPTURE_BASE + victim * 10 - attacker;
    }

    if mv.is_promotion() {
        score += PROMOTION_BONUS;
    }

    score
}

/// Sorts best-first. The sort is stable, so equal scores keep generation order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|&mv| Reverse(score_move(board, mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Square};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_mvv_lva() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, sq("h1"));
        board.place(PieceKind::King, Color::Black, sq("h8"));
        board.place(PieceKind::Pawn, Color::White, sq("d4"));
        board.place(PieceKind::Queen, Color::White, sq("d1"));
        board.place(PieceKind::Rook, Color::Black, sq("e5"));
        board.place(PieceKind::Knight, Color::Black, sq("d5"));

        let pawn_takes_rook = Move::new(sq("d4"), sq("e5"), MoveKind::Capture);
        let queen_takes_knight = Move::new(sq("d1"), sq("d5"), MoveKind::Capture);
        let quiet = Move::new(sq("d1"), sq("d2"), MoveKind::Normal);

        assert_eq!(score_move(&board, pawn_takes_rook), CAPTURE_BASE + 4900);
        assert_eq!(score_move(&board, queen_takes_knight), CAPTURE_BASE + 2300);
        assert_eq!(score_move(&board, quiet), 0);

        let mut moves = vec![quiet, queen_takes_knight, pawn_takes_rook];
        order_moves(&board, &mut moves);
        assert_eq!(moves, vec![pawn_takes_rook, queen_takes_knight, quiet]);
    }

    #[test]
    fn test_king_captures_still_precede_quiet_moves() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, sq("e1"));
        board.place(PieceKind::King, Color::Black, sq("e8"));
        board.place(PieceKind::Pawn, Color::Black, sq("d2"));

        let mut moves = board.legal_moves(Color::White);
        order_moves(&board, &mut moves);
        assert_eq!(moves[0], Move::new(sq("e1"), sq("d2"), MoveKind::Capture));
        assert!(moves[1..].iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_promotions_and_en_passant() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, sq("a1"));
        board.place(PieceKind::King, Color::Black, sq("h8"));

        let push = Move::new_promotion(sq("b7"), sq("b8"), PieceKind::Queen, false);
        assert_eq!(score_move(&board, push), PROMOTION_BONUS);

        board.place(PieceKind::Pawn, Color::White, sq("e5"));
        let ep = Move::new(sq("e5"), sq("d6"), MoveKind::EnPassant);
        assert_eq!(score_move(&board, ep), CAPTURE_BASE + 900);
    }

    #[test]
    fn test_stable_for_equal_scores() {
        let board = Board::starting_position();
        let generated = board.legal_moves(Color::White);
        let mut ordered = generated.clone();
        order_moves(&board, &mut ordered);
        assert_eq!(ordered, generated);
    }
}
