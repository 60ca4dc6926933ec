//! Move-path enumeration for validating the generator against known counts.

use crate::board::Board;
use crate::types::{Move, MoveKind};
use std::ops::AddAssign;

/// Leaf counts of a perft run, split by the kind of the final move.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl AddAssign for PerftResults {
    fn add_assign(&mut self, child: Self) {
        let PerftResults {
            nodes,
            captures,
            en_passants,
            castles,
            promotions,
            checks,
            checkmates,
        } = child;
        self.nodes += nodes;
        self.captures += captures;
        self.en_passants += en_passants;
        self.castles += castles;
        self.promotions += promotions;
        self.checks += checks;
        self.checkmates += checkmates;
    }
}

/// Plays `mv` on a copy of `board`.
fn child(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    // Moves come from the legal generator, so the origin is always occupied.
    let _ = next.make_move(mv);
    next
}

/// Counts leaf nodes of the legal move tree for the side to move.
pub fn perft(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves(board.current_turn());

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft(&child(board, mv), depth - 1))
        .sum()
}

/// Node count below each root move.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    board
        .legal_moves(board.current_turn())
        .into_iter()
        .map(|mv| {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(&child(board, mv), depth - 1)
            };
            (mv, nodes)
        })
        .collect()
}

/// Performs perft with a breakdown of the leaf moves by kind.
pub fn perft_detailed(board: &Board, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();
    if depth == 0 {
        return PerftResults {
            nodes: 1,
            ..results
        };
    }

    for mv in board.legal_moves(board.current_turn()) {
        let next = child(board, mv);

        if depth > 1 {
            results += perft_detailed(&next, depth - 1);
            continue;
        }

        results.nodes += 1;
        if mv.is_capture() {
            results.captures += 1;
        }
        match mv.kind {
            MoveKind::EnPassant => results.en_passants += 1,
            MoveKind::CastleKingside | MoveKind::CastleQueenside => results.castles += 1,
            MoveKind::Promotion | MoveKind::PromotionCapture => results.promotions += 1,
            _ => {}
        }

        let side = next.current_turn();
        if next.is_in_check(side) {
            results.checks += 1;
            if next.legal_moves(side).is_empty() {
                results.checkmates += 1;
            }
        }
    }

    results
}

/// Reference positions with their published leaf counts, as `(depth, nodes)`.
pub mod positions {
    use crate::board::Board;
    use crate::types::{Color, PieceKind, Square};

    pub const STARTING_POSITION: &[(u8, u64)] = &[
        (1, 20),
        (2, 400),
        (3, 8902),
        (4, 197_281),
        (5, 4_865_609),
    ];

    /// Position 3 from CPW: `8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1`.
    pub const POSITION_3_PERFT: &[(u8, u64)] = &[
        (1, 14),
        (2, 191),
        (3, 2812),
        (4, 43_238),
        (5, 674_624),
    ];

    /// Builds position 3: rook and pawn endgame, White to move, no castling.
    pub fn position_3() -> Board {
        let mut board = Board::empty();
        let pieces = [
            (PieceKind::Pawn, Color::Black, 1, 2),   // c7
            (PieceKind::Pawn, Color::Black, 2, 3),   // d6
            (PieceKind::King, Color::White, 3, 0),   // a5
            (PieceKind::Pawn, Color::White, 3, 1),   // b5
            (PieceKind::Rook, Color::Black, 3, 7),   // h5
            (PieceKind::Rook, Color::White, 4, 1),   // b4
            (PieceKind::Pawn, Color::Black, 4, 5),   // f4
            (PieceKind::King, Color::Black, 4, 7),   // h4
            (PieceKind::Pawn, Color::White, 6, 4),   // e2
            (PieceKind::Pawn, Color::White, 6, 6),   // g2
        ];
        for (kind, color, row, col) in pieces {
            board.place(kind, color, Square::new(row, col));
        }
        board
    }
}
