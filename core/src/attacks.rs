//! Square attack detection.
//!
//! A direct geometric scan from the target square outwards. It never calls
//! move generation, so legality filtering can use it without recursing.

use crate::board::Board;
use crate::types::*;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const STRAIGHTS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Board {
    /// Whether any piece of `by` attacks `square`, scanning outward from it.
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        if !square.is_valid() {
            return false;
        }

        self.is_pawn_attacked(square, attacker)
            || self.is_attacked_from(square, attacker, PieceKind::Knight, &KNIGHT_OFFSETS)
            || self.is_attacked_from(square, attacker, PieceKind::King, &KING_OFFSETS)
            || STRAIGHTS
                .iter()
                .any(|&(dr, dc)| self.is_attacked_along_ray(square, dr, dc, attacker, false))
            || DIAGONALS
                .iter()
                .any(|&(dr, dc)| self.is_attacked_along_ray(square, dr, dc, attacker, true))
    }

    /// Returns true if the given side's king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// Pawns attack diagonally forward, so an attacking pawn stands one row
    /// behind the target from its own point of view.
    fn is_pawn_attacked(&self, square: Square, attacker: Color) -> bool {
        let dr = -attacker.pawn_direction();
        [-1, 1].into_iter().any(|dc| {
            square
                .offset(dr, dc)
                .and_then(|from| self.piece_at(from))
                .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == attacker)
        })
    }

    fn is_attacked_from(
        &self,
        square: Square,
        attacker: Color,
        kind: PieceKind,
        offsets: &[(i8, i8)],
    ) -> bool {
        offsets.iter().any(|&(dr, dc)| {
            square
                .offset(dr, dc)
                .and_then(|from| self.piece_at(from))
                .is_some_and(|p| p.kind == kind && p.color == attacker)
        })
    }

    /// Walks a ray until the first occupied square.
    fn is_attacked_along_ray(
        &self,
        square: Square,
        dr: i8,
        dc: i8,
        attacker: Color,
        diagonal: bool,
    ) -> bool {
        let mut current = square;

        while let Some(next) = current.offset(dr, dc) {
            current = next;

            if let Some(piece) = self.piece_at(current) {
                if piece.color != attacker {
                    return false;
                }
                return match piece.kind {
                    PieceKind::Queen => true,
                    PieceKind::Bishop => diagonal,
                    PieceKind::Rook => !diagonal,
                    _ => false,
                };
            }
        }

        false
    }
}
