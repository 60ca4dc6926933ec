//! Game-over classification.

use crate::board::Board;
use crate::types::{Color, PieceKind};

/// Outcome of the position for the side to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// The game continues.
    Ongoing { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
    /// Insufficient material.
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing { .. })
    }
}

impl Board {
    /// Insufficient material, simplified: bare kings, or a king and a single
    /// minor piece against a bare king. Other drawn endings (two knights,
    /// repetition, fifty moves) are not detected.
    pub fn is_draw(&self) -> bool {
        let white = self.count_material(Color::White);
        let black = self.count_material(Color::Black);

        // bare kings
        if white.is_bare_king() && black.is_bare_king() {
            return true;
        }

        // a lone bishop or knight cannot mate
        (white.is_king_and_minor() && black.is_bare_king())
            || (black.is_king_and_minor() && white.is_bare_king())
    }

    /// Classifies the position for the side to move.
    pub fn status(&self) -> GameStatus {
        let color = self.current_turn();
        let in_check = self.is_in_check(color);

        if self.legal_moves(color).is_empty() {
            return if in_check {
                GameStatus::Checkmate {
                    winner: color.opponent(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        if self.is_draw() {
            return GameStatus::Draw;
        }

        GameStatus::Ongoing { in_check }
    }

    fn count_material(&self, color: Color) -> MaterialCount {
        let mut count = MaterialCount::default();

        for piece in self.pieces().filter(|p| p.color == color) {
            match piece.kind {
                PieceKind::King => {}
                kind if kind.is_minor() => {
                    count.minors += 1;
                    count.others += 1;
                }
                _ => count.others += 1,
            }
        }

        count
    }
}

/// Non-king material of one side.
#[derive(Default, Debug)]
struct MaterialCount {
    minors: u8,
    /// Every non-king piece, minors included.
    others: u8,
}

impl MaterialCount {
    fn is_bare_king(&self) -> bool {
        self.others == 0
    }

    fn is_king_and_minor(&self) -> bool {
        self.others == 1 && self.minors == 1
    }
}
