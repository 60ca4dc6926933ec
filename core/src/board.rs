//! Board representation: the 8×8 position plus the state needed by the rules.
//! Pieces are stored by value, so cloning a board is a flat copy and a clone
//! never shares state with its original.

use crate::error::{ChessError, ChessResult};
use crate::types::*;
use std::fmt;
use tracing::trace;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Complete position: pieces, side to move, castling rights, king cache and
/// the last move played (the only input to en-passant eligibility).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    /// Indexed `[row][col]`.
    squares: [[Option<Piece>; 8]; 8],
    turn: Color,
    castling: CastlingRights,
    /// King square per color, indexed by `Color::index()`.
    kings: [Square; 2],
    last_move: Move,
}

impl Board {
    /// Creates an empty board: no pieces, no castling rights, White to move.
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            turn: Color::White,
            castling: CastlingRights::none(),
            kings: [Square::NONE; 2],
            last_move: Move::INVALID,
        }
    }

    /// Board with both armies on their home ranks, White to move.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    /// Resets to the standard starting array: all castling rights, White to move.
    pub fn setup_initial_position(&mut self) {
        *self = Self::empty();

        for (col, kind) in (0..8).zip(BACK_RANK) {
            for color in [Color::White, Color::Black] {
                self.place(kind, color, Square::new(color.back_row(), col));
                self.place(PieceKind::Pawn, color, Square::new(color.pawn_row(), col));
            }
        }

        self.castling = CastlingRights::all();
    }

    /// Gets the piece at the given square. Off-board squares are empty.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        self.squares[square.row() as usize][square.col() as usize]
    }

    fn slot(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.squares[square.row() as usize][square.col() as usize]
    }

    /// Puts a fresh, unmoved piece on `square`, replacing whatever was there.
    ///
    /// This is a position-setup hook for tests and state restoration; it
    /// keeps the king cache current but leaves turn and castling rights alone.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) {
        if !square.is_valid() {
            return;
        }
        if let Some(old) = self.slot(square).replace(Piece::new(kind, color, square)) {
            self.forget_king(old, square);
        }
        if kind == PieceKind::King {
            self.kings[color.index()] = square;
        }
    }

    /// Removes the piece on `square`, returning it.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        let removed = self.slot(square).take();
        if let Some(piece) = removed {
            self.forget_king(piece, square);
        }
        removed
    }

    /// Clears the king cache when `piece` was that side's king on `square`.
    fn forget_king(&mut self, piece: Piece, square: Square) {
        let cached = &mut self.kings[piece.color.index()];
        if piece.kind == PieceKind::King && *cached == square {
            *cached = Square::NONE;
        }
    }

    /// Overrides the side to move (position setup only).
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    /// Overrides the castling rights (position setup only).
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    /// Whose turn it is.
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castling.get(color).kingside
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castling.get(color).queenside
    }

    /// The most recently applied move, or `Move::INVALID` on a fresh board.
    pub fn last_move(&self) -> Move {
        self.last_move
    }

    /// Cached king square; `Square::NONE` if that side has no king.
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Returns true if the given square is empty (or off the board).
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Occupied by the opponent of `color`.
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color != color)
    }

    /// Occupied by a piece of `color`.
    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    /// All pieces, row by row from row 0.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().flatten().copied()
    }

    pub fn count_pieces(&self, color: Color) -> usize {
        self.pieces().filter(|p| p.color == color).count()
    }

    /// Summed material of one side, king sentinel included.
    pub fn material_value(&self, color: Color) -> i32 {
        self.pieces()
            .filter(|p| p.color == color)
            .map(|p| p.value())
            .sum()
    }

    /// Can a pawn on `pawn` capture en passant towards `target_col`?
    ///
    /// Only if the last move was a double pawn push that landed beside the
    /// pawn, on the same row, in `target_col`.
    pub fn can_en_passant(&self, pawn: Square, target_col: i8) -> bool {
        let last = self.last_move;
        if !last.is_valid() || last.kind != MoveKind::DoublePawnPush {
            return false;
        }
        if !self
            .piece_at(last.to)
            .is_some_and(|p| p.kind == PieceKind::Pawn)
        {
            return false;
        }

        last.to.col() == target_col
            && last.to.row() == pawn.row()
            && (last.to.col() - pawn.col()).abs() == 1
    }

    /// Applies a move. This does NOT check if the move is legal: callers pass
    /// moves produced by [`Board::legal_moves`].
    ///
    /// Fails only if the origin holds no piece (or either square is off the
    /// board), in which case the board is unchanged.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        let Some(mut piece) = self.piece_at(mv.from) else {
            trace!(%mv, "no piece at origin");
            return Err(ChessError::EmptySquare(mv.from));
        };
        if !mv.to.is_valid() {
            trace!(%mv, "destination off the board");
            return Err(ChessError::OffBoard(mv.to));
        }
        let color = piece.color;

        match mv.kind {
            MoveKind::EnPassant => {
                // The captured pawn sits behind the destination.
                let victim = Square::new(mv.to.row() - color.pawn_direction(), mv.to.col());
                self.remove_piece(victim);
            }
            MoveKind::CastleKingside => self.relocate_rook(mv.from.row(), 7, 5),
            MoveKind::CastleQueenside => self.relocate_rook(mv.from.row(), 0, 3),
            _ => {}
        }

        *self.slot(mv.from) = None;
        piece.square = mv.to;
        piece.has_moved = true;

        let placed = match mv.promotion_kind() {
            Some(kind) => Piece {
                kind: promotion_target(kind),
                color,
                square: mv.to,
                has_moved: true,
            },
            None => piece,
        };
        // Overwriting the destination captures whatever stood there.
        *self.slot(mv.to) = Some(placed);

        if piece.kind == PieceKind::King {
            self.kings[color.index()] = mv.to;
        }

        self.castling.update_after_move(piece, mv.from, mv.to);
        self.last_move = mv;
        self.turn = self.turn.opponent();

        Ok(())
    }

    fn relocate_rook(&mut self, row: i8, from_col: i8, to_col: i8) {
        let to = Square::new(row, to_col);
        if let Some(mut rook) = self.remove_piece(Square::new(row, from_col)) {
            rook.square = to;
            rook.has_moved = true;
            *self.slot(to) = Some(rook);
        }
    }
}

/// Kings and pawns are not promotion targets; fall back to a queen.
fn promotion_target(kind: PieceKind) -> PieceKind {
    match kind {
        PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight => kind,
        PieceKind::King | PieceKind::Pawn => PieceKind::Queen,
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(piece) => write!(f, "{} ", piece.symbol())?,
                    None => f.write_str(". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
