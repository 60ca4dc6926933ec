use crate::attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, STRAIGHTS};
use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::types::{Color, Move, MoveKind, Piece, PieceKind, Square};

const ALL_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

impl Piece {
    /// Generates the pseudo-legal moves of this piece: movement geometry and
    /// occupancy are respected, king safety is not checked.
    pub fn pseudo_legal_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        self.generate_moves(board, &mut moves);
        moves
    }

    fn generate_moves(&self, board: &Board, moves: &mut Vec<Move>) {
        match self.kind {
            PieceKind::Pawn => generate_pawn_moves(board, self, moves),
            PieceKind::Knight => generate_step_moves(board, self, &KNIGHT_OFFSETS, moves),
            PieceKind::Bishop => generate_sliding_moves(board, self, &DIAGONALS, moves),
            PieceKind::Rook => generate_sliding_moves(board, self, &STRAIGHTS, moves),
            PieceKind::Queen => generate_sliding_moves(board, self, &ALL_DIRECTIONS, moves),
            PieceKind::King => {
                generate_step_moves(board, self, &KING_OFFSETS, moves);
                generate_castling_moves(board, self, moves);
            }
        }
    }
}

impl Board {
    /// Generates all pseudo-legal moves for `color`, scanning the board row by row.
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces().filter(|p| p.color == color) {
            piece.generate_moves(self, &mut moves);
        }
        moves
    }

    /// Generates all legal moves for `color`.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.pseudo_legal_moves(color)
            .into_iter()
            .filter(|&mv| self.is_legal(mv, color))
            .collect()
    }

    /// Legal moves of the piece on `square`, in generation order.
    /// Empty for an empty or off-board square.
    pub fn legal_moves_for_piece(&self, square: Square) -> Vec<Move> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };
        piece
            .pseudo_legal_moves(self)
            .into_iter()
            .filter(|&mv| self.is_legal(mv, piece.color))
            .collect()
    }

    /// Plays `mv` on a scratch copy and checks the mover's king is safe.
    /// Castling additionally needs the king's square, the square it crosses
    /// and its destination to be unattacked.
    fn is_legal(&self, mv: Move, color: Color) -> bool {
        let step = match mv.kind {
            MoveKind::CastleKingside => Some(1),
            MoveKind::CastleQueenside => Some(-1),
            _ => None,
        };
        if let Some(step) = step {
            let enemy = color.opponent();
            let crossed = (0..3).any(|i| {
                let square = Square::new(mv.from.row(), mv.from.col() + step * i);
                self.is_square_attacked(square, enemy)
            });
            if crossed {
                return false;
            }
        }

        let mut scratch = self.clone();
        scratch.make_move(mv).is_ok() && !scratch.is_in_check(color)
    }

    /// Checks if `color` is checkmated.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Checks if `color` is stalemated.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Resolves coordinate notation (`e2e4`, `e7e8q`) against the legal moves
    /// of the side to move. A missing promotion letter selects a queen.
    pub fn parse_move(&self, text: &str) -> ChessResult<Move> {
        let invalid = || ChessError::InvalidMove(text.to_string());
        let from: Square = text.get(0..2).ok_or_else(invalid)?.parse()?;
        let to: Square = text.get(2..4).ok_or_else(invalid)?.parse()?;
        let promotion = match text.get(4..) {
            Some("") | None => None,
            Some(rest) => {
                let mut chars = rest.chars();
                match (chars.next().and_then(PieceKind::from_char), chars.next()) {
                    (Some(kind), None) => Some(kind),
                    _ => return Err(invalid()),
                }
            }
        };

        if !self.is_friendly(from, self.current_turn()) {
            return Err(ChessError::IllegalMove(text.to_string()));
        }

        self.legal_moves_for_piece(from)
            .into_iter()
            .find(|mv| {
                mv.to == to
                    && mv.promotion_kind().map_or(promotion.is_none(), |kind| {
                        kind == promotion.unwrap_or(PieceKind::Queen)
                    })
            })
            .ok_or_else(|| ChessError::IllegalMove(text.to_string()))
    }
}

fn push_promotions(from: Square, to: Square, capture: bool, moves: &mut Vec<Move>) {
    for kind in PieceKind::PROMOTIONS {
        moves.push(Move::new_promotion(from, to, kind, capture));
    }
}

/// Pawn pushes, captures, en passant and promotions.
fn generate_pawn_moves(board: &Board, pawn: &Piece, moves: &mut Vec<Move>) {
    let from = pawn.square;
    let color = pawn.color;
    let direction = color.pawn_direction();
    let promotion_row = color.promotion_row();

    // Single push, then double push from the starting row
    if let Some(one) = from.offset(direction, 0) {
        if board.is_empty(one) {
            if one.row() == promotion_row {
                push_promotions(from, one, false, moves);
            } else {
                moves.push(Move::new(from, one, MoveKind::Normal));

                if from.row() == color.pawn_row() {
                    if let Some(two) = one.offset(direction, 0) {
                        if board.is_empty(two) {
                            moves.push(Move::new(from, two, MoveKind::DoublePawnPush));
                        }
                    }
                }
            }
        }
    }

    // Diagonal captures and en passant
    for dc in [-1, 1] {
        let Some(target) = from.offset(direction, dc) else {
            continue;
        };

        if board.is_enemy(target, color) {
            if target.row() == promotion_row {
                push_promotions(from, target, true, moves);
            } else {
                moves.push(Move::new(from, target, MoveKind::Capture));
            }
        }

        if board.can_en_passant(from, target.col()) {
            moves.push(Move::new(from, target, MoveKind::EnPassant));
        }
    }
}

/// Knight and king single steps.
fn generate_step_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(dr, dc) in offsets {
        let Some(to) = piece.square.offset(dr, dc) else {
            continue;
        };
        if board.is_empty(to) {
            moves.push(Move::new(piece.square, to, MoveKind::Normal));
        } else if board.is_enemy(to, piece.color) {
            moves.push(Move::new(piece.square, to, MoveKind::Capture));
        }
    }
}

/// Walks each ray until the edge, stopping on (and including) a capture.
fn generate_sliding_moves(
    board: &Board,
    piece: &Piece,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut current = piece.square;

        while let Some(to) = current.offset(dr, dc) {
            current = to;

            if board.is_empty(to) {
                moves.push(Move::new(piece.square, to, MoveKind::Normal));
            } else {
                if board.is_enemy(to, piece.color) {
                    moves.push(Move::new(piece.square, to, MoveKind::Capture));
                }
                break; // Can't move past any piece
            }
        }
    }
}

/// Castling candidates. Attack safety is left to the legality filter.
fn generate_castling_moves(board: &Board, king: &Piece, moves: &mut Vec<Move>) {
    let color = king.color;
    let home = color.back_row();
    if king.has_moved || king.square != Square::new(home, 4) {
        return;
    }

    let unmoved_rook = |col: i8| {
        board.piece_at(Square::new(home, col)).is_some_and(|p| {
            p.kind == PieceKind::Rook && p.color == color && !p.has_moved
        })
    };
    let clear = |cols: &[i8]| cols.iter().all(|&col| board.is_empty(Square::new(home, col)));

    if board.can_castle_kingside(color) && unmoved_rook(7) && clear(&[5, 6]) {
        moves.push(Move::new(
            king.square,
            Square::new(home, 6),
            MoveKind::CastleKingside,
        ));
    }

    if board.can_castle_queenside(color) && unmoved_rook(0) && clear(&[1, 2, 3]) {
        moves.push(Move::new(
            king.square,
            Square::new(home, 2),
            MoveKind::CastleQueenside,
        ));
    }
}
