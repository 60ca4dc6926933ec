use crate::error::ChessError;
use std::fmt;
use std::str::FromStr;

/// Side of a piece or of the player to move.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the row holding this color's pieces at the start of the game.
    pub const fn back_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Returns the starting row for pawns of this color.
    pub const fn pawn_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Returns the promotion row for pawns of this color.
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Returns the row direction pawns of this color move in.
    /// White starts on row 7 and advances towards row 0.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// The six kinds of chess pieces.
/// The set is closed, so every per-kind rule is an exhaustive `match`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the material value of this piece kind in centipawns.
    /// The king's value is a sentinel that only cancels out between sides.
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20_000,
        }
    }

    /// Returns true for knights and bishops.
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }

    /// Lowercase letter used in coordinate notation (`e7e8q`).
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'k' | 'K' => Some(PieceKind::King),
            'q' | 'Q' => Some(PieceKind::Queen),
            'r' | 'R' => Some(PieceKind::Rook),
            'b' | 'B' => Some(PieceKind::Bishop),
            'n' | 'N' => Some(PieceKind::Knight),
            'p' | 'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Board coordinate.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's (rank 1);
/// column 0 is the a-file. Coordinates are signed so that the off-board
/// sentinel [`Square::NONE`] can be represented; every board query treats
/// an invalid square as empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSquare"))]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    /// The off-board sentinel (-1, -1).
    pub const NONE: Square = Square { row: -1, col: -1 };

    /// Creates a square from row and column. The result may be off the board;
    /// check with [`Square::is_valid`].
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    /// Creates a square only if both coordinates are in range.
    pub const fn checked(row: i8, col: i8) -> Option<Self> {
        let square = Square { row, col };
        if square.is_valid() {
            Some(square)
        } else {
            None
        }
    }

    /// Returns true if both coordinates are in [0, 7].
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    pub const fn row(self) -> i8 {
        self.row
    }

    pub const fn col(self) -> i8 {
        self.col
    }

    /// Returns the square displaced by (dr, dc), if it is on the board.
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        match (self.row.checked_add(dr), self.col.checked_add(dc)) {
            (Some(row), Some(col)) => Square::checked(row, col),
            _ => None,
        }
    }
}

/// Wire form of a [`Square`]; only board squares and the sentinel are accepted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSquare {
    row: i8,
    col: i8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSquare> for Square {
    type Error = ChessError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        let square = Square::new(raw.row, raw.col);
        if square.is_valid() || square == Square::NONE {
            Ok(square)
        } else {
            Err(ChessError::InvalidSquare(format!("({}, {})", raw.row, raw.col)))
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("-");
        }
        let file = (b'a' + self.col as u8) as char;
        let rank = (b'8' - self.row as u8) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessError;

    /// Parses algebraic coordinates such as `e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidSquare(s.to_string());
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(invalid()),
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        let col = (file as u8 - b'a') as i8;
        let row = (b'8' - rank as u8) as i8;
        Ok(Square::new(row, col))
    }
}

/// A chess piece.
/// Kind and color never change; square and moved flag follow the piece.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    /// Creates an unmoved piece standing on `square`.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Unicode chess figurine.
    pub const fn symbol(&self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, Color::White) => '♔',
            (PieceKind::Queen, Color::White) => '♕',
            (PieceKind::Rook, Color::White) => '♖',
            (PieceKind::Bishop, Color::White) => '♗',
            (PieceKind::Knight, Color::White) => '♘',
            (PieceKind::Pawn, Color::White) => '♙',
            (PieceKind::King, Color::Black) => '♚',
            (PieceKind::Queen, Color::Black) => '♛',
            (PieceKind::Rook, Color::Black) => '♜',
            (PieceKind::Bishop, Color::Black) => '♝',
            (PieceKind::Knight, Color::Black) => '♞',
            (PieceKind::Pawn, Color::Black) => '♟',
        }
    }
}

/// Kingside and queenside rights of one color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideCastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl SideCastlingRights {
    /// Creates new castling rights with both wings available.
    pub const fn both() -> Self {
        Self {
            kingside: true,
            queenside: true,
        }
    }

    /// No rights on either wing.
    pub const fn none() -> Self {
        Self {
            kingside: false,
            queenside: false,
        }
    }

    /// Either wing still castleable.
    pub const fn any(self) -> bool {
        self.kingside || self.queenside
    }
}

/// Rights of both colors; they only ever get cleared.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights {
    pub white: SideCastlingRights,
    pub black: SideCastlingRights,
}

impl CastlingRights {
    /// Both wings, both colors.
    pub const fn all() -> Self {
        Self {
            white: SideCastlingRights::both(),
            black: SideCastlingRights::both(),
        }
    }

    /// No rights for either color.
    pub const fn none() -> Self {
        Self {
            white: SideCastlingRights::none(),
            black: SideCastlingRights::none(),
        }
    }

    /// Rights of `color`.
    pub const fn get(self, color: Color) -> SideCastlingRights {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    fn side_mut(&mut self, color: Color) -> &mut SideCastlingRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Clears the rights affected by `mover` travelling `from` -> `to`.
    pub fn update_after_move(&mut self, mover: Piece, from: Square, to: Square) {
        match mover.kind {
            PieceKind::King => *self.side_mut(mover.color) = SideCastlingRights::none(),
            PieceKind::Rook => self.clear_corner(mover.color, from),
            _ => {}
        }

        // Anything landing on a rook's home square removes that rook.
        for color in [Color::White, Color::Black] {
            self.clear_corner(color, to);
        }
    }

    fn clear_corner(&mut self, color: Color, square: Square) {
        if square.row() != color.back_row() {
            return;
        }
        let rights = self.side_mut(color);
        match square.col() {
            0 => rights.queenside = false,
            7 => rights.kingside = false,
            _ => {}
        }
    }
}

/// Classifies a move at generation time.
/// Move application and legality checks key their special cases off this tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    Normal,
    Capture,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
    Promotion,
    PromotionCapture,
}

/// From/to squares plus kind; `promotion` matters only for promotion kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// Only meaningful for promotion kinds.
    pub promotion: PieceKind,
}

impl Move {
    /// "No move". Returned by the search when the side to move has no legal move.
    pub const INVALID: Move = Move {
        from: Square::NONE,
        to: Square::NONE,
        kind: MoveKind::Normal,
        promotion: PieceKind::Queen,
    };

    /// Creates a move of the given kind.
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            kind,
            promotion: PieceKind::Queen,
        }
    }

    /// Creates a promotion move; `capture` selects `PromotionCapture`.
    pub const fn new_promotion(from: Square, to: Square, promotion: PieceKind, capture: bool) -> Self {
        Self {
            from,
            to,
            kind: if capture {
                MoveKind::PromotionCapture
            } else {
                MoveKind::Promotion
            },
            promotion,
        }
    }

    /// Returns true if both squares are on the board.
    pub const fn is_valid(self) -> bool {
        self.from.is_valid() && self.to.is_valid()
    }

    pub const fn is_capture(self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture
        )
    }

    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion | MoveKind::PromotionCapture)
    }

    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    /// The promotion target, present only for promotion moves.
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        if self.is_promotion() {
            Some(self.promotion)
        } else {
            None
        }
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::INVALID
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion_kind() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent().opponent(), Color::White);
    }

    #[test]
    fn test_square_notation() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!((e4.row(), e4.col()), (4, 4));
        assert_eq!(e4.to_string(), "e4");

        let a8: Square = "a8".parse().unwrap();
        assert_eq!((a8.row(), a8.col()), (0, 0));
        let h1: Square = "h1".parse().unwrap();
        assert_eq!((h1.row(), h1.col()), (7, 7));

        assert!("i1".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0, 0).is_valid());
        assert!(!Square::new(8, 0).is_valid());
        assert!(!Square::new(0, -1).is_valid());
        assert!(!Square::NONE.is_valid());
        assert_eq!(Square::new(0, 0).offset(-1, 0), None);
        assert_eq!(Square::new(3, 3).offset(1, -1), Some(Square::new(4, 2)));
        assert_eq!(Square::new(i8::MAX, 0).offset(1, 0), None);
        assert_eq!(Square::new(0, i8::MIN).offset(0, -1), None);
    }

    #[test]
    fn test_invalid_move_sentinel() {
        assert!(!Move::INVALID.is_valid());
        assert_eq!(Move::default(), Move::INVALID);
        let real = Move::new(Square::new(6, 4), Square::new(4, 4), MoveKind::DoublePawnPush);
        assert!(real.is_valid());
        assert_ne!(real, Move::INVALID);
        assert_eq!(Move::INVALID.to_string(), "0000");
    }

    #[test]
    fn test_move_notation() {
        let push = Move::new(Square::new(6, 4), Square::new(4, 4), MoveKind::DoublePawnPush);
        assert_eq!(push.to_string(), "e2e4");
        assert_eq!(push.promotion_kind(), None);

        let promo = Move::new_promotion(Square::new(1, 0), Square::new(0, 1), PieceKind::Knight, true);
        assert_eq!(promo.kind, MoveKind::PromotionCapture);
        assert!(promo.is_capture());
        assert_eq!(promo.to_string(), "a7b8n");
    }

    #[test]
    fn test_castling_rights_updates() {
        let mut rights = CastlingRights::all();
        let rook = Piece::new(PieceKind::Rook, Color::White, Square::new(7, 7));
        rights.update_after_move(rook, Square::new(7, 7), Square::new(5, 7));
        assert!(!rights.white.kingside);
        assert!(rights.white.queenside);
        assert_eq!(rights.black, SideCastlingRights::both());

        // A capture landing on a8 removes Black's queenside right.
        let bishop = Piece::new(PieceKind::Bishop, Color::White, Square::new(1, 1));
        rights.update_after_move(bishop, Square::new(1, 1), Square::new(0, 0));
        assert!(!rights.black.queenside);
        assert!(rights.black.kingside);

        let king = Piece::new(PieceKind::King, Color::Black, Square::new(0, 4));
        rights.update_after_move(king, Square::new(0, 4), Square::new(1, 4));
        assert!(!rights.black.any());
    }
}
