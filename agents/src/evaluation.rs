use chess_core::{Board, Color, Piece, PieceKind};

/// Non-pawn, non-king material below which the position counts as an endgame.
pub const ENDGAME_MATERIAL: i32 = 2600;

/// Game phase, used to pick the king's piece-square table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GamePhase {
    Middlegame,
    Endgame,
}

impl GamePhase {
    /// Classifies by the summed value of every knight, bishop, rook and queen
    /// on the board, both sides together.
    pub fn of(board: &Board) -> Self {
        let material: i32 = board
            .pieces()
            .filter(|p| !matches!(p.kind, PieceKind::King | PieceKind::Pawn))
            .map(|p| p.value())
            .sum();

        if material < ENDGAME_MATERIAL {
            GamePhase::Endgame
        } else {
            GamePhase::Middlegame
        }
    }
}

/// Returns true once the heavy material has been traded down.
pub fn is_endgame(board: &Board) -> bool {
    GamePhase::of(board) == GamePhase::Endgame
}

/// Static evaluation in centipawns from `perspective`'s point of view:
/// material plus piece-square bonus for every piece, own pieces added and
/// enemy pieces subtracted. Swapping the perspective negates the score.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let phase = GamePhase::of(board);

    board
        .pieces()
        .map(|piece| {
            let value = piece.value() + piece_square_value(&piece, phase);
            if piece.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Positional bonus of a piece on its current square. Tables are laid out
/// from White's side; Black reads them with the row mirrored.
pub fn piece_square_value(piece: &Piece, phase: GamePhase) -> i32 {
    let row = match piece.color {
        Color::White => piece.square.row(),
        Color::Black => 7 - piece.square.row(),
    };
    let (row, col) = (row as usize, piece.square.col() as usize);

    let table = match piece.kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => match phase {
            GamePhase::Middlegame => &KING_MIDDLEGAME_TABLE,
            GamePhase::Endgame => &KING_ENDGAME_TABLE,
        },
    };

    table[row][col]
}

/// Anything that can be scored from one side's point of view.
pub trait Evaluatable {
    fn evaluate(&self, perspective: Color) -> i32;
}

impl Evaluatable for Board {
    fn evaluate(&self, perspective: Color) -> i32 {
        evaluate(self, perspective)
    }
}

// Piece-square tables, row 0 = rank 8 as seen by White. Values in centipawns.

const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

// Shelter behind the pawns while queens are on.
const KING_MIDDLEGAME_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

// Centralise once the board empties.
const KING_ENDGAME_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10, 0, 0, -10, -20, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 30, 40, 40, 30, -10, -30],
    [-30, -10, 20, 30, 30, 20, -10, -30],
    [-30, -30, 0, 0, 0, 0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn kings(white: &str, black: &str) -> Board {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, sq(white));
        board.place(PieceKind::King, Color::Black, sq(black));
        board
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::starting_position();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_perspective_is_antisymmetric() {
        let mut board = Board::starting_position();
        for text in ["e2e4", "d7d5", "e4d5", "g8f6", "b1c3"] {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv).unwrap();
        }

        let white = evaluate(&board, Color::White);
        assert_eq!(white, -evaluate(&board, Color::Black));
        assert!(white > 0, "White is a pawn up: {white}");
    }

    #[test]
    fn test_material_advantage() {
        // White queen against a black rook, both centralised.
        let mut board = kings("e1", "e8");
        board.place(PieceKind::Queen, Color::White, sq("e4"));
        board.place(PieceKind::Rook, Color::Black, sq("e5"));

        let eval = evaluate(&board, Color::White);
        assert!(eval > 350 && eval < 450, "eval: {eval}");
    }

    #[test]
    fn test_black_tables_are_mirrored() {
        let white = Piece::new(PieceKind::Knight, Color::White, sq("c3"));
        let black = Piece::new(PieceKind::Knight, Color::Black, sq("c6"));
        assert_eq!(
            piece_square_value(&white, GamePhase::Middlegame),
            piece_square_value(&black, GamePhase::Middlegame)
        );

        let white = Piece::new(PieceKind::Pawn, Color::White, sq("e7"));
        assert_eq!(piece_square_value(&white, GamePhase::Middlegame), 50);
        let black = Piece::new(PieceKind::Pawn, Color::Black, sq("e2"));
        assert_eq!(piece_square_value(&black, GamePhase::Middlegame), 50);
    }

    #[test]
    fn test_game_phase() {
        assert_eq!(GamePhase::of(&Board::starting_position()), GamePhase::Middlegame);
        assert!(is_endgame(&kings("e1", "e8")));

        // Two queens and a rook: 2300, still below the threshold.
        let mut board = kings("e1", "e8");
        board.place(PieceKind::Queen, Color::White, sq("d1"));
        board.place(PieceKind::Queen, Color::Black, sq("d8"));
        board.place(PieceKind::Rook, Color::White, sq("a1"));
        assert!(is_endgame(&board));

        // Adding a second rook reaches 2800.
        board.place(PieceKind::Rook, Color::Black, sq("a8"));
        assert!(!is_endgame(&board));

        // Pawns never count.
        let mut board = kings("e1", "e8");
        for col in 0..8 {
            board.place(PieceKind::Pawn, Color::White, Square::new(6, col));
        }
        assert!(is_endgame(&board));
    }

    #[test]
    fn test_king_table_follows_phase() {
        let king = Piece::new(PieceKind::King, Color::White, sq("e4"));
        assert_eq!(piece_square_value(&king, GamePhase::Middlegame), -40);
        assert_eq!(piece_square_value(&king, GamePhase::Endgame), 40);

        let corner = Piece::new(PieceKind::King, Color::White, sq("g1"));
        assert_eq!(piece_square_value(&corner, GamePhase::Middlegame), 30);
        assert_eq!(piece_square_value(&corner, GamePhase::Endgame), -30);
    }

    #[test]
    fn test_evaluatable_trait() {
        let board = kings("e1", "e8");
        assert_eq!(Evaluatable::evaluate(&board, Color::White), 0);
    }
}
