pub mod evaluation;
pub mod minimax;
pub mod ordering;
pub mod search;

use chess_core::{Board, Move};

/// Search depth used when none is configured.
pub const DEFAULT_DEPTH: u8 = 4;

/// Anything that can pick a move for a position.
pub trait Agent {
    /// Get the best move for the agent's side, `None` if it has no legal move
    fn best_move(&mut self, board: &Board) -> Option<Move>;

    /// Display name, used in logs.
    fn name(&self) -> &str;
}

pub use evaluation::{evaluate, is_endgame, Evaluatable, GamePhase};
pub use minimax::MinimaxAgent;
pub use ordering::order_moves;
pub use search::{search, SearchResult};
