use crate::search::{search, SearchResult};
use crate::{Agent, DEFAULT_DEPTH};
use chess_core::{Board, Color, Move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-depth alpha-beta player for one side. Ties between equally scored
/// moves are broken with the agent's own random source.
pub struct MinimaxAgent<R = StdRng> {
    name: String,
    side: Color,
    depth: u8,
    rng: R,
}

impl MinimaxAgent<StdRng> {
    /// Creates an agent whose tie-breaks are seeded from OS entropy.
    pub fn new(side: Color, depth: u8) -> Self {
        Self::with_rng(side, depth, StdRng::from_entropy())
    }

    /// Creates an agent with reproducible tie-breaks.
    pub fn seeded(side: Color, depth: u8, seed: u64) -> Self {
        Self::with_rng(side, depth, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MinimaxAgent<R> {
    pub fn with_rng(side: Color, depth: u8, rng: R) -> Self {
        let depth = depth.max(1);
        MinimaxAgent {
            name: agent_name(depth),
            side,
            depth,
            rng,
        }
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Changes the search depth. Depths below 1 are raised to 1.
    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth.max(1);
        self.name = agent_name(self.depth);
    }

    /// Runs a full search for this agent's side.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        search(board, self.side, self.depth, &mut self.rng)
    }

    /// Best move for this agent's side, or `Move::INVALID` if it has none.
    pub fn get_best_move(&mut self, board: &Board) -> Move {
        self.search(board).best_move
    }
}

fn agent_name(depth: u8) -> String {
    format!("Minimax(depth={})", depth)
}

impl Default for MinimaxAgent<StdRng> {
    fn default() -> Self {
        Self::new(Color::Black, DEFAULT_DEPTH)
    }
}

impl<R: Rng> Agent for MinimaxAgent<R> {
    fn best_move(&mut self, board: &Board) -> Option<Move> {
        let mv = self.get_best_move(board);
        mv.is_valid().then_some(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
