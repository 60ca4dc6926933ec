use crate::evaluation::evaluate;
use crate::ordering::order_moves;
use chess_core::{Board, Color, Move};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

pub const INFINITY: i32 = 1_000_000;
pub const CHECKMATE_SCORE: i32 = 100_000;

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move, or `Move::INVALID` when the side has no legal move.
    pub best_move: Move,
    /// Score of the chosen move from the searching side's point of view.
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    /// Every root move that reached `score`; `best_move` is drawn from these.
    pub candidates: Vec<Move>,
}

impl SearchResult {
    /// Returns true if the score is a forced mate for either side.
    pub fn is_mate(&self) -> bool {
        self.score.abs() >= CHECKMATE_SCORE - i32::from(self.depth)
    }
}

struct Searcher {
    side: Color,
    root_depth: u8,
    nodes: u64,
}

impl Searcher {
    /// Fixed-depth minimax with alpha-beta pruning. The maximizing player is
    /// always `self.side`; scores are from its point of view.
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        let color = if maximizing {
            self.side
        } else {
            self.side.opponent()
        };
        let mut moves = board.legal_moves(color);

        if moves.is_empty() {
            if !board.is_in_check(color) {
                return 0;
            }
            // Shallower mates score further from zero.
            let ply = i32::from(self.root_depth - depth);
            return if maximizing {
                -CHECKMATE_SCORE + ply
            } else {
                CHECKMATE_SCORE - ply
            };
        }

        if board.is_draw() {
            return 0;
        }

        if depth == 0 {
            return evaluate(board, self.side);
        }

        order_moves(board, &mut moves);

        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                let score = self.minimax(&child(board, mv), depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let score = self.minimax(&child(board, mv), depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

fn child(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();
    // Legal moves always have a piece on their origin.
    let _ = next.make_move(mv);
    next
}

/// Searches `depth` plies for `side` and picks uniformly among the root moves
/// that share the best score. A depth of 0 is treated as 1.
///
/// Each root move gets an exact score from its own full-window search, so
/// the tied set is the same no matter how the moves were ordered.
pub fn search<R: Rng + ?Sized>(board: &Board, side: Color, depth: u8, rng: &mut R) -> SearchResult {
    let depth = depth.max(1);
    let mut searcher = Searcher {
        side,
        root_depth: depth,
        nodes: 0,
    };

    let mut moves = board.legal_moves(side);
    if moves.is_empty() {
        let score = if board.is_in_check(side) {
            -CHECKMATE_SCORE
        } else {
            0
        };
        debug!(%side, depth, score, "no legal moves");
        return SearchResult {
            best_move: Move::INVALID,
            score,
            depth,
            nodes: 0,
            candidates: Vec::new(),
        };
    }

    order_moves(board, &mut moves);

    let scored: Vec<(Move, i32)> = moves
        .into_iter()
        .map(|mv| {
            let score = searcher.minimax(&child(board, mv), depth - 1, -INFINITY, INFINITY, false);
            trace!(%mv, score, "root move");
            (mv, score)
        })
        .collect();

    let score = scored
        .iter()
        .map(|&(_, score)| score)
        .max()
        .unwrap_or(-INFINITY);
    let candidates: Vec<Move> = scored
        .iter()
        .filter(|&&(_, s)| s == score)
        .map(|&(mv, _)| mv)
        .collect();
    let best_move = candidates.choose(rng).copied().unwrap_or(Move::INVALID);

    debug!(
        %side,
        depth,
        nodes = searcher.nodes,
        score,
        candidates = candidates.len(),
        best = %best_move,
        "search complete"
    );

    SearchResult {
        best_move,
        score,
        depth,
        nodes: searcher.nodes,
        candidates,
    }
}
