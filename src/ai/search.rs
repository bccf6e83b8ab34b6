use crate::board::Board;
use crate::types::{Color, Move};

/// Deepest ply that still enumerates moves; the next ply scores 0.
/// With 5 the search looks 6 plies ahead.
pub const DEFAULT_MAX_DEPTH: u8 = 5;

/// Largest ply limit accepted from a [`GameConfig`](crate::config::GameConfig).
/// The search has no pruning, so each extra ply multiplies the node count.
pub const MAX_SEARCH_DEPTH: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Move,
    /// Own flips minus the best reply value, summed down the line.
    pub score: i32,
}

impl SearchResult {
    const PASS: Self = Self {
        mv: Move::Pass,
        score: 0,
    };
}

/// Differential search: each move is worth the pieces it turns over minus
/// what the opponent's best continuation is worth.
///
/// A side without a legal move scores a flat 0 at that ply and the line is
/// not explored further, even if the other side could still move.
pub struct Searcher {
    max_depth: u8,
    nodes: u64,
}

impl Searcher {
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth,
            nodes: 0,
        }
    }

    /// Searches the best move for `color`. Returns `Move::Pass` with score 0
    /// when `color` has no legal move.
    pub fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        self.nodes = 0;
        self.best_move(board, color, 0)
    }

    /// Positions expanded by the last [`Searcher::search`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn best_move(&mut self, board: &Board, color: Color, depth: u8) -> SearchResult {
        if depth > self.max_depth {
            return SearchResult::PASS;
        }
        self.nodes += 1;

        let mut best: Option<SearchResult> = None;
        for candidate in board.legal_moves(color) {
            let mut next = *board;
            next.place(candidate.x, candidate.y, color);
            let reply = self.best_move(&next, color.opponent(), depth + 1);
            let score = candidate.score - reply.score;

            // Strictly greater: the earliest candidate in enumeration order wins ties.
            if best.is_none_or(|b| score > b.score) {
                best = Some(SearchResult {
                    mv: candidate.to_move(),
                    score,
                });
            }
        }

        best.unwrap_or(SearchResult::PASS)
    }
}
