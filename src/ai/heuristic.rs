//! The three shallow tiers: random, greedy and one-ply differential.
//!
//! Each takes the candidate list in enumeration order
//! (last-discovered-first); ties are broken by drawing an index over the
//! tied subset and walking the list to it.

use rand::Rng;

use crate::board::Board;
use crate::types::{Candidate, Color, Move};

/// Uniform choice over all candidates.
pub fn random_move<R: Rng>(candidates: &[Candidate], rng: &mut R) -> Move {
    if candidates.is_empty() {
        return Move::Pass;
    }
    candidates[rng.gen_range(0..candidates.len())].to_move()
}

/// Highest immediate flip count, random among ties.
pub fn greedy_move<R: Rng>(candidates: &[Candidate], rng: &mut R) -> Move {
    pick_tied(candidates, rng)
}

/// Re-scores each candidate as its own flips minus the opponent's best
/// immediate reply on the resulting board, then picks like [`greedy_move`].
pub fn lookahead_move<R: Rng>(
    board: &Board,
    candidates: &[Candidate],
    color: Color,
    rng: &mut R,
) -> Move {
    let rescored: Vec<Candidate> = candidates
        .iter()
        .map(|candidate| {
            let mut next = *board;
            next.place(candidate.x, candidate.y, color);
            Candidate {
                score: candidate.score - best_immediate_score(&next, color.opponent()),
                ..*candidate
            }
        })
        .collect();
    pick_tied(&rescored, rng)
}

/// The largest flip count `color` can get in one move, 0 if it must pass.
pub fn best_immediate_score(board: &Board, color: Color) -> i32 {
    board
        .legal_moves(color)
        .iter()
        .map(|c| c.score)
        .max()
        .unwrap_or(0)
}

fn pick_tied<R: Rng>(candidates: &[Candidate], rng: &mut R) -> Move {
    let Some(best) = candidates.iter().map(|c| c.score).max() else {
        return Move::Pass;
    };

    let ties = candidates.iter().filter(|c| c.score == best).count();
    let k = rng.gen_range(0..ties);
    candidates
        .iter()
        .filter(|c| c.score == best)
        .nth(k)
        .map_or(Move::Pass, |c| c.to_move())
}
