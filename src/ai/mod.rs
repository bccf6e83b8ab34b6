//! Computer opponent: four difficulty tiers behind one entry point.

pub mod heuristic;
pub mod search;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;
use web_time::Instant;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::MoveSelector;
use crate::types::{Color, Move};

use self::search::{DEFAULT_MAX_DEPTH, Searcher};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Any legal move, uniformly at random.
    #[default]
    Easy,
    /// Most pieces turned over right now.
    Medium,
    /// Own flips minus the opponent's best immediate reply.
    Hard,
    /// Fixed-depth differential search.
    Expert,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Expert => 4,
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            4 => Ok(Self::Expert),
            other => Err(GameError::UnknownDifficulty(other)),
        }
    }
}

/// Picks a move for `color` without touching `board`.
/// Returns `Move::Pass` when `color` has no legal move.
pub fn select_move<R: Rng>(
    board: &Board,
    difficulty: Difficulty,
    color: Color,
    rng: &mut R,
) -> Move {
    select_move_with_depth(board, difficulty, color, DEFAULT_MAX_DEPTH, rng)
}

/// Same as [`select_move`] with an explicit ply limit for the expert tier.
pub fn select_move_with_depth<R: Rng>(
    board: &Board,
    difficulty: Difficulty,
    color: Color,
    max_depth: u8,
    rng: &mut R,
) -> Move {
    let candidates = board.legal_moves(color);
    if candidates.is_empty() {
        return Move::Pass;
    }

    match difficulty {
        Difficulty::Easy => heuristic::random_move(&candidates, rng),
        Difficulty::Medium => heuristic::greedy_move(&candidates, rng),
        Difficulty::Hard => heuristic::lookahead_move(board, &candidates, color, rng),
        Difficulty::Expert => Searcher::new(max_depth).search(board, color).mv,
    }
}

/// A seeded computer player for one difficulty tier.
pub struct Engine<R> {
    difficulty: Difficulty,
    max_depth: u8,
    rng: R,
}

impl<R: Rng> Engine<R> {
    pub fn new(difficulty: Difficulty, max_depth: u8, rng: R) -> Self {
        Self {
            difficulty,
            max_depth,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Engine<StdRng> {
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, DEFAULT_MAX_DEPTH, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config.difficulty, config.search_depth, rng)
    }
}

impl<R: Rng + Send> MoveSelector for Engine<R> {
    fn select_move(&mut self, board: &Board, color: Color) -> Move {
        let started = Instant::now();
        let mv = select_move_with_depth(
            board,
            self.difficulty,
            color,
            self.max_depth,
            &mut self.rng,
        );
        debug!(
            difficulty = ?self.difficulty,
            ?color,
            ?mv,
            elapsed_us = started.elapsed().as_micros() as u64,
            "computer selected move"
        );
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENING_LIGHT_MOVES: [Move; 4] = [
        Move::Place { x: 2, y: 4 },
        Move::Place { x: 3, y: 5 },
        Move::Place { x: 4, y: 2 },
        Move::Place { x: 5, y: 3 },
    ];

    fn no_dark_moves_board() -> Board {
        "
            LD......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn difficulty_levels_round_trip_through_numbers() {
        for level in 1..=4u8 {
            assert_eq!(Difficulty::try_from(level).unwrap().level(), level);
        }
        assert_eq!(
            Difficulty::try_from(0),
            Err(GameError::UnknownDifficulty(0))
        );
        assert_eq!(
            Difficulty::try_from(5),
            Err(GameError::UnknownDifficulty(5))
        );
    }

    #[test]
    fn every_tier_passes_without_legal_moves() {
        let board = no_dark_moves_board();
        let mut rng = StdRng::seed_from_u64(7);

        for level in 1..=4u8 {
            let difficulty = Difficulty::try_from(level).unwrap();
            assert_eq!(select_move(&board, difficulty, Color::Dark, &mut rng), Move::Pass);
        }
    }

    #[test]
    fn every_tier_picks_an_opening_move_and_leaves_board_alone() {
        let board = Board::new();

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            for level in 1..=4u8 {
                let difficulty = Difficulty::try_from(level).unwrap();
                let mv = select_move(&board, difficulty, Color::Light, &mut rng);
                assert!(OPENING_LIGHT_MOVES.contains(&mv), "{difficulty:?} chose {mv:?}");
            }
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn same_seed_gives_same_choices() {
        let board = Board::new();
        let mut left = Engine::seeded(Difficulty::Easy, 99);
        let mut right = Engine::seeded(Difficulty::Easy, 99);

        for _ in 0..16 {
            assert_eq!(
                left.select_move(&board, Color::Light),
                right.select_move(&board, Color::Light)
            );
        }
    }

    #[test]
    fn engine_from_config_uses_configured_tier() {
        let config = GameConfig {
            ai_color: Some(Color::Dark),
            difficulty: Difficulty::Hard,
            seed: Some(3),
            search_depth: 2,
        };

        let engine = Engine::from_config(&config);

        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.max_depth, 2);
    }
}
