//! Computer-vs-computer matches, used to compare difficulty tiers.

use tracing::{debug, info};
use web_time::Instant;

use crate::ai::{Difficulty, Engine};
use crate::board::Board;
use crate::game::{MoveSelector, apply_forced_move, reset_game};
use crate::types::{Color, GameResult};

/// Running score over several games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub light_wins: u32,
    pub dark_wins: u32,
    pub draws: u32,
}

impl Tally {
    pub fn record(&mut self, result: &GameResult) {
        match result.winner {
            Some(Color::Light) => self.light_wins += 1,
            Some(Color::Dark) => self.dark_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.light_wins + self.dark_wins + self.draws
    }
}

pub struct Arena {
    light: Box<dyn MoveSelector>,
    dark: Box<dyn MoveSelector>,
}

impl Arena {
    pub fn new(light: Box<dyn MoveSelector>, dark: Box<dyn MoveSelector>) -> Self {
        Self { light, dark }
    }

    /// Two seeded engines; Dark's seed is derived from Light's so the pair
    /// does not mirror each other's draws.
    pub fn between(light: Difficulty, dark: Difficulty, seed: u64) -> Self {
        Self::new(
            Box::new(Engine::seeded(light, seed)),
            Box::new(Engine::seeded(dark, seed.wrapping_add(1))),
        )
    }

    /// Plays one game from the opening. Every choice goes through the forced
    /// path; two passes in a row end the game.
    pub fn play_game(&mut self) -> (Board, GameResult) {
        let started = Instant::now();
        let (mut board, mut turn) = reset_game();
        let mut passes = 0;
        let mut plies = 0u32;

        while passes < 2 {
            let selector = match turn {
                Color::Light => &mut self.light,
                Color::Dark => &mut self.dark,
            };
            let requested = selector.select_move(&board, turn);
            (board, turn) = apply_forced_move(&board, turn, requested);

            if requested.is_pass() {
                passes += 1;
            } else {
                passes = 0;
            }
            plies += 1;
        }

        let (light_count, dark_count) = board.count();
        let result = GameResult::from_counts(light_count, dark_count);
        debug!(
            plies,
            light_count,
            dark_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "arena game finished"
        );
        (board, result)
    }

    pub fn run(&mut self, games: u32) -> Tally {
        let mut tally = Tally::default();
        for _ in 0..games {
            let (_, result) = self.play_game();
            tally.record(&result);
            info!(
                light = tally.light_wins,
                dark = tally.dark_wins,
                draws = tally.draws,
                "arena score"
            );
        }
        tally
    }
}
