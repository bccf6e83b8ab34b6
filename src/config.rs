use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::ai::search::{DEFAULT_MAX_DEPTH, MAX_SEARCH_DEPTH};
use crate::error::GameError;
use crate::types::Color;

/// Session settings supplied by the front end.
///
/// Every field is optional when deserialising; missing ones fall back to
/// [`GameConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Color played by the computer, `None` for two human players.
    pub ai_color: Option<Color>,
    pub difficulty: Difficulty,
    /// Seed for the AI's random tie-breaks; entropy when absent.
    pub seed: Option<u64>,
    /// Ply limit for the expert tier, at most [`MAX_SEARCH_DEPTH`].
    pub search_depth: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_color: None,
            difficulty: Difficulty::Easy,
            seed: None,
            search_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GameConfig {
    pub fn against_computer(ai_color: Color, difficulty: Difficulty) -> Self {
        Self {
            ai_color: Some(ai_color),
            difficulty,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects settings that deserialise fine but cannot be played.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.search_depth > MAX_SEARCH_DEPTH {
            return Err(GameError::SearchTooDeep {
                depth: self.search_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }
}
