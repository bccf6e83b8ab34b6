use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BOARD_SIZE: usize = 8;

/// Coordinate value used on both axes to request a pass at the boundary.
pub const PASS_COORD: i32 = -1;

/// Content of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    #[default]
    Empty,
    Light,
    Dark,
}

/// The side to move. Light moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<Color> for Piece {
    fn from(color: Color) -> Self {
        match color {
            Color::Light => Piece::Light,
            Color::Dark => Piece::Dark,
        }
    }
}

/// A move request: a placement at `(x, y)` or a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    Place { x: u8, y: u8 },
    Pass,
}

impl Move {
    pub fn place(x: usize, y: usize) -> Self {
        debug_assert!(x < BOARD_SIZE && y < BOARD_SIZE);
        Self::Place {
            x: x as u8,
            y: y as u8,
        }
    }

    /// Validates raw coordinates coming from a front end.
    /// `(-1, -1)` (or either axis set to -1) is a pass.
    pub fn from_coords(x: i32, y: i32) -> Result<Self, GameError> {
        if x == PASS_COORD || y == PASS_COORD {
            return Ok(Self::Pass);
        }
        let range = 0..BOARD_SIZE as i32;
        if !range.contains(&x) || !range.contains(&y) {
            return Err(GameError::OutOfRange { x, y });
        }
        Ok(Self::place(x as usize, y as usize))
    }

    /// Returns `(x, y)` for placements, `None` for a pass.
    pub fn coords(self) -> Option<(usize, usize)> {
        match self {
            Self::Place { x, y } => Some((x as usize, y as usize)),
            Self::Pass => None,
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// An enumerated legal move and its (possibly adjusted) score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub x: usize,
    pub y: usize,
    pub score: i32,
}

impl Candidate {
    pub fn to_move(self) -> Move {
        Move::place(self.x, self.y)
    }
}

/// Snapshot handed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Row-major cells: 0=empty, 1=light, 2=dark.
    pub board: Vec<u8>,
    pub turn: Color,
    pub light_count: u8,
    pub dark_count: u8,
    pub is_game_over: bool,
    pub last_move: Option<Move>,
    /// Number of pieces turned over by the last placement; 0 after a pass.
    pub flipped: u32,
}

/// Final piece counts. `winner` is `None` on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Option<Color>,
    pub light_count: u8,
    pub dark_count: u8,
}

impl GameResult {
    pub fn from_counts(light_count: u8, dark_count: u8) -> Self {
        let winner = if light_count > dark_count {
            Some(Color::Light)
        } else if dark_count > light_count {
            Some(Color::Dark)
        } else {
            None
        };
        Self {
            winner,
            light_count,
            dark_count,
        }
    }
}
