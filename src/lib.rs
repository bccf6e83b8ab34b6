use wasm_bindgen::prelude::*;

pub mod ai;
pub mod arena;
pub mod bindings;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;

pub use ai::{Difficulty, select_move};
pub use board::Board;
pub use error::GameError;
pub use game::{GameInstance, apply_forced_move, apply_human_move, reset_game};
pub use types::{Color, Move, Piece};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
