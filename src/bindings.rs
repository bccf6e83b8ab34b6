//! JavaScript surface. Coordinates are `(x, y)` with `(-1, -1)` meaning pass;
//! boards are returned row-major.

use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::ai::Difficulty;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::GameInstance;
use crate::types::{Color, Move};

#[wasm_bindgen]
pub struct ReversiGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config` may be `undefined`, or an object such as
    /// `{ aiColor: "dark", difficulty: "hard", seed: 1, searchDepth: 5 }`.
    /// `searchDepth` above `MAX_SEARCH_DEPTH` is rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config.validate().map_err(to_js)?;
        Ok(Self {
            inner: GameInstance::new(&config),
        })
    }

    /// Builds a game against the computer from a numeric level (1-4).
    #[wasm_bindgen(js_name = withLevel)]
    pub fn with_level(level: u8, ai_plays_dark: bool) -> Result<ReversiGame, JsValue> {
        let difficulty = Difficulty::try_from(level).map_err(to_js)?;
        let ai_color = if ai_plays_dark {
            Color::Dark
        } else {
            Color::Light
        };
        Ok(Self {
            inner: GameInstance::new(&GameConfig::against_computer(ai_color, difficulty)),
        })
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Human move. Returns `false` when the move is illegal or it is the
    /// computer's turn.
    pub fn play(&mut self, x: i32, y: i32) -> Result<bool, JsValue> {
        let mv = Move::from_coords(x, y).map_err(to_js)?;
        if self.inner.is_ai_turn() {
            warn!(?mv, "human move during the computer's turn");
            return Ok(false);
        }
        Ok(self.inner.play(mv))
    }

    pub fn pass(&mut self) -> bool {
        !self.inner.is_ai_turn() && self.inner.pass()
    }

    /// Plays the computer's turn and returns the move made.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        let mv = self.inner.do_ai_move().map_err(to_js)?;
        Ok(serde_wasm_bindgen::to_value(&mv)?)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_moves())?)
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_result())?)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    #[wasm_bindgen(js_name = isAiTurn)]
    pub fn is_ai_turn(&self) -> bool {
        self.inner.is_ai_turn()
    }
}

fn to_js(err: GameError) -> JsValue {
    warn!(%err, "rejected request");
    JsValue::from_str(&err.to_string())
}
