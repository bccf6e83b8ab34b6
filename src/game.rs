use tracing::debug;

use crate::ai::Engine;
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::types::{BOARD_SIZE, Color, GameResult, GameState, Move};

/// Source of computer moves for a session.
pub trait MoveSelector: Send {
    /// Returns a legal move for `color`, or `Move::Pass` when none exists.
    fn select_move(&mut self, board: &Board, color: Color) -> Move;
}

/// Starts a new game: the opening position with Light to move.
pub fn reset_game() -> (Board, Color) {
    (Board::new(), Color::Light)
}

/// Applies a move requested by a human.
///
/// A placement is accepted only if it turns something over; a pass only if
/// `turn` has no legal move anywhere. A rejected request leaves both the
/// board and the turn unchanged.
pub fn apply_human_move(board: &Board, turn: Color, mv: Move) -> (Board, Color, bool) {
    let mut next = *board;
    match attempt(&mut next, turn, mv) {
        Some(_) => (next, turn.opponent(), true),
        None => (*board, turn, false),
    }
}

/// Applies a move that must happen.
///
/// When `mv` is illegal or a pass, the first legal cell in x-then-y scan
/// order is played instead; when there is none the turn passes. The turn
/// always changes.
pub fn apply_forced_move(board: &Board, turn: Color, mv: Move) -> (Board, Color) {
    let mut next = *board;
    force(&mut next, turn, mv);
    (next, turn.opponent())
}

/// Returns the flip count on success (0 for an accepted pass).
fn attempt(board: &mut Board, turn: Color, mv: Move) -> Option<u32> {
    match mv.coords() {
        Some((x, y)) => match board.place(x, y, turn) {
            0 => None,
            flips => Some(flips),
        },
        None if board.has_legal_move(turn) => None,
        None => Some(0),
    }
}

/// Returns the move actually played and its flip count.
fn force(board: &mut Board, turn: Color, mv: Move) -> (Move, u32) {
    if let Some((x, y)) = mv.coords() {
        let flips = board.place(x, y, turn);
        if flips > 0 {
            return (mv, flips);
        }
    }

    for x in 0..BOARD_SIZE {
        for y in 0..BOARD_SIZE {
            let flips = board.place(x, y, turn);
            if flips > 0 {
                return (Move::place(x, y), flips);
            }
        }
    }

    // Trusts the caller: no re-check that a pass is actually allowed.
    (Move::Pass, 0)
}

/// One game session: the live board, whose turn it is, and the computer
/// opponent if there is one.
pub struct GameInstance {
    board: Board,
    turn: Color,
    ai_color: Option<Color>,
    last_move: Option<Move>,
    flipped: u32,
    consecutive_passes: u8,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_selector(config.ai_color, Box::new(Engine::from_config(config)))
    }

    pub fn with_selector(ai_color: Option<Color>, selector: Box<dyn MoveSelector>) -> Self {
        let (board, turn) = reset_game();
        Self {
            board,
            turn,
            ai_color,
            last_move: None,
            flipped: 0,
            consecutive_passes: 0,
            selector,
        }
    }

    pub fn reset(&mut self) {
        (self.board, self.turn) = reset_game();
        self.last_move = None;
        self.flipped = 0;
        self.consecutive_passes = 0;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn ai_color(&self) -> Option<Color> {
        self.ai_color
    }

    pub fn is_ai_turn(&self) -> bool {
        self.ai_color == Some(self.turn)
    }

    /// Human move or pass for the side to move. Returns whether it was
    /// accepted; rejected requests change nothing.
    pub fn play(&mut self, mv: Move) -> bool {
        if self.is_game_over() {
            return false;
        }

        match attempt(&mut self.board, self.turn, mv) {
            Some(flips) => {
                self.advance(mv, flips);
                true
            }
            None => {
                debug!(turn = ?self.turn, ?mv, "rejected move");
                false
            }
        }
    }

    /// Voluntary pass; only accepted without a legal move.
    pub fn pass(&mut self) -> bool {
        self.play(Move::Pass)
    }

    /// Forced move for the side to move. Returns the move actually played.
    pub fn force(&mut self, mv: Move) -> Move {
        let (played, flips) = force(&mut self.board, self.turn, mv);
        self.advance(played, flips);
        played
    }

    /// Lets the computer play its turn. The selector only sees a copy of the
    /// board; its choice goes through the forced path.
    pub fn do_ai_move(&mut self) -> Result<Move, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_ai_turn() {
            return Err(GameError::NotComputerTurn);
        }

        let snapshot = self.board;
        let requested = self.selector.select_move(&snapshot, self.turn);
        Ok(self.force(requested))
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board
            .legal_moves(self.turn)
            .into_iter()
            .map(|c| c.to_move())
            .collect()
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.has_legal_move(self.turn)
    }

    /// Two passes in a row, or no empty cell left.
    pub fn is_game_over(&self) -> bool {
        self.consecutive_passes >= 2 || self.board.empty_count() == 0
    }

    pub fn to_game_state(&self) -> GameState {
        let (light_count, dark_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            turn: self.turn,
            light_count,
            dark_count,
            is_game_over: self.is_game_over(),
            last_move: self.last_move,
            flipped: self.flipped,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (light_count, dark_count) = self.board.count();
        GameResult::from_counts(light_count, dark_count)
    }

    fn advance(&mut self, played: Move, flips: u32) {
        if played.is_pass() {
            self.consecutive_passes += 1;
        } else {
            self.consecutive_passes = 0;
        }
        self.last_move = Some(played);
        self.flipped = flips;
        self.turn = self.turn.opponent();
        debug!(?played, flips, next = ?self.turn, "turn advanced");
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, turn: Color) {
        self.board = board;
        self.turn = turn;
        self.last_move = None;
        self.flipped = 0;
        self.consecutive_passes = 0;
    }
}
