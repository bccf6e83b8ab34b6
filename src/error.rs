//! Errors raised at the boundary between the rules engine and its callers.
//!
//! Illegal moves and "no legal move" are not errors: they are ordinary
//! return values (a zero flip count, or `Move::Pass`).

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Coordinates outside the 8×8 grid that are not the pass sentinel.
    #[error("coordinates ({x}, {y}) are off the board")]
    OutOfRange { x: i32, y: i32 },

    /// Difficulty level outside 1..=4.
    #[error("unknown difficulty level: {0}")]
    UnknownDifficulty(u8),

    /// A text diagram that does not describe an 8×8 board.
    #[error("invalid board diagram: {message}")]
    InvalidDiagram { message: String },

    /// Configured ply limit above `MAX_SEARCH_DEPTH`.
    #[error("search depth {depth} exceeds the maximum of {max}")]
    SearchTooDeep { depth: u8, max: u8 },

    #[error("it is not the computer's turn")]
    NotComputerTurn,

    #[error("game is already over")]
    GameOver,
}
