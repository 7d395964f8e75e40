use thiserror::Error;

use crate::board::Mark;

/// Errors raised by the board model, the game controller and the search.
///
/// Every error is local to the call that produced it: the board, the game
/// state and the tally are left exactly as they were before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal move at cell {index}: {reason}")]
    InvalidMove { index: usize, reason: MoveRejection },

    #[error("No move available")]
    NoMoveAvailable,

    #[error("Game is over")]
    GameOver,

    #[error("Not {0}'s turn")]
    NotYourTurn(Mark),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}

/// Why a move was refused by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// Index is past the last cell
    OutOfRange,
    /// Cell already holds a mark
    Occupied,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::OutOfRange => write!(f, "cell out of range"),
            MoveRejection::Occupied => write!(f, "cell not empty"),
        }
    }
}

/// Convenience Result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;
