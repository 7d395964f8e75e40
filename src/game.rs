//! Game state: whose turn it is and whether the game is over.
//!
//! A [`GameState`] wraps a [`Board`] with the side to move and the current
//! [`Outcome`]. Terminal outcomes are absorbing: once a game is won or tied,
//! every further move is refused until [`GameState::reset`].

use std::fmt;

use log::info;

use crate::board::{Board, BoardSize, Mark};
use crate::error::{GameError, Result};

/// Classification of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Win(Mark),
    Tie,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in_progress"),
            Outcome::Win(mark) => write!(f, "{}_wins", mark.glyph().to_ascii_lowercase()),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// Classify a board: a completed line wins, otherwise a full board is a tie.
///
/// This is a pure query; calling it any number of times on the same board
/// gives the same answer.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = board.winner() {
        Outcome::Win(mark)
    } else if board.is_full() {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}

/// One game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    to_move: Mark,
    outcome: Outcome,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl GameState {
    /// Fresh game: empty board, `X` to move.
    pub fn new(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
            to_move: Mark::X,
            outcome: Outcome::InProgress,
        }
    }

    /// Resume a game from a board position.
    ///
    /// `X` always moves first, so the side to move follows from the mark
    /// counts: equal counts mean `X` moves, one extra `X` means `O` moves.
    ///
    /// # Errors
    /// [`GameError::InvalidBoard`] if the counts cannot come from alternating
    /// play, or the winner is not the side that moved last (which also
    /// covers both players having a line).
    pub fn from_board(board: Board) -> Result<Self> {
        let xs = board.count(Mark::X);
        let os = board.count(Mark::O);
        let to_move = if xs == os {
            Mark::X
        } else if xs == os + 1 {
            Mark::O
        } else {
            return Err(GameError::InvalidBoard(format!(
                "{xs} X marks and {os} O marks cannot arise from alternating play"
            )));
        };
        let outcome = evaluate(&board);
        if let Outcome::Win(winner) = outcome {
            // Play stops at the winning move, so the winner moved last
            if winner != to_move.opponent() || board.has_line(to_move) {
                return Err(GameError::InvalidBoard(format!(
                    "{winner} has a line but play continued after it"
                )));
            }
        }
        Ok(Self {
            board,
            to_move,
            outcome,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Play the side to move at `index` and return the new outcome.
    ///
    /// # Errors
    /// - [`GameError::GameOver`] if the game has already ended
    /// - [`GameError::InvalidMove`] if the cell is occupied or out of range
    ///
    /// Nothing changes on error.
    pub fn play(&mut self, index: usize) -> Result<Outcome> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.board.apply_move(index, self.to_move)?;
        self.outcome = evaluate(&self.board);
        if self.outcome.is_terminal() {
            info!("game over after {} at {index}: {}", self.to_move, self.outcome);
        } else {
            self.to_move = self.to_move.opponent();
        }
        Ok(self.outcome)
    }

    /// Back to an empty board with `X` to move, keeping the size.
    pub fn reset(&mut self) {
        self.board.clear();
        self.to_move = Mark::X;
        self.outcome = Outcome::InProgress;
    }
}
