//! Tictac-Rust: a perfect-play tic-tac-toe engine for 3x3 and 4x4 boards.
//!
//! The computer picks its moves with an exhaustive minimax search with
//! alpha-beta pruning, so it never loses a game it can draw.
//!
//! ## Modules
//!
//! - [`constants`] - Line tables, scores and glyphs
//! - [`error`] - Error type shared by all modules
//! - [`board`] - Board model (cells, moves, winning lines)
//! - [`game`] - Game state, turn order and outcome
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`session`] - Human vs. computer controller with a running score
//! - [`protocol`] - Text protocol front end for a session
//!
//! ## Example
//!
//! ```
//! use tictac_rust::board::{Board, Mark};
//! use tictac_rust::game::{evaluate, Outcome};
//! use tictac_rust::search::choose_move;
//!
//! let board: Board = "XX. OO. ...".parse().unwrap();
//! assert_eq!(evaluate(&board), Outcome::InProgress);
//!
//! // O completes the middle row rather than blocking X
//! assert_eq!(choose_move(&board, Mark::O).unwrap(), 5);
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod protocol;
pub mod search;
pub mod session;
