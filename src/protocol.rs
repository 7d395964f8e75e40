//! Line-oriented text protocol for playing a [`Session`].
//!
//! The protocol follows the shape of the Go Text Protocol: one command per
//! line, an optional numeric id in front, and a reply of `=` (success) or
//! `?` (failure) followed by the id and a message, terminated by a blank
//! line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `boardsize <3|4>` - Start a new game on a board of that size
//! - `clear_board` - Start a new game (the score is kept)
//! - `reset_score` - Zero the score
//! - `play <cell>` - Human move; the computer replies at once. Answers
//!   `<reply> <status>`, with `none` as the reply if the game ended first
//! - `hint` - Best cell and its score for the side to move
//! - `showboard` - Print the board
//! - `status` - `in_progress`, `x_wins`, `o_wins` or `tie`
//! - `score` - Running tally
//!
//! ## Example
//!
//! ```
//! use tictac_rust::board::BoardSize;
//! use tictac_rust::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new(BoardSize::Three);
//! let mut out = Vec::new();
//! engine.run("play 0\nquit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("= 4 in_progress"));
//! ```

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::board::BoardSize;
use crate::search::search;
use crate::session::Session;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "hint",
    "known_command",
    "list_commands",
    "name",
    "play",
    "quit",
    "reset_score",
    "score",
    "showboard",
    "status",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    session: Session,
    /// Pause before the computer's reply
    delay: Duration,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl ProtocolEngine {
    /// Create an engine that replies without delay.
    pub fn new(size: BoardSize) -> Self {
        Self::with_delay(size, Duration::ZERO)
    }

    /// Create an engine that waits `delay` before each computer reply.
    pub fn with_delay(size: BoardSize, delay: Duration) -> Self {
        Self {
            session: Session::new(size),
            delay,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<BoardSize>() {
                    Ok(size) => {
                        self.session.resize(size);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "clear_board" => {
                self.session.reset();
                (true, String::new())
            }

            "reset_score" => {
                self.session.reset_scores();
                (true, String::new())
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(index) = arg.parse::<usize>() else {
                    return (false, format!("invalid cell '{arg}'"));
                };
                self.play(index)
            }

            "hint" => {
                let game = self.session.game();
                match search(game.board(), game.to_move()) {
                    Ok(result) => (true, format!("{} {}", result.index, result.score)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.session.game().board())),

            "status" => (true, self.session.game().outcome().to_string()),

            "score" => (true, self.session.tally().to_string()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Human move at `index`, then the computer's reply if the game goes on.
    fn play(&mut self, index: usize) -> (bool, String) {
        let outcome = match self.session.human_move(index) {
            Ok(outcome) => outcome,
            Err(e) => return (false, e.to_string()),
        };
        if outcome.is_terminal() {
            return (true, format!("none {outcome}"));
        }

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match self.session.computer_move() {
            Ok((reply, outcome)) => (true, format!("{reply} {outcome}")),
            Err(e) => {
                warn!("computer could not reply: {e}");
                (false, e.to_string())
            }
        }
    }
}
