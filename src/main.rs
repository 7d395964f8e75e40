//! Tictac-Rust: tic-tac-toe against a perfect-play computer.
//!
//! ## Usage
//!
//! - `tictac-rust` - Show a demo
//! - `tictac-rust play` - Start the text protocol on stdin/stdout
//! - `tictac-rust demo` - Computer vs. a random opponent
//! - `tictac-rust solve <board>` - Score every move on a position
//!
//! `--size 4` switches any of them to the 4x4 board. Set `RUST_LOG=debug`
//! to see search statistics on stderr.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use tictac_rust::board::{Board, BoardSize};
use tictac_rust::constants::DEFAULT_DELAY_MS;
use tictac_rust::game::GameState;
use tictac_rust::protocol::ProtocolEngine;
use tictac_rust::search::{move_scores, search};
use tictac_rust::session::Session;

/// Tictac-Rust: tic-tac-toe against a minimax engine
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size: 3 (3x3) or 4 (4x4)
    #[arg(long, global = true, default_value = "3", value_parser = parse_size)]
    size: BoardSize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play through the text protocol on stdin/stdout
    Play {
        /// Pause before each computer move, in milliseconds
        #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
        delay_ms: u64,
    },
    /// Let the computer play a random opponent
    Demo {
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the score of every move for the side to move
    Solve {
        /// Cells in row-major order, e.g. "XX.OO...."
        board: String,
    },
}

fn parse_size(s: &str) -> std::result::Result<BoardSize, String> {
    s.parse().map_err(|e: tictac_rust::error::GameError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { delay_ms }) => {
            let mut engine =
                ProtocolEngine::with_delay(cli.size, Duration::from_millis(delay_ms));
            let stdin = io::stdin();
            engine
                .run(stdin.lock(), io::stdout())
                .context("protocol I/O failed")?;
        }
        Some(Commands::Demo { games, seed }) => run_demo(cli.size, games, seed)?,
        Some(Commands::Solve { board }) => run_solve(&board)?,
        None => run_demo(cli.size, 3, None)?,
    }
    Ok(())
}

fn run_demo(size: BoardSize, games: u32, seed: Option<u64>) -> Result<()> {
    let mut session = Session::new(size);
    println!(
        "Tictac-Rust: computer ({}) vs. random opponent ({}) on {size}\n",
        session.computer(),
        session.human()
    );
    if size == BoardSize::Four {
        println!("Note: early 4x4 searches are exhaustive and can take a while.\n");
    }

    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    for game in 1..=games {
        session.reset();
        let started = Instant::now();
        while !session.game().is_over() {
            if session.computer_to_move() {
                session.computer_move()?;
            } else {
                let moves = session.game().board().legal_moves();
                let cell = moves[rng.usize(..moves.len())];
                session.human_move(cell)?;
            }
        }
        println!(
            "Game {game}: {} ({:.1?})\n{}",
            session.game().outcome(),
            started.elapsed(),
            session.game().board()
        );
    }

    println!("Final score: {}", session.tally());
    info!("demo finished after {games} games");
    Ok(())
}

fn run_solve(text: &str) -> Result<()> {
    let board: Board = text.parse().context("could not parse board")?;
    let game = GameState::from_board(board).context("not a reachable position")?;
    print!("{}", game.board());

    if game.is_over() {
        println!("Game over: {}", game.outcome());
        return Ok(());
    }

    let side = game.to_move();
    println!("{side} to move");
    for (cell, score) in move_scores(game.board(), side)? {
        println!("  cell {cell:>2}: {score:>3}");
    }
    let best = search(game.board(), side)?;
    println!("Best: cell {} (score {}, {} nodes)", best.index, best.score, best.nodes);
    Ok(())
}
