//! Session controller: one human against the computer over many games.
//!
//! The session owns the current [`GameState`] and the running
//! [`ScoreTally`]. The presentation layer feeds it discrete events (a human
//! move, a request for the computer's reply, a reset) and reads the state
//! back; nothing here knows about rendering or timing.

use std::fmt;

use log::{debug, info};

use crate::board::{BoardSize, Mark};
use crate::error::{GameError, Result};
use crate::game::{GameState, Outcome};
use crate::search::choose_move;

/// Finished games counted by result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub human_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
}

impl ScoreTally {
    /// Count one finished game. `InProgress` is ignored.
    pub fn record(&mut self, outcome: Outcome, human: Mark) {
        match outcome {
            Outcome::Win(mark) if mark == human => self.human_wins += 1,
            Outcome::Win(_) => self.computer_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.human_wins + self.computer_wins + self.ties
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "human={} computer={} ties={}",
            self.human_wins, self.computer_wins, self.ties
        )
    }
}

/// A human (`X`, moves first) playing the computer (`O`).
#[derive(Clone, Debug)]
pub struct Session {
    game: GameState,
    tally: ScoreTally,
    human: Mark,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl Session {
    pub fn new(size: BoardSize) -> Self {
        Self {
            game: GameState::new(size),
            tally: ScoreTally::default(),
            human: Mark::X,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    pub fn human(&self) -> Mark {
        self.human
    }

    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }

    pub fn size(&self) -> BoardSize {
        self.game.board().size()
    }

    /// True if the game is live and the computer is to move.
    pub fn computer_to_move(&self) -> bool {
        !self.game.is_over() && self.game.to_move() == self.computer()
    }

    /// Apply the human's move at `index`.
    ///
    /// # Errors
    /// - [`GameError::GameOver`] if the game has ended
    /// - [`GameError::NotYourTurn`] if the computer is to move
    /// - [`GameError::InvalidMove`] if the cell is occupied or out of range
    pub fn human_move(&mut self, index: usize) -> Result<Outcome> {
        self.play_as(self.human, index)
    }

    /// Let the engine pick and play the computer's move.
    ///
    /// Returns the chosen cell and the outcome after it.
    ///
    /// # Errors
    /// - [`GameError::GameOver`] if the game has ended
    /// - [`GameError::NotYourTurn`] if the human is to move
    pub fn computer_move(&mut self) -> Result<(usize, Outcome)> {
        let computer = self.computer();
        self.check_turn(computer)?;
        let index = choose_move(self.game.board(), computer)?;
        debug!("computer plays {index}");
        let outcome = self.play_as(computer, index)?;
        Ok((index, outcome))
    }

    /// Start a new game on an empty board. The tally is kept.
    pub fn reset(&mut self) {
        self.game.reset();
        info!("new {} game", self.size());
    }

    /// Zero the tally. The current game is untouched.
    pub fn reset_scores(&mut self) {
        self.tally.reset();
    }

    /// Switch board size. Starts a new game; the tally is kept.
    pub fn resize(&mut self, size: BoardSize) {
        self.game = GameState::new(size);
        info!("new {size} game");
    }

    fn check_turn(&self, mark: Mark) -> Result<()> {
        if self.game.is_over() {
            return Err(GameError::GameOver);
        }
        if self.game.to_move() != mark {
            return Err(GameError::NotYourTurn(mark));
        }
        Ok(())
    }

    fn play_as(&mut self, mark: Mark, index: usize) -> Result<Outcome> {
        self.check_turn(mark)?;
        let outcome = self.game.play(index)?;
        if outcome.is_terminal() {
            self.tally.record(outcome, self.human);
            info!("{outcome}; tally {}", self.tally);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_record() {
        let mut tally = ScoreTally::default();
        tally.record(Outcome::Win(Mark::X), Mark::X);
        tally.record(Outcome::Win(Mark::O), Mark::X);
        tally.record(Outcome::Win(Mark::O), Mark::X);
        tally.record(Outcome::Tie, Mark::X);
        tally.record(Outcome::InProgress, Mark::X);
        assert_eq!(
            tally,
            ScoreTally {
                human_wins: 1,
                computer_wins: 2,
                ties: 1
            }
        );
        assert_eq!(tally.games(), 4);
        assert_eq!(tally.to_string(), "human=1 computer=2 ties=1");
    }

    #[test]
    fn test_turn_order_enforced() {
        let mut session = Session::new(BoardSize::Three);
        assert_eq!(session.human(), Mark::X);
        assert_eq!(session.computer(), Mark::O);
        assert_eq!(session.computer_move(), Err(GameError::NotYourTurn(Mark::O)));

        session.human_move(0).unwrap();
        assert!(session.computer_to_move());
        assert_eq!(session.human_move(1), Err(GameError::NotYourTurn(Mark::X)));
    }

    #[test]
    fn test_computer_answers_corner_with_center() {
        let mut session = Session::new(BoardSize::Three);
        session.human_move(0).unwrap();
        let (index, outcome) = session.computer_move().unwrap();
        assert_eq!(index, 4);
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(session.game().board().get(4), Some(Mark::O));
    }

    #[test]
    fn test_invalid_human_move_keeps_state() {
        let mut session = Session::new(BoardSize::Three);
        session.human_move(4).unwrap();
        session.computer_move().unwrap();
        let before = session.game().clone();
        assert!(session.human_move(4).is_err());
        assert!(session.human_move(99).is_err());
        assert_eq!(session.game(), &before);
    }

    #[test]
    fn test_finished_game_is_tallied_once() {
        let mut session = Session::new(BoardSize::Three);
        // Human always takes the lowest free cell
        while !session.game().is_over() {
            let cell = session.game().board().legal_moves()[0];
            session.human_move(cell).unwrap();
            if session.computer_to_move() {
                session.computer_move().unwrap();
            }
        }
        assert_eq!(session.tally().games(), 1);
        assert_eq!(session.tally().human_wins, 0);

        assert_eq!(session.human_move(8), Err(GameError::GameOver));
        assert_eq!(session.computer_move(), Err(GameError::GameOver));
        assert_eq!(session.tally().games(), 1);
    }

    #[test]
    fn test_reset_keeps_tally() {
        let mut session = Session::new(BoardSize::Three);
        session.tally.record(Outcome::Tie, Mark::X);
        session.human_move(0).unwrap();
        session.reset();
        assert!(session.game().board().is_empty());
        assert_eq!(session.game().to_move(), Mark::X);
        assert_eq!(session.tally().ties, 1);

        session.reset_scores();
        assert_eq!(session.tally(), ScoreTally::default());
    }

    #[test]
    fn test_resize() {
        let mut session = Session::new(BoardSize::Three);
        session.human_move(0).unwrap();
        session.resize(BoardSize::Four);
        assert_eq!(session.size(), BoardSize::Four);
        assert_eq!(session.game().board().len(), 16);
        assert!(session.game().board().is_empty());
    }
}
