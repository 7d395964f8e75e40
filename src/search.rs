//! Exhaustive minimax search with alpha-beta pruning.
//!
//! The computer is the maximizing side and its opponent the minimizing one.
//! Terminal positions score from the computer's point of view:
//!
//! - opponent has a line: `-WIN_SCORE + depth`
//! - computer has a line: `WIN_SCORE - depth`
//! - full board: `TIE_SCORE`
//!
//! The linear depth term makes the engine take the fastest win and put off
//! any loss as long as possible.
//!
//! The search runs on a private copy of the caller's board. Trial moves are
//! placed through [`TrialMove`], which empties the cell again when dropped, so
//! sibling branches never see each other's moves. Cells are always tried in
//! ascending index order, which fixes both the tie-breaking between equal
//! moves and the set of branches alpha-beta cuts off.

use std::ops::{Deref, DerefMut};

use log::debug;

use crate::board::{Board, Mark};
use crate::constants::{TIE_SCORE, WIN_SCORE};
use crate::error::{GameError, Result};

/// The outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen cell
    pub index: usize,
    /// Minimax score of the chosen cell from the computer's point of view
    pub score: i32,
    /// Positions visited, root moves included
    pub nodes: u64,
}

/// Pick the best cell for `computer` on `board`.
///
/// Ties go to the lowest index.
///
/// # Errors
/// [`GameError::NoMoveAvailable`] if the board is full or already won.
pub fn choose_move(board: &Board, computer: Mark) -> Result<usize> {
    search(board, computer).map(|r| r.index)
}

/// Like [`choose_move`], but also reports the score and node count.
pub fn search(board: &Board, computer: Mark) -> Result<SearchResult> {
    let mut searcher = Searcher::new(board, computer)?;
    let mut best: Option<(usize, i32)> = None;

    for index in searcher.board.legal_moves() {
        let score = searcher.score_root_move(index)?;
        // Strictly greater: the first cell to reach a score keeps it
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    let (index, score) = best.ok_or(GameError::NoMoveAvailable)?;
    let result = SearchResult {
        index,
        score,
        nodes: searcher.nodes,
    };
    debug!(
        "search {} for {computer}: cell {} score {} ({} nodes)",
        board.to_compact(),
        result.index,
        result.score,
        result.nodes
    );
    Ok(result)
}

/// Minimax score of every legal cell for `computer`, in ascending cell order.
///
/// Each cell is searched with a full window, so the scores are exact and
/// agree with the one [`choose_move`] compares.
///
/// # Errors
/// [`GameError::NoMoveAvailable`] if the board is full or already won.
pub fn move_scores(board: &Board, computer: Mark) -> Result<Vec<(usize, i32)>> {
    let mut searcher = Searcher::new(board, computer)?;
    searcher
        .board
        .legal_moves()
        .into_iter()
        .map(|index| searcher.score_root_move(index).map(|score| (index, score)))
        .collect()
}

/// Search context: a private working board plus statistics.
struct Searcher {
    board: Board,
    computer: Mark,
    nodes: u64,
}

impl Searcher {
    fn new(board: &Board, computer: Mark) -> Result<Self> {
        if board.winner().is_some() || board.is_full() {
            return Err(GameError::NoMoveAvailable);
        }
        Ok(Self {
            board: board.clone(),
            computer,
            nodes: 0,
        })
    }

    /// Play `index` for the computer and score the reply from the opponent's
    /// side, starting at depth 0 with a fresh window.
    fn score_root_move(&mut self, index: usize) -> Result<i32> {
        let computer = self.computer;
        let mut trial = TrialMove::place(&mut self.board, index, computer)?;
        minimax(
            &mut trial,
            computer,
            0,
            false,
            i32::MIN,
            i32::MAX,
            &mut self.nodes,
        )
    }
}

/// Score `board` for `computer`, with `maximizing` telling whose ply it is.
///
/// Only fails if a trial move lands on a cell that is not empty, which
/// `legal_moves` rules out.
fn minimax(
    board: &mut Board,
    computer: Mark,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> Result<i32> {
    *nodes += 1;

    if board.has_line(computer.opponent()) {
        return Ok(-WIN_SCORE + depth);
    }
    if board.has_line(computer) {
        return Ok(WIN_SCORE - depth);
    }
    if board.is_full() {
        return Ok(TIE_SCORE);
    }

    if maximizing {
        let mut best = i32::MIN;
        for index in board.legal_moves() {
            let score = {
                let mut trial = TrialMove::place(board, index, computer)?;
                minimax(&mut trial, computer, depth + 1, false, alpha, beta, nodes)?
            };
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    } else {
        let opponent = computer.opponent();
        let mut best = i32::MAX;
        for index in board.legal_moves() {
            let score = {
                let mut trial = TrialMove::place(board, index, opponent)?;
                minimax(&mut trial, computer, depth + 1, true, alpha, beta, nodes)?
            };
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    }
}

/// A mark placed on an empty cell for the duration of one branch.
///
/// Dropping the guard empties the cell again, whichever way the branch is
/// left. The guard derefs to the board so the branch can keep searching it.
struct TrialMove<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> TrialMove<'a> {
    /// Place `mark` at `index`. No guard exists unless the cell was empty,
    /// so a refused move never clears someone else's mark.
    fn place(board: &'a mut Board, index: usize, mark: Mark) -> Result<Self> {
        board.apply_move(index, mark)?;
        Ok(Self { board, index })
    }
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.clear_cell(self.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_takes_immediate_win_over_block() {
        let b = board("XX. OO. ...");
        assert_eq!(choose_move(&b, Mark::O).unwrap(), 5);
    }

    #[test]
    fn test_blocks_opponent_line() {
        // O cannot win at once; X threatens 0-1-2
        let b = board("XX. .O. ...");
        assert_eq!(choose_move(&b, Mark::O).unwrap(), 2);
    }

    #[test]
    fn test_immediate_win_scores_full_value() {
        let result = search(&board("XX. OO. ..."), Mark::O).unwrap();
        assert_eq!(result.index, 5);
        assert_eq!(result.score, WIN_SCORE);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_prefers_faster_win() {
        // Cell 2 forks (3-4-5 and 2-4-6) and wins two plies later; cell 5
        // wins now. The earlier index must not win the tie-break.
        let scores = move_scores(&board("XX. OO. ..."), Mark::O).unwrap();
        let score_of = |i: usize| scores.iter().find(|(c, _)| *c == i).map(|(_, s)| *s);
        assert_eq!(score_of(2), Some(WIN_SCORE - 2));
        assert_eq!(score_of(5), Some(WIN_SCORE));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // X threatens both 1 and 3, so every reply loses on the next ply
        let b = board("X.X .O. X..");
        let scores = move_scores(&b, Mark::O).unwrap();
        assert!(scores.iter().all(|&(_, s)| s == -WIN_SCORE + 1));
        assert_eq!(choose_move(&b, Mark::O).unwrap(), 1);
    }

    #[test]
    fn test_no_move_on_full_board() {
        let b = board("XOX XOO OXX");
        assert_eq!(choose_move(&b, Mark::O), Err(GameError::NoMoveAvailable));
        assert_eq!(move_scores(&b, Mark::O), Err(GameError::NoMoveAvailable));
    }

    #[test]
    fn test_no_move_on_won_board() {
        let b = board("XXX OO. ...");
        assert_eq!(choose_move(&b, Mark::O), Err(GameError::NoMoveAvailable));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let b = board("XO.. .OX. X.X. O.O.");
        let snapshot = b.clone();
        let index = choose_move(&b, Mark::X).unwrap();
        assert!(snapshot.is_empty_at(index));
        assert_eq!(b, snapshot);
    }

    #[test]
    fn test_trial_move_restores_cell() {
        let mut b = board(".........");
        {
            let trial = TrialMove::place(&mut b, 4, Mark::X).unwrap();
            assert_eq!(trial.get(4), Some(Mark::X));
        }
        assert!(b.is_empty());
    }

    #[test]
    fn test_trial_move_refuses_occupied_cell() {
        let mut b = board("X........");
        assert!(matches!(
            TrialMove::place(&mut b, 0, Mark::O),
            Err(GameError::InvalidMove { index: 0, .. })
        ));
        assert_eq!(b.get(0), Some(Mark::X));
        assert!(TrialMove::place(&mut b, 9, Mark::O).is_err());
        assert_eq!(b, board("X........"));
    }

    #[test]
    fn test_pruned_node_counts() {
        // Ascending move order with a `beta <= alpha` cutoff on both sides
        // visits exactly these many positions. The full tree below a corner
        // opening has 59,704 positions and the 4x4 one has 78,884.
        let corner = search(&board("X........"), Mark::O).unwrap();
        assert_eq!((corner.index, corner.score), (4, TIE_SCORE));
        assert_eq!(corner.nodes, 6_304);
        assert!(corner.nodes * 5 < 59_704);

        let late = search(&board("XO.. .OX. X.X. O.O."), Mark::X).unwrap();
        assert_eq!((late.index, late.score), (9, TIE_SCORE));
        assert_eq!(late.nodes, 16_024);
        assert!(late.nodes * 4 < 78_884);
    }

    #[test]
    fn test_single_empty_cell() {
        let b = board("XOX XOO OX.");
        let result = search(&b, Mark::X).unwrap();
        assert_eq!(result.index, 8);
        assert_eq!(result.score, TIE_SCORE);
    }

    #[test]
    fn test_four_by_four_completes_line() {
        // O completes the bottom row at once
        let b = board("XX.X .XX. X... OOO.");
        assert_eq!(choose_move(&b, Mark::O).unwrap(), 15);
    }
}
