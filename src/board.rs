//! Board model: cell contents, move application and line detection.
//!
//! A board is a flat, row-major vector of cells whose length is fixed by its
//! [`BoardSize`] at construction. Every index is bounds-checked against that
//! length; out-of-range lookups read as empty and out-of-range moves are
//! rejected.

use std::fmt;
use std::str::FromStr;

use crate::constants::{GLYPH_EMPTY, GLYPH_O, GLYPH_X, LINES_3X3, LINES_4X4, SIDE_3X3, SIDE_4X4};
use crate::error::{GameError, MoveRejection, Result};

/// A player symbol. `X` is the human and moves first; `O` is the computer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other player's mark.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Mark::X => GLYPH_X,
            Mark::O => GLYPH_O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Contents of one cell (`None` is empty).
pub type Cell = Option<Mark>;

/// The two supported board configurations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoardSize {
    #[default]
    Three,
    Four,
}

impl BoardSize {
    /// Side length (3 or 4).
    pub fn side(self) -> usize {
        match self {
            BoardSize::Three => SIDE_3X3,
            BoardSize::Four => SIDE_4X4,
        }
    }

    /// Number of cells (9 or 16).
    pub fn cells(self) -> usize {
        self.side() * self.side()
    }

    /// Winning lines in evaluation order: rows, then columns, then diagonals.
    pub fn lines(self) -> &'static [&'static [usize]] {
        match self {
            BoardSize::Three => LINES_3X3,
            BoardSize::Four => LINES_4X4,
        }
    }

    /// Size with the given number of cells, if it is a supported one.
    pub fn from_cells(cells: usize) -> Option<BoardSize> {
        match cells {
            9 => Some(BoardSize::Three),
            16 => Some(BoardSize::Four),
            _ => None,
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

impl FromStr for BoardSize {
    type Err = GameError;

    /// Accepts `3`, `4`, `3x3` or `4x4`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3" | "3x3" => Ok(BoardSize::Three),
            "4" | "4x4" => Ok(BoardSize::Four),
            other => Err(GameError::InvalidBoard(format!(
                "unsupported board size '{other}', expected 3 or 4"
            ))),
        }
    }
}

/// A game board of fixed size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl Board {
    /// Create an all-empty board.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cells()],
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of cells; never changes after construction.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cell holds a mark.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Mark at `index`, or `None` if the cell is empty or out of range.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// True if `index` is on the board and holds no mark.
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    /// Record `mark` at `index`.
    ///
    /// # Errors
    /// - [`GameError::InvalidMove`] with [`MoveRejection::OutOfRange`] if
    ///   `index` is past the last cell
    /// - [`GameError::InvalidMove`] with [`MoveRejection::Occupied`] if the
    ///   cell already holds a mark
    ///
    /// The board is unchanged on error.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<()> {
        match self.cells.get_mut(index) {
            None => Err(GameError::InvalidMove {
                index,
                reason: MoveRejection::OutOfRange,
            }),
            Some(Some(_)) => Err(GameError::InvalidMove {
                index,
                reason: MoveRejection::Occupied,
            }),
            Some(cell) => {
                *cell = Some(mark);
                Ok(())
            }
        }
    }

    /// Empty the cell at `index`. Only the search uses this, to take back
    /// trial moves; a played move is final.
    pub(crate) fn clear_cell(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = None;
        }
    }

    /// Empty every cell, keeping the size.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Indices of all empty cells in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// Mark owning the first completed line of this board's line table.
    pub fn winner(&self) -> Option<Mark> {
        self.winner_on(self.size.lines())
    }

    /// Mark owning the first completed line in `lines`.
    ///
    /// A line is complete when every index on it holds the same mark; a line
    /// touching an empty or out-of-range cell never completes.
    pub fn winner_on(&self, lines: &[&[usize]]) -> Option<Mark> {
        lines.iter().find_map(|line| self.line_owner(line))
    }

    /// True if `mark` has completed any line.
    pub fn has_line(&self, mark: Mark) -> bool {
        self.size
            .lines()
            .iter()
            .any(|line| line.iter().all(|&i| self.get(i) == Some(mark)))
    }

    fn line_owner(&self, line: &[usize]) -> Option<Mark> {
        let (&first, rest) = line.split_first()?;
        let mark = self.get(first)?;
        rest.iter().all(|&i| self.get(i) == Some(mark)).then_some(mark)
    }

    /// Compact one-line form, e.g. `XX.OO....`.
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.map_or(GLYPH_EMPTY, Mark::glyph))
            .collect()
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parse a board from its cells in row-major order.
    ///
    /// `X`/`x` and `O`/`o`/`0` are marks; `.`, `_` and `-` are empty cells.
    /// Whitespace, `|` and `/` are ignored so rows may be separated. The
    /// number of cells picks the size (9 or 16).
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                'X' | 'x' => cells.push(Some(Mark::X)),
                'O' | 'o' | '0' => cells.push(Some(Mark::O)),
                '.' | '_' | '-' => cells.push(None),
                '|' | '/' => {}
                c if c.is_whitespace() => {}
                c => return Err(GameError::InvalidBoard(format!("unexpected character '{c}'"))),
            }
        }
        let size = BoardSize::from_cells(cells.len()).ok_or_else(|| {
            GameError::InvalidBoard(format!("expected 9 or 16 cells, got {}", cells.len()))
        })?;
        Ok(Board { size, cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.size.side();
        for row in self.cells.chunks(side) {
            for cell in row {
                let ch = cell.map_or(GLYPH_EMPTY, Mark::glyph);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
