//! Constants for board geometry, search scores, and text glyphs.
//!
//! Both supported board sizes share one engine; the only thing that differs
//! between them is the cell count and the table of winning lines below.
//!
//! # Board Layout
//!
//! Cells are indexed row-major starting from the top-left corner:
//!
//! ```text
//!  0 | 1 | 2          0 |  1 |  2 |  3
//! ---+---+---        ---+----+----+---
//!  3 | 4 | 5          4 |  5 |  6 |  7
//! ---+---+---        ---+----+----+---
//!  6 | 7 | 8          8 |  9 | 10 | 11
//!                    ---+----+----+---
//!                     12 | 13 | 14 | 15
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Side length of the small board.
pub const SIDE_3X3: usize = 3;

/// Side length of the large board.
pub const SIDE_4X4: usize = 4;

/// Winning lines for the 3x3 board: rows, then columns, then diagonals.
pub static LINES_3X3: &[&[usize]] = &[
    // Rows
    &[0, 1, 2],
    &[3, 4, 5],
    &[6, 7, 8],
    // Columns
    &[0, 3, 6],
    &[1, 4, 7],
    &[2, 5, 8],
    // Diagonals
    &[0, 4, 8],
    &[2, 4, 6],
];

/// Winning lines for the 4x4 board: rows, then columns, then diagonals.
pub static LINES_4X4: &[&[usize]] = &[
    // Rows
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[8, 9, 10, 11],
    &[12, 13, 14, 15],
    // Columns
    &[0, 4, 8, 12],
    &[1, 5, 9, 13],
    &[2, 6, 10, 14],
    &[3, 7, 11, 15],
    // Diagonals
    &[0, 5, 10, 15],
    &[3, 6, 9, 12],
];

// =============================================================================
// Search Scores
// =============================================================================

/// Score of a won position for the computer, before the depth adjustment.
///
/// A win found `d` plies into the search scores `WIN_SCORE - d`, a loss
/// scores `-WIN_SCORE + d`. Faster wins and slower losses therefore rank
/// higher.
pub const WIN_SCORE: i32 = 10;

/// Score of a full board with no completed line.
pub const TIE_SCORE: i32 = 0;

// =============================================================================
// Presentation
// =============================================================================

/// Glyph for the human player's mark.
pub const GLYPH_X: char = 'X';

/// Glyph for the computer player's mark.
pub const GLYPH_O: char = 'O';

/// Glyph for an empty cell in compact board strings.
pub const GLYPH_EMPTY: char = '.';

/// Pause before the computer answers in interactive play (milliseconds).
pub const DEFAULT_DELAY_MS: u64 = 1000;
