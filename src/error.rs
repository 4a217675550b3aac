use thiserror::Error;

/// Reasons a puzzle may be rejected before any formula is built.
///
/// An unsolvable puzzle is never an error; it surfaces as [`Outcome::Unsat`](crate::Outcome::Unsat).
#[derive(Error, Debug)]
pub enum PuzzleError {
    /// The input text does not describe a grid of the size it declares.
    #[error("malformed input on line {line}: {reason}")]
    MalformedInput {
        /// 1-indexed input line the problem was found on.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// The grid is not square; edges are only enumerated for square grids.
    #[error("grid is {height}x{width}, but only square grids are supported")]
    NonSquareGrid {
        /// Number of rows.
        height: usize,
        /// Number of columns.
        width: usize,
    },
    /// With strict pair checking on, a color does not appear on exactly two cells.
    #[error("color {color:?} has {count} termini, expected exactly 2")]
    UnpairedColor {
        /// The offending color identifier.
        color: String,
        /// How many cells carry it.
        count: usize,
    },
    /// Puzzle input could not be read.
    #[error("could not read puzzle: {0}")]
    Io(#[from] std::io::Error),
}

impl PuzzleError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput { line, reason: reason.into() }
    }
}
