use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;
use ndarray::Array2;

use crate::cell::Label;
use crate::config::{Separator, Settings};
use crate::error::PuzzleError;
use crate::location::{Dimension, Location};
use crate::palette::Palette;
use crate::solver::{self, Outcome};

/// A parsed puzzle: a grid of [`Label`]s, indexed `(row, column)`.
///
/// Grids read from text are always square. [`Grid::from_array`] accepts any shape, but only square grids
/// can be turned into a formula.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    pub(crate) labels: Array2<Label>,
}

impl Grid {
    /// Wrap an array of labels as-is. The array need not be square.
    pub fn from_array(labels: Array2<Label>) -> Self {
        Self { labels }
    }

    /// Build a grid from rows of tokens, checking there are `size` rows of `size` tokens each.
    ///
    /// Token `"0"` is an empty cell; any other token is a terminus of that color.
    pub fn from_rows<S: AsRef<str>>(size: Dimension, rows: &[Vec<S>]) -> Result<Self, PuzzleError> {
        let size = size.get();
        if rows.len() != size {
            // rows begin on the second input line
            return Err(PuzzleError::malformed(
                rows.len() + 2,
                format!("declared size {} but found {} rows", size, rows.len()),
            ));
        }

        if let Some((index, row)) = rows.iter().find_position(|row| row.len() != size) {
            return Err(PuzzleError::malformed(
                index + 2,
                format!("declared size {} but row {} has {} cells", size, index, row.len()),
            ));
        }

        let tokens = rows.iter()
            .flat_map(|row| row.iter().map(|token| Label::from(token.as_ref())))
            .collect_vec();
        let labels = Array2::from_shape_vec((size, size), tokens)
            .map_err(|err| PuzzleError::malformed(1, err.to_string()))?;

        Ok(Self { labels })
    }

    /// Parse puzzle text: a line holding the size `N`, then `N` rows of `N` tokens split by `settings.separator`.
    ///
    /// Blank lines after the last row are ignored.
    /// With `settings.strict_pairs`, every color must also appear exactly twice.
    pub fn parse(input: &str, settings: &Settings) -> Result<Self, PuzzleError> {
        let mut lines = input.lines();
        let size_line = lines.next().ok_or_else(|| PuzzleError::malformed(1, "empty input"))?;
        let size = size_line.trim().parse::<usize>()
            .ok()
            .and_then(Dimension::new)
            .ok_or_else(|| PuzzleError::malformed(1, format!("expected a positive grid size, found {:?}", size_line.trim())))?;

        let mut rows = lines.map(|line| settings.separator.split(line.trim())).collect_vec();
        while rows.last().is_some_and(|row| row.iter().all(|token| token.is_empty())) {
            rows.pop();
        }

        let grid = Self::from_rows(size, &rows)?;
        debug!("parsed {}x{} grid", size, size);

        if settings.strict_pairs {
            grid.check_pairs()?;
        }

        Ok(grid)
    }

    /// `(height, width)`.
    pub fn dims(&self) -> (usize, usize) {
        self.labels.dim()
    }

    /// The label at `location`, or [`None`] if it is off the grid.
    pub fn label(&self, location: Location) -> Option<&Label> {
        self.labels.get(location.as_index())
    }

    /// Every label with its location, in row-major order.
    pub fn labels(&self) -> impl Iterator<Item = (Location, &Label)> {
        self.labels.indexed_iter().map(|(index, label)| (Location::from(index), label))
    }

    /// Ensure every color marks exactly one pair of termini.
    pub fn check_pairs(&self) -> Result<(), PuzzleError> {
        let palette = Palette::extract(self);
        match palette.terminus_counts(self).into_iter().find(|(_, count)| *count != 2) {
            None => Ok(()),
            Some((color, count)) => Err(PuzzleError::UnpairedColor { color: palette.name(color).to_owned(), count }),
        }
    }

    /// Build this grid's formula and hand it to the solver.
    ///
    /// Fails only if the grid is not square.
    pub fn solve(&self, settings: &Settings) -> Result<Outcome, PuzzleError> {
        let formula = solver::build(self)?;
        Ok(solver::submit(&formula, settings))
    }

    /// Dump the grid one row per line, tokens joined by `separator`.
    pub fn render(&self, separator: Separator) -> String {
        self.labels.rows()
            .into_iter()
            .map(|row| row.iter().join(separator.as_str()))
            .fold(String::new(), |mut out, row| {
                out.push_str(&row);
                out.push('\n');
                out
            })
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(Separator::Space))
    }
}
