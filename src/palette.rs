use itertools::Itertools;

use crate::cell::{Cell, Label};
use crate::grid::Grid;

/// Dense index of a color in its [`Palette`].
pub type ColorID = usize;

/// The distinct colors of a grid, in the order they first appear reading row by row.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Collect the colors of `grid`. A grid with no termini yields an empty palette.
    pub fn extract(grid: &Grid) -> Self {
        let colors = grid.labels()
            .filter_map(|(_, label)| match label {
                Label::Color(color) => Some(color.clone()),
                Label::Empty => None,
            })
            .unique()
            .collect_vec();

        Self { colors }
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the grid has no termini at all.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Every valid [`ColorID`].
    pub fn ids(&self) -> std::ops::Range<ColorID> {
        0..self.colors.len()
    }

    /// The identifier `color` was written as.
    ///
    /// Panics if `color` is not from this palette.
    pub fn name(&self, color: ColorID) -> &str {
        &self.colors[color]
    }

    /// The [`ColorID`] of a color identifier, if it is present.
    pub fn id_of(&self, name: &str) -> Option<ColorID> {
        self.colors.iter().position(|color| color == name)
    }

    /// How many cells of `grid` carry each color, in palette order.
    pub fn terminus_counts(&self, grid: &Grid) -> Vec<(ColorID, usize)> {
        let counts = grid.labels()
            .filter_map(|(_, label)| match self.classify(label) {
                Cell::Terminus { color } => Some(color),
                Cell::Passthrough => None,
            })
            .counts();

        self.ids()
            .map(|color| (color, counts.get(&color).copied().unwrap_or_default()))
            .collect_vec()
    }

    pub(crate) fn classify(&self, label: &Label) -> Cell {
        match label {
            Label::Color(name) => match self.id_of(name) {
                Some(color) => Cell::Terminus { color },
                // only reachable with a palette extracted from some other grid
                None => Cell::Passthrough,
            },
            Label::Empty => Cell::Passthrough,
        }
    }
}
