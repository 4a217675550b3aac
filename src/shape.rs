use strum::VariantArray;

use crate::location::Location;

/// The four steps between cells of a square grid.
///
/// The declaration order is the order in which a cell's incident edges are enumerated.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl SquareStep {
    /// Forward steps land on a location indexed higher (row-major) than their origin.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Attempt the step from `location` and return the resultant [`Location`].
    ///
    /// Stepping off row or column 0 wraps around to a huge coordinate, which no grid contains.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Convert this step to a forward one, if it is not already.
    pub fn ensure_forward(&self) -> Self {
        match Self::FORWARD_VARIANTS.contains(self) {
            true => *self,
            false => self.invert(),
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// Every neighbor of `location` in theory, ignoring grid bounds.
    pub fn neighbors_of(location: Location) -> impl Iterator<Item = (Self, Location)> {
        Self::VARIANTS.iter().map(move |dir| (*dir, dir.attempt_from(location)))
    }
}
