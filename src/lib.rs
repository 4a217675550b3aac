#![warn(missing_docs)]

//! # `flowsat`
//!
//! Decides whether a [Flow Free](https://en.wikipedia.org/wiki/Flow_Free) style puzzle, also known as
//! [Numberlink](https://en.wikipedia.org/wiki/Numberlink), has a solution.
//! Parse a square [`Grid`], [`build`] it into a [`Formula`], then [`submit`] that formula to get an [`Outcome`].
//! [`Grid::solve`] does both in one go.
//!
//! # Internals
//! The puzzle is expressed as a Boolean satisfiability problem (a "SAT") and handed to [`varisat`].
//!
//! Every pair of grid-adjacent cells shares an edge, and for every edge and every color there is one variable,
//! true if and only if that edge carries a path segment of that color.
//! We then make the following assertions, cell by cell:
//! 1. A terminus of color C touches no edge of any other color, and exactly one incident edge carries C.
//! 2. Any other cell either has no colored edge at all, or exactly two incident edges of one color C and nothing else.
//!
//! The formula says nothing about where a path goes beyond each cell's own edges;
//! a model may therefore also contain closed loops that touch no terminus.
//! Whether the formula is satisfiable is still exactly whether the puzzle's termini can all be joined.
//!
//! Each cell's constraint is a disjunction of conjunctions; [`Formula::to_cnf`] lowers these with one selector variable per alternative.

pub use cell::{Label, EMPTY_TOKEN};
pub use config::{Separator, Settings};
pub use constraint::CellConstraint;
pub use edge::{Edge, EdgeUniverse, Orientation};
pub use error::PuzzleError;
pub use formula::Formula;
pub use grid::Grid;
pub use location::Location;
pub use palette::{ColorID, Palette};
pub use shape::SquareStep;
pub use solver::{build, submit, Assignment, Outcome, Verdict};
pub use variables::{EdgeColorVar, VariableTable};

pub(crate) mod cell;
pub mod config;
pub(crate) mod constraint;
pub(crate) mod edge;
pub(crate) mod error;
pub(crate) mod formula;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod logic;
pub(crate) mod neighbors;
pub(crate) mod palette;
pub(crate) mod shape;
pub(crate) mod solver;
mod tests;
pub(crate) mod variables;
