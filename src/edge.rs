use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::error::PuzzleError;
use crate::grid::Grid;
use crate::location::Location;
use crate::shape::SquareStep;

/// Which way the boundary between two adjacent cells runs.
#[derive(Copy, Clone, VariantArray, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Orientation {
    /// Separates `(i, j)` from `(i, j + 1)`.
    Vertical,
    /// Separates `(i, j)` from `(i + 1, j)`.
    Horizontal,
}

impl Orientation {
    /// The forward step from the lower indexed endpoint to the other.
    pub fn step(&self) -> SquareStep {
        match self {
            Self::Vertical => SquareStep::Right,
            Self::Horizontal => SquareStep::Down,
        }
    }

    fn crossed_by(step: SquareStep) -> Self {
        match step.ensure_forward() {
            SquareStep::Right => Self::Vertical,
            // ensure_forward leaves only Right and Down
            _ => Self::Horizontal,
        }
    }
}

/// A potential path segment between two grid-adjacent cells. Edges carry no color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Edge {
    /// Orientation of the boundary crossed.
    pub orientation: Orientation,
    /// The lower indexed endpoint.
    pub origin: Location,
}

impl Edge {
    /// The edge joining `a` and `b` in either order, or [`None`] if they are not adjacent.
    pub fn between(a: Location, b: Location) -> Option<Self> {
        SquareStep::direction_to(a, b).map(|step| Self {
            orientation: Orientation::crossed_by(step),
            origin: if step == step.ensure_forward() { a } else { b },
        })
    }

    /// The higher indexed endpoint.
    pub fn far_end(&self) -> Location {
        self.orientation.step().attempt_from(self.origin)
    }

    /// Both endpoints.
    pub fn endpoints(&self) -> UnorderedPair<Location> {
        UnorderedPair(self.origin, self.far_end())
    }

    /// Whether `location` is one of the endpoints.
    pub fn touches(&self, location: Location) -> bool {
        let UnorderedPair(a, b) = self.endpoints();
        a == location || b == location
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.origin, self.far_end())
    }
}

/// Every edge of a square grid.
///
/// Edges are enumerated all [`Vertical`](Orientation::Vertical) ones first, then all [`Horizontal`](Orientation::Horizontal) ones, each row-major.
/// This order fixes variable numbering, so it must not change between runs.
pub struct EdgeUniverse {
    graph: UnGraphMap<Location, Edge>,
    edges: Vec<Edge>,
    positions: HashMap<Edge, usize>,
}

impl EdgeUniverse {
    /// Enumerate the edges of `grid`, which must be square.
    pub fn build(grid: &Grid) -> Result<Self, PuzzleError> {
        let (height, width) = grid.dims();
        if height != width {
            return Err(PuzzleError::NonSquareGrid { height, width });
        }

        let size = height;
        let vertical = (0..size).cartesian_product(0..size.saturating_sub(1))
            .map(|(i, j)| Edge { orientation: Orientation::Vertical, origin: Location(i, j) });
        let horizontal = (0..size.saturating_sub(1)).cartesian_product(0..size)
            .map(|(i, j)| Edge { orientation: Orientation::Horizontal, origin: Location(i, j) });
        let edges = vertical.chain(horizontal).collect_vec();

        let mut graph = UnGraphMap::with_capacity(size * size, edges.len());
        for (location, _) in grid.labels() {
            graph.add_node(location);
        }
        for edge in &edges {
            graph.add_edge(edge.origin, edge.far_end(), *edge);
        }

        let positions = edges.iter()
            .enumerate()
            .map(|(position, edge)| (*edge, position))
            .collect();

        debug!("enumerated {} edges on a {}x{} grid", edges.len(), size, size);

        Ok(Self { graph, edges, positions })
    }

    /// All edges in enumeration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether there are no edges, i.e. the grid is 1x1 or empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges with the given orientation.
    pub fn count(&self, orientation: Orientation) -> usize {
        self.edges.iter().filter(|edge| edge.orientation == orientation).count()
    }

    /// Where `edge` sits in the enumeration, if it belongs to this grid.
    pub fn position(&self, edge: &Edge) -> Option<usize> {
        self.positions.get(edge).copied()
    }

    /// Edges incident to `location`, ordered up, down, left, right; boundary sides are skipped.
    pub fn incident(&self, location: Location) -> Vec<Edge> {
        if !self.graph.contains_node(location) {
            return Vec::new();
        }

        SquareStep::neighbors_of(location)
            .filter_map(|(_, neighbor)| self.graph.edge_weight(location, neighbor).copied())
            .collect_vec()
    }
}
