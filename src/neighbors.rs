use itertools::Itertools;

use crate::edge::{Edge, EdgeUniverse};
use crate::location::Location;
use crate::palette::ColorID;
use crate::variables::{EdgeColorVar, VariableTable};

/// The edges touching one cell and every color's variable on each of them.
pub(crate) struct Neighborhood {
    pub(crate) edges: Vec<Edge>,
    // vars[k][c] is the variable of edges[k] for color c
    vars: Vec<Vec<EdgeColorVar>>,
}

impl Neighborhood {
    /// Resolve the neighborhood of `location`, edges ordered up, down, left, right.
    pub(crate) fn resolve(universe: &EdgeUniverse, variables: &VariableTable, location: Location) -> Self {
        let edges = universe.incident(location);
        let vars = edges.iter()
            .map(|edge| universe.position(edge)
                .map(|position| variables.of_edge(position).to_vec())
                .unwrap_or_default())
            .collect_vec();

        Self { edges, vars }
    }

    /// Number of incident edges.
    pub(crate) fn degree(&self) -> usize {
        self.edges.len()
    }

    /// The variable of the `k`th incident edge for `color`.
    pub(crate) fn var(&self, k: usize, color: ColorID) -> &EdgeColorVar {
        &self.vars[k][color]
    }

    /// Every incident variable, grouped by edge then ordered by color.
    pub(crate) fn all(&self) -> impl Iterator<Item = &EdgeColorVar> {
        self.vars.iter().flatten()
    }

    /// Incident variables of `color`, one per edge.
    pub(crate) fn of_color(&self, color: ColorID) -> impl Iterator<Item = (usize, &EdgeColorVar)> {
        self.vars.iter().enumerate().map(move |(k, per_color)| (k, &per_color[color]))
    }

    /// Incident variables of every color but `color`.
    pub(crate) fn except_color(&self, color: ColorID) -> impl Iterator<Item = &EdgeColorVar> {
        self.all().filter(move |var| var.color != color)
    }
}
