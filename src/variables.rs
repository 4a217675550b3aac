use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::debug;
use varisat::Var;

use crate::edge::{Edge, EdgeUniverse};
use crate::palette::{ColorID, Palette};

/// A boolean unknown meaning "`edge` carries a path segment of `color`".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EdgeColorVar {
    /// The edge this variable speaks for.
    pub edge: Edge,
    /// The color it speaks for.
    pub color: ColorID,
    /// The solver variable.
    pub var: Var,
}

impl Display for EdgeColorVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.edge, self.color)
    }
}

/// One [`EdgeColorVar`] per (edge, color), numbered densely from 0.
///
/// The variable for edge position `e` and color `c` is `e * colors + c`, so the table is ordered by edge, then color.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableTable {
    vars: Vec<EdgeColorVar>,
    num_colors: usize,
    edge_positions: HashMap<Edge, usize>,
}

impl VariableTable {
    /// Allocate variables for every edge of `universe` and every color of `palette`.
    pub fn allocate(universe: &EdgeUniverse, palette: &Palette) -> Self {
        let num_colors = palette.len();
        let vars = universe.edges().iter()
            .cartesian_product(palette.ids())
            .enumerate()
            .map(|(index, (edge, color))| EdgeColorVar { edge: *edge, color, var: Var::from_index(index) })
            .collect_vec();

        let edge_positions = universe.edges().iter()
            .enumerate()
            .map(|(position, edge)| (*edge, position))
            .collect();

        debug!("allocated {} variables for {} edges and {} colors", vars.len(), universe.len(), num_colors);

        Self { vars, num_colors, edge_positions }
    }

    /// Total number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables were allocated (no edges or no colors).
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Number of colors each edge has a variable for.
    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// All variables in numbering order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeColorVar> {
        self.vars.iter()
    }

    /// The variable of the edge at `edge_position` in the universe's enumeration, for `color`.
    pub fn at(&self, edge_position: usize, color: ColorID) -> Option<&EdgeColorVar> {
        if color >= self.num_colors {
            return None;
        }
        self.vars.get(edge_position * self.num_colors + color)
    }

    /// The variable of `edge` for `color`, if both belong to this table.
    pub fn get(&self, edge: Edge, color: ColorID) -> Option<&EdgeColorVar> {
        self.edge_positions.get(&edge).and_then(|position| self.at(*position, color))
    }

    /// The per-color variables of the edge at `edge_position`, in color order.
    pub fn of_edge(&self, edge_position: usize) -> &[EdgeColorVar] {
        let start = (edge_position * self.num_colors).min(self.vars.len());
        let end = (start + self.num_colors).min(self.vars.len());
        &self.vars[start..end]
    }

    /// Recover the identity behind a solver variable.
    pub fn lookup(&self, var: Var) -> Option<&EdgeColorVar> {
        self.vars.get(var.index())
    }
}
