use log::debug;
use varisat::CnfFormula;

use crate::constraint::{self, CellConstraint};
use crate::edge::EdgeUniverse;
use crate::error::PuzzleError;
use crate::grid::Grid;
use crate::logic::{all_of, any_of};
use crate::neighbors::Neighborhood;
use crate::palette::Palette;
use crate::variables::VariableTable;

/// The conjunction of every cell's [`CellConstraint`], together with the variables they range over.
///
/// A formula is immutable once built. Building twice from the same grid gives equal formulas.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Formula {
    palette: Palette,
    variables: VariableTable,
    constraints: Vec<CellConstraint>,
}

impl Formula {
    /// Compile `grid` into a formula.
    ///
    /// Fails with [`PuzzleError::NonSquareGrid`] if `grid` is not square.
    pub fn build(grid: &Grid) -> Result<Self, PuzzleError> {
        let palette = Palette::extract(grid);
        let universe = EdgeUniverse::build(grid)?;
        let variables = VariableTable::allocate(&universe, &palette);

        debug!("palette has {} colors", palette.len());

        let constraints = grid.labels()
            .map(|(location, label)| {
                let neighborhood = Neighborhood::resolve(&universe, &variables, location);
                constraint::generate(location, palette.classify(label), &neighborhood, palette.len())
            })
            .collect::<Vec<_>>();

        debug!(
            "generated {} cell constraints with {} alternatives in total",
            constraints.len(),
            constraints.iter().map(|c| c.alternatives.len()).sum::<usize>(),
        );

        Ok(Self { palette, variables, constraints })
    }

    /// The colors this formula was built over.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The edge-color variables.
    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// One constraint per cell, row-major.
    pub fn constraints(&self) -> &[CellConstraint] {
        &self.constraints
    }

    /// Lower to conjunctive normal form.
    ///
    /// Variables `0..self.variables().len()` are the edge-color variables; any others are selectors.
    pub fn to_cnf(&self) -> CnfFormula {
        let mut cnf = CnfFormula::new();
        cnf.set_var_count(self.variables.len());

        for constraint in &self.constraints {
            all_of(&mut cnf, &constraint.units);
            any_of(&mut cnf, &constraint.alternatives);
        }

        debug!("lowered to {} clauses over {} variables", cnf.len(), cnf.var_count());
        cnf
    }
}
