use std::iter::once;

use itertools::Itertools;
use log::trace;
use varisat::Lit;

use crate::cell::Cell;
use crate::location::Location;
use crate::neighbors::Neighborhood;
use crate::palette::ColorID;

/// Everything one cell demands of the edges around it:
/// all of `units` hold, and at least one of `alternatives` holds in full.
///
/// Alternatives are conjunctions of literals and are mutually exclusive by construction.
/// An empty `alternatives` can never be satisfied.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellConstraint {
    /// The cell constrained.
    pub location: Location,
    /// Literals which must all be true.
    pub units: Vec<Lit>,
    /// Conjunctions of literals, exactly one of which will be true in any model.
    pub alternatives: Vec<Vec<Lit>>,
}

/// Emit the constraint for one cell with the given neighborhood.
pub(crate) fn generate(location: Location, cell: Cell, neighborhood: &Neighborhood, num_colors: usize) -> CellConstraint {
    let (units, alternatives) = match cell {
        Cell::Terminus { color } => terminus(neighborhood, color),
        Cell::Passthrough => (Vec::new(), passthrough(neighborhood, num_colors)),
    };

    trace!("{}: {:?}, degree {}, {} units, {} alternatives", location, cell, neighborhood.degree(), units.len(), alternatives.len());

    CellConstraint { location, units, alternatives }
}

/// Let the terminus have color C, and the other colors be A, B, ...
///
/// No edge here may carry A, B, ...; these become unit clauses `!e1_A`, `!e1_B`, ...
///
/// Exactly one incident edge carries C:
/// `(e1_C & !e2_C & !e3_C) + (!e1_C & e2_C & !e3_C) + ...`
/// With no incident edges at all, this is an empty disjunction, i.e. false.
fn terminus(neighborhood: &Neighborhood, color: ColorID) -> (Vec<Lit>, Vec<Vec<Lit>>) {
    let units = neighborhood.except_color(color)
        .map(|other| other.var.negative())
        .collect_vec();

    let alternatives = (0..neighborhood.degree())
        .map(|exit| once(neighborhood.var(exit, color).var.positive())
            .chain(neighborhood.of_color(color)
                .filter(|(k, _)| *k != exit)
                .map(|(_, other)| other.var.negative()))
            .collect_vec())
        .collect_vec();

    (units, alternatives)
}

/// Either nothing passes through this cell, or some color C enters by one edge and leaves by another.
///
/// The first alternative negates every incident variable.
/// Then for each color C and each pair of incident edges (e1, e2), one alternative:
/// `e1_C & e2_C & (no other incident edge carries C) & (no incident edge carries any other color)`.
/// With degree at most 4 there are at most 6 pairs per color.
fn passthrough(neighborhood: &Neighborhood, num_colors: usize) -> Vec<Vec<Lit>> {
    let mut alternatives = Vec::with_capacity(1 + num_colors * neighborhood.degree() * neighborhood.degree().saturating_sub(1) / 2);

    alternatives.push(neighborhood.all().map(|var| var.var.negative()).collect_vec());

    for color in 0..num_colors {
        for (e1, e2) in (0..neighborhood.degree()).tuple_combinations() {
            let mut term = Vec::with_capacity(neighborhood.degree() * num_colors);
            term.push(neighborhood.var(e1, color).var.positive());
            term.push(neighborhood.var(e2, color).var.positive());
            term.extend(neighborhood.except_color(color).map(|other| other.var.negative()));
            term.extend(neighborhood.of_color(color)
                .filter(|(k, _)| *k != e1 && *k != e2)
                .map(|(_, other)| other.var.negative()));

            alternatives.push(term);
        }
    }

    alternatives
}
