use itertools::Itertools;
use varisat::{CnfFormula, ExtendFormula, Lit};

/// Add clauses requiring every literal of `units` to hold.
pub(crate) fn all_of(formula: &mut CnfFormula, units: &[Lit]) {
    for unit in units {
        formula.add_clause(&[*unit]);
    }
}

/// Add clauses requiring at least one of `alternatives` to hold in full.
///
/// Each alternative T gets a fresh selector S with `S => T`, i.e. `(!S + t1)(!S + t2)...`,
/// and one clause `S1 + S2 + ...` picks some alternative.
/// An empty list of alternatives is unsatisfiable, so it becomes `X * !X` on a fresh X.
pub(crate) fn any_of(formula: &mut CnfFormula, alternatives: &[Vec<Lit>]) {
    if alternatives.is_empty() {
        let contradiction = formula.new_var();
        formula.add_clause(&[contradiction.positive()]);
        formula.add_clause(&[contradiction.negative()]);
        return;
    }

    let selectors = alternatives.iter()
        .map(|term| {
            let selector = formula.new_var();
            for literal in term {
                formula.add_clause(&[selector.negative(), *literal]);
            }
            selector.positive()
        })
        .collect_vec();

    formula.add_clause(&selectors);
}
