use std::collections::HashSet;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::{info, warn};
use strum::Display;
use varisat::{CnfFormula, Lit, Solver, Var};

use crate::config::Settings;
use crate::edge::Edge;
use crate::error::PuzzleError;
use crate::formula::Formula;
use crate::grid::Grid;
use crate::palette::ColorID;
use crate::variables::{EdgeColorVar, VariableTable};

/// The three answers a SAT solver may give.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    /// Some assignment satisfies the formula.
    Sat,
    /// No assignment satisfies the formula; the puzzle has no solution.
    Unsat,
    /// The solver gave up, errored, or ran out of time.
    Unknown,
}

/// A truth value for every edge-color variable of a [`Formula`], as found by the solver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    variables: VariableTable,
    // indexed by variable number
    values: Vec<bool>,
}

impl Assignment {
    fn from_model(formula: &Formula, model: &[Lit]) -> Self {
        let truths: HashSet<Var> = model.iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.var())
            .collect();

        Self {
            values: formula.variables().iter()
                .map(|var| truths.contains(&var.var))
                .collect(),
            variables: formula.variables().clone(),
        }
    }

    /// The value of `var`. Variables not from the solved formula are false.
    pub fn value(&self, var: &EdgeColorVar) -> bool {
        self.variables.lookup(var.var).is_some_and(|known| known == var)
            && self.values[var.var.index()]
    }

    /// Whether `edge` carries `color`. Edges or colors not from the solved formula carry nothing.
    pub fn carries(&self, edge: Edge, color: ColorID) -> bool {
        self.variables.get(edge, color).is_some_and(|var| self.values[var.var.index()])
    }

    /// Every variable set to true, in numbering order.
    pub fn true_vars(&self) -> impl Iterator<Item = &EdgeColorVar> {
        self.variables.iter().zip(&self.values).filter(|(_, value)| **value).map(|(var, _)| var)
    }
}

/// The result of [`submit`]ting a formula.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Satisfiable, with the model found.
    Sat(Assignment),
    /// Unsatisfiable.
    Unsat,
    /// Undetermined; see [`Verdict::Unknown`].
    Unknown,
}

impl Outcome {
    /// The verdict without any model.
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::Sat(_) => Verdict::Sat,
            Self::Unsat => Verdict::Unsat,
            Self::Unknown => Verdict::Unknown,
        }
    }

    /// The model, if satisfiable.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Sat(assignment) => Some(assignment),
            _ => None,
        }
    }
}

enum RawOutcome {
    Sat(Vec<Lit>),
    Unsat,
    Unknown,
}

/// Compile `grid` into a [`Formula`]. Pure and deterministic.
pub fn build(grid: &Grid) -> Result<Formula, PuzzleError> {
    Formula::build(grid)
}

/// Hand `formula` to the SAT solver and report what it found.
///
/// With `settings.timeout` set, solving runs on a worker thread and the result is [`Outcome::Unknown`] if it has not finished in time.
/// The worker is left to finish on its own in that case.
pub fn submit(formula: &Formula, settings: &Settings) -> Outcome {
    let cnf = formula.to_cnf();

    let raw = match settings.timeout {
        None => check(cnf),
        Some(timeout) => check_with_timeout(cnf, timeout),
    };

    let outcome = match raw {
        RawOutcome::Sat(model) => Outcome::Sat(Assignment::from_model(formula, &model)),
        RawOutcome::Unsat => Outcome::Unsat,
        RawOutcome::Unknown => Outcome::Unknown,
    };

    info!("solver says {}", outcome.verdict());
    outcome
}

fn check(cnf: CnfFormula) -> RawOutcome {
    let mut solver = Solver::new();
    solver.add_formula(&cnf);

    match solver.solve() {
        Ok(true) => match solver.model() {
            Some(model) => RawOutcome::Sat(model),
            None => {
                warn!("solver reported sat without a model");
                RawOutcome::Unknown
            }
        },
        Ok(false) => RawOutcome::Unsat,
        Err(err) => {
            warn!("solver failed: {:?}", err);
            RawOutcome::Unknown
        }
    }
}

fn check_with_timeout(cnf: CnfFormula, timeout: Duration) -> RawOutcome {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        // the receiver is gone if we already timed out
        let _ = sender.send(check(cnf));
    });

    match receiver.recv_timeout(timeout) {
        Ok(raw) => raw,
        Err(_) => {
            warn!("solver did not finish within {:?}", timeout);
            RawOutcome::Unknown
        }
    }
}
