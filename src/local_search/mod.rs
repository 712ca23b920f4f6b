//! # Local Search Algorithms
//!
//! Stochastic local searches for boolean satisfiability. They work on complete
//! assignments and move between them by flipping variables, minimizing the
//! number of unsatisfied clauses. No frontier or visited set is kept.
//!
//! Every algorithm can optionally steer by *clause weighting*: clauses that
//! stay unsatisfied get heavier, which reshapes the landscape so the search
//! can climb out of local optima. Weights start at 1 on every call and never
//! outlive it. The reported [`LocalSearchResult::objective`] is always the
//! plain unsatisfied-clause count.
//!
//! ## Example
//!
//! ```rust
//! use searchlab::local_search::{HillClimbing, LocalSearch};
//! use searchlab::rng::RandomNumberGenerator;
//! use searchlab::sat::Formula;
//!
//! let formula = Formula::new(3, vec![vec![1, 2], vec![-1, 3], vec![-2, -3]]).unwrap();
//! let solver = HillClimbing::new(100, 5).unwrap().with_clause_weighting(true);
//! let mut rng = RandomNumberGenerator::from_seed(42);
//!
//! let result = solver.solve(&formula, &mut rng);
//! assert!(result.success);
//! assert!(formula.is_satisfied_by(&result.assignment));
//! ```

pub mod beam_search;
pub mod hill_climbing;
pub mod variable_neighborhood;

use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;
use crate::sat::{Assignment, ClauseWeights, Formula};

pub use beam_search::BeamSearch;
pub use hill_climbing::HillClimbing;
pub use variable_neighborhood::VariableNeighborhoodDescent;

/// Outcome of a local search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchResult {
    /// The best assignment found.
    pub assignment: Assignment,
    /// Whether `assignment` satisfies every clause.
    pub success: bool,
    /// Unsatisfied clauses under `assignment`.
    pub objective: usize,
    /// Committed moves across the whole run.
    pub steps: usize,
    /// Random starts used, including the first.
    pub restarts_used: usize,
}

/// A trait for local search algorithms over CNF formulas.
pub trait LocalSearch: Debug {
    /// Searches for a satisfying assignment of `formula`.
    ///
    /// Exhausting the step budget is not an error; the result then carries
    /// `success == false` and the best assignment seen.
    fn solve(&self, formula: &Formula, rng: &mut RandomNumberGenerator) -> LocalSearchResult;
}

/// The objective a search descends: plain or weighted unsatisfied clauses.
#[derive(Debug)]
pub(crate) struct Landscape<'f> {
    formula: &'f Formula,
    weights: Option<ClauseWeights>,
}

impl<'f> Landscape<'f> {
    pub(crate) fn new(formula: &'f Formula, clause_weighting: bool) -> Self {
        Self {
            formula,
            weights: clause_weighting.then(|| ClauseWeights::new(formula.num_clauses())),
        }
    }

    /// Objective value steering the search.
    pub(crate) fn score(&self, assignment: &Assignment) -> u64 {
        match &self.weights {
            Some(weights) => self.formula.weighted_unsatisfied(assignment, weights),
            None => self.formula.unsatisfied_count(assignment) as u64,
        }
    }

    /// Plain unsatisfied-clause count.
    pub(crate) fn unsatisfied(&self, assignment: &Assignment) -> usize {
        self.formula.unsatisfied_count(assignment)
    }

    pub(crate) fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Increments the weight of every clause `assignment` leaves unsatisfied.
    /// No-op without clause weighting.
    pub(crate) fn bump(&mut self, assignment: &Assignment) {
        if let Some(weights) = &mut self.weights {
            weights.bump_unsatisfied(self.formula, assignment);
        }
    }

    pub(crate) fn num_vars(&self) -> usize {
        self.formula.num_vars()
    }

    /// The best single flip of `assignment` that strictly lowers the score,
    /// lowest index on ties, with its score.
    pub(crate) fn best_flip(&self, assignment: &mut Assignment) -> Option<(usize, u64)> {
        let mut best_score = self.score(assignment);
        let mut best_flip = None;
        for var in 0..self.num_vars() {
            assignment.flip(var);
            let score = self.score(assignment);
            if score < best_score {
                best_score = score;
                best_flip = Some(var);
            }
            assignment.flip(var);
        }
        best_flip.map(|var| (var, best_score))
    }
}
