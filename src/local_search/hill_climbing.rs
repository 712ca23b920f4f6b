use tracing::{debug, info, trace};

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::sat::{Assignment, Formula};

use super::{Landscape, LocalSearch, LocalSearchResult};

/// Best-improvement hill climbing with random restarts.
///
/// Each restart draws a random assignment, then repeatedly commits the single
/// flip that lowers the objective the most. A restart ends at a local optimum
/// or when the step budget runs out; the best restart is returned, and the
/// run stops early on the first satisfying assignment.
///
/// With clause weighting, a local optimum does not end the restart: every
/// unsatisfied clause gains one unit of weight (counted as a step) and the
/// climb continues on the reshaped landscape.
///
/// Weights are reset to 1 once per [`LocalSearch::solve`] call, not once per
/// restart: a new random start keeps the weights the previous restarts built
/// up.
#[derive(Debug, Clone)]
pub struct HillClimbing {
    /// Step budget per restart.
    max_steps: usize,
    /// Number of random starts.
    restarts: usize,
    clause_weighting: bool,
}

impl HillClimbing {
    /// Creates a new hill climbing algorithm.
    ///
    /// # Arguments
    ///
    /// * `max_steps` - The maximum number of steps per restart.
    /// * `restarts` - The number of random starts.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_steps` or `restarts` is 0.
    pub fn new(max_steps: usize, restarts: usize) -> Result<Self> {
        if max_steps == 0 {
            return Err(SearchError::Configuration(
                "Maximum steps must be greater than 0".to_string(),
            ));
        }
        if restarts == 0 {
            return Err(SearchError::Configuration(
                "Restarts must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            max_steps,
            restarts,
            clause_weighting: false,
        })
    }

    pub fn with_clause_weighting(mut self, clause_weighting: bool) -> Self {
        self.clause_weighting = clause_weighting;
        self
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// One climb from `assignment`. Returns the number of steps taken.
    fn climb(&self, landscape: &mut Landscape<'_>, assignment: &mut Assignment) -> usize {
        let mut steps = 0;
        while steps < self.max_steps {
            if landscape.unsatisfied(assignment) == 0 {
                break;
            }
            match landscape.best_flip(assignment) {
                Some((var, score)) => {
                    assignment.flip(var);
                    trace!(var, score, "Committed flip");
                }
                None if landscape.is_weighted() => {
                    trace!("Local optimum, bumping clause weights");
                    landscape.bump(assignment);
                }
                None => break,
            }
            steps += 1;
        }
        steps
    }
}

impl LocalSearch for HillClimbing {
    fn solve(&self, formula: &Formula, rng: &mut RandomNumberGenerator) -> LocalSearchResult {
        let mut landscape = Landscape::new(formula, self.clause_weighting);
        let mut best: Option<(Assignment, usize)> = None;
        let mut total_steps = 0;
        let mut restarts_used = 0;

        for restart in 0..self.restarts {
            restarts_used += 1;
            let mut assignment = Assignment::random(formula.num_vars(), rng);
            total_steps += self.climb(&mut landscape, &mut assignment);
            let unsatisfied = landscape.unsatisfied(&assignment);
            debug!(restart, unsatisfied, "Restart finished");

            if best.as_ref().map_or(true, |(_, b)| unsatisfied < *b) {
                best = Some((assignment, unsatisfied));
            }
            if unsatisfied == 0 {
                info!(restart, steps = total_steps, "Satisfying assignment found");
                break;
            }
        }

        let (assignment, objective) =
            best.unwrap_or_else(|| (Assignment::all_false(formula.num_vars()), formula.num_clauses()));
        LocalSearchResult {
            success: objective == 0,
            assignment,
            objective,
            steps: total_steps,
            restarts_used,
        }
    }
}
