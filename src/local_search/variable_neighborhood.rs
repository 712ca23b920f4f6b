use tracing::{debug, info, trace};

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::sat::{Assignment, Formula};

use super::{Landscape, LocalSearch, LocalSearchResult};

/// Largest flip set the descent may try.
pub const MAX_FLIP_SIZE: usize = 3;

/// Variable neighborhood descent.
///
/// Neighborhood `k` flips `k` distinct variables at once. The descent scans
/// neighborhoods from `k = 1` upward, enumerating flip sets in lexicographic
/// order, and commits the first strictly improving one. After every move it
/// starts again from `k = 1`. It stops on a satisfying assignment, when no
/// neighborhood improves, or when the step budget runs out.
///
/// With clause weighting, clauses left unsatisfied gain weight after every
/// move, and a local optimum is reweighted instead of ending the run.
#[derive(Debug, Clone)]
pub struct VariableNeighborhoodDescent {
    max_steps: usize,
    max_flip_size: usize,
    clause_weighting: bool,
}

impl VariableNeighborhoodDescent {
    /// Creates a descent over flip sets of size 1 to 3.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_steps` is 0.
    pub fn new(max_steps: usize) -> Result<Self> {
        if max_steps == 0 {
            return Err(SearchError::Configuration(
                "Maximum steps must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            max_steps,
            max_flip_size: MAX_FLIP_SIZE,
            clause_weighting: false,
        })
    }

    /// Limits the largest neighborhood.
    ///
    /// # Errors
    ///
    /// Returns an error unless `1 <= max_flip_size <= 3`.
    pub fn with_max_flip_size(mut self, max_flip_size: usize) -> Result<Self> {
        if !(1..=MAX_FLIP_SIZE).contains(&max_flip_size) {
            return Err(SearchError::Configuration(format!(
                "Flip set size must be between 1 and {}",
                MAX_FLIP_SIZE
            )));
        }
        self.max_flip_size = max_flip_size;
        Ok(self)
    }

    pub fn with_clause_weighting(mut self, clause_weighting: bool) -> Self {
        self.clause_weighting = clause_weighting;
        self
    }

    pub fn max_flip_size(&self) -> usize {
        self.max_flip_size
    }

    /// First improving neighbor in the smallest neighborhood that has one.
    fn first_improvement(
        &self,
        landscape: &Landscape<'_>,
        assignment: &Assignment,
    ) -> Option<(Assignment, usize)> {
        let current = landscape.score(assignment);
        for size in 1..=self.max_flip_size {
            for flips in FlipSets::new(landscape.num_vars(), size) {
                let candidate = assignment.flipped(&flips);
                if landscape.score(&candidate) < current {
                    return Some((candidate, size));
                }
            }
        }
        None
    }
}

impl LocalSearch for VariableNeighborhoodDescent {
    fn solve(&self, formula: &Formula, rng: &mut RandomNumberGenerator) -> LocalSearchResult {
        let mut landscape = Landscape::new(formula, self.clause_weighting);
        let mut assignment = Assignment::random(formula.num_vars(), rng);
        let mut best = assignment.clone();
        let mut best_unsatisfied = landscape.unsatisfied(&assignment);
        let mut steps = 0;

        while best_unsatisfied > 0 && steps < self.max_steps {
            match self.first_improvement(&landscape, &assignment) {
                Some((next, size)) => {
                    assignment = next;
                    trace!(size, steps, "Improving move");
                }
                None if landscape.is_weighted() => {
                    trace!(steps, "Local optimum, bumping clause weights");
                }
                None => break,
            }
            steps += 1;
            landscape.bump(&assignment);

            let unsatisfied = landscape.unsatisfied(&assignment);
            if unsatisfied < best_unsatisfied {
                best = assignment.clone();
                best_unsatisfied = unsatisfied;
            }
        }

        if best_unsatisfied == 0 {
            info!(steps, "Satisfying assignment found");
        } else {
            debug!(steps, best_unsatisfied, "Descent ended without a model");
        }

        LocalSearchResult {
            assignment: best,
            success: best_unsatisfied == 0,
            objective: best_unsatisfied,
            steps,
            restarts_used: 1,
        }
    }
}

/// All `size`-element subsets of `0..n` as ascending index lists, in
/// lexicographic order.
#[derive(Debug, Clone)]
pub struct FlipSets {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl FlipSets {
    pub fn new(n: usize, size: usize) -> Self {
        Self {
            n,
            indices: (0..size).collect(),
            done: size == 0 || size > n,
        }
    }
}

impl Iterator for FlipSets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let size = self.indices.len();
        match (0..size).rev().find(|&i| self.indices[i] < self.n - size + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..size {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_sets_lexicographic() {
        let pairs: Vec<Vec<usize>> = FlipSets::new(4, 2).collect();
        assert_eq!(
            pairs,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(FlipSets::new(5, 3).count(), 10);
        assert_eq!(FlipSets::new(3, 1).collect::<Vec<_>>(), vec![vec![0], vec![1], vec![2]]);
        assert_eq!(FlipSets::new(2, 3).count(), 0);
        assert_eq!(FlipSets::new(2, 0).count(), 0);
    }

    #[test]
    fn test_flip_size_validation() {
        let vnd = VariableNeighborhoodDescent::new(10).unwrap();
        assert_eq!(vnd.max_flip_size(), 3);
        assert!(vnd.clone().with_max_flip_size(0).is_err());
        assert!(vnd.clone().with_max_flip_size(4).is_err());
        assert_eq!(vnd.with_max_flip_size(2).unwrap().max_flip_size(), 2);
        assert!(VariableNeighborhoodDescent::new(0).is_err());
    }

    #[test]
    fn test_pair_neighborhood_escapes_single_flip_optimum() {
        // (x1 ∨ x2) ∧ (¬x1 ∨ x2) ∧ (x1 ∨ ¬x2) is satisfied only by x1 = x2 = true.
        // From (false, false) the only unsatisfied clause is the first one, and
        // no single flip lowers the count; flipping both does.
        let formula = Formula::new(2, vec![vec![1, 2], vec![-1, 2], vec![1, -2]]).unwrap();
        let vnd = VariableNeighborhoodDescent::new(10).unwrap();
        let landscape = Landscape::new(&formula, false);
        let start = Assignment::all_false(2);

        let (next, size) = vnd.first_improvement(&landscape, &start).unwrap();
        assert_eq!(size, 2);
        assert_eq!(next.as_slice(), &[true, true]);

        let single = vnd.with_max_flip_size(1).unwrap();
        assert!(single.first_improvement(&landscape, &start).is_none());
    }

    #[test]
    fn test_solves_and_is_reproducible() {
        let mut gen_rng = RandomNumberGenerator::from_seed(13);
        let formula = crate::sat::random_k_sat(10, 20, 3, &mut gen_rng).unwrap();
        let vnd = VariableNeighborhoodDescent::new(500)
            .unwrap()
            .with_clause_weighting(true);

        let a = vnd.solve(&formula, &mut RandomNumberGenerator::from_seed(3));
        let b = vnd.solve(&formula, &mut RandomNumberGenerator::from_seed(3));
        assert_eq!(a, b);
        assert_eq!(a.objective, formula.unsatisfied_count(&a.assignment));
    }
}
