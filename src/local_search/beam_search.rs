use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::sat::{Assignment, Formula};

use super::{Landscape, LocalSearch, LocalSearchResult};

/// Local beam search over single-flip neighborhoods.
///
/// The beam starts as `beam_width` random assignments. Each step pools the
/// current members with every single-flip neighbor of every member, drops
/// duplicates, and keeps the `beam_width` lowest-scoring entries. The sort is
/// stable and current members enter the pool first, so a member is only
/// displaced by a strictly better candidate. The search ends on a satisfying
/// assignment, when the beam stops changing, or when the step budget runs out.
///
/// With `beam_width == 1` this is exactly best-improvement hill climbing with
/// a single start.
///
/// With clause weighting, clauses left unsatisfied by the leading member gain
/// weight after every step, and a beam that stops changing is reweighted
/// instead of ending the run.
#[derive(Debug, Clone)]
pub struct BeamSearch {
    beam_width: usize,
    max_steps: usize,
    clause_weighting: bool,
}

impl BeamSearch {
    /// Creates a new beam search.
    ///
    /// # Errors
    ///
    /// Returns an error if `beam_width` or `max_steps` is 0.
    pub fn new(beam_width: usize, max_steps: usize) -> Result<Self> {
        if beam_width == 0 {
            return Err(SearchError::Configuration(
                "Beam width must be greater than 0".to_string(),
            ));
        }
        if max_steps == 0 {
            return Err(SearchError::Configuration(
                "Maximum steps must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            beam_width,
            max_steps,
            clause_weighting: false,
        })
    }

    pub fn with_clause_weighting(mut self, clause_weighting: bool) -> Self {
        self.clause_weighting = clause_weighting;
        self
    }

    pub fn beam_width(&self) -> usize {
        self.beam_width
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    fn next_beam(&self, landscape: &Landscape<'_>, beam: &[Assignment]) -> Vec<Assignment> {
        let mut seen: HashSet<Assignment> = HashSet::new();
        let mut pool: Vec<(Assignment, u64)> = Vec::new();

        for member in beam {
            if seen.insert(member.clone()) {
                pool.push((member.clone(), landscape.score(member)));
            }
        }
        for member in beam {
            for var in 0..landscape.num_vars() {
                let neighbor = member.flipped(&[var]);
                if seen.insert(neighbor.clone()) {
                    let score = landscape.score(&neighbor);
                    pool.push((neighbor, score));
                }
            }
        }

        pool.sort_by_key(|(_, score)| *score);
        pool.into_iter()
            .take(self.beam_width)
            .map(|(assignment, _)| assignment)
            .collect()
    }
}

impl LocalSearch for BeamSearch {
    fn solve(&self, formula: &Formula, rng: &mut RandomNumberGenerator) -> LocalSearchResult {
        let mut landscape = Landscape::new(formula, self.clause_weighting);
        let mut beam: Vec<Assignment> = (0..self.beam_width)
            .map(|_| Assignment::random(formula.num_vars(), rng))
            .collect();

        let mut best = beam[0].clone();
        let mut best_unsatisfied = landscape.unsatisfied(&best);
        for member in &beam[1..] {
            let unsatisfied = landscape.unsatisfied(member);
            if unsatisfied < best_unsatisfied {
                best = member.clone();
                best_unsatisfied = unsatisfied;
            }
        }

        let mut steps = 0;
        while best_unsatisfied > 0 && steps < self.max_steps {
            let next = self.next_beam(&landscape, &beam);
            if next == beam {
                if !landscape.is_weighted() {
                    trace!(steps, "Beam stalled");
                    break;
                }
                landscape.bump(&beam[0]);
                steps += 1;
                continue;
            }

            beam = next;
            steps += 1;
            landscape.bump(&beam[0]);

            for member in &beam {
                let unsatisfied = landscape.unsatisfied(member);
                if unsatisfied < best_unsatisfied {
                    best = member.clone();
                    best_unsatisfied = unsatisfied;
                }
            }
            trace!(steps, best_unsatisfied, "Beam advanced");
        }

        if best_unsatisfied == 0 {
            info!(steps, "Satisfying assignment found");
        } else {
            debug!(steps, best_unsatisfied, "Beam search ended without a model");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::HillClimbing;
    use crate::sat::random_k_sat;

    #[test]
    fn test_new_rejects_zero_width() {
        assert!(matches!(
            BeamSearch::new(0, 10),
            Err(SearchError::Configuration(_))
        ));
        assert!(BeamSearch::new(3, 0).is_err());
        assert_eq!(BeamSearch::new(3, 10).unwrap().beam_width(), 3);
    }

    #[test]
    fn test_width_one_matches_hill_climbing() {
        let mut gen_rng = RandomNumberGenerator::from_seed(21);
        let beam = BeamSearch::new(1, 1000).unwrap();
        let hc = HillClimbing::new(1000, 1).unwrap();

        for _ in 0..10 {
            let formula = random_k_sat(15, 64, 3, &mut gen_rng).unwrap();
            for seed in 0..5 {
                let from_beam = beam.solve(&formula, &mut RandomNumberGenerator::from_seed(seed));
                let from_hc = hc.solve(&formula, &mut RandomNumberGenerator::from_seed(seed));
                assert_eq!(from_beam, from_hc);
            }
        }
    }

    #[test]
    fn test_wider_beam_never_worse_than_its_start() {
        let mut gen_rng = RandomNumberGenerator::from_seed(2);
        let formula = random_k_sat(20, 80, 3, &mut gen_rng).unwrap();
        let beam = BeamSearch::new(4, 200).unwrap();

        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut replay = rng.clone();
        let result = beam.solve(&formula, &mut rng);

        let start_best = (0..4)
            .map(|_| formula.unsatisfied_count(&Assignment::random(20, &mut replay)))
            .min()
            .unwrap();
        assert!(result.objective <= start_best);
        assert_eq!(result.objective, formula.unsatisfied_count(&result.assignment));
        assert_eq!(result.success, result.objective == 0);
    }

    #[test]
    fn test_solves_easy_instance() {
        let formula = Formula::new(4, vec![vec![1, 2], vec![-1, 3], vec![4], vec![-2, -4, 3]])
            .unwrap();
        let beam = BeamSearch::new(3, 50).unwrap().with_clause_weighting(true);
        let result = beam.solve(&formula, &mut RandomNumberGenerator::from_seed(17));
        assert!(result.success);
        assert!(formula.is_satisfied_by(&result.assignment));
    }
}
