//! # Simulated Annealing
//!
//! Minimizes a cost over an arbitrary state space by random perturbation.
//! Improving neighbors are always accepted; a worsening neighbor with cost
//! increase `Δ` is accepted with probability `exp(-Δ / T)` (the Metropolis
//! criterion). The temperature `T` decays geometrically after every trial, so
//! the search behaves like a random walk early and like greedy descent late.
//!
//! The best state ever visited is tracked separately from the current one and
//! is what a run returns.
//!
//! ## Example
//!
//! ```rust
//! use searchlab::annealing::{SimulatedAnnealing, TourProblem};
//! use searchlab::rng::RandomNumberGenerator;
//!
//! let distances = vec![
//!     vec![0.0, 1.0, 2.0, 1.0],
//!     vec![1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 1.0, 0.0, 1.0],
//!     vec![1.0, 2.0, 1.0, 0.0],
//! ];
//! let problem = TourProblem::new(distances).unwrap();
//! let annealer = SimulatedAnnealing::new(10.0, 0.99, 1e-3).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(42);
//!
//! let start = problem.random_tour(&mut rng);
//! let result = annealer.run(&problem, start, &mut rng).unwrap();
//! assert!((result.best_cost - 4.0).abs() < 1e-9);
//! ```

pub mod tiling;
pub mod tour;

use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::{ensure_finite, Result, SearchError};
use crate::rng::RandomNumberGenerator;

pub use tiling::{TileArrangement, TilingProblem};
pub use tour::TourProblem;

/// A cost landscape simulated annealing can explore.
pub trait AnnealingProblem {
    type State: Clone + Debug;

    /// Cost to minimize. Must be finite.
    fn cost(&self, state: &Self::State) -> f64;

    /// A random perturbation of `state`. Must not modify `state`.
    fn neighbor(&self, state: &Self::State, rng: &mut RandomNumberGenerator) -> Self::State;

    /// Checks that `state` belongs to this problem before a run starts from it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] for a state the problem cannot
    /// score or perturb.
    fn validate(&self, _state: &Self::State) -> Result<()> {
        Ok(())
    }
}

/// Outcome of an annealing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingResult<S> {
    /// Lowest-cost state visited.
    pub best: S,
    pub best_cost: f64,
    /// Cost of the state the walk ended in.
    pub final_cost: f64,
    /// Trials performed.
    pub iterations: usize,
    /// Accepted trials, improving or not.
    pub accepted_moves: usize,
    /// Trials that strictly lowered the current cost.
    pub improving_moves: usize,
    pub final_temperature: f64,
}

/// Simulated annealing with geometric cooling.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    initial_temperature: f64,
    cooling_rate: f64,
    min_temperature: f64,
    max_iterations: usize,
}

impl SimulatedAnnealing {
    /// Default iteration budget.
    pub const DEFAULT_MAX_ITERATIONS: usize = 50_000;

    /// Creates a new simulated annealing algorithm with the given parameters.
    ///
    /// # Arguments
    ///
    /// * `initial_temperature` - The starting temperature.
    /// * `cooling_rate` - The factor `α` applied to the temperature after each trial.
    /// * `min_temperature` - The run stops once the temperature falls to this value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `initial_temperature` is not positive and finite
    /// - `cooling_rate` is not strictly between 0 and 1
    /// - `min_temperature` is not positive or not below `initial_temperature`
    pub fn new(initial_temperature: f64, cooling_rate: f64, min_temperature: f64) -> Result<Self> {
        if !(initial_temperature.is_finite() && initial_temperature > 0.0) {
            return Err(SearchError::Configuration(
                "Initial temperature must be positive".to_string(),
            ));
        }
        if !(cooling_rate > 0.0 && cooling_rate < 1.0) {
            return Err(SearchError::Configuration(
                "Cooling rate must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }
        if !(min_temperature > 0.0 && min_temperature < initial_temperature) {
            return Err(SearchError::Configuration(
                "Minimum temperature must be positive and below the initial temperature"
                    .to_string(),
            ));
        }
        Ok(Self {
            initial_temperature,
            cooling_rate,
            min_temperature,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        })
    }

    /// Caps the number of trials.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is 0.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self> {
        if max_iterations == 0 {
            return Err(SearchError::Configuration(
                "Maximum iterations must be greater than 0".to_string(),
            ));
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    pub fn min_temperature(&self) -> f64 {
        self.min_temperature
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Anneals from `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if `initial` fails
    /// [`AnnealingProblem::validate`], and [`SearchError::InvalidNumericValue`]
    /// if the problem reports a NaN or infinite cost.
    pub fn run<P: AnnealingProblem>(
        &self,
        problem: &P,
        initial: P::State,
        rng: &mut RandomNumberGenerator,
    ) -> Result<AnnealingResult<P::State>> {
        problem.validate(&initial)?;
        let mut current_cost = ensure_finite(problem.cost(&initial), "Initial cost")?;
        let mut current = initial;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = self.initial_temperature;
        let mut iterations = 0;
        let mut accepted_moves = 0;
        let mut improving_moves = 0;

        while iterations < self.max_iterations && temperature > self.min_temperature {
            let neighbor = problem.neighbor(&current, rng);
            let neighbor_cost = ensure_finite(problem.cost(&neighbor), "Neighbor cost")?;
            let delta = neighbor_cost - current_cost;

            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.unit() < (-delta / temperature).exp()
            };

            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                    trace!(iterations, best_cost, temperature, "New best");
                }
            }

            iterations += 1;
            temperature *= self.cooling_rate;
        }

        debug!(
            iterations,
            accepted_moves,
            improving_moves,
            best_cost,
            final_temperature = temperature,
            "Annealing finished"
        );

        Ok(AnnealingResult {
            best,
            best_cost,
            final_cost: current_cost,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
        })
    }

    /// Runs `runs` annealing passes, each starting from the best state found
    /// so far, and returns the best overall. Counters add up over all passes.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Configuration`] if `runs` is 0, and propagates
    /// errors from [`SimulatedAnnealing::run`].
    pub fn run_repeated<P: AnnealingProblem>(
        &self,
        problem: &P,
        initial: P::State,
        runs: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<AnnealingResult<P::State>> {
        if runs == 0 {
            return Err(SearchError::Configuration(
                "Number of runs must be greater than 0".to_string(),
            ));
        }

        let mut overall = self.run(problem, initial, rng)?;
        for pass in 1..runs {
            let result = self.run(problem, overall.best.clone(), rng)?;
            debug!(pass, best_cost = result.best_cost, "Annealing pass finished");

            overall.iterations += result.iterations;
            overall.accepted_moves += result.accepted_moves;
            overall.improving_moves += result.improving_moves;
            overall.final_cost = result.final_cost;
            overall.final_temperature = result.final_temperature;
            if result.best_cost < overall.best_cost {
                overall.best = result.best;
                overall.best_cost = result.best_cost;
            }
        }
        Ok(overall)
    }
}
