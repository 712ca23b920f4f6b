use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;

use super::AnnealingProblem;

/// Closed-tour optimization over a precomputed distance matrix.
///
/// A state is a permutation of city indices; its cost is the length of the
/// round trip visiting the cities in that order. Neighbors reverse one
/// contiguous segment of the tour.
#[derive(Debug, Clone)]
pub struct TourProblem {
    distances: Vec<Vec<f64>>,
}

impl TourProblem {
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if the matrix has fewer than two
    /// rows, is not square, or holds a negative or non-finite distance.
    pub fn new(distances: Vec<Vec<f64>>) -> Result<Self> {
        let n = distances.len();
        if n < 2 {
            return Err(SearchError::MalformedInput(
                "A tour needs at least two cities".to_string(),
            ));
        }
        for (i, row) in distances.iter().enumerate() {
            if row.len() != n {
                return Err(SearchError::MalformedInput(format!(
                    "Distance row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(d) = row.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
                return Err(SearchError::MalformedInput(format!(
                    "Distance {} in row {} must be finite and non-negative",
                    d, i
                )));
            }
        }
        Ok(Self { distances })
    }

    pub fn num_cities(&self) -> usize {
        self.distances.len()
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }

    /// Length of the closed tour, returning to the first city.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.is_empty() {
            return 0.0;
        }
        tour.iter()
            .zip(tour.iter().cycle().skip(1))
            .map(|(&from, &to)| self.distances[from][to])
            .sum()
    }

    /// The cities in a random order.
    pub fn random_tour(&self, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..self.num_cities()).collect();
        rng.shuffle(&mut tour);
        tour
    }
}

impl AnnealingProblem for TourProblem {
    type State = Vec<usize>;

    fn cost(&self, tour: &Vec<usize>) -> f64 {
        self.tour_length(tour)
    }

    fn neighbor(&self, tour: &Vec<usize>, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let n = tour.len();
        let mut next = tour.clone();
        if n < 2 {
            return next;
        }
        let i = rng.gen_range(0..n - 1);
        let j = rng.gen_range(i + 1..n);
        next[i..=j].reverse();
        next
    }

    fn validate(&self, tour: &Vec<usize>) -> Result<()> {
        let n = self.num_cities();
        let mut seen = vec![false; n];
        for &city in tour {
            match seen.get_mut(city) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(SearchError::MalformedInput(format!(
                        "City {} appears twice in the tour",
                        city
                    )))
                }
                None => {
                    return Err(SearchError::MalformedInput(format!(
                        "City {} is out of range for {} cities",
                        city, n
                    )))
                }
            }
        }
        if tour.len() != n {
            return Err(SearchError::MalformedInput(format!(
                "Tour visits {} of {} cities",
                tour.len(),
                n
            )));
        }
        Ok(())
    }
}
