use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;

use super::{Clause, Formula};

/// Generates a uniform random k-SAT instance.
///
/// Each clause draws `k` distinct variables and negates each with probability
/// one half. Instances are not guaranteed to be satisfiable.
///
/// # Errors
///
/// Returns [`SearchError::Configuration`] if `k` is zero or larger than
/// `num_vars`.
pub fn random_k_sat(
    num_vars: usize,
    num_clauses: usize,
    k: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Formula> {
    if k == 0 {
        return Err(SearchError::Configuration(
            "Clause length must be greater than 0".to_string(),
        ));
    }
    if k > num_vars {
        return Err(SearchError::Configuration(format!(
            "Clause length {} exceeds the number of variables {}",
            k, num_vars
        )));
    }
    if i32::try_from(num_vars).is_err() {
        return Err(SearchError::Configuration(format!(
            "{} variables cannot be written as literals",
            num_vars
        )));
    }

    let clauses: Vec<Clause> = (0..num_clauses)
        .map(|_| {
            rng.distinct_indices(num_vars, k)
                .into_iter()
                .map(|idx| {
                    let var = idx as i32 + 1;
                    if rng.coin() {
                        var
                    } else {
                        -var
                    }
                })
                .collect()
        })
        .collect();

    Formula::new(num_vars, clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_of_generated_instance() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let formula = random_k_sat(20, 80, 3, &mut rng).unwrap();

        assert_eq!(formula.num_vars(), 20);
        assert_eq!(formula.num_clauses(), 80);
        for clause in formula.clauses() {
            assert_eq!(clause.len(), 3);
            let mut vars: Vec<u32> = clause.iter().map(|l| l.unsigned_abs()).collect();
            vars.sort();
            vars.dedup();
            assert_eq!(vars.len(), 3, "variables within a clause are distinct");
            assert!(vars.iter().all(|&v| (1..=20).contains(&v)));
        }
    }

    #[test]
    fn test_same_seed_same_instance() {
        let a = random_k_sat(10, 30, 3, &mut RandomNumberGenerator::from_seed(4)).unwrap();
        let b = random_k_sat(10, 30, 3, &mut RandomNumberGenerator::from_seed(4)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_clause_length() {
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(matches!(
            random_k_sat(2, 5, 3, &mut rng),
            Err(SearchError::Configuration(_))
        ));
        assert!(random_k_sat(2, 5, 0, &mut rng).is_err());
    }
}
