//! # Boolean Satisfiability
//!
//! CNF formulas, assignments, and the objectives the local searches minimize.
//!
//! Literals follow the DIMACS convention: variable `v` (1-indexed) appears as
//! `v` when positive and `-v` when negated. Assignments are 0-indexed, so
//! literal `v` reads `assignment[v - 1]`.
//!
//! ## Example
//!
//! ```rust
//! use searchlab::sat::{Assignment, Formula};
//!
//! // (x1 ∨ ¬x2) ∧ (x2 ∨ x3)
//! let formula = Formula::new(3, vec![vec![1, -2], vec![2, 3]]).unwrap();
//! let assignment = Assignment::from(vec![false, true, false]);
//!
//! assert_eq!(formula.unsatisfied_count(&assignment), 1);
//! ```

pub mod generator;

use std::fmt;

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;

pub use generator::random_k_sat;

/// A non-zero variable reference with polarity.
pub type Literal = i32;

/// A disjunction of literals.
pub type Clause = Vec<Literal>;

/// A truth value per variable, 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment(Vec<bool>);

impl Assignment {
    /// Every variable set independently by a fair coin.
    pub fn random(num_vars: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self((0..num_vars).map(|_| rng.coin()).collect())
    }

    /// Every variable set to `false`.
    pub fn all_false(num_vars: usize) -> Self {
        Self(vec![false; num_vars])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the variable at 0-based `index`.
    pub fn get(&self, index: usize) -> bool {
        self.0[index]
    }

    /// Negates the variable at 0-based `index`.
    pub fn flip(&mut self, index: usize) {
        self.0[index] = !self.0[index];
    }

    /// A copy with every index in `indices` flipped.
    pub fn flipped(&self, indices: &[usize]) -> Self {
        let mut next = self.clone();
        for &i in indices {
            next.flip(i);
        }
        next
    }

    /// Whether `literal` is true under this assignment.
    pub fn satisfies(&self, literal: Literal) -> bool {
        let value = self.0[literal.unsigned_abs() as usize - 1];
        if literal > 0 {
            value
        } else {
            !value
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

}

impl From<Vec<bool>> for Assignment {
    fn from(values: Vec<bool>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &value in &self.0 {
            f.write_str(if value { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A CNF formula over `num_vars` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formula {
    num_vars: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    /// Builds a formula, checking every literal.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if a clause is empty, contains
    /// the literal `0`, or names a variable greater than `num_vars`.
    pub fn new(num_vars: usize, clauses: Vec<Clause>) -> Result<Self> {
        for (idx, clause) in clauses.iter().enumerate() {
            if clause.is_empty() {
                return Err(SearchError::MalformedInput(format!(
                    "Clause {} is empty",
                    idx
                )));
            }
            for &literal in clause {
                let var = literal.unsigned_abs() as usize;
                if var == 0 || var > num_vars {
                    return Err(SearchError::MalformedInput(format!(
                        "Literal {} in clause {} is outside variables 1..={}",
                        literal, idx, num_vars
                    )));
                }
            }
        }
        Ok(Self { num_vars, clauses })
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Whether clause `index` has at least one true literal.
    pub fn clause_satisfied(&self, index: usize, assignment: &Assignment) -> bool {
        self.clauses[index]
            .iter()
            .any(|&literal| assignment.satisfies(literal))
    }

    /// Indices of the clauses with no true literal.
    pub fn unsatisfied_clauses<'a>(
        &'a self,
        assignment: &'a Assignment,
    ) -> impl Iterator<Item = usize> + 'a {
        (0..self.clauses.len()).filter(move |&idx| !self.clause_satisfied(idx, assignment))
    }

    /// Number of clauses with no true literal; zero means satisfied.
    pub fn unsatisfied_count(&self, assignment: &Assignment) -> usize {
        self.unsatisfied_clauses(assignment).count()
    }

    /// Sum of the weights of the clauses with no true literal.
    pub fn weighted_unsatisfied(&self, assignment: &Assignment, weights: &ClauseWeights) -> u64 {
        self.unsatisfied_clauses(assignment)
            .map(|idx| weights.get(idx))
            .sum()
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.unsatisfied_count(assignment) == 0
    }
}

/// A positive weight per clause, all starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClauseWeights(Vec<u64>);

impl ClauseWeights {
    pub fn new(num_clauses: usize) -> Self {
        Self(vec![1; num_clauses])
    }

    pub fn get(&self, index: usize) -> u64 {
        self.0[index]
    }

    /// Adds one to the weight of every clause `assignment` leaves unsatisfied.
    pub fn bump_unsatisfied(&mut self, formula: &Formula, assignment: &Assignment) {
        for idx in formula.unsatisfied_clauses(assignment) {
            self.0[idx] += 1;
        }
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}
