//! # Error Types
//!
//! This module defines the error type shared by every algorithm in the crate.
//!
//! Running out of frontier, steps, or temperature is *not* an error: graph
//! searches report it through [`SearchOutcome::NotFound`] and local searches
//! through an unsuccessful result. `SearchError` is reserved for inputs the
//! algorithms cannot work with, such as a negative step cost or a literal that
//! names a variable the formula does not have.
//!
//! [`SearchOutcome::NotFound`]: crate::search::SearchOutcome::NotFound
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use searchlab::error::{Result, SearchError};
//!
//! fn check_budget(steps: usize) -> Result<usize> {
//!     if steps == 0 {
//!         return Err(SearchError::Configuration("step budget must be positive".into()));
//!     }
//!     Ok(steps)
//! }
//!
//! assert!(check_budget(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use searchlab::error::{OptionExt, SearchError};
//!
//! fn first_tile(tiles: &[usize]) -> searchlab::error::Result<usize> {
//!     tiles.first().copied().ok_or_else_search(|| {
//!         SearchError::MalformedInput("empty arrangement".to_string())
//!     })
//! }
//!
//! assert_eq!(first_tile(&[3, 1]).unwrap(), 3);
//! ```

use thiserror::Error;

/// Represents errors that can occur while setting up or running a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The problem handed to an algorithm is structurally invalid: a negative or
    /// non-finite step cost, a negative heuristic, a literal outside the
    /// formula's variables, a non-square distance matrix, and so on.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An algorithm was configured with parameters it cannot run with.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A cost or energy evaluated to NaN or infinity.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A run ended in a state its caller treats as impossible.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, SearchError>` using
    /// a closure to generate the error.
    fn ok_or_else_search<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SearchError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_search<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SearchError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Fails with [`SearchError::InvalidNumericValue`] when `value` is NaN or infinite.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SearchError::InvalidNumericValue(format!(
            "{} evaluated to {}",
            what, value
        )))
    }
}
