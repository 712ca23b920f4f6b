pub mod annealing;
pub mod error;
pub mod local_search;
pub mod problems;
pub mod rng;
pub mod sat;
pub mod search;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, SearchError};
pub use rng::RandomNumberGenerator;
pub use search::{search, FrontierPolicy, SearchOutcome, SearchProblem, Solution};
