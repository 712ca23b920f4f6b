//! # State-Space Search
//!
//! A generic search engine over any [`SearchProblem`]: a start state, a goal
//! test, a successor function, and, for informed policies, a heuristic.
//!
//! The ordering of the frontier selects the algorithm:
//!
//! | Policy                              | Frontier            | Algorithm            |
//! |-------------------------------------|---------------------|----------------------|
//! | [`FrontierPolicy::BreadthFirst`]    | FIFO queue          | breadth-first search |
//! | [`FrontierPolicy::DepthFirst`]      | LIFO stack          | depth-first search   |
//! | [`FrontierPolicy::UniformCost`]     | min-heap on g       | uniform-cost search  |
//! | [`FrontierPolicy::AStar`]           | min-heap on g + h   | A*                   |
//! | [`FrontierPolicy::GreedyBestFirst`] | min-heap on h       | greedy best-first    |
//!
//! [`SearchEngine::iterative_deepening`] runs depth-limited depth-first
//! searches with growing limits instead.
//!
//! Duplicate detection is lazy: children are pushed even if their state was
//! already expanded, and such entries are discarded when they are popped. Only
//! the first expansion of a state counts toward
//! [`SearchStats::nodes_explored`].
//!
//! ## Example
//!
//! ```rust
//! use searchlab::search::{search, FrontierPolicy};
//! use searchlab::problems::SlidingPuzzle;
//!
//! let puzzle = SlidingPuzzle::new(
//!     [1, 2, 3, 4, 5, 6, 7, 0, 8],
//!     [1, 2, 3, 4, 5, 6, 7, 8, 0],
//! ).unwrap();
//!
//! let outcome = search(&puzzle, FrontierPolicy::AStar).unwrap();
//! assert_eq!(outcome.solution().unwrap().len(), 1);
//! ```

pub mod engine;
pub mod frontier;
pub mod node;
pub mod problem;
pub mod solution;

pub use engine::{iterative_deepening, search, SearchEngine, SearchOptions};
pub use frontier::{FifoFrontier, Frontier, FrontierPolicy, LifoFrontier, PriorityFrontier};
pub use node::{NodeArena, NodeId, SearchNode};
pub use problem::{FnProblem, SearchProblem, Successor};
pub use solution::{SearchOutcome, SearchStats, Solution};
