//! # Problems
//!
//! Ready-made [`SearchProblem`](crate::search::SearchProblem)s:
//!
//! - [`SlidingPuzzle`]: the 8-puzzle, with a Manhattan-distance heuristic.
//! - [`RabbitLeap`]: two files of rabbits crossing a line of stones.
//! - [`PegSolitaire`]: the English board, with a choice of [`PegHeuristic`].
//! - [`SentenceAlignment`]: A* alignment of two documents, plus plagiarism
//!   screening of the aligned sentences.
//! - [`MissionariesCannibals`]: the river-crossing puzzle.
//! - [`ExplicitGraph`]: route finding on a hand-built weighted graph.
//!
//! ## Example
//!
//! ```rust
//! use searchlab::problems::RabbitLeap;
//! use searchlab::search::{search, FrontierPolicy};
//!
//! let puzzle = RabbitLeap::new(3).unwrap();
//! let outcome = search(&puzzle, FrontierPolicy::BreadthFirst).unwrap();
//! assert_eq!(outcome.solution().unwrap().len(), 15);
//! ```

pub mod alignment;
pub mod graph;
pub mod missionaries;
pub mod peg_solitaire;
pub mod rabbit_leap;
pub mod sliding_puzzle;

pub use alignment::{
    compare_documents, detect_plagiarism, levenshtein, split_sentences, AlignMove, AlignedPair,
    PlagiarismMatch, PlagiarismThresholds, SentenceAlignment,
};
pub use graph::{ExplicitGraph, Route};
pub use missionaries::{Bank, Crossing, MissionariesCannibals, RiverState};
pub use peg_solitaire::{Hole, Jump, PegBoard, PegHeuristic, PegSolitaire};
pub use rabbit_leap::{Cell, Leap, Line, RabbitLeap};
pub use sliding_puzzle::{manhattan, scramble, slide, Board, BoardDisplay, Slide, SlidingPuzzle};
