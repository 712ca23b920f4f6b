use std::fmt;

use crate::error::{Result, SearchError};
use crate::search::{SearchProblem, Successor};

/// One cell of the line of stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// A rabbit that can only move right.
    East,
    /// A rabbit that can only move left.
    West,
    Empty,
}

/// A rabbit moving from `from` into the empty stone at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leap {
    pub from: usize,
    pub to: usize,
}

impl Leap {
    /// Whether the rabbit jumped over a neighbor instead of stepping.
    pub fn is_jump(&self) -> bool {
        self.from.abs_diff(self.to) == 2
    }
}

/// A line of stones as the search sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line(Vec<Cell>);

impl Line {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    fn empty_index(&self) -> Option<usize> {
        self.0.iter().position(|&cell| cell == Cell::Empty)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            let c = match cell {
                Cell::East => 'E',
                Cell::West => 'W',
                Cell::Empty => '_',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The rabbit leap puzzle.
///
/// `per_side` east-bound rabbits sit left of a single empty stone and as many
/// west-bound rabbits sit right of it. A rabbit may step forward into the
/// empty stone or jump over one rabbit into it; nobody moves backwards. The
/// goal is the mirrored line. Every move costs 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabbitLeap {
    per_side: usize,
}

impl RabbitLeap {
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if `per_side` is 0.
    pub fn new(per_side: usize) -> Result<Self> {
        if per_side == 0 {
            return Err(SearchError::MalformedInput(
                "At least one rabbit per side is required".to_string(),
            ));
        }
        Ok(Self { per_side })
    }

    pub fn per_side(&self) -> usize {
        self.per_side
    }

    /// Length of the shortest solution: every pair of opposing rabbits
    /// crosses by exactly one jump, plus one step per rabbit.
    pub fn optimal_moves(&self) -> usize {
        self.per_side * self.per_side + 2 * self.per_side
    }

    fn line(&self, left: Cell, right: Cell) -> Line {
        let mut cells = vec![left; self.per_side];
        cells.push(Cell::Empty);
        cells.extend(std::iter::repeat(right).take(self.per_side));
        Line(cells)
    }

    pub fn start(&self) -> Line {
        self.line(Cell::East, Cell::West)
    }

    pub fn goal(&self) -> Line {
        self.line(Cell::West, Cell::East)
    }
}

impl SearchProblem for RabbitLeap {
    type State = Line;
    type Action = Leap;

    fn initial_state(&self) -> Line {
        self.start()
    }

    fn is_goal(&self, state: &Line) -> bool {
        *state == self.goal()
    }

    fn successors(&self, state: &Line) -> Vec<Successor<Line, Leap>> {
        let Some(empty) = state.empty_index() else {
            return Vec::new();
        };
        let cells = state.cells();
        let len = cells.len();

        // Steps before jumps, east-bound before west-bound.
        let candidates = [
            empty.checked_sub(1).filter(|&i| cells[i] == Cell::East),
            Some(empty + 1).filter(|&i| i < len && cells[i] == Cell::West),
            empty.checked_sub(2).filter(|&i| cells[i] == Cell::East),
            Some(empty + 2).filter(|&i| i < len && cells[i] == Cell::West),
        ];

        candidates
            .into_iter()
            .flatten()
            .map(|from| {
                let mut next = state.clone();
                next.0.swap(from, empty);
                Successor::unit(next, Leap { from, to: empty })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{iterative_deepening, search, FrontierPolicy};

    #[test]
    fn test_start_and_goal_lines() {
        let puzzle = RabbitLeap::new(3).unwrap();
        assert_eq!(puzzle.start().to_string(), "EEE_WWW");
        assert_eq!(puzzle.goal().to_string(), "WWW_EEE");
        assert!(RabbitLeap::new(0).is_err());
    }

    #[test]
    fn test_opening_moves() {
        let puzzle = RabbitLeap::new(3).unwrap();
        let successors = puzzle.successors(&puzzle.start());
        let leaps: Vec<Leap> = successors.iter().map(|s| s.action).collect();
        assert_eq!(
            leaps,
            vec![
                Leap { from: 2, to: 3 },
                Leap { from: 4, to: 3 },
                Leap { from: 1, to: 3 },
                Leap { from: 5, to: 3 },
            ]
        );
        assert_eq!(successors[0].state.to_string(), "EE_EWWW");
        assert!(leaps[2].is_jump());
        assert!(!leaps[0].is_jump());
    }

    #[test]
    fn test_rabbits_never_move_backwards() {
        let puzzle = RabbitLeap::new(2).unwrap();
        // Both neighbors of the gap face away from it; only the W jump is legal.
        let line = Line(vec![Cell::West, Cell::Empty, Cell::East, Cell::West, Cell::East]);
        let leaps: Vec<Leap> = puzzle.successors(&line).into_iter().map(|s| s.action).collect();
        assert_eq!(leaps, vec![Leap { from: 3, to: 1 }]);
    }

    #[test]
    fn test_breadth_first_solves_in_optimal_moves() {
        let puzzle = RabbitLeap::new(3).unwrap();
        let outcome = search(&puzzle, FrontierPolicy::BreadthFirst).unwrap();
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.len(), 15);
        assert_eq!(solution.len(), puzzle.optimal_moves());
        assert_eq!(solution.goal(), Some(&puzzle.goal()));
        assert_eq!(solution.actions.iter().filter(|l| l.is_jump()).count(), 9);
    }

    #[test]
    fn test_every_solution_has_the_same_length() {
        let puzzle = RabbitLeap::new(2).unwrap();
        let dfs = search(&puzzle, FrontierPolicy::DepthFirst).unwrap();
        let ids = iterative_deepening(&puzzle).unwrap();
        assert_eq!(dfs.solution().unwrap().len(), 8);
        assert_eq!(ids.solution().unwrap().len(), 8);
    }
}
