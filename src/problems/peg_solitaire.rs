use std::fmt;

use crate::error::{Result, SearchError};
use crate::search::{SearchProblem, Successor};

/// Side length of the English board.
pub const SIZE: usize = 7;

const CENTER: (usize, usize) = (3, 3);

/// A board position as `(row, column)`.
pub type Position = (usize, usize);

/// Row and column offsets of a jump, in the order successors are generated.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hole {
    /// Outside the cross-shaped playing area.
    Blocked,
    Empty,
    Peg,
}

/// Whether `(row, col)` belongs to the cross of the English board.
pub fn on_board(row: usize, col: usize) -> bool {
    row < SIZE && col < SIZE && ((2..=4).contains(&row) || (2..=4).contains(&col))
}

/// A position of the English peg solitaire board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PegBoard {
    holes: [[Hole; SIZE]; SIZE],
}

impl PegBoard {
    fn with(fill: Hole) -> Self {
        let mut holes = [[Hole::Blocked; SIZE]; SIZE];
        for (row, line) in holes.iter_mut().enumerate() {
            for (col, hole) in line.iter_mut().enumerate() {
                if on_board(row, col) {
                    *hole = fill;
                }
            }
        }
        Self { holes }
    }

    /// The opening position: every hole filled except the centre.
    pub fn english() -> Self {
        let mut board = Self::with(Hole::Peg);
        board.holes[CENTER.0][CENTER.1] = Hole::Empty;
        board
    }

    /// A board with pegs exactly at `pegs`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if a position lies off the cross.
    pub fn from_pegs(pegs: &[Position]) -> Result<Self> {
        let mut board = Self::with(Hole::Empty);
        for &(row, col) in pegs {
            if !on_board(row, col) {
                return Err(SearchError::MalformedInput(format!(
                    "({}, {}) is not a hole of the English board",
                    row, col
                )));
            }
            board.holes[row][col] = Hole::Peg;
        }
        Ok(board)
    }

    pub fn hole(&self, row: usize, col: usize) -> Hole {
        if row < SIZE && col < SIZE {
            self.holes[row][col]
        } else {
            Hole::Blocked
        }
    }

    /// Positions holding a peg, row by row.
    pub fn pegs(&self) -> impl Iterator<Item = Position> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| self.holes[row][col] == Hole::Peg)
    }

    pub fn peg_count(&self) -> usize {
        self.pegs().count()
    }

    /// Applies `jump` without checking it.
    fn apply(&self, jump: &Jump) -> Self {
        let mut next = self.clone();
        next.holes[jump.from.0][jump.from.1] = Hole::Empty;
        next.holes[jump.over.0][jump.over.1] = Hole::Empty;
        next.holes[jump.to.0][jump.to.1] = Hole::Peg;
        next
    }
}

impl fmt::Display for PegBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.holes {
            let row: String = line
                .iter()
                .map(|hole| match hole {
                    Hole::Blocked => ' ',
                    Hole::Empty => '.',
                    Hole::Peg => 'o',
                })
                .collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

/// A peg at `from` jumps over the peg at `over` into the hole at `to`,
/// removing the jumped peg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Jump {
    pub from: Position,
    pub over: Position,
    pub to: Position,
}

/// Estimates of how far a board is from the single-peg goal.
///
/// Neither is admissible, so A* with them is not guaranteed to return the
/// shortest jump sequence; every solution from a given board has the same
/// length anyway, one jump per removed peg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PegHeuristic {
    /// Sum of Manhattan distances of all pegs to the centre.
    #[default]
    Manhattan,
    /// Sum of `2^d` over all pegs, `d` the Chebyshev distance to the centre.
    /// Punishes pegs stranded near the rim.
    Exponential,
}

impl PegHeuristic {
    pub fn evaluate(self, board: &PegBoard) -> f64 {
        let distances = board
            .pegs()
            .map(|(row, col)| (row.abs_diff(CENTER.0), col.abs_diff(CENTER.1)));
        match self {
            PegHeuristic::Manhattan => distances.map(|(dr, dc)| (dr + dc) as f64).sum(),
            PegHeuristic::Exponential => distances
                .map(|(dr, dc)| f64::from(1u32 << dr.max(dc)))
                .sum(),
        }
    }
}

/// Peg solitaire on the English board. The goal is a single peg in the
/// centre hole; every jump costs 1.
#[derive(Debug, Clone)]
pub struct PegSolitaire {
    start: PegBoard,
    heuristic: PegHeuristic,
}

impl PegSolitaire {
    pub fn new(start: PegBoard, heuristic: PegHeuristic) -> Self {
        Self { start, heuristic }
    }

    /// The classic game from the full board.
    pub fn english(heuristic: PegHeuristic) -> Self {
        Self::new(PegBoard::english(), heuristic)
    }

    pub fn start(&self) -> &PegBoard {
        &self.start
    }

    pub fn heuristic_kind(&self) -> PegHeuristic {
        self.heuristic
    }

    /// Every legal jump on `board`, pegs scanned row by row.
    pub fn jumps(board: &PegBoard) -> Vec<Jump> {
        let step = |(row, col): Position, (dr, dc): (isize, isize), times: isize| {
            let r = row.checked_add_signed(dr * times)?;
            let c = col.checked_add_signed(dc * times)?;
            Some((r, c))
        };

        let mut jumps = Vec::new();
        for from in board.pegs() {
            for direction in DIRECTIONS {
                let (Some(over), Some(to)) = (step(from, direction, 1), step(from, direction, 2))
                else {
                    continue;
                };
                if board.hole(over.0, over.1) == Hole::Peg && board.hole(to.0, to.1) == Hole::Empty {
                    jumps.push(Jump { from, over, to });
                }
            }
        }
        jumps
    }
}

impl SearchProblem for PegSolitaire {
    type State = PegBoard;
    type Action = Jump;

    fn initial_state(&self) -> PegBoard {
        self.start.clone()
    }

    fn is_goal(&self, state: &PegBoard) -> bool {
        let mut pegs = state.pegs();
        pegs.next() == Some(CENTER) && pegs.next().is_none()
    }

    fn successors(&self, state: &PegBoard) -> Vec<Successor<PegBoard, Jump>> {
        Self::jumps(state)
            .into_iter()
            .map(|jump| Successor::unit(state.apply(&jump), jump))
            .collect()
    }

    fn heuristic(&self, state: &PegBoard) -> f64 {
        self.heuristic.evaluate(state)
    }
}
