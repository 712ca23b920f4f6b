use std::fmt;

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;
use crate::search::{SearchProblem, Successor};

/// Side length of the board.
pub const WIDTH: usize = 3;

/// Tiles in row-major order; `0` is the blank.
pub type Board = [u8; WIDTH * WIDTH];

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slide {
    Left,
    Right,
    Up,
    Down,
}

impl Slide {
    /// Every slide, in the order successors are generated.
    pub const ALL: [Slide; 4] = [Slide::Left, Slide::Right, Slide::Up, Slide::Down];

    /// Where the blank lands when it slides from `blank`, if still on the board.
    fn target(self, blank: usize) -> Option<usize> {
        let (row, col) = (blank / WIDTH, blank % WIDTH);
        match self {
            Slide::Left if col > 0 => Some(blank - 1),
            Slide::Right if col + 1 < WIDTH => Some(blank + 1),
            Slide::Up if row > 0 => Some(blank - WIDTH),
            Slide::Down if row + 1 < WIDTH => Some(blank + WIDTH),
            _ => None,
        }
    }
}

/// Moves the blank of `board` one cell, or `None` if it would leave the board.
pub fn slide(board: &Board, direction: Slide) -> Option<Board> {
    let blank = blank_of(board);
    direction.target(blank).map(|target| {
        let mut next = *board;
        next.swap(blank, target);
        next
    })
}

/// The board reached by `moves` uniformly random slides from `from`.
pub fn scramble(from: Board, moves: usize, rng: &mut RandomNumberGenerator) -> Board {
    let mut board = from;
    for _ in 0..moves {
        let options: Vec<Board> = Slide::ALL
            .iter()
            .filter_map(|&direction| slide(&board, direction))
            .collect();
        if let Some(next) = rng.choose(&options) {
            board = *next;
        }
    }
    board
}

/// Sum over all tiles of the grid distance to their place in `goal`.
pub fn manhattan(board: &Board, goal: &Board) -> f64 {
    let mut home = [0usize; WIDTH * WIDTH];
    for (position, &tile) in goal.iter().enumerate() {
        home[tile as usize] = position;
    }
    board
        .iter()
        .enumerate()
        .filter(|(_, &tile)| tile != 0)
        .map(|(position, &tile)| {
            let target = home[tile as usize];
            (position / WIDTH).abs_diff(target / WIDTH) + (position % WIDTH).abs_diff(target % WIDTH)
        })
        .sum::<usize>() as f64
}

fn blank_of(board: &Board) -> usize {
    board.iter().position(|&tile| tile == 0).unwrap_or(0)
}

fn validate(board: &Board, which: &str) -> Result<()> {
    let mut seen = [false; WIDTH * WIDTH];
    for &tile in board {
        let index = tile as usize;
        if index >= seen.len() || seen[index] {
            return Err(SearchError::MalformedInput(format!(
                "{} board {:?} is not a permutation of 0..{}",
                which,
                board,
                seen.len()
            )));
        }
        seen[index] = true;
    }
    Ok(())
}

fn inversions(board: &Board) -> usize {
    let tiles: Vec<u8> = board.iter().copied().filter(|&t| t != 0).collect();
    let mut count = 0;
    for (i, a) in tiles.iter().enumerate() {
        count += tiles[i + 1..].iter().filter(|b| *b < a).count();
    }
    count
}

/// The 8-puzzle: slide tiles into the blank until the board matches `goal`.
///
/// Slides have unit cost and the heuristic is the Manhattan distance to the
/// goal, which never overestimates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingPuzzle {
    start: Board,
    goal: Board,
}

impl SlidingPuzzle {
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if either board is not a
    /// permutation of `0..9`.
    pub fn new(start: Board, goal: Board) -> Result<Self> {
        validate(&start, "Start")?;
        validate(&goal, "Goal")?;
        Ok(Self { start, goal })
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    /// Whether the goal is reachable at all. On an odd-width board a slide
    /// never changes the parity of the tile inversion count.
    pub fn is_solvable(&self) -> bool {
        inversions(&self.start) % 2 == inversions(&self.goal) % 2
    }
}

impl SearchProblem for SlidingPuzzle {
    type State = Board;
    type Action = Slide;

    fn initial_state(&self) -> Board {
        self.start
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Board) -> Vec<Successor<Board, Slide>> {
        Slide::ALL
            .iter()
            .filter_map(|&direction| {
                slide(state, direction).map(|next| Successor::unit(next, direction))
            })
            .collect()
    }

    fn heuristic(&self, state: &Board) -> f64 {
        manhattan(state, &self.goal)
    }
}

/// Prints a board as three rows, the blank as `_`.
pub struct BoardDisplay<'a>(pub &'a Board);

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(WIDTH) {
            let cells: Vec<String> = row
                .iter()
                .map(|&t| if t == 0 { "_".to_string() } else { t.to_string() })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{iterative_deepening, search, FrontierPolicy};

    const SOLVED: Board = [1, 2, 3, 4, 5, 6, 7, 8, 0];

    #[test]
    fn test_slide_respects_edges() {
        // Blank in the top-left corner.
        let board = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(slide(&board, Slide::Left), None);
        assert_eq!(slide(&board, Slide::Up), None);
        assert_eq!(slide(&board, Slide::Right), Some([1, 0, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(slide(&board, Slide::Down), Some([3, 1, 2, 0, 4, 5, 6, 7, 8]));

        // Blank at the end of the first row must not wrap to the second.
        let board = [1, 2, 0, 3, 4, 5, 6, 7, 8];
        assert_eq!(slide(&board, Slide::Right), None);
    }

    #[test]
    fn test_successor_order() {
        let puzzle = SlidingPuzzle::new([1, 2, 3, 4, 0, 5, 6, 7, 8], SOLVED).unwrap();
        let actions: Vec<Slide> = puzzle
            .successors(puzzle.start())
            .into_iter()
            .map(|s| s.action)
            .collect();
        assert_eq!(actions, Slide::ALL.to_vec());
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(&SOLVED, &SOLVED), 0.0);
        assert_eq!(manhattan(&[1, 2, 3, 4, 5, 6, 7, 0, 8], &SOLVED), 1.0);
        // 8 and 1 swapped: 3 + 3, blank ignored.
        assert_eq!(manhattan(&[8, 2, 3, 4, 5, 6, 7, 1, 0], &SOLVED), 6.0);
    }

    #[test]
    fn test_rejects_invalid_boards() {
        assert!(SlidingPuzzle::new([1, 1, 3, 4, 5, 6, 7, 8, 0], SOLVED).is_err());
        assert!(matches!(
            SlidingPuzzle::new(SOLVED, [1, 2, 3, 4, 5, 6, 7, 8, 9]),
            Err(SearchError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_solvability_parity() {
        let solvable = SlidingPuzzle::new([1, 2, 3, 4, 5, 6, 0, 7, 8], SOLVED).unwrap();
        assert!(solvable.is_solvable());
        let swapped = SlidingPuzzle::new([2, 1, 3, 4, 5, 6, 7, 8, 0], SOLVED).unwrap();
        assert!(!swapped.is_solvable());
    }

    #[test]
    fn test_scramble_stays_within_move_count() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        for moves in 0..6 {
            let goal = scramble(SOLVED, moves, &mut rng);
            let puzzle = SlidingPuzzle::new(SOLVED, goal).unwrap();
            let outcome = search(&puzzle, FrontierPolicy::BreadthFirst).unwrap();
            let solution = outcome.solution().unwrap();
            assert!(solution.len() <= moves);
            assert_eq!(solution.len() % 2, moves % 2, "blank parity is preserved");
        }
    }

    #[test]
    fn test_policies_agree_on_optimal_length() {
        let puzzle = SlidingPuzzle::new([1, 2, 3, 0, 4, 6, 7, 5, 8], SOLVED).unwrap();
        let bfs = search(&puzzle, FrontierPolicy::BreadthFirst).unwrap();
        let ucs = search(&puzzle, FrontierPolicy::UniformCost).unwrap();
        let astar = search(&puzzle, FrontierPolicy::AStar).unwrap();
        let ids = iterative_deepening(&puzzle).unwrap();

        assert_eq!(bfs.solution().unwrap().len(), 3);
        assert_eq!(ucs.solution().unwrap().path_cost, 3.0);
        assert_eq!(astar.solution().unwrap().len(), 3);
        assert_eq!(ids.solution().unwrap().len(), 3);
        assert!(astar.stats().nodes_explored <= bfs.stats().nodes_explored);
    }

    #[test]
    fn test_board_display() {
        let shown = BoardDisplay(&[1, 2, 3, 4, 0, 5, 6, 7, 8]).to_string();
        assert_eq!(shown, "1 2 3\n4 _ 5\n6 7 8\n");
    }
}
