use std::fmt;

use crate::error::{Result, SearchError};
use crate::rng::RandomNumberGenerator;

use super::AnnealingProblem;

/// A placement of `rows * cols` tiles on a grid.
///
/// `tiles[position]` is the id of the tile at `position`, positions running
/// row by row. Ids are `0..rows * cols`, each used once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileArrangement {
    rows: usize,
    cols: usize,
    tiles: Vec<usize>,
}

impl TileArrangement {
    /// Tile `k` at position `k`.
    pub fn identity(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            tiles: (0..rows * cols).collect(),
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] unless `tiles` is a permutation
    /// of `0..rows * cols`.
    pub fn from_tiles(rows: usize, cols: usize, tiles: Vec<usize>) -> Result<Self> {
        if tiles.len() != rows * cols {
            return Err(SearchError::MalformedInput(format!(
                "{} tiles do not fill a {}x{} grid",
                tiles.len(),
                rows,
                cols
            )));
        }
        let mut seen = vec![false; tiles.len()];
        for &tile in &tiles {
            if tile >= tiles.len() || seen[tile] {
                return Err(SearchError::MalformedInput(format!(
                    "Tile id {} is out of range or repeated",
                    tile
                )));
            }
            seen[tile] = true;
        }
        Ok(Self { rows, cols, tiles })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    /// Tile id at grid cell `(row, col)`.
    pub fn tile_at(&self, row: usize, col: usize) -> usize {
        self.tiles[row * self.cols + col]
    }

    /// Exchanges the tiles at two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.tiles.swap(a, b);
    }

    /// Positions whose tile differs from the identity placement.
    pub fn misplaced(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(position, &tile)| *position != tile)
            .count()
    }
}

impl fmt::Display for TileArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.cols.max(1)) {
            let cells: Vec<String> = row.iter().map(|t| t.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Jigsaw-style tile placement scored by a caller-supplied energy.
///
/// Neighbors swap two distinct tiles chosen uniformly at random. The energy
/// function usually measures seams between adjacent tiles, which is the
/// caller's business; it must return a finite value.
pub struct TilingProblem<F> {
    rows: usize,
    cols: usize,
    energy: F,
}

impl<F> TilingProblem<F>
where
    F: Fn(&TileArrangement) -> f64,
{
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] for a grid with fewer than two
    /// tiles.
    pub fn new(rows: usize, cols: usize, energy: F) -> Result<Self> {
        if rows * cols < 2 {
            return Err(SearchError::MalformedInput(
                "A tiling needs at least two tiles".to_string(),
            ));
        }
        Ok(Self { rows, cols, energy })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// A uniformly shuffled arrangement.
    pub fn shuffled(&self, rng: &mut RandomNumberGenerator) -> TileArrangement {
        let mut arrangement = TileArrangement::identity(self.rows, self.cols);
        rng.shuffle(&mut arrangement.tiles);
        arrangement
    }
}

impl<F> AnnealingProblem for TilingProblem<F>
where
    F: Fn(&TileArrangement) -> f64,
{
    type State = TileArrangement;

    fn cost(&self, state: &TileArrangement) -> f64 {
        (self.energy)(state)
    }

    fn neighbor(
        &self,
        state: &TileArrangement,
        rng: &mut RandomNumberGenerator,
    ) -> TileArrangement {
        let mut next = state.clone();
        let picked = rng.distinct_indices(next.tiles.len(), 2);
        next.swap(picked[0], picked[1]);
        next
    }

    fn validate(&self, state: &TileArrangement) -> Result<()> {
        let fits = state.rows == self.rows
            && state.cols == self.cols
            && state.tiles.len() == self.rows * self.cols;
        if !fits {
            return Err(SearchError::MalformedInput(format!(
                "A {}x{} arrangement does not fit a {}x{} grid",
                state.rows, state.cols, self.rows, self.cols
            )));
        }
        Ok(())
    }
}
