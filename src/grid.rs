use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{mult, Coord, Tile};

const ADJACENT: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Board dimensions plus the bidirectional mapping between linear tile
/// indices and `(row, col)` pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Coord,
    cols: Coord,
}

impl Grid {
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self { rows, cols })
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn num_tiles(&self) -> usize {
        mult(self.rows, self.cols)
    }

    pub const fn is_valid(&self, row: Coord, col: Coord) -> bool {
        row < self.rows && col < self.cols
    }

    pub const fn contains(&self, tile: Tile) -> bool {
        tile < self.num_tiles()
    }

    /// Defined iff `tile` is in `[0, num_tiles)`.
    pub fn index_to_coords(&self, tile: Tile) -> Option<(Coord, Coord)> {
        if !self.contains(tile) {
            return None;
        }
        let cols = self.cols as usize;
        Some(((tile / cols) as Coord, (tile % cols) as Coord))
    }

    /// Defined iff `(row, col)` is in bounds.
    pub fn coords_to_index(&self, row: Coord, col: Coord) -> Option<Tile> {
        if !self.is_valid(row, col) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// The up-to-8 surrounding tiles, clipped at the boundary.
    pub fn iter_neighbors(&self, tile: Tile) -> NeighborIter {
        NeighborIter::new(*self, tile, &ADJACENT)
    }

    /// The up-to-4 orthogonal tiles (no diagonals), clipped at the boundary.
    pub fn iter_orthogonal(&self, tile: Tile) -> NeighborIter {
        NeighborIter::new(*self, tile, &ORTHOGONAL)
    }

    pub(crate) fn shape(&self) -> (usize, usize) {
        (self.rows as usize, self.cols as usize)
    }
}

/// Applies `delta` to `coords`, returning a tile only when it remains in bounds.
fn apply_delta(grid: &Grid, (row, col): (Coord, Coord), (dr, dc): (isize, isize)) -> Option<Tile> {
    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    grid.coords_to_index(next_row, next_col)
}

#[derive(Debug)]
pub struct NeighborIter {
    grid: Grid,
    center: Option<(Coord, Coord)>,
    table: &'static [(isize, isize)],
    index: usize,
}

impl NeighborIter {
    fn new(grid: Grid, tile: Tile, table: &'static [(isize, isize)]) -> Self {
        Self {
            grid,
            center: grid.index_to_coords(tile),
            table,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let center = self.center?;
        loop {
            let delta = *self.table.get(self.index)?;
            self.index += 1;

            if let Some(tile) = apply_delta(&self.grid, center, delta) {
                return Some(tile);
            }
        }
    }
}
