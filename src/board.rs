use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::types::Tile;

/// Count stored for every mine tile. A mine's true neighbor count is never
/// exposed.
pub const MINE_COUNT: i8 = -1;

/// Immutable mine layout plus the per-tile adjacent-mine counts, both fixed
/// at generation time for the lifetime of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    mines: Array2<bool>,
    counts: Array2<i8>,
    mine_count: usize,
}

impl Board {
    /// Builds a board with mines forced at the given tiles. Used for
    /// deterministic layouts in tests and replays.
    pub fn with_mines(grid: Grid, mine_tiles: &[Tile]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(grid.shape());

        for &tile in mine_tiles {
            let (row, col) = grid.index_to_coords(tile).ok_or(GameError::InvalidTile)?;
            mines[(row as usize, col as usize)] = true;
        }

        Ok(Self::from_mask(grid, mines))
    }

    pub(crate) fn from_mask(grid: Grid, mines: Array2<bool>) -> Self {
        let mut counts: Array2<i8> = Array2::zeros(grid.shape());

        for (tile, &is_mine) in mines.iter().enumerate() {
            if !is_mine {
                continue;
            }
            for neighbor in grid.iter_neighbors(tile) {
                if let Some((row, col)) = grid.index_to_coords(neighbor) {
                    counts[(row as usize, col as usize)] += 1;
                }
            }
        }
        for (tile, &is_mine) in mines.iter().enumerate() {
            if !is_mine {
                continue;
            }
            if let Some((row, col)) = grid.index_to_coords(tile) {
                counts[(row as usize, col as usize)] = MINE_COUNT;
            }
        }

        let mine_count = mines.iter().filter(|&&is_mine| is_mine).count();
        Self {
            grid,
            mines,
            counts,
            mine_count,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn num_tiles(&self) -> usize {
        self.grid.num_tiles()
    }

    pub const fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.grid.contains(tile)
    }

    /// `false` for out-of-range tiles.
    pub fn is_mine(&self, tile: Tile) -> bool {
        match self.grid.index_to_coords(tile) {
            Some((row, col)) => self.mines[(row as usize, col as usize)],
            None => false,
        }
    }

    /// Defined iff `tile` is in range; `MINE_COUNT` for mine tiles.
    pub fn count(&self, tile: Tile) -> Option<i8> {
        let (row, col) = self.grid.index_to_coords(tile)?;
        Some(self.counts[(row as usize, col as usize)])
    }

    /// Mine tiles in ascending index order. Row-major array iteration
    /// coincides with the tile-index order.
    pub fn mine_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.mines
            .iter()
            .enumerate()
            .filter_map(|(tile, &is_mine)| is_mine.then_some(tile))
    }

    /// Non-mine tiles in ascending index order.
    pub fn safe_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.mines
            .iter()
            .enumerate()
            .filter_map(|(tile, &is_mine)| (!is_mine).then_some(tile))
    }

    /// ASCII render of the full layout, `x` for mines and the digit count
    /// otherwise. Emitted at trace level after generation.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                match self.counts[(row as usize, col as usize)] {
                    MINE_COUNT => out.push('x'),
                    count => out.push((b'0' + count as u8) as char),
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: u16, cols: u16) -> Grid {
        Grid::new(rows, cols).unwrap()
    }

    #[test]
    fn center_mine_bumps_all_eight_neighbors() {
        let board = Board::with_mines(grid(3, 3), &[4]).unwrap();

        assert_eq!(board.count(4), Some(MINE_COUNT));
        for tile in [0, 1, 2, 3, 5, 6, 7, 8] {
            assert_eq!(board.count(tile), Some(1));
        }
    }

    #[test]
    fn corner_mine_counts_are_boundary_clipped() {
        let board = Board::with_mines(grid(3, 3), &[8]).unwrap();

        assert_eq!(board.count(8), Some(MINE_COUNT));
        assert_eq!(board.count(4), Some(1));
        assert_eq!(board.count(5), Some(1));
        assert_eq!(board.count(7), Some(1));
        for tile in [0, 1, 2, 3, 6] {
            assert_eq!(board.count(tile), Some(0));
        }
    }

    #[test]
    fn adjacent_mines_accumulate() {
        let board = Board::with_mines(grid(2, 3), &[0, 2]).unwrap();

        assert_eq!(board.count(1), Some(2));
        assert_eq!(board.count(4), Some(2));
        assert_eq!(board.count(3), Some(1));
        assert_eq!(board.count(5), Some(1));
    }

    #[test]
    fn rejects_out_of_range_mine() {
        let err = Board::with_mines(grid(2, 2), &[4]).unwrap_err();
        assert_eq!(err, GameError::InvalidTile);
    }

    #[test]
    fn mine_and_safe_tiles_partition_the_board() {
        let board = Board::with_mines(grid(2, 2), &[1, 2]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.mine_tiles().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(board.safe_tiles().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn count_is_undefined_out_of_range() {
        let board = Board::with_mines(grid(2, 2), &[]).unwrap();
        assert_eq!(board.count(4), None);
        assert!(!board.is_mine(4));
    }

    #[test]
    fn render_marks_mines_and_counts() {
        let board = Board::with_mines(grid(2, 2), &[0]).unwrap();
        assert_eq!(board.render(), "x1\n11\n");
    }
}
