use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::error::Result;
use crate::BoardConfig;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}

/// Uniform random placement: samples `floor(rows * cols * density)` distinct
/// tiles without replacement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        let grid = config.grid()?;
        let num_mines = config.mine_count();

        let mut mines: Array2<bool> = Array2::default(grid.shape());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for tile in rand::seq::index::sample(&mut rng, grid.num_tiles(), num_mines) {
            if let Some((row, col)) = grid.index_to_coords(tile) {
                mines[(row as usize, col as usize)] = true;
            }
        }

        let board = Board::from_mask(grid, mines);
        log::debug!(
            "generated {}x{} board with {} mines",
            grid.rows(),
            grid.cols(),
            board.mine_count()
        );
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("board layout:\n{}", board.render());
        }
        Ok(board)
    }
}
