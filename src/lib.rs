//! Server-side Minesweeper board engine.
//!
//! The crate owns the board: mine layout generation, flood-fill reveals,
//! flag tracking, win/loss detection, and single-step undo. It speaks in
//! plain commands and deltas; HTTP, sockets, and storage belong to the
//! host. A [`Game`] instance is single-threaded and synchronous, so hosts
//! embedding it in a concurrent process must serialize commands per game.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use history::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod grid;
mod history;
mod types;

/// Board dimensions and mine density for one round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mine_density: f64,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mine_density: f64) -> Self {
        Self {
            rows,
            cols,
            mine_density,
        }
    }

    pub fn new(rows: Coord, cols: Coord, mine_density: f64) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mine_density);
        config.validate()?;
        Ok(config)
    }

    /// An unplayable board is a configuration bug, not a runtime guard
    /// case.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        if !(0.0..=1.0).contains(&self.mine_density) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid> {
        self.validate()?;
        Grid::new(self.rows, self.cols)
    }

    pub fn num_tiles(&self) -> usize {
        mult(self.rows, self.cols)
    }

    /// Exactly `floor(rows * cols * mine_density)`.
    pub fn mine_count(&self) -> usize {
        (self.num_tiles() as f64 * self.mine_density).floor() as usize
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const fn preset(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(8, 8, 0.16),
            Self::Normal => BoardConfig::new_unchecked(10, 10, 0.25),
            Self::Hard => BoardConfig::new_unchecked(13, 13, 0.40),
        }
    }
}

impl FromStr for Difficulty {
    type Err = Infallible;

    /// Unknown selectors fall back to `Normal`.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(match s {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Normal,
        })
    }
}
