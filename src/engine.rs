use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::{Board, MINE_COUNT};
use crate::error::Result;
use crate::generator::{BoardGenerator, RandomBoardGenerator};
use crate::history::{ActionKind, ActionLog, ActionRecord};
use crate::types::{Coord, Tile};
use crate::{BoardConfig, Difficulty};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Ongoing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Wire code: ongoing 0, won 1, lost -1.
    pub const fn code(self) -> i8 {
        match self {
            Self::Ongoing => 0,
            Self::Won => 1,
            Self::Lost => -1,
        }
    }
}

/// What a single command changed. A failed guard yields the empty delta,
/// which serializes to `{}`; redundant clicks are harmless, not errors.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Delta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub revealed: Vec<Tile>,
    /// Per-tile counts parallel to `revealed`; mines show `MINE_COUNT`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub count: Vec<i8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flagged: Vec<Tile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unflagged: Vec<Tile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub covered: Vec<Tile>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full state snapshot for the delivery layer; `count` is parallel to
/// `revealed`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub num_rows: Coord,
    pub num_cols: Coord,
    pub game_status: GameStatus,
    pub flagged: Vec<Tile>,
    pub revealed: Vec<Tile>,
    pub count: Vec<i8>,
    pub mines: Vec<Tile>,
}

/// One round of play. Owns its board, tile sets, and action history
/// exclusively; the host serializes access per instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    flagged: BTreeSet<Tile>,
    revealed: BTreeSet<Tile>,
    active: BTreeSet<Tile>,
    status: GameStatus,
    history: ActionLog,
}

impl Game {
    /// Starts a fresh game at a preset difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty.preset()).expect("difficulty presets are always playable")
    }

    /// Starts a fresh game on a custom board configuration.
    pub fn with_config(config: BoardConfig) -> Result<Self> {
        Self::generate(config, RandomBoardGenerator::new(rand::random()))
    }

    pub fn generate(config: BoardConfig, generator: impl BoardGenerator) -> Result<Self> {
        Ok(Self::from_board(generator.generate(config)?))
    }

    /// Wraps an existing board in a fresh game: empty sets, cleared
    /// history, status ongoing.
    pub fn from_board(board: Board) -> Self {
        let active = board.safe_tiles().collect();
        Self {
            board,
            flagged: BTreeSet::new(),
            revealed: BTreeSet::new(),
            active,
            status: GameStatus::Ongoing,
            history: ActionLog::default(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[ActionRecord] {
        self.history.as_slice()
    }

    pub fn is_flagged(&self, tile: Tile) -> bool {
        self.flagged.contains(&tile)
    }

    pub fn is_revealed(&self, tile: Tile) -> bool {
        self.revealed.contains(&tile)
    }

    /// Reveals a tile. A mine hit uncovers the entire mine set and loses
    /// the game; otherwise the flood fill runs and emptying the active set
    /// wins it.
    pub fn reveal(&mut self, tile: Tile) -> Delta {
        if !self.status.is_ongoing()
            || !self.board.contains(tile)
            || self.flagged.contains(&tile)
            || self.revealed.contains(&tile)
        {
            return Delta::default();
        }

        let revealed = if self.board.is_mine(tile) {
            self.status = GameStatus::Lost;
            self.board.mine_tiles().collect()
        } else {
            let revealed = match self.board.count(tile) {
                Some(count) if count > 0 => vec![tile],
                _ => self.flood_fill(tile),
            };
            for uncovered in &revealed {
                self.active.remove(uncovered);
            }
            if self.active.is_empty() {
                self.status = GameStatus::Won;
            }
            revealed
        };

        let count = revealed
            .iter()
            .map(|&uncovered| self.board.count(uncovered).unwrap_or(MINE_COUNT))
            .collect();
        self.revealed.extend(revealed.iter().copied());
        self.history.push(ActionRecord::reveal(tile, revealed.clone()));

        Delta {
            status: Some(self.status),
            revealed,
            count,
            ..Delta::default()
        }
    }

    /// Flags an uncovered tile, or lifts the flag if one is already set.
    pub fn toggle_flag(&mut self, tile: Tile) -> Delta {
        if !self.status.is_ongoing()
            || !self.board.contains(tile)
            || self.revealed.contains(&tile)
        {
            return Delta::default();
        }

        if self.flagged.insert(tile) {
            self.history.push(ActionRecord::flag(tile));
            Delta {
                status: Some(self.status),
                flagged: vec![tile],
                ..Delta::default()
            }
        } else {
            self.flagged.remove(&tile);
            self.history.push(ActionRecord::unflag(tile));
            Delta {
                status: Some(self.status),
                unflagged: vec![tile],
                ..Delta::default()
            }
        }
    }

    /// Inverts the most recent action, if any. Not guarded by game status:
    /// undoing the reveal that ended a game revives it to ongoing.
    pub fn undo(&mut self) -> Delta {
        let Some(record) = self.history.pop() else {
            return Delta::default();
        };

        match record.kind {
            ActionKind::Flag => {
                self.flagged.remove(&record.tile);
                Delta {
                    unflagged: vec![record.tile],
                    ..Delta::default()
                }
            }
            ActionKind::Unflag => {
                self.flagged.insert(record.tile);
                Delta {
                    flagged: vec![record.tile],
                    ..Delta::default()
                }
            }
            ActionKind::Reveal => {
                for covered in &record.revealed {
                    self.revealed.remove(covered);
                    // mines never re-enter the active set
                    if !self.board.is_mine(*covered) {
                        self.active.insert(*covered);
                    }
                }
                if self.status.is_finished() {
                    self.status = GameStatus::Ongoing;
                }
                Delta {
                    covered: record.revealed,
                    ..Delta::default()
                }
            }
        }
    }

    /// Pure read of the full game state; callable any time.
    pub fn dump(&self) -> Snapshot {
        let revealed: Vec<Tile> = self.revealed.iter().copied().collect();
        let count = revealed
            .iter()
            .map(|&tile| self.board.count(tile).unwrap_or(MINE_COUNT))
            .collect();

        Snapshot {
            num_rows: self.board.grid().rows(),
            num_cols: self.board.grid().cols(),
            game_status: self.status,
            flagged: self.flagged.iter().copied().collect(),
            revealed,
            count,
            mines: self.board.mine_tiles().collect(),
        }
    }

    /// Explicit-worklist flood fill. A popped tile is kept iff unvisited,
    /// unflagged, and unrevealed; a kept zero-count tile expands to its 4
    /// orthogonal neighbors. The visited set is local to the call.
    fn flood_fill(&self, start: Tile) -> Vec<Tile> {
        let mut visited = BTreeSet::new();
        let mut kept = Vec::new();
        let mut stack = vec![start];

        while let Some(tile) = stack.pop() {
            if !visited.insert(tile) {
                continue;
            }
            if self.flagged.contains(&tile) || self.revealed.contains(&tile) {
                continue;
            }

            kept.push(tile);
            if self.board.count(tile) == Some(0) {
                stack.extend(self.board.grid().iter_orthogonal(tile));
            }
        }
        kept
    }
}
