use serde::{Deserialize, Serialize};

use crate::types::Tile;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Reveal,
    Flag,
    Unflag,
}

/// One player action plus the payload needed to invert it. For a reveal
/// that is the full tile list the action uncovered, stored structurally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub tile: Tile,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub revealed: Vec<Tile>,
}

impl ActionRecord {
    pub fn reveal(tile: Tile, revealed: Vec<Tile>) -> Self {
        Self {
            kind: ActionKind::Reveal,
            tile,
            revealed,
        }
    }

    pub fn flag(tile: Tile) -> Self {
        Self {
            kind: ActionKind::Flag,
            tile,
            revealed: Vec::new(),
        }
    }

    pub fn unflag(tile: Tile) -> Self {
        Self {
            kind: ActionKind::Unflag,
            tile,
            revealed: Vec::new(),
        }
    }
}

/// Append-only sequence of player actions. Undo consumes only the tail;
/// the rest stays readable for external auditing or persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog(Vec<ActionRecord>);

impl ActionLog {
    pub fn push(&mut self, record: ActionRecord) {
        self.0.push(record);
    }

    pub fn pop(&mut self) -> Option<ActionRecord> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ActionRecord] {
        &self.0
    }
}
