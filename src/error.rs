use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board dimensions or mine density outside the playable range")]
    InvalidConfiguration,
    #[error("tile index is outside the board")]
    InvalidTile,
}

pub type Result<T> = core::result::Result<T, GameError>;
