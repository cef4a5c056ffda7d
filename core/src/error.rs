use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Round has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("No cell matches the target color")]
    UnsolvableRound,
}

pub type Result<T> = core::result::Result<T, GameError>;
