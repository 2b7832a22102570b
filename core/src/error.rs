use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Mine layout does not match the declared mine count")]
    MineCountMismatch,
    #[error("Unknown game mode")]
    UnknownMode,
    #[error("Cell size must be a positive number")]
    InvalidCellSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
