use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines for the mine-eligible cells")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
