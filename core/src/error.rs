use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: Coord, y: Coord },
    #[error("Board is already initialized")]
    AlreadyInitialized,
    #[error("Invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: Coord, height: Coord },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
}

pub type Result<T> = core::result::Result<T, BoardError>;
