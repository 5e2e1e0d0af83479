use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid column")]
    InvalidColumn,
    #[error("Invalid joker slot")]
    InvalidJoker,
    #[error("Cell {0:?} is not reachable yet")]
    Unreachable(Coord2),
    #[error("Layout has no cells")]
    EmptyLayout,
    #[error("Layout columns differ in height")]
    RaggedLayout,
    #[error("Unknown color letter {0:?}")]
    UnknownColor(char),
    #[error("Column bonus table does not match column count")]
    BonusTableMismatch,
    #[error("Free column is outside the sheet")]
    InvalidFreeColumn,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
