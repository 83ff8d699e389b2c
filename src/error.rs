use std::io;

use thiserror::Error;

/// Why a staging or commit request was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("no moves to play")]
    NoMoveStaged,

    #[error("only one disc can be played each turn")]
    MultipleMovesStaged,

    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    #[error("game is already over")]
    GameAlreadyOver,

    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },
}

/// Failures of the save slot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot could not be read: {0}")]
    SnapshotUnreadable(#[source] io::Error),

    #[error("snapshot is malformed: {0}")]
    SnapshotMalformed(#[from] SnapshotParseError),

    #[error("snapshot could not be written: {0}")]
    PersistenceWriteFailed(#[source] io::Error),
}

/// The first defect found while parsing snapshot text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotParseError {
    #[error("missing line {0}")]
    MissingLine(usize),

    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell symbol {symbol:?} at ({row}, {col})")]
    CellSymbol { row: usize, col: usize, symbol: char },

    #[error("staged moves line has {0} tokens, expected an even count")]
    OddMoveTokens(usize),

    #[error("invalid staged coordinate {0:?}")]
    BadCoordinate(String),

    #[error("unknown player flag {0:?}")]
    UnknownPlayer(String),

    #[error("unexpected content after line 10")]
    TrailingContent,
}
