use serde::Serialize;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Cell {
    /// Snapshot symbol: `'0'` empty, `'1'` black, `'2'` white.
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '0',
            Self::Black => '1',
            Self::White => '2',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Self::Empty),
            '1' => Some(Self::Black),
            '2' => Some(Self::White),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// The disc this player places.
    pub fn disc(self) -> Cell {
        match self {
            Self::Black => Cell::Black,
            Self::White => Cell::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Result of an end-of-game evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    InProgress,
    Winner(Player),
    Tie,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Player,
    pub turn: u32,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    pub staged: Vec<Position>,
    /// Cells recoloured by the most recent commit. Empty after skip, reset or load.
    pub flipped: Vec<Position>,
}

/// Scores and outcome as of the last end-of-game evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_count: u8,
    pub white_count: u8,
}
