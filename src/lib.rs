pub mod board;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod types;
pub mod wasm;

pub use board::{BOARD_SIZE, Board};
pub use error::{GameError, PersistenceError, SnapshotParseError};
pub use game::GameEngine;
pub use snapshot::{FileSlot, MemorySlot, SaveSlot, Snapshot};
pub use types::{Cell, GameResult, GameState, Outcome, Player, Position};
