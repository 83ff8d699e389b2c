use tracing::{debug, info, warn};

use crate::board::{Board, total};
use crate::error::{GameError, PersistenceError, SnapshotParseError};
use crate::snapshot::{FileSlot, SaveSlot, Snapshot};
use crate::types::{Cell, GameResult, GameState, Outcome, Player, Position};

/// Two-phase Othello rules engine.
///
/// Discs are first staged onto the board without any legality check, then a
/// single staged disc is committed as the turn. Commit is the only operation
/// that validates and flips.
pub struct GameEngine {
    board: Board,
    staged: Vec<Position>,
    current_player: Player,
    turn: u32,
    is_game_over: bool,
    black_count: u8,
    white_count: u8,
    flipped: Vec<Position>,
    slot: Box<dyn SaveSlot>,
}

impl GameEngine {
    pub fn new(slot: Box<dyn SaveSlot>) -> Self {
        let mut engine = Self {
            board: Board::new(),
            staged: Vec::new(),
            current_player: Player::Black,
            turn: 0,
            is_game_over: false,
            black_count: 0,
            white_count: 0,
            flipped: Vec::new(),
            slot,
        };
        engine.reset();
        engine
    }

    /// Saves to `game.txt` in the working directory unless `$OTHELLO_SAVE_FILE` says otherwise.
    pub fn new_with_default_slot() -> Self {
        Self::new(Box::new(FileSlot::from_env()))
    }

    /// Starts a new game. Callable at any time.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.staged.clear();
        self.flipped.clear();
        self.current_player = Player::Black;
        self.turn = 0;
        let (black_count, white_count) = self.board.count();
        self.black_count = black_count;
        self.white_count = white_count;
        self.is_game_over = false;
        debug!("game reset");
    }

    /// Places the active player's disc on an empty cell without checking legality.
    /// Occupied cells are left alone.
    pub fn stage_cell(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        let cell = self
            .board
            .get(row, col)
            .ok_or(GameError::OutOfBounds { row, col })?;
        if !cell.is_empty() {
            return Ok(());
        }

        let pos = Position::new(row, col);
        self.board.set(pos, self.current_player.disc());
        self.staged.push(pos);
        debug!(row, col, staged = self.staged.len(), "disc staged");
        Ok(())
    }

    /// Takes back the most recently staged disc, if any.
    pub fn undo_last_staged(&mut self) -> Option<Position> {
        let pos = self.staged.pop()?;
        self.board.set(pos, Cell::Empty);
        debug!(row = pos.row, col = pos.col, "staged disc removed");
        Some(pos)
    }

    /// Validates the single staged disc and plays it.
    /// Returns the positions recoloured by the move.
    ///
    /// A failed commit leaves staged discs on the board, except that
    /// [`GameError::GameAlreadyOver`] discards the staged list.
    pub fn commit_turn(&mut self) -> Result<Vec<Position>, GameError> {
        let origin = match self.staged.as_slice() {
            [] => return Err(GameError::NoMoveStaged),
            [origin] => *origin,
            _ => return Err(GameError::MultipleMovesStaged),
        };

        if self.is_game_over {
            self.staged.clear();
            warn!("commit rejected, game is over");
            return Err(GameError::GameAlreadyOver);
        }

        let player = self.current_player;
        let counts = self.board.flip_counts(origin, player);
        if total(&counts) == 0 {
            if self.evaluate_end_of_game().is_over() {
                self.staged.clear();
                warn!("commit rejected, no moves remain");
                return Err(GameError::GameAlreadyOver);
            }
            debug!(row = origin.row, col = origin.col, ?player, "illegal move");
            return Err(GameError::IllegalMove {
                row: origin.row,
                col: origin.col,
            });
        }

        self.board.set(origin, player.disc());
        let flipped = self.board.apply_flips(origin, player, &counts);
        self.turn += 1;
        self.current_player = player.opponent();
        self.staged.clear();
        self.flipped = flipped.clone();
        info!(
            turn = self.turn,
            row = origin.row,
            col = origin.col,
            ?player,
            flips = flipped.len(),
            "turn committed"
        );

        self.evaluate_end_of_game();
        Ok(flipped)
    }

    /// Recounts the discs and decides whether either player can still move.
    /// Only the cached scores and the game-over flag are updated.
    pub fn evaluate_end_of_game(&mut self) -> Outcome {
        let (black_count, white_count) = self.board.count();
        self.black_count = black_count;
        self.white_count = white_count;

        let was_over = self.is_game_over;
        self.is_game_over = !self.board.any_moves_left();

        let outcome = self.outcome();
        if self.is_game_over && !was_over {
            info!(black_count, white_count, ?outcome, "game over");
        }
        outcome
    }

    /// Discards staged discs and passes the move to the opponent.
    /// The turn counter is not advanced.
    pub fn skip_turn(&mut self) {
        while self.undo_last_staged().is_some() {}
        self.flipped.clear();
        self.current_player = self.current_player.opponent();
        debug!(player = ?self.current_player, "turn skipped");
    }

    /// Writes the current snapshot to the save slot.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let text = self.snapshot().to_string();
        self.slot
            .write(&text)
            .map_err(PersistenceError::PersistenceWriteFailed)?;
        info!(staged = self.staged.len(), "game saved");
        Ok(())
    }

    /// Replaces the live board, staged moves and side to move with the saved
    /// snapshot. Nothing changes when the slot cannot be read or parsed.
    pub fn load(&mut self) -> Result<(), PersistenceError> {
        let text = self
            .slot
            .read()
            .map_err(PersistenceError::SnapshotUnreadable)?;
        let snapshot = text.parse::<Snapshot>().inspect_err(|err| {
            warn!(%err, "saved game is malformed");
        })?;
        self.apply_snapshot(snapshot);
        info!("game loaded");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            staged: self.staged.clone(),
            current_player: self.current_player,
        }
    }

    /// Same as [`GameEngine::load`], from snapshot text rather than the slot.
    pub fn restore(&mut self, text: &str) -> Result<(), SnapshotParseError> {
        let snapshot = text.parse::<Snapshot>()?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.staged = snapshot.staged;
        self.current_player = snapshot.current_player;
        self.flipped.clear();
        self.evaluate_end_of_game();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns `None` for coordinates off the board.
    pub fn cell(&self, row: u8, col: u8) -> Option<Cell> {
        self.board.get(row, col)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn turn_count(&self) -> u32 {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn staged(&self) -> &[Position] {
        &self.staged
    }

    /// Score as of the last end-of-game evaluation.
    pub fn score(&self, player: Player) -> u8 {
        match player {
            Player::Black => self.black_count,
            Player::White => self.white_count,
        }
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.current_player)
    }

    pub fn outcome(&self) -> Outcome {
        if !self.is_game_over {
            Outcome::InProgress
        } else if self.black_count > self.white_count {
            Outcome::Winner(Player::Black)
        } else if self.white_count > self.black_count {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Tie
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            outcome: self.outcome(),
            black_count: self.black_count,
            white_count: self.white_count,
        }
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            turn: self.turn,
            black_count: self.black_count,
            white_count: self.white_count,
            is_game_over: self.is_game_over,
            staged: self.staged.clone(),
            flipped: self.flipped.clone(),
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.staged.clear();
        self.flipped.clear();
    }
}
