//! Line-oriented save format and the slot it is written to.
//!
//! ```text
//! 00000000      8 rows, one digit per cell: 0 empty, 1 black, 2 white
//! ...
//! 2/4/          staged moves as `row/col/`, empty when none
//! true          whether black is to move
//! ```

use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::board::{BOARD_SIZE, Board};
use crate::error::SnapshotParseError;
use crate::types::{Cell, Player, Position};

pub const DEFAULT_SAVE_FILE: &str = "game.txt";
/// Environment variable overriding [`DEFAULT_SAVE_FILE`] for [`FileSlot::from_env`].
pub const SAVE_FILE_ENV: &str = "OTHELLO_SAVE_FILE";

/// Everything a save captures: the grid, the staged stack, and the side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub staged: Vec<Position>,
    pub current_player: Player,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.rows() {
            for cell in row {
                f.write_char(cell.symbol())?;
            }
            writeln!(f)?;
        }

        for pos in &self.staged {
            write!(f, "{}/{}/", pos.row, pos.col)?;
        }
        writeln!(f)?;

        write!(f, "{}", self.current_player == Player::Black)
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, row_cells) in cells.iter_mut().enumerate() {
            let line = lines.next().ok_or(SnapshotParseError::MissingLine(row + 1))?;
            let len = line.chars().count();
            if len != BOARD_SIZE {
                return Err(SnapshotParseError::RowLength { row, len });
            }

            for (col, (slot, symbol)) in row_cells.iter_mut().zip(line.chars()).enumerate() {
                *slot = Cell::from_symbol(symbol)
                    .ok_or(SnapshotParseError::CellSymbol { row, col, symbol })?;
            }
        }

        let staged = parse_staged(lines.next().ok_or(SnapshotParseError::MissingLine(9))?)?;

        let current_player = match lines.next().ok_or(SnapshotParseError::MissingLine(10))? {
            "true" => Player::Black,
            "false" => Player::White,
            other => return Err(SnapshotParseError::UnknownPlayer(other.to_string())),
        };

        if lines.any(|line| !line.is_empty()) {
            return Err(SnapshotParseError::TrailingContent);
        }

        Ok(Self {
            board: Board::from_cells(cells),
            staged,
            current_player,
        })
    }
}

fn parse_staged(line: &str) -> Result<Vec<Position>, SnapshotParseError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let body = line.strip_suffix('/').unwrap_or(line);
    let tokens: Vec<&str> = body.split('/').collect();
    if tokens.len() % 2 != 0 {
        return Err(SnapshotParseError::OddMoveTokens(tokens.len()));
    }

    tokens
        .chunks(2)
        .map(|pair| Ok(Position::new(parse_coordinate(pair[0])?, parse_coordinate(pair[1])?)))
        .collect()
}

fn parse_coordinate(token: &str) -> Result<u8, SnapshotParseError> {
    token
        .parse::<u8>()
        .ok()
        .filter(|&value| (value as usize) < BOARD_SIZE)
        .ok_or_else(|| SnapshotParseError::BadCoordinate(token.to_string()))
}

/// The single persisted slot a game is saved to.
pub trait SaveSlot {
    fn read(&self) -> io::Result<String>;

    /// Replaces the slot's contents.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

/// Slot backed by a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `$OTHELLO_SAVE_FILE` when set, otherwise [`DEFAULT_SAVE_FILE`].
    pub fn from_env() -> Self {
        std::env::var_os(SAVE_FILE_ENV)
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSlot {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_FILE)
    }
}

impl SaveSlot for FileSlot {
    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents)
    }
}

/// Slot held in memory; used by the wasm build, where the host owns storage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySlot {
    contents: Option<String>,
}

impl MemorySlot {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SaveSlot for MemorySlot {
    fn read(&self) -> io::Result<String> {
        self.contents
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "save slot is empty"))
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OPENING: &str = "00000000\n\
                           00000000\n\
                           00000000\n\
                           00012000\n\
                           00021000\n\
                           00000000\n\
                           00000000\n\
                           00000000\n\
                           \n\
                           true";

    fn with_moves_line(line: &str) -> String {
        let mut lines: Vec<&str> = OPENING.split('\n').collect();
        lines[8] = line;
        lines.join("\n")
    }

    #[test]
    fn formats_opening_position() {
        let snapshot = Snapshot {
            board: Board::new(),
            staged: Vec::new(),
            current_player: Player::Black,
        };

        assert_eq!(snapshot.to_string(), OPENING);
    }

    #[test]
    fn formats_staged_moves_with_trailing_separator() {
        let mut board = Board::new();
        board.set(Position::new(2, 4), Cell::White);
        board.set(Position::new(7, 0), Cell::White);
        let snapshot = Snapshot {
            board,
            staged: vec![Position::new(2, 4), Position::new(7, 0)],
            current_player: Player::White,
        };

        let text = snapshot.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[2], "00002000");
        assert_eq!(lines[7], "20000000");
        assert_eq!(lines[8], "2/4/7/0/");
        assert_eq!(lines[9], "false");
        assert_eq!(text.parse::<Snapshot>().unwrap(), snapshot);
    }

    #[test]
    fn parses_opening_position() {
        let snapshot: Snapshot = OPENING.parse().unwrap();

        assert_eq!(snapshot.board, Board::new());
        assert!(snapshot.staged.is_empty());
        assert_eq!(snapshot.current_player, Player::Black);
    }

    #[test]
    fn accepts_crlf_and_trailing_newline() {
        let text = format!("{}\r\n", OPENING.replace('\n', "\r\n"));

        assert_eq!(text.parse::<Snapshot>().unwrap().board, Board::new());
    }

    #[test]
    fn accepts_moves_line_without_trailing_separator() {
        let snapshot: Snapshot = with_moves_line("1/2/3/4").parse().unwrap();

        assert_eq!(
            snapshot.staged,
            vec![Position::new(1, 2), Position::new(3, 4)]
        );
    }

    #[test]
    fn rejects_odd_number_of_move_tokens() {
        assert_eq!(
            with_moves_line("3/4/5/").parse::<Snapshot>(),
            Err(SnapshotParseError::OddMoveTokens(3))
        );
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert_eq!(
            with_moves_line("3/8/").parse::<Snapshot>(),
            Err(SnapshotParseError::BadCoordinate("8".to_string()))
        );
        assert_eq!(
            with_moves_line("a/1/").parse::<Snapshot>(),
            Err(SnapshotParseError::BadCoordinate("a".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_player_flag() {
        let text = OPENING.replace("true", "yes");

        assert_eq!(
            text.parse::<Snapshot>(),
            Err(SnapshotParseError::UnknownPlayer("yes".to_string()))
        );
    }

    #[test]
    fn rejects_wrong_cell_count_and_symbols() {
        let short = OPENING.replacen("00012000", "0001200", 1);
        assert_eq!(
            short.parse::<Snapshot>(),
            Err(SnapshotParseError::RowLength { row: 3, len: 7 })
        );

        let bad = OPENING.replacen("00012000", "00013000", 1);
        assert_eq!(
            bad.parse::<Snapshot>(),
            Err(SnapshotParseError::CellSymbol {
                row: 3,
                col: 4,
                symbol: '3'
            })
        );
    }

    #[test]
    fn rejects_truncated_and_overlong_text() {
        assert_eq!(
            "00000000\n00000000".parse::<Snapshot>(),
            Err(SnapshotParseError::MissingLine(3))
        );

        let text = OPENING.strip_suffix("\ntrue").unwrap();
        assert_eq!(
            text.parse::<Snapshot>(),
            Err(SnapshotParseError::MissingLine(10))
        );

        let padded = format!("{OPENING}\n \n");
        assert_eq!(
            padded.parse::<Snapshot>(),
            Err(SnapshotParseError::TrailingContent)
        );

        let extra = format!("{OPENING}\nfalse");
        assert_eq!(
            extra.parse::<Snapshot>(),
            Err(SnapshotParseError::TrailingContent)
        );
    }

    #[test]
    fn memory_slot_reports_missing_contents() {
        let mut slot = MemorySlot::default();
        assert_eq!(
            slot.read().unwrap_err().kind(),
            io::ErrorKind::NotFound
        );

        slot.write("abc").unwrap();
        assert_eq!(slot.read().unwrap(), "abc");
        assert_eq!(slot.contents(), Some("abc"));
    }

    #[test]
    fn default_file_slot_uses_game_txt() {
        assert_eq!(FileSlot::default().path(), Path::new(DEFAULT_SAVE_FILE));
    }
}
