use crate::types::{Cell, Player, Position};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Number of opponent discs captured in each of the eight compass directions,
/// indexed in the same order as the neighbourhood scan (row-major, centre skipped).
pub type FlipCounts = [u8; 8];

/// Reversi board state as an 8x8 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// black on (3,3) and (4,4), white on (3,4) and (4,3).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Cell::Black;
        board.cells[4][4] = Cell::Black;
        board.cells[3][4] = Cell::White;
        board.cells[4][3] = Cell::White;
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Returns the cell at `(row, col)`, or `None` when off the board.
    pub fn get(&self, row: u8, col: u8) -> Option<Cell> {
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }

    /// Caller contract: `pos` is on the board.
    pub(crate) fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Caller contract: `pos` is on the board.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (slot, cell) in board.iter_mut().zip(self.cells.iter().flatten()) {
            *slot = *cell as u8;
        }
        board
    }

    /// Counts the discs `player` would capture by having a disc on `origin`.
    ///
    /// The content of `origin` itself is not inspected: a staged disc already
    /// sits there when a turn is committed. A direction only scores when its
    /// run of opponent discs ends on one of `player`'s discs; running off the
    /// edge or into an empty cell scores zero for that direction.
    pub fn flip_counts(&self, origin: Position, player: Player) -> FlipCounts {
        let mut counts = [0u8; 8];
        if !self.has_opposing_neighbour(origin, player) {
            return counts;
        }

        let (row, col) = (origin.row as i32, origin.col as i32);
        for (count, (dr, dc)) in counts.iter_mut().zip(DIRECTIONS) {
            *count = self.run_length(row, col, dr, dc, player).unwrap_or(0);
        }
        counts
    }

    /// Recolours every run counted in `counts` to `player`'s disc.
    /// Returns the recoloured positions.
    pub fn apply_flips(
        &mut self,
        origin: Position,
        player: Player,
        counts: &FlipCounts,
    ) -> Vec<Position> {
        let disc = player.disc();
        let mut flipped = Vec::new();

        for (&count, (dr, dc)) in counts.iter().zip(DIRECTIONS) {
            let mut r = origin.row as i32;
            let mut c = origin.col as i32;
            for _ in 0..count {
                r += dr;
                c += dc;
                let pos = Position::new(r as u8, c as u8);
                self.set(pos, disc);
                flipped.push(pos);
            }
        }

        flipped
    }

    /// Whether `player` could legally place a new disc on `pos`.
    pub fn is_open_move(&self, pos: Position, player: Player) -> bool {
        self.at(pos).is_empty() && total(&self.flip_counts(pos, player)) > 0
    }

    /// Returns the legal moves for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        positions()
            .filter(|&pos| self.is_open_move(pos, player))
            .collect()
    }

    /// Whether either player still has a move.
    ///
    /// A full board or a board missing one colour ends the game outright.
    /// Otherwise every cell is tried for both colours with the commit-time
    /// capture test, occupied cells included.
    pub fn any_moves_left(&self) -> bool {
        let (black_count, white_count) = self.count();
        if black_count == 0 || white_count == 0 || self.empty_count() == 0 {
            return false;
        }

        positions().any(|pos| {
            total(&self.flip_counts(pos, Player::Black)) > 0
                || total(&self.flip_counts(pos, Player::White)) > 0
        })
    }

    fn has_opposing_neighbour(&self, origin: Position, player: Player) -> bool {
        let opponent = player.opponent().disc();
        let (row, col) = (origin.row as i32, origin.col as i32);

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            in_bounds(r, c) && self.cells[r as usize][c as usize] == opponent
        })
    }

    fn run_length(&self, row: i32, col: i32, dr: i32, dc: i32, player: Player) -> Option<u8> {
        let disc = player.disc();
        let mut r = row + dr;
        let mut c = col + dc;
        let mut run = 0u8;

        while in_bounds(r, c) {
            match self.cells[r as usize][c as usize] {
                Cell::Empty => return None,
                cell if cell == disc => return Some(run),
                _ => run += 1,
            }

            r += dr;
            c += dc;
        }

        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum of flips across all directions.
pub fn total(counts: &FlipCounts) -> u32 {
    counts.iter().map(|&count| count as u32).sum()
}

/// Every position on the board in row-major order.
pub fn positions() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE as u8)
        .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position::new(row, col)))
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
