use std::fmt;
use std::ops::Deref;

use crate::error::MoveError;

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning line.
const LINE: usize = 4;

/// The four line directions as (row step, col step): horizontal, vertical,
/// diagonal (top-left to bottom-right) and anti-diagonal (bottom-left to top-right).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// A move resolved to the cell where the piece lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

/// Fixed-capacity list of legal moves; never allocates.
#[derive(Debug, Clone, Copy)]
pub struct MoveList {
    moves: [Move; COLS],
    len: usize,
}

impl MoveList {
    fn new() -> Self {
        MoveList {
            moves: [Move { row: 0, col: 0 }; COLS],
            len: 0,
        }
    }

    fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

/// Rank of a column when landing rows tie: centre first, then alternating outwards.
fn centre_rank(col: usize) -> usize {
    let centre = COLS / 2;
    if col >= centre {
        2 * (col - centre)
    } else {
        2 * (centre - col) - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on, if the column has room.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if self.is_column_full(col) {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// One move per playable column, deepest landing row first.
    ///
    /// Columns whose pieces land on the same row are ordered centre-first,
    /// so the search meets the strongest candidates early and prunes more.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for col in 0..COLS {
            if let Some(row) = self.landing_row(col) {
                moves.push(Move { row, col });
            }
        }
        moves.moves[..moves.len]
            .sort_by(|a, b| b.row.cmp(&a.row).then(centre_rank(a.col).cmp(&centre_rank(b.col))));
        moves
    }

    /// Drop `player`'s piece into `col` and return where it landed.
    pub fn apply(&mut self, col: usize, player: Player) -> Result<Move, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = player.to_cell();
        Ok(Move { row, col })
    }

    /// Place a piece on an already resolved landing cell.
    pub(crate) fn play(&mut self, mv: Move, player: Player) {
        debug_assert_eq!(self.landing_row(mv.col), Some(mv.row), "stale move {mv:?}");
        self.cells[mv.row][mv.col] = player.to_cell();
    }

    /// Clear the cell of a previously applied move.
    ///
    /// Undos must mirror applies in reverse order or the gravity invariant breaks.
    pub fn undo(&mut self, mv: Move) {
        debug_assert!(
            mv.row == 0 || self.cells[mv.row - 1][mv.col] == Cell::Empty,
            "undo out of order at {mv:?}"
        );
        self.cells[mv.row][mv.col] = Cell::Empty;
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Scan every line of four on the board for one owned by `player`.
    pub fn has_line_of_four(&self, player: Player) -> bool {
        let cell = player.to_cell();
        let mut found = false;
        self.scan_lines(|owner| {
            found = owner == cell;
            found
        });
        found
    }

    /// Owner of the first complete line met in scan order, if any.
    pub(crate) fn first_line_owner(&self) -> Option<Cell> {
        let mut owner = None;
        self.scan_lines(|cell| {
            owner = Some(cell);
            true
        });
        owner
    }

    /// Call `visit` with the owner of every complete line, horizontal lines
    /// first, then vertical, then both diagonals, each from the top-left.
    /// Stops as soon as `visit` returns true.
    fn scan_lines(&self, mut visit: impl FnMut(Cell) -> bool) {
        for (dr, dc) in DIRECTIONS {
            for row in 0..ROWS {
                for col in 0..COLS {
                    let end_row = row as isize + dr * (LINE as isize - 1);
                    let end_col = col as isize + dc * (LINE as isize - 1);
                    if end_row < 0
                        || end_row >= ROWS as isize
                        || end_col < 0
                        || end_col >= COLS as isize
                    {
                        continue;
                    }

                    let first = self.cells[row][col];
                    if first == Cell::Empty {
                        continue;
                    }

                    let complete = (1..LINE as isize).all(|i| {
                        let r = (row as isize + dr * i) as usize;
                        let c = (col as isize + dc * i) as usize;
                        self.cells[r][c] == first
                    });
                    if complete && visit(first) {
                        return;
                    }
                }
            }
        }
    }

    /// Check if the last move at (row, col) resulted in a win
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= LINE
        })
    }

    /// Count consecutive `cell` pieces from (row, col), exclusive, stepping by (dr, dc).
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while r >= 0
            && r < ROWS as isize
            && c >= 0
            && c < COLS as isize
            && self.cells[r as usize][c as usize] == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".",
                    Cell::Red => "X",
                    Cell::Yellow => "O",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "1 2 3 4 5 6 7")
    }
}
