pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Run length required to win a set.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// A 6×7 grid of cells. Row 0 is the top row, row 5 the bottom; a column
/// is full once its row-0 cell is occupied. `Board` is `Copy`, so the
/// search can take cheap snapshots without touching the committed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

/// The four win axes as (row, col) direction pairs: horizontal, vertical,
/// `/` diagonal, `\` diagonal. Each entry is one half of an axis; the
/// opposite half is its negation.
const AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (or out of range).
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns that can still accept a piece, in ascending order. The
    /// ascending order doubles as the search's tie-break: of two equally
    /// scored moves the leftmost wins.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(|&col| !self.is_column_full(col))
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        // Find the lowest empty row in this column
        for row in (0..ROWS).rev() {
            if self.cells[row][col] == Cell::Empty {
                self.cells[row][col] = cell;
                return Ok(row);
            }
        }

        unreachable!("Column should not be full if is_column_full returned false");
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Check if the piece at (row, col) completes a four-in-a-row.
    ///
    /// Only the just-placed cell needs checking on the live path: no
    /// earlier move can have created a line without being detected at its
    /// own turn. For each axis the run lengths in both opposite
    /// directions (excluding the placed cell) are summed; a sum greater
    /// than 2 means the total line, placed cell included, is at least 4.
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        AXES.iter().any(|&(dr, dc)| {
            self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                > CONNECT - 2
        })
    }

    /// Scan the whole board for any completed four-in-a-row.
    ///
    /// This is the search's terminal test. It is deliberately broader
    /// than [`check_win`]: the live path only ever inspects the last
    /// placed cell, while the search re-examines every occupied cell of a
    /// hypothetical position. Keep the two checks separate.
    pub fn has_any_win(&self) -> bool {
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| self.cells[row][col] != Cell::Empty && self.check_win(row, col))
        })
    }

    /// Count consecutive cells matching `cell` walking from (row, col) in
    /// direction (dr, dc), excluding the starting cell. Stops at the grid
    /// edge or the first non-matching cell.
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while r >= 0
            && r < ROWS as i32
            && c >= 0
            && c < COLS as i32
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
