//! The 4x4 tile grid.
//!
//! A [`Board`] is a plain `Copy` value in row-major `[[u32; 4]; 4]` layout.
//! Empty cells are 0, tiles hold their face value (2, 4, 8, ...). Copying a
//! board is how the advisor simulates moves without touching the live game.

use std::fmt;

use crate::error::BoardError;

/// Width and height of the board.
pub const SIZE: usize = 4;

/// Largest tile a board may hold. Two of these do not merge, which keeps
/// tile values and a move's total reward (at most 8 merges) within `u32`.
pub const MAX_TILE: u32 = 1 << 28;

/// Bonus the heuristic awards per empty cell.
pub const EMPTY_CELL_WEIGHT: u64 = 10;

/// One row of the board.
pub type Row = [u32; SIZE];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Row; SIZE],
}

impl Board {
    /// The all-zero board.
    pub const EMPTY: Board = Board {
        cells: [[0; SIZE]; SIZE],
    };

    /// Build a board from rows, checking that every tile is 0 or a power of
    /// two between 2 and [`MAX_TILE`].
    pub fn from_rows(rows: [Row; SIZE]) -> Result<Self, BoardError> {
        for (row, line) in rows.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value > MAX_TILE {
                    return Err(BoardError::TileTooLarge {
                        row,
                        col,
                        value,
                        max: MAX_TILE,
                    });
                }
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(Board { cells: rows })
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> &[Row; SIZE] {
        &self.cells
    }

    /// Tile at `(row, col)`. Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        debug_assert!(is_valid_tile(value));
        self.cells[row][col] = value;
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row; SIZE] {
        &mut self.cells
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Board {
        let mut out = Board::EMPTY;
        for row in 0..SIZE {
            for col in 0..SIZE {
                out.cells[col][row] = self.cells[row][col];
            }
        }
        out
    }

    /// Mirror every row left-to-right.
    pub fn reverse_rows(&self) -> Board {
        let mut out = *self;
        for line in out.cells.iter_mut() {
            line.reverse();
        }
        out
    }

    /// Coordinates of all empty cells, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] == 0 {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        SIZE * SIZE - self.empty_count()
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// True when every non-zero tile is a power of two in `2..=MAX_TILE`.
    pub fn is_valid(&self) -> bool {
        self.cells.iter().flatten().all(|&v| is_valid_tile(v))
    }

    /// See [`is_game_over`].
    pub fn is_game_over(&self) -> bool {
        is_game_over(self)
    }
}

fn is_valid_tile(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

/// True iff the board is full and no two orthogonally adjacent tiles can merge.
///
/// Adjacent tiles merge when they are equal and below [`MAX_TILE`].
pub fn is_game_over(board: &Board) -> bool {
    let cells = &board.cells;
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = cells[row][col];
            if value == 0 {
                return false;
            }
            if value == MAX_TILE {
                continue;
            }
            if col + 1 < SIZE && value == cells[row][col + 1] {
                return false;
            }
            if row + 1 < SIZE && value == cells[row + 1][col] {
                return false;
            }
        }
    }
    true
}

impl From<[Row; SIZE]> for Board {
    /// Unchecked conversion; use [`Board::from_rows`] for untrusted grids.
    fn from(cells: [Row; SIZE]) -> Self {
        Board { cells }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for line in &self.cells {
            for &val in line {
                if val == 0 {
                    write!(f, "    .")?;
                } else {
                    write!(f, "{:5}", val)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+------+------+------+------+")?;
        for line in &self.cells {
            write!(f, "|")?;
            for &val in line {
                if val == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", val)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "+------+------+------+------+")?;
        }
        Ok(())
    }
}
