//! Move resolution.
//!
//! Every direction is handled by the same left-moving line merge: the board is
//! turned so the move points left (transpose for up/down, mirror rows for
//! down/right), each row is merged, and the board is turned back.

use crate::board::{Board, Row, MAX_TILE, SIZE};
use crate::Direction;

/// Outcome of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The board after the move (no tile spawned).
    pub board: Board,
    /// Whether any tile moved or merged.
    pub moved: bool,
    /// Sum of the values of all tiles created by merges.
    pub reward: u32,
    /// Number of merges performed.
    pub merges: u32,
}

/// Slide `board` in `direction`.
pub fn resolve_move(board: &Board, direction: Direction) -> MoveResult {
    let mut work = orient(board, direction);

    let mut moved = false;
    let mut reward = 0;
    let mut merges = 0;
    for line in work.rows_mut().iter_mut() {
        let before = *line;
        let merged = merge_line(before);
        if merged.line != before || merged.merges > 0 {
            moved = true;
        }
        reward += merged.reward;
        merges += merged.merges;
        *line = merged.line;
    }

    MoveResult {
        board: restore(&work, direction),
        moved,
        reward,
        merges,
    }
}

impl Board {
    /// Slide this board in `direction`. See [`resolve_move`].
    pub fn shift(&self, direction: Direction) -> MoveResult {
        resolve_move(self, direction)
    }

    /// Whether a move in `direction` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        resolve_move(self, direction).moved
    }
}

fn orient(board: &Board, direction: Direction) -> Board {
    let mut out = *board;
    if direction.is_vertical() {
        out = out.transpose();
    }
    if direction.is_reversed() {
        out = out.reverse_rows();
    }
    out
}

fn restore(board: &Board, direction: Direction) -> Board {
    let mut out = *board;
    if direction.is_reversed() {
        out = out.reverse_rows();
    }
    if direction.is_vertical() {
        out = out.transpose();
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineMerge {
    line: Row,
    reward: u32,
    merges: u32,
}

/// Merge one row towards index 0.
///
/// Zeros are compacted out, then adjacent equal pairs are merged left to
/// right. The second tile of a pair is consumed, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]` and never `[8, 0, 0, 0]`. Tiles at [`MAX_TILE`] stay put.
fn merge_line(line: Row) -> LineMerge {
    let mut tiles = compact(line);
    let mut reward = 0;
    let mut merges = 0;

    for i in 0..SIZE - 1 {
        if tiles[i] != 0 && tiles[i] < MAX_TILE && tiles[i] == tiles[i + 1] {
            tiles[i] *= 2;
            reward += tiles[i];
            merges += 1;
            tiles[i + 1] = 0;
        }
    }

    LineMerge {
        line: compact(tiles),
        reward,
        merges,
    }
}

/// Move non-zero values to the front, preserving order and padding with zeros.
fn compact(line: Row) -> Row {
    let mut out = [0; SIZE];
    let mut write_idx = 0;
    for value in line {
        if value != 0 {
            out[write_idx] = value;
            write_idx += 1;
        }
    }
    out
}
