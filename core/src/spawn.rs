//! Random tile placement.

use rand::Rng;

use crate::board::Board;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f32 = 0.9;

/// Place a new tile in a uniformly chosen empty cell.
///
/// The tile is 2 with probability 0.9 and 4 otherwise. Returns the cell that
/// was filled, or `None` when the board has no empty cell.
pub fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Option<(usize, usize)> {
    let empty_cells = board.empty_cells();
    if empty_cells.is_empty() {
        return None;
    }

    let (row, col) = empty_cells[rng.gen_range(0..empty_cells.len())];
    let value = if rng.gen::<f32>() < TWO_PROBABILITY { 2 } else { 4 };
    board.set(row, col, value);
    Some((row, col))
}
