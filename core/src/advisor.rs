//! Move advisor: bounded-depth exhaustive search.
//!
//! The search tries every direction that changes the board, recurses to a
//! fixed depth and scores the leaves with [`heuristic`]. Spawns are not
//! simulated, so the search is fully deterministic. Boards are copied for each
//! branch; the caller's board is never touched.

use tracing::trace;

use crate::board::{Board, EMPTY_CELL_WEIGHT};
use crate::moves::resolve_move;
use crate::Direction;

/// Look-ahead used for hints unless configured otherwise.
pub const DEFAULT_HINT_DEPTH: u32 = 3;

/// Best score reachable within the search depth and the first move leading there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: u64,
    /// `None` when no direction changes the board, or when the depth is 0.
    pub direction: Option<Direction>,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Root evaluation of a single direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchEval {
    pub direction: Direction,
    /// `None` when the move is a no-op on the current board.
    pub score: Option<u64>,
}

impl BranchEval {
    pub fn is_legal(&self) -> bool {
        self.score.is_some()
    }
}

/// Sum of tile values plus a bonus of 10 per empty cell.
pub fn heuristic(board: &Board) -> u64 {
    board.tile_sum() + EMPTY_CELL_WEIGHT * board.empty_count() as u64
}

/// Recommend a move by searching `depth` plies ahead.
///
/// Directions are tried in the order Up, Down, Left, Right and only a strictly
/// better score replaces the current best, so ties go to the earlier direction.
pub fn best_move(board: &Board, depth: u32) -> SearchResult {
    let mut nodes = 0;
    let (score, direction) = search(board, depth, &mut nodes);
    trace!(depth, nodes, score, ?direction, "advisor search finished");
    SearchResult {
        score,
        direction,
        nodes,
    }
}

/// Score every root direction with a search of `depth - 1` below it.
///
/// At depth 0, or on a finished board, nothing is explored and every entry is
/// `None`.
pub fn branch_evals(board: &Board, depth: u32) -> [BranchEval; 4] {
    Direction::ALL.map(|direction| {
        let score = if depth == 0 || board.is_game_over() {
            None
        } else {
            let sim = resolve_move(board, direction);
            sim.moved.then(|| search(&sim.board, depth - 1, &mut 0).0)
        };
        BranchEval { direction, score }
    })
}

fn search(board: &Board, depth: u32, nodes: &mut u64) -> (u64, Option<Direction>) {
    *nodes += 1;
    if depth == 0 || board.is_game_over() {
        return (heuristic(board), None);
    }

    let mut best: Option<(u64, Direction)> = None;
    for direction in Direction::ALL {
        let sim = resolve_move(board, direction);
        if !sim.moved {
            continue;
        }
        let (score, _) = search(&sim.board, depth - 1, nodes);
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, direction));
        }
    }

    match best {
        Some((score, direction)) => (score, Some(direction)),
        None => (heuristic(board), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u32; 4]; 4]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    // -------------------------------------------------------------------------
    // Heuristic
    // -------------------------------------------------------------------------

    #[test]
    fn test_heuristic_empty_board() {
        assert_eq!(heuristic(&Board::EMPTY), 160);
    }

    #[test]
    fn test_heuristic_mixed() {
        let b = board([[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 8, 0], [0, 0, 0, 0]]);
        assert_eq!(heuristic(&b), 14 + 13 * 10);
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    #[test]
    fn test_depth_zero_returns_heuristic() {
        let b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let result = best_move(&b, 0);
        assert_eq!(result.score, heuristic(&b));
        assert_eq!(result.direction, None);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_game_over_returns_none() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let result = best_move(&b, 3);
        assert_eq!(result.score, 48);
        assert_eq!(result.direction, None);
    }

    #[test]
    fn test_prefers_merge_and_breaks_ties_in_order() {
        // Up is a no-op, Down slides (144), Left and Right both merge (154).
        let b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let result = best_move(&b, 1);
        assert_eq!(result.score, 154);
        assert_eq!(result.direction, Some(Direction::Left));
        assert_eq!(result.nodes, 4);
    }

    #[test]
    fn test_tie_goes_to_up() {
        let b = board([[2, 0, 0, 0], [2, 0, 0, 0], [0; 4], [0; 4]]);
        let result = best_move(&b, 1);
        assert_eq!(result.score, 154);
        assert_eq!(result.direction, Some(Direction::Up));
    }

    #[test]
    fn test_determinism() {
        let b = board([[2, 4, 8, 2], [0, 4, 2, 0], [16, 0, 0, 2], [2, 2, 4, 8]]);
        let first = best_move(&b, 3);
        for _ in 0..5 {
            assert_eq!(best_move(&b, 3), first);
        }
        assert!(first.direction.is_some());
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let b = board([[2, 2, 4, 4], [8, 0, 8, 0], [2, 0, 0, 2], [0, 4, 0, 4]]);
        let copy = b;
        let _ = best_move(&b, 3);
        let _ = branch_evals(&b, 3);
        assert_eq!(b, copy);
    }

    #[test]
    fn test_recommended_move_is_legal() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        let result = best_move(&b, 3);
        let dir = result.direction.unwrap();
        assert!(b.can_move(dir));
    }

    #[test]
    fn test_worst_case_node_count_bounded() {
        let b = board([[2, 4, 0, 0], [0, 8, 0, 2], [4, 0, 0, 0], [0, 0, 16, 0]]);
        let result = best_move(&b, 3);
        assert!(result.nodes <= 1 + 4 + 16 + 64);
    }

    // -------------------------------------------------------------------------
    // Branch evaluations
    // -------------------------------------------------------------------------

    #[test]
    fn test_branch_evals_mark_illegal_moves() {
        let b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let evals = branch_evals(&b, 1);
        assert_eq!(evals[0], BranchEval { direction: Direction::Up, score: None });
        assert_eq!(evals[1].score, Some(144));
        assert_eq!(evals[2].score, Some(154));
        assert_eq!(evals[3].score, Some(154));
        assert!(!evals[0].is_legal());
    }

    #[test]
    fn test_branch_evals_agree_with_best_move() {
        let b = board([[2, 4, 8, 2], [0, 4, 2, 0], [16, 0, 0, 2], [2, 2, 4, 8]]);
        let result = best_move(&b, 3);
        let evals = branch_evals(&b, 3);
        let best = evals.iter().filter_map(|e| e.score).max().unwrap();
        assert_eq!(best, result.score);
        let first_best = evals.iter().find(|e| e.score == Some(best)).unwrap();
        assert_eq!(Some(first_best.direction), result.direction);
    }

    #[test]
    fn test_branch_evals_depth_zero() {
        let b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(branch_evals(&b, 0).iter().all(|e| e.score.is_none()));
    }
}
