//! # 2048 Engine with Move Advisor
//!
//! A pure Rust implementation of the 2048 game logic plus a small
//! look-ahead advisor that recommends the next move. Tile spawns come from a
//! seedable PRNG so games are reproducible. Drawing and input handling are
//! left to the caller (see the `advisor-2048-cli` crate).
//!
//! ## Example
//!
//! ```rust
//! use advisor_2048_core::{Direction, Game};
//!
//! let mut game = Game::new(42); // Create game with seed 42
//! let hint = game.request_hint();
//! let result = game.apply_move(hint.unwrap_or(Direction::Left));
//! println!("Score: {}, Moved: {}", game.score(), result.moved);
//! ```

use std::fmt;
use std::str::FromStr;

pub mod advisor;
pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod spawn;

pub use advisor::{best_move, branch_evals, heuristic, BranchEval, SearchResult, DEFAULT_HINT_DEPTH};
pub use board::{is_game_over, Board};
pub use error::{BoardError, ParseDirectionError};
pub use game::{Game, GameConfig, GameState, Phase, StepResult};
pub use moves::{resolve_move, MoveResult};
pub use spawn::spawn_tile;

/// The four possible move directions in 2048.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// All directions in advisor evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Convert a u8 to a Direction (0=Up, 1=Down, 2=Left, 3=Right).
    /// Returns None for invalid values.
    pub fn from_u8(value: u8) -> Option<Direction> {
        match value {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Moves along columns rather than rows.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Moves towards the high index of a line (bottom or right edge).
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }
}

impl TryFrom<u8> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::from_u8(value).ok_or(ParseDirectionError::InvalidCode(value))
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts direction names in any case and the WASD letters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(ParseDirectionError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_u8() {
        assert_eq!(Direction::from_u8(0), Some(Direction::Up));
        assert_eq!(Direction::from_u8(1), Some(Direction::Down));
        assert_eq!(Direction::from_u8(2), Some(Direction::Left));
        assert_eq!(Direction::from_u8(3), Some(Direction::Right));
        assert_eq!(Direction::from_u8(4), None);
        assert_eq!(Direction::from_u8(255), None);
    }

    #[test]
    fn test_direction_try_from() {
        assert_eq!(Direction::try_from(3u8), Ok(Direction::Right));
        assert_eq!(Direction::try_from(9u8), Err(ParseDirectionError::InvalidCode(9)));
    }

    #[test]
    fn test_direction_order() {
        assert_eq!(
            Direction::ALL,
            [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(*dir as usize, i);
        }
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(" Left ".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("d".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "north".parse::<Direction>(),
            Err(ParseDirectionError::Unknown("north".to_string()))
        );
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Up.to_string(), "Up");
        assert_eq!(Direction::Right.to_string(), "Right");
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_orientation_flags() {
        assert!(Direction::Up.is_vertical() && !Direction::Up.is_reversed());
        assert!(Direction::Down.is_vertical() && Direction::Down.is_reversed());
        assert!(!Direction::Left.is_vertical() && !Direction::Left.is_reversed());
        assert!(!Direction::Right.is_vertical() && Direction::Right.is_reversed());
    }
}
