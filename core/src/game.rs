//! Game controller.
//!
//! [`Game`] owns the live [`GameState`] and sequences a turn: resolve the move,
//! bank the merge reward, spawn a tile, raise the high score, check for the
//! end. A finished game is reported through [`StepResult`] and immediately
//! replaced by a fresh one, so a `Game` is always playable between calls.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::advisor::{self, BranchEval, SearchResult, DEFAULT_HINT_DEPTH};
use crate::board::Board;
use crate::moves::resolve_move;
use crate::spawn::spawn_tile;
use crate::Direction;

/// Construction options for a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed for tile spawns; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Look-ahead of [`Game::request_hint`].
    pub hint_depth: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            hint_depth: DEFAULT_HINT_DEPTH,
        }
    }
}

/// Everything a UI needs to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState {
    pub board: Board,
    /// Points from merges in the current game.
    pub score: u32,
    /// Best score seen in this process. Survives resets.
    pub high_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Result of [`Game::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the board changed (and a new tile was spawned).
    pub moved: bool,
    /// Points earned from merges in this move.
    pub reward: u32,
    /// Score after the move, before any automatic reset.
    pub score: u32,
    /// The game ended with this move and a new one has been started.
    pub game_over: bool,
    /// The last board of the finished game when `game_over` is set.
    pub final_board: Option<Board>,
}

impl StepResult {
    fn unchanged(score: u32, game_over: bool) -> Self {
        Self {
            moved: false,
            reward: 0,
            score,
            game_over,
            final_board: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    phase: Phase,
    rng: SmallRng,
    hint_depth: u32,
}

impl Game {
    /// Start a game whose spawns are driven by `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    /// Start a game seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut game = Game {
            state: GameState::default(),
            phase: Phase::Playing,
            rng,
            hint_depth: config.hint_depth,
        };
        game.new_game();
        game
    }

    /// Clear the board and score, spawn two tiles and resume play.
    ///
    /// The high score is kept.
    pub fn new_game(&mut self) {
        self.state.board = Board::EMPTY;
        self.state.score = 0;
        spawn_tile(&mut self.state.board, &mut self.rng);
        spawn_tile(&mut self.state.board, &mut self.rng);
        self.phase = Phase::Playing;
        info!(high_score = self.state.high_score, "new game");
    }

    /// Play one move.
    ///
    /// A move that changes nothing leaves the game untouched. Otherwise the
    /// reward is banked, one tile is spawned and, if no move remains, the
    /// finished game is reported and a new one started.
    pub fn apply_move(&mut self, direction: Direction) -> StepResult {
        if self.phase == Phase::GameOver {
            return StepResult::unchanged(self.state.score, true);
        }

        let result = resolve_move(&self.state.board, direction);
        if !result.moved {
            debug!(?direction, "move has no effect");
            return StepResult::unchanged(self.state.score, false);
        }

        self.state.board = result.board;
        self.state.score = self.state.score.saturating_add(result.reward);
        spawn_tile(&mut self.state.board, &mut self.rng);
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
        }
        debug!(?direction, reward = result.reward, score = self.state.score, "move applied");

        let score = self.state.score;
        if !self.state.board.is_game_over() {
            return StepResult {
                moved: true,
                reward: result.reward,
                score,
                game_over: false,
                final_board: None,
            };
        }

        self.phase = Phase::GameOver;
        let final_board = self.state.board;
        info!(
            score,
            high_score = self.state.high_score,
            max_tile = final_board.max_tile(),
            "game over"
        );
        self.new_game();

        StepResult {
            moved: true,
            reward: result.reward,
            score,
            game_over: true,
            final_board: Some(final_board),
        }
    }

    /// Suggested next move for the live board, if any.
    pub fn request_hint(&self) -> Option<Direction> {
        let result = self.advise();
        debug!(suggestion = ?result.direction, score = result.score, nodes = result.nodes, "hint");
        result.direction
    }

    /// Full advisor result for the live board.
    pub fn advise(&self) -> SearchResult {
        advisor::best_move(&self.state.board, self.hint_depth)
    }

    /// Per-direction advisor scores for the live board.
    pub fn analyze(&self) -> [BranchEval; 4] {
        advisor::branch_evals(&self.state.board, self.hint_depth)
    }

    /// Which directions would change the board, in [`Direction::ALL`] order.
    pub fn legal_moves(&self) -> [bool; 4] {
        Direction::ALL.map(|direction| self.state.board.can_move(direction))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hint_depth(&self) -> u32 {
        self.hint_depth
    }
}
