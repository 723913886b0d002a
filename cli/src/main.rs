//! # 2048 CLI
//!
//! Play 2048 in the terminal with on-demand move hints, or run headless
//! simulations with a chosen policy.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use advisor_2048_core::{BranchEval, Direction, Game, GameConfig, DEFAULT_HINT_DEPTH};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod terminal;

const CONTROLS: &str = "Controls: WASD or Arrow Keys | H for hint | R to restart | Q to quit";

#[derive(Parser, Debug)]
#[command(name = "advisor-2048")]
#[command(author, version, about = "Play 2048 in the terminal with move hints or run simulations")]
struct Args {
    /// Run in interactive mode (default if no other mode specified)
    #[arg(short, long)]
    interactive: bool,

    /// Number of games to play in headless mode
    #[arg(short, long)]
    episodes: Option<u32>,

    /// Random seed for deterministic runs (OS entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Advisor look-ahead in moves
    #[arg(short, long, default_value_t = DEFAULT_HINT_DEPTH)]
    depth: u32,

    /// Maximum moves per game in headless mode (0 = unlimited)
    #[arg(short, long, default_value = "10000")]
    max_steps: u32,

    /// Policy for headless mode
    #[arg(short, long, value_enum, default_value = "advisor")]
    policy: Policy,

    /// Show board after each move in headless mode
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            hint_depth: self.depth,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Always play the advisor's suggestion
    Advisor,
    /// Random valid moves
    Random,
    /// Cycle through moves: Left, Down, Right, Up
    Cycle,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    debug!(?args, "starting");

    match args.episodes {
        Some(episodes) if !args.interactive => run_headless(&args, episodes),
        _ => run_interactive(&args),
    }
}

/// Log to stderr so the board on stdout stays readable. Filter via `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run interactive mode where the user plays with the keyboard.
fn run_interactive(args: &Args) -> Result<()> {
    let _raw = terminal::RawMode::enable().context("failed to switch terminal to raw mode")?;

    let mut game = Game::with_config(args.game_config());
    let mut stdin = io::stdin();
    let mut buffer = [0u8; 3];

    draw(&game, "Suggested Move: None")?;

    while let Some(action) =
        next_action(&mut stdin, &mut buffer).context("failed to read input")?
    {
        match action {
            InputAction::Move(dir) => {
                let result = game.apply_move(dir);
                if !result.moved {
                    continue;
                }
                let mut status = String::from("Suggested Move: None");
                if result.reward > 0 {
                    status = format!("+{} points!", result.reward);
                }
                if let Some(final_board) = result.final_board {
                    status = format!(
                        "Game Over!  Final Score: {}  Max Tile: {}  (new game started)",
                        result.score,
                        final_board.max_tile()
                    );
                }
                draw(&game, &status)?;
            }
            InputAction::Hint => {
                let status = format_hint(game.request_hint(), &game.analyze());
                draw(&game, &status)?;
            }
            InputAction::Restart => {
                game.new_game();
                draw(&game, "Suggested Move: None")?;
            }
            InputAction::Quit => {
                println!("\nGoodbye!");
                break;
            }
            InputAction::None => {}
        }
    }

    Ok(())
}

/// Read one key press; `None` once the input is closed.
fn next_action<R: Read>(input: &mut R, buffer: &mut [u8; 3]) -> io::Result<Option<InputAction>> {
    let bytes_read = input.read(buffer)?;
    if bytes_read == 0 {
        debug!("input closed");
        return Ok(None);
    }
    Ok(Some(parse_input(&buffer[..bytes_read])))
}

/// Per-game outcome collected in headless mode.
struct Episode {
    score: u32,
    max_tile: u32,
    steps: u32,
}

/// Run headless simulation mode.
///
/// A single `Game` plays every episode, so the high score carries across them
/// the same way it does interactively.
fn run_headless(args: &Args, episodes: u32) -> Result<()> {
    let mut game = Game::with_config(args.game_config());
    let mut policy_rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(1000)),
        None => SmallRng::from_entropy(),
    };
    let mut results: Vec<Episode> = Vec::with_capacity(episodes as usize);

    for episode in 0..episodes {
        let mut steps = 0;
        let mut action_cycle = 0;
        let mut finished = None;

        while args.max_steps == 0 || steps < args.max_steps {
            let action = match args.policy {
                Policy::Advisor => game.request_hint(),
                Policy::Random => select_random_action(&game, &mut policy_rng),
                Policy::Cycle => select_cycle_action(&game, &mut action_cycle),
            };
            let Some(act) = action else {
                break;
            };

            let result = game.apply_move(act);
            steps += 1;

            if args.verbose {
                println!("Episode {} Step {}: {}", episode + 1, steps, act);
                print!("{}", game.board());
            }

            if let Some(final_board) = result.final_board {
                finished = Some(Episode {
                    score: result.score,
                    max_tile: final_board.max_tile(),
                    steps,
                });
                break;
            }
        }

        let outcome = match finished {
            Some(outcome) => outcome,
            None => {
                // Step limit reached: record the unfinished game and start the next.
                let outcome = Episode {
                    score: game.score(),
                    max_tile: game.board().max_tile(),
                    steps,
                };
                game.new_game();
                outcome
            }
        };

        if args.verbose {
            println!(
                "Episode {}: Score={}, MaxTile={}, Steps={}",
                episode + 1,
                outcome.score,
                outcome.max_tile,
                outcome.steps
            );
        }
        results.push(outcome);
    }

    print_summary(args, &results, game.high_score())
}

fn print_summary(args: &Args, results: &[Episode], high_score: u32) -> Result<()> {
    let mut scores: Vec<u32> = results.iter().map(|e| e.score).collect();
    scores.sort_unstable();
    let count = scores.len();
    if count == 0 {
        println!("episodes=0");
        return Ok(());
    }

    let total_score: u64 = scores.iter().map(|&s| s as u64).sum();
    let avg_score = total_score as f64 / count as f64;
    let median_score = if count % 2 == 0 {
        (scores[count / 2 - 1] as f64 + scores[count / 2] as f64) / 2.0
    } else {
        scores[count / 2] as f64
    };

    let mut tile_counts: BTreeMap<u32, u32> = BTreeMap::new();
    for episode in results {
        *tile_counts.entry(episode.max_tile).or_insert(0) += 1;
    }
    let max_tile_overall = tile_counts.keys().next_back().copied().unwrap_or(0);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "=== Simulation Results ===")?;
    writeln!(out, "episodes={}", count)?;
    writeln!(out, "policy={:?}", args.policy)?;
    match args.seed {
        Some(seed) => writeln!(out, "seed={}", seed)?,
        None => writeln!(out, "seed=entropy")?,
    }
    writeln!(out, "depth={}", args.depth)?;
    writeln!(out, "max_steps={}", args.max_steps)?;
    writeln!(out, "avg_score={:.2}", avg_score)?;
    writeln!(out, "median_score={:.2}", median_score)?;
    writeln!(out, "min_score={}", scores[0])?;
    writeln!(out, "max_score={}", scores[count - 1])?;
    writeln!(out, "high_score={}", high_score)?;
    writeln!(out, "max_tile_overall={}", max_tile_overall)?;

    let distribution: Vec<String> = tile_counts
        .iter()
        .map(|(tile, n)| format!("{}:{}", tile, n))
        .collect();
    writeln!(out, "tile_distribution={}", distribution.join(","))?;
    Ok(())
}

/// Select a random valid action.
fn select_random_action(game: &Game, rng: &mut SmallRng) -> Option<Direction> {
    let legal = game.legal_moves();
    let valid: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|dir| legal[*dir as usize])
        .collect();

    if valid.is_empty() {
        None
    } else {
        Some(valid[rng.gen_range(0..valid.len())])
    }
}

/// Select action in a cycle: Left, Down, Right, Up.
fn select_cycle_action(game: &Game, cycle: &mut usize) -> Option<Direction> {
    let order = [Direction::Left, Direction::Down, Direction::Right, Direction::Up];
    let legal = game.legal_moves();

    // Try actions in cycle order, starting from current position
    for _ in 0..4 {
        let action = order[*cycle % 4];
        *cycle += 1;
        if legal[action as usize] {
            return Some(action);
        }
    }

    None
}

#[derive(Debug, PartialEq, Eq)]
enum InputAction {
    Move(Direction),
    Hint,
    Restart,
    Quit,
    None,
}

fn parse_input(bytes: &[u8]) -> InputAction {
    match bytes {
        // Arrow keys (escape sequences)
        [27, 91, 65] => InputAction::Move(Direction::Up),
        [27, 91, 66] => InputAction::Move(Direction::Down),
        [27, 91, 67] => InputAction::Move(Direction::Right),
        [27, 91, 68] => InputAction::Move(Direction::Left),

        [b'h'] | [b'H'] => InputAction::Hint,
        [b'q'] | [b'Q'] | [3] | [27] => InputAction::Quit, // q, Q, Ctrl+C, Esc
        [b'r'] | [b'R'] => InputAction::Restart,

        // WASD keys
        [key] => match (*key as char).to_string().parse::<Direction>() {
            Ok(dir) => InputAction::Move(dir),
            Err(_) => InputAction::None,
        },

        _ => InputAction::None,
    }
}

/// Suggestion line plus the advisor score of every direction ("-" when illegal).
fn format_hint(suggestion: Option<Direction>, evals: &[BranchEval]) -> String {
    let mut line = match suggestion {
        Some(dir) => format!("Suggested Move: {}", dir),
        None => "Suggested Move: None".to_string(),
    };
    if evals.iter().any(BranchEval::is_legal) {
        let scores: Vec<String> = evals
            .iter()
            .map(|eval| match eval.score {
                Some(score) => format!("{} {}", eval.direction, score),
                None => format!("{} -", eval.direction),
            })
            .collect();
        line.push_str(&format!("  [{}]", scores.join(" | ")));
    }
    line
}

/// Clear the screen and draw the scoreboard, board and a status line.
fn draw(game: &Game, status: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "\x1b[2J\x1b[H")?; // Clear screen
    writeln!(out, "=== 2048 ===")?;
    writeln!(out, "{}\n", CONTROLS)?;
    writeln!(out, "Score: {}    High Score: {}", game.score(), game.high_score())?;
    write!(out, "{}", game.board())?;
    writeln!(out, "{}", status)?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
