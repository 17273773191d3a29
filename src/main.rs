//! Othello-Rust: Othello/Reversi with computer players.
//!
//! ## Usage
//!
//! - `othello-rust` - Show a demo
//! - `othello-rust play --black alphabeta --white mcts` - Play and print one game
//! - `othello-rust match --games 20` - Play a series and print the tally
//! - `othello-rust demo` - Run the MCTS demo

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use othello_rust::board::{Board, Color};
use othello_rust::constants::{DEFAULT_DEPTH, EXPLORATION, N, N_ITERATIONS};
use othello_rust::game::{compare_players, play_game};
use othello_rust::heuristics::Heuristic;
use othello_rust::mcts::MctsPlayer;
use othello_rust::minimax::{BoardMode, MinimaxPlayer};
use othello_rust::player::{HeuristicPlayer, Player, RandomPlayer};

/// Othello-Rust: Othello/Reversi engine with computer players
#[derive(Parser)]
#[command(name = "othello-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search details
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and print the final board
    Play {
        #[command(flatten)]
        opts: PlayerOptions,
        /// Display scale factor for the board
        #[arg(long, default_value_t = 1)]
        scale: usize,
    },
    /// Play a series of games and print the tally
    Match {
        #[command(flatten)]
        opts: PlayerOptions,
        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: usize,
    },
    /// Run a short demo of the engine
    Demo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Uniformly random legal moves
    Random,
    /// Greedy one-ply heuristic search
    Heuristic,
    /// Plain minimax, cloning the board per branch
    Minimax,
    /// Alpha-beta minimax on a make/undo board
    Alphabeta,
    /// Monte Carlo Tree Search
    Mcts,
}

#[derive(Args, Clone)]
struct PlayerOptions {
    /// Strategy playing Black
    #[arg(long, value_enum, default_value_t = Strategy::Alphabeta)]
    black: Strategy,
    /// Strategy playing White
    #[arg(long, value_enum, default_value_t = Strategy::Random)]
    white: Strategy,
    /// Minimax search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    /// MCTS iterations per move
    #[arg(long, default_value_t = N_ITERATIONS)]
    iterations: usize,
    /// MCTS exploration constant
    #[arg(long, default_value_t = EXPLORATION)]
    exploration: f64,
    /// Weight of heuristic blending in MCTS selection (0 disables it)
    #[arg(long, default_value_t = 0.0)]
    blend: f64,
    /// Comma separated heuristics: winner, points, mobility, square, stability
    #[arg(long, default_value = "square,mobility")]
    heuristics: String,
    /// Seed for reproducible play
    #[arg(long)]
    seed: Option<u64>,
    /// Board size (even, 4 to 26)
    #[arg(long, default_value_t = N)]
    size: usize,
}

impl PlayerOptions {
    fn build(&self, strategy: Strategy, color: Color, heuristics: &[Heuristic]) -> Box<dyn Player> {
        let seed = self.seed.map(|s| match color {
            Color::Black => s,
            Color::White => s.wrapping_add(1),
        });
        match strategy {
            Strategy::Random => Box::new(match seed {
                Some(s) => RandomPlayer::with_seed(color, s),
                None => RandomPlayer::new(color),
            }),
            Strategy::Heuristic => {
                Box::new(HeuristicPlayer::with_heuristics(color, heuristics.to_vec()))
            }
            Strategy::Minimax | Strategy::Alphabeta => {
                let pruned = strategy == Strategy::Alphabeta;
                let mut player = MinimaxPlayer::new(color)
                    .with_depth(self.depth)
                    .with_heuristics(heuristics.to_vec())
                    .with_pruning(pruned)
                    .with_mode(if pruned { BoardMode::MakeUndo } else { BoardMode::Clone });
                if let Some(s) = seed {
                    player = player.with_seed(s);
                }
                Box::new(player)
            }
            Strategy::Mcts => {
                let mut player = MctsPlayer::new(color)
                    .with_iterations(self.iterations)
                    .with_exploration(self.exploration)
                    .with_heuristic_blend(self.blend, heuristics.to_vec());
                if let Some(s) = seed {
                    player = player.with_seed(s);
                }
                Box::new(player)
            }
        }
    }

    fn players(&self) -> Result<(Box<dyn Player>, Box<dyn Player>)> {
        let heuristics = Heuristic::parse_list(&self.heuristics).context("invalid --heuristics")?;
        Ok((
            self.build(self.black, Color::Black, &heuristics),
            self.build(self.white, Color::White, &heuristics),
        ))
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level);
    env_logger::Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Some(Commands::Play { opts, scale }) => run_play(&opts, scale),
        Some(Commands::Match { opts, games }) => run_match(&opts, games),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_play(opts: &PlayerOptions, scale: usize) -> Result<()> {
    let (mut black, mut white) = opts.players()?;
    let board = Board::with_size(opts.size)?.with_scale(scale);
    println!("{board}");

    let record = play_game(board, black.as_mut(), white.as_mut())?;
    for (i, (color, mv)) in record.moves.iter().enumerate() {
        println!("{:3}. {color} {mv}", i + 1);
    }
    println!("\n{}", record.board);
    match record.winner {
        Some(color) => println!("{color} wins {} - {}", record.black, record.white),
        None => println!("Tie {} - {}", record.black, record.white),
    }
    Ok(())
}

fn run_match(opts: &PlayerOptions, games: usize) -> Result<()> {
    let (mut black, mut white) = opts.players()?;
    let stats = compare_players(black.as_mut(), white.as_mut(), games, opts.size)?;
    println!(
        "{} (Black) vs {} (White) over {games} games: {stats}",
        black.name(),
        white.name()
    );
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Othello-Rust: Othello engine with computer players\n");

    println!("=== Board Demo ===");
    let board = Board::new();
    println!("{board}");
    let moves: Vec<String> = board
        .legal_moves(Color::Black)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Black to play: {}\n", moves.join(" "));

    println!("=== MCTS Demo ===");
    println!("MCTS (200 iterations) as Black vs random as White...");
    let mut black = MctsPlayer::new(Color::Black).with_iterations(200);
    let mut white = RandomPlayer::new(Color::White);
    let record = play_game(Board::new(), &mut black, &mut white)?;
    println!("{}", record.board);
    match record.winner {
        Some(color) => println!("{color} wins {} - {}", record.black, record.white),
        None => println!("Tie {} - {}", record.black, record.white),
    }
    Ok(())
}
