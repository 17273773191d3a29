//! Othello-Rust: Othello/Reversi rules and computer players.
//!
//! This crate provides the Othello board engine together with a family of
//! interchangeable strategies: random, greedy heuristic, minimax with
//! alpha-beta pruning, and Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, heuristic weights, and search defaults
//! - [`position`] - Coordinates and compass directions
//! - [`board`] - Board state, legal moves, flipping, make/undo, stability
//! - [`heuristics`] - Static evaluation functions
//! - [`player`] - The [`Player`](player::Player) trait and simple strategies
//! - [`minimax`] - Minimax search with optional alpha-beta pruning
//! - [`playout`] - Random game simulation
//! - [`mcts`] - Monte Carlo Tree Search with UCB1
//! - [`game`] - Game loop and series runner
//!
//! ## Example
//!
//! ```
//! use othello_rust::board::{Board, Color};
//! use othello_rust::minimax::MinimaxPlayer;
//! use othello_rust::player::Player;
//!
//! let board = Board::new();
//! let mut player = MinimaxPlayer::new(Color::Black).with_depth(2);
//! let mv = player.play(&board).unwrap();
//! assert!(board.legal_moves(Color::Black).contains(&mv));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod heuristics;
pub mod mcts;
pub mod minimax;
pub mod player;
pub mod playout;
pub mod position;
