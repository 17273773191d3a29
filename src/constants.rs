//! Constants for board geometry, heuristic weights, and search parameters.
//!
//! This module contains the default configuration for the engine. Board size
//! can still be chosen at runtime through [`Board::with_size`], but every
//! strategy falls back to these values when nothing else is configured.
//!
//! [`Board::with_size`]: crate::board::Board::with_size

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Othello is played on 8x8.
pub const N: usize = 8;

/// Smallest board that still fits the four starting discs plus a ring around them.
pub const MIN_SIZE: usize = 4;

/// Largest board whose columns can still be labelled `a` to `z`.
pub const MAX_SIZE: usize = 26;

/// Default display scale factor (cosmetic only).
pub const DEFAULT_SCALE: usize = 1;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Score awarded by the winner heuristic to the side with more discs.
pub const WIN_SCORE: i32 = 100;

/// Fraction of the board that must be filled before disc count is trusted.
///
/// Below this fill ratio the points heuristic is inverted: holding fewer discs
/// in the opening is usually the stronger position.
pub const POINTS_THRESHOLD: f64 = 0.7;

/// Value of an occupied corner.
pub const CORNER_VALUE: i32 = 12;

/// Weight of an occupied square along the edge next to an empty corner.
pub const EDGE_ADJACENT_VALUE: i32 = -3;

/// Weight of an occupied square diagonally next to an empty corner.
pub const DIAGONAL_ADJACENT_VALUE: i32 = -5;

/// Value of each stable disc.
pub const STABLE_PIECE_VALUE: i32 = 3;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default minimax search depth (plies).
pub const DEFAULT_DEPTH: u32 = 3;

/// Default number of MCTS iterations per move.
pub const N_ITERATIONS: usize = 1000;

/// UCB1 exploration constant.
pub const EXPLORATION: f64 = 1.0;

/// Guards the UCB1 exploration term against division by zero.
pub const UCB_EPSILON: f64 = 1e-6;

// =============================================================================
// Game Loop
// =============================================================================

/// Number of times a strategy may propose an illegal move before the game aborts.
pub const MAX_RETRIES: usize = 16;
