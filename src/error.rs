//! Library error type.

use thiserror::Error;

use crate::position::Position;

/// Errors produced when building boards or configuring strategies.
///
/// Game rules never fail through this type: an illegal move is reported as an
/// empty flip-set, and a colour without moves simply gets no legal moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OthelloError {
    /// A heuristic name did not match any known heuristic
    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),
    /// A position lies outside the board
    #[error("position {0} is off the board")]
    OutOfBounds(Position),
    /// Board size must be even and between 4 and 26
    #[error("invalid board size {0}: must be even and between 4 and 26")]
    InvalidBoardSize(usize),
    /// A board fixture contained an unknown cell marker
    #[error("invalid cell marker '{0}'")]
    InvalidCell(char),
    /// A board fixture was not square
    #[error("board rows must form a square grid")]
    RaggedRows,
}
