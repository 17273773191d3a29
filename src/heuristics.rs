//! Static evaluation heuristics.
//!
//! Every heuristic is a pure function of a board and a colour, returning an
//! integer where higher is better for that colour. Strategies pick their
//! heuristics by name at construction time; the names resolve to the closed
//! [`Heuristic`] enumeration so a typo is reported instead of silently ignored.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Color};
use crate::constants::{
    CORNER_VALUE, DIAGONAL_ADJACENT_VALUE, EDGE_ADJACENT_VALUE, POINTS_THRESHOLD,
    STABLE_PIECE_VALUE, WIN_SCORE,
};
use crate::error::OthelloError;
use crate::position::Position;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    Winner,
    Points,
    Mobility,
    Square,
    Stability,
}

/// Heuristics used when a strategy is not given any.
pub const DEFAULT_HEURISTICS: [Heuristic; 2] = [Heuristic::Square, Heuristic::Mobility];

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Winner,
        Heuristic::Points,
        Heuristic::Mobility,
        Heuristic::Square,
        Heuristic::Stability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Winner => "winner",
            Heuristic::Points => "points",
            Heuristic::Mobility => "mobility",
            Heuristic::Square => "square",
            Heuristic::Stability => "stability",
        }
    }

    /// Score `board` from the point of view of `color`.
    pub fn evaluate(self, board: &Board, color: Color) -> i32 {
        match self {
            Heuristic::Winner => winner_heuristic(board, color),
            Heuristic::Points => points_heuristic(board, color),
            Heuristic::Mobility => mobility_heuristic(board, color),
            Heuristic::Square => square_heuristic(board, color),
            Heuristic::Stability => stability_heuristic(board, color),
        }
    }

    /// Parse a comma separated list such as `square,mobility`.
    pub fn parse_list(s: &str) -> Result<Vec<Heuristic>, OthelloError> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts both `square` and `square_heuristic` spellings.
impl FromStr for Heuristic {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_suffix("_heuristic").unwrap_or(&key);
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == key)
            .ok_or_else(|| OthelloError::UnknownHeuristic(s.to_string()))
    }
}

/// Sum of `heuristics` evaluated for `color`.
pub fn evaluate_all(heuristics: &[Heuristic], board: &Board, color: Color) -> i32 {
    heuristics.iter().map(|h| h.evaluate(board, color)).sum()
}

/// `WIN_SCORE` if `color` has won, `-WIN_SCORE` if it has lost, 0 otherwise.
///
/// Unfinished games and ties both score 0.
pub fn winner_heuristic(board: &Board, color: Color) -> i32 {
    if !board.is_game_over() {
        return 0;
    }
    let own = board.points_for_color(color);
    let other = board.points_for_color(color.opponent());
    match own.cmp(&other) {
        std::cmp::Ordering::Greater => WIN_SCORE,
        std::cmp::Ordering::Less => -WIN_SCORE,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Disc difference, inverted until the board is `POINTS_THRESHOLD` full.
pub fn points_heuristic(board: &Board, color: Color) -> i32 {
    let own = board.points_for_color(color) as i32;
    let other = board.points_for_color(color.opponent()) as i32;
    let cells = board.size() * board.size();
    let filled = board.disc_count() as f64 / cells as f64;
    if filled < POINTS_THRESHOLD {
        other - own
    } else {
        own - other
    }
}

/// Difference in the number of legal moves.
pub fn mobility_heuristic(board: &Board, color: Color) -> i32 {
    let own = board.legal_moves(color).len() as i32;
    let other = board.legal_moves(color.opponent()).len() as i32;
    own - other
}

/// Positional weighting around the corners.
///
/// Occupied corners score `CORNER_VALUE`. Next to an empty corner, the two
/// edge squares and the diagonal square are penalised since they hand the
/// corner to the opponent. Once a corner is taken its neighbours score 0.
pub fn square_heuristic(board: &Board, color: Color) -> i32 {
    let signed = |p: Position, value: i32| match board.get(p) {
        Some(c) if c == color => value,
        Some(_) => -value,
        None => 0,
    };

    let mut score = 0;
    for corner in board.corners() {
        if board.get(corner).is_some() {
            score += signed(corner, CORNER_VALUE);
            continue;
        }
        // Step one cell inwards along each axis.
        let dx = if corner.x == 0 { 1 } else { -1 };
        let dy = if corner.y == 0 { 1 } else { -1 };
        score += signed(Position::new(corner.x + dx, corner.y), EDGE_ADJACENT_VALUE);
        score += signed(Position::new(corner.x, corner.y + dy), EDGE_ADJACENT_VALUE);
        score += signed(Position::new(corner.x + dx, corner.y + dy), DIAGONAL_ADJACENT_VALUE);
    }
    score
}

/// `STABLE_PIECE_VALUE` for every stable disc of `color`.
pub fn stability_heuristic(board: &Board, color: Color) -> i32 {
    let stable = board
        .positions()
        .filter(|&p| board.is_stable_piece(p, color))
        .count() as i32;
    stable * STABLE_PIECE_VALUE
}
