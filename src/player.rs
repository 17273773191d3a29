//! The player capability shared by every strategy, plus the simple strategies.
//!
//! A game loop only ever talks to a [`Player`]: it asks for a move with
//! [`Player::play`], re-validates the answer against the board, and refreshes
//! the player's score after every half-move.

use log::debug;

use crate::board::{Board, Color};
use crate::heuristics::{DEFAULT_HEURISTICS, Heuristic, evaluate_all};
use crate::position::Position;

pub trait Player {
    /// Colour this player plays, fixed for its lifetime.
    fn color(&self) -> Color;

    /// Disc count as last refreshed by the game loop.
    fn score(&self) -> usize;

    fn set_score(&mut self, score: usize);

    /// Short strategy name for logs and results.
    fn name(&self) -> &'static str;

    /// Choose a move for the current board.
    ///
    /// Returns `None` only when there is no legal move. The returned move is a
    /// candidate: callers must check it against [`Board::legal_moves`].
    fn play(&mut self, board: &Board) -> Option<Position>;
}

/// Picks uniformly among the legal moves.
pub struct RandomPlayer {
    color: Color,
    score: usize,
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, fastrand::Rng::new())
    }

    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self::with_rng(color, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(color: Color, rng: fastrand::Rng) -> Self {
        Self {
            color,
            score: 2,
            rng,
        }
    }
}

impl Player for RandomPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn score(&self) -> usize {
        self.score
    }

    fn set_score(&mut self, score: usize) {
        self.score = score;
    }

    fn name(&self) -> &'static str {
        "random"
    }

    fn play(&mut self, board: &Board) -> Option<Position> {
        let moves = board.legal_moves(self.color);
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.usize(..moves.len())])
    }
}

/// Greedy one-ply player: plays the move whose resulting board scores best.
pub struct HeuristicPlayer {
    color: Color,
    score: usize,
    heuristics: Vec<Heuristic>,
}

impl HeuristicPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_heuristics(color, DEFAULT_HEURISTICS.to_vec())
    }

    pub fn with_heuristics(color: Color, heuristics: Vec<Heuristic>) -> Self {
        Self {
            color,
            score: 2,
            heuristics,
        }
    }

    pub fn heuristics(&self) -> &[Heuristic] {
        &self.heuristics
    }
}

impl Player for HeuristicPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn score(&self) -> usize {
        self.score
    }

    fn set_score(&mut self, score: usize) {
        self.score = score;
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn play(&mut self, board: &Board) -> Option<Position> {
        let mut best: Option<(Position, i32)> = None;
        for mv in board.legal_moves(self.color) {
            let mut after = board.clone();
            after.place_and_flip_discs(mv, self.color, true);
            let value = evaluate_all(&self.heuristics, &after, self.color);
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((mv, value));
            }
        }
        if let Some((mv, value)) = best {
            debug!("{} heuristic picks {mv} (value {value})", self.color);
        }
        best.map(|(mv, _)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_player_plays_legal_moves() {
        let mut board = Board::new();
        let mut player = RandomPlayer::with_seed(Color::Black, 7);
        assert_eq!(player.color(), Color::Black);
        assert_eq!(player.score(), 2);
        for _ in 0..20 {
            let mv = player.play(&board).unwrap();
            assert!(board.legal_moves(Color::Black).contains(&mv));
        }
        // No legal move: pass.
        for p in board.positions().collect::<Vec<_>>() {
            board.set(p, Some(Color::White)).unwrap();
        }
        assert_eq!(player.play(&board), None);
    }

    #[test]
    fn test_random_player_seeded_is_reproducible() {
        let board = Board::new();
        let mut a = RandomPlayer::with_seed(Color::Black, 42);
        let mut b = RandomPlayer::with_seed(Color::Black, 42);
        for _ in 0..10 {
            assert_eq!(a.play(&board), b.play(&board));
        }
    }

    #[test]
    fn test_heuristic_player_takes_corner() {
        let board = Board::from_rows(&[
            ". O X . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . O X . . .",
            ". . . X O . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        let mut player = HeuristicPlayer::with_heuristics(Color::Black, vec![Heuristic::Square]);
        assert_eq!(player.play(&board), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_heuristic_player_first_best_wins() {
        // Every opening move is symmetric under the points heuristic.
        let board = Board::new();
        let mut player = HeuristicPlayer::with_heuristics(Color::Black, vec![Heuristic::Points]);
        assert_eq!(player.play(&board), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_set_score() {
        let mut player = HeuristicPlayer::new(Color::White);
        assert_eq!(player.heuristics(), &DEFAULT_HEURISTICS);
        player.set_score(17);
        assert_eq!(player.score(), 17);
        assert_eq!(player.name(), "heuristic");
    }
}
