//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves, alternating colours, until
//! neither side can move, then scores the final board with the winner heuristic.

use crate::board::{Board, Color};
use crate::heuristics::winner_heuristic;

/// Play random moves on `board` until the game is over.
///
/// A colour without a legal move passes. Two passes in a row means neither
/// side can move, which ends the game. Returns the number of discs placed.
pub fn rollout(board: &mut Board, mut color: Color, rng: &mut fastrand::Rng) -> usize {
    let mut passes = 0;
    let mut placed = 0;

    while passes < 2 {
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            passes += 1;
        } else {
            let mv = moves[rng.usize(..moves.len())];
            board.place_and_flip_discs(mv, color, true);
            placed += 1;
            passes = 0;
        }
        color = color.opponent();
    }

    placed
}

/// Score a random game played out from `board` with `to_move` to play.
///
/// The result is the winner heuristic for `perspective`, so it is one of
/// `WIN_SCORE`, `-WIN_SCORE`, or 0 for a tie.
pub fn simulate(board: &Board, to_move: Color, perspective: Color, rng: &mut fastrand::Rng) -> i32 {
    let mut scratch = board.clone();
    rollout(&mut scratch, to_move, rng);
    winner_heuristic(&scratch, perspective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WIN_SCORE;

    #[test]
    fn test_rollout_reaches_game_over() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..10 {
            let mut board = Board::new();
            let placed = rollout(&mut board, Color::Black, &mut rng);
            assert!(board.is_game_over());
            assert_eq!(board.disc_count(), 4 + placed);
        }
    }

    #[test]
    fn test_simulate_returns_winner_score() {
        let mut rng = fastrand::Rng::with_seed(2);
        let board = Board::new();
        for _ in 0..10 {
            let score = simulate(&board, Color::Black, Color::Black, &mut rng);
            assert!([WIN_SCORE, 0, -WIN_SCORE].contains(&score));
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_simulate_finished_game() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut board = Board::new();
        for p in board.positions().collect::<Vec<_>>() {
            board.set(p, Some(Color::White)).unwrap();
        }
        assert_eq!(simulate(&board, Color::Black, Color::White, &mut rng), WIN_SCORE);
        assert_eq!(simulate(&board, Color::Black, Color::Black, &mut rng), -WIN_SCORE);
    }
}
