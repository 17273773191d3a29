//! Game loop and series runner.
//!
//! The loop owns the authoritative board. Players only ever see it read-only;
//! every move they return is re-validated before it is applied.

use std::fmt;

use anyhow::{Result, bail, ensure};
use log::{debug, info, warn};

use crate::board::{Board, Color};
use crate::constants::MAX_RETRIES;
use crate::player::Player;
use crate::position::Position;

/// Outcome of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Moves in the order they were played
    pub moves: Vec<(Color, Position)>,
    pub black: usize,
    pub white: usize,
    /// `None` on a tie
    pub winner: Option<Color>,
    pub board: Board,
}

/// Ask `player` for a move until it returns a legal one.
///
/// Returns `Ok(None)` when the player's colour has no legal move.
fn next_move(player: &mut dyn Player, board: &Board) -> Result<Option<Position>> {
    let color = player.color();
    let legal = board.legal_moves(color);
    if legal.is_empty() {
        debug!("{color} has no legal move, passing");
        return Ok(None);
    }

    for attempt in 1..=MAX_RETRIES {
        match player.play(board) {
            Some(mv) if legal.contains(&mv) => return Ok(Some(mv)),
            Some(mv) => warn!(
                "{color} {} proposed illegal move {mv} (attempt {attempt})",
                player.name()
            ),
            None => warn!(
                "{color} {} passed with legal moves available (attempt {attempt})",
                player.name()
            ),
        }
    }
    bail!("{color} {} failed to produce a legal move after {MAX_RETRIES} attempts", player.name())
}

/// Play one game from `board`, Black moving first.
pub fn play_game(
    mut board: Board,
    black: &mut dyn Player,
    white: &mut dyn Player,
) -> Result<GameRecord> {
    ensure!(black.color() == Color::Black, "first player must play Black");
    ensure!(white.color() == Color::White, "second player must play White");

    let mut players: [&mut dyn Player; 2] = [black, white];
    let mut moves = Vec::new();

    while !board.is_game_over() {
        for turn in 0..players.len() {
            let Some(mv) = next_move(&mut *players[turn], &board)? else {
                continue;
            };
            let color = players[turn].color();
            board.place_and_flip_discs(mv, color, true);
            moves.push((color, mv));

            for player in players.iter_mut() {
                let score = board.points_for_color(player.color());
                player.set_score(score);
            }
            debug!("{color} played {mv}\n{board}");
        }
    }

    let black = board.points_for_color(Color::Black);
    let white = board.points_for_color(Color::White);
    let winner = match black.cmp(&white) {
        std::cmp::Ordering::Greater => Some(Color::Black),
        std::cmp::Ordering::Less => Some(Color::White),
        std::cmp::Ordering::Equal => None,
    };
    info!(
        "game over after {} moves: Black {black} - White {white} ({})",
        moves.len(),
        winner.map_or_else(|| "tie".to_string(), |c| format!("{c} wins"))
    );

    Ok(GameRecord {
        moves,
        black,
        white,
        winner,
        board,
    })
}

/// Tally of a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub ties: usize,
}

impl MatchStats {
    pub fn record(&mut self, winner: Option<Color>) {
        self.games += 1;
        match winner {
            Some(Color::Black) => self.black_wins += 1,
            Some(Color::White) => self.white_wins += 1,
            None => self.ties += 1,
        }
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Black {}/{g}, White {}/{g}, ties {}/{g}",
            self.black_wins,
            self.white_wins,
            self.ties,
            g = self.games
        )
    }
}

/// Play `games` games between the same two players on fresh `size` boards.
pub fn compare_players(
    black: &mut dyn Player,
    white: &mut dyn Player,
    games: usize,
    size: usize,
) -> Result<MatchStats> {
    let mut stats = MatchStats::default();
    for game in 1..=games {
        let board = Board::with_size(size)?;
        let record = play_game(board, black, white)?;
        stats.record(record.winner);
        info!("game {game}/{games}: {stats}");
    }
    Ok(stats)
}
