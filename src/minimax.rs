//! Minimax search with optional alpha-beta pruning.
//!
//! The search scores leaves with a configurable set of heuristics, always from
//! the point of view of the player that started the search. Finished games are
//! scored with the winner heuristic instead.
//!
//! Hypothetical positions are produced in one of two ways (see [`BoardMode`]):
//! a fresh clone per branch, or make/undo on a single working board. Make/undo
//! never shares the working board between branches: every `make_move` is
//! undone before the next sibling is tried.

use log::debug;
use std::cmp::Ordering;

use crate::board::{Board, Color};
use crate::constants::DEFAULT_DEPTH;
use crate::heuristics::{DEFAULT_HEURISTICS, Heuristic, evaluate_all, winner_heuristic};
use crate::player::Player;
use crate::position::Position;

/// How child positions are produced during search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardMode {
    /// Deep copy the board for every branch
    Clone,
    /// Apply and take back moves on one working board
    MakeUndo,
}

/// Best move found at a node and its score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Position>,
    pub score: i32,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        Self {
            best_move: None,
            score,
        }
    }
}

pub struct MinimaxPlayer {
    color: Color,
    score: usize,
    heuristics: Vec<Heuristic>,
    depth: u32,
    pruning: bool,
    mode: BoardMode,
    rng: fastrand::Rng,
    /// Nodes visited by the last search
    nodes: u64,
}

impl MinimaxPlayer {
    /// Alpha-beta search on a make/undo board with the default depth and heuristics.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            score: 2,
            heuristics: DEFAULT_HEURISTICS.to_vec(),
            depth: DEFAULT_DEPTH,
            pruning: true,
            mode: BoardMode::MakeUndo,
            rng: fastrand::Rng::new(),
            nodes: 0,
        }
    }

    /// Search depth in plies. At least one ply is always searched.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn with_heuristics(mut self, heuristics: Vec<Heuristic>) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_mode(mut self, mode: BoardMode) -> Self {
        self.mode = mode;
        self
    }

    /// Seed the tie-break coin flips.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn heuristics(&self) -> &[Heuristic] {
        &self.heuristics
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Run a full-window search from `board` for this player's colour.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        self.nodes = 0;
        let mut work = board.clone();
        self.minimax(&mut work, self.color, self.depth, i32::MIN, i32::MAX, true)
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        color: Color,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes += 1;

        if board.is_game_over() {
            return SearchResult::leaf(winner_heuristic(board, self.color));
        }
        if depth == 0 {
            return SearchResult::leaf(evaluate_all(&self.heuristics, board, self.color));
        }

        let moves = match self.mode {
            BoardMode::Clone => board.legal_moves(color),
            BoardMode::MakeUndo => board.ordered_legal_moves(color),
        };

        // No move: the opponent plays on, still costing one ply.
        if moves.is_empty() {
            let passed = self.minimax(board, color.opponent(), depth - 1, alpha, beta, !maximizing);
            return SearchResult::leaf(passed.score);
        }

        let opponent = color.opponent();
        let mut best_move = None;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves {
            // Widen the child window by one so a child that ties the incumbent
            // reports an exact score rather than a cutoff bound.
            let (child_alpha, child_beta) = if maximizing {
                (alpha.saturating_sub(1), beta)
            } else {
                (alpha, beta.saturating_add(1))
            };

            let eval = match self.mode {
                BoardMode::Clone => {
                    let mut child = board.clone();
                    child.place_and_flip_discs(mv, color, true);
                    let next = &mut child;
                    self.minimax(next, opponent, depth - 1, child_alpha, child_beta, !maximizing)
                        .score
                }
                BoardMode::MakeUndo => {
                    let Some(undo) = board.make_move(mv, color) else {
                        continue;
                    };
                    let score = self
                        .minimax(board, opponent, depth - 1, child_alpha, child_beta, !maximizing)
                        .score;
                    board.undo_move(&undo);
                    score
                }
            };

            let ordering = if maximizing { eval.cmp(&best) } else { best.cmp(&eval) };
            match ordering {
                Ordering::Greater => {
                    best = eval;
                    best_move = Some(mv);
                }
                // Pairwise coin flip: not uniform across three or more ties.
                Ordering::Equal if best_move.is_none() || self.rng.bool() => {
                    best_move = Some(mv);
                }
                _ => {}
            }

            if maximizing {
                alpha = alpha.max(eval);
            } else {
                beta = beta.min(eval);
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }

        SearchResult {
            best_move,
            score: best,
        }
    }
}

impl Player for MinimaxPlayer {
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
        if self.pruning { "alphabeta" } else { "minimax" }
    }

    fn play(&mut self, board: &Board) -> Option<Position> {
        let result = self.search(board);
        debug!(
            "{} {} depth {} searched {} nodes: {:?} (score {})",
            self.color,
            self.name(),
            self.depth,
            self.nodes,
            result.best_move,
            result.score
        );
        result.best_move
    }
}
