//! Othello board state, move generation, and disc flipping.
//!
//! The board is a `size x size` grid of `Option<Color>` cells stored row-major.
//! Nothing is cached: disc counts and legal moves are derived from the grid on
//! every call, which is cheap at 8x8 and can never go stale.
//!
//! Two ways of exploring hypothetical positions are supported:
//! - clone the board and mutate the copy, or
//! - [`Board::make_move`] followed by [`Board::undo_move`] in strict LIFO order.

use std::fmt;

use crate::constants::{DEFAULT_SCALE, MAX_SIZE, MIN_SIZE, N};
use crate::error::OthelloError;
use crate::position::{AXES, DIRECTIONS, Direction, Position};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other colour.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Character used for this colour in board renderings and fixtures.
    pub fn marker(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Everything needed to take back a move applied with [`Board::make_move`].
///
/// Othello has only two colours, so every flipped disc was the mover's
/// opponent colour before the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undo {
    /// Where the disc was placed
    pub pos: Position,
    /// Colour of the placed disc
    pub color: Color,
    /// Discs converted by the move
    pub flipped: Vec<Position>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    scale: usize,
    cells: Vec<Option<Color>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard 8x8 board with the four starting discs.
    pub fn new() -> Self {
        Self::starting(N)
    }

    /// Board of the given size with the four starting discs in the centre.
    pub fn with_size(size: usize) -> Result<Self, OthelloError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) || size % 2 != 0 {
            return Err(OthelloError::InvalidBoardSize(size));
        }
        Ok(Self::starting(size))
    }

    /// Set the display scale factor. Has no effect on the game.
    pub fn with_scale(mut self, scale: usize) -> Self {
        self.scale = scale.max(1);
        self
    }

    fn starting(size: usize) -> Self {
        let mut board = Self {
            size,
            scale: DEFAULT_SCALE,
            cells: vec![None; size * size],
        };
        let m = (size / 2) as i32;
        for (p, color) in [
            (Position::new(m - 1, m - 1), Color::White),
            (Position::new(m, m), Color::White),
            (Position::new(m, m - 1), Color::Black),
            (Position::new(m - 1, m), Color::Black),
        ] {
            if let Some(i) = board.idx(p) {
                board.cells[i] = Some(color);
            }
        }
        board
    }

    /// Build a board from text rows, row 0 first.
    ///
    /// `X`/`B` is Black, `O`/`W` is White, `.` or `-` is empty. Whitespace
    /// inside a row is ignored so fixtures can be written spaced out.
    pub fn from_rows(rows: &[&str]) -> Result<Self, OthelloError> {
        let size = rows.len();
        if size == 0 {
            return Err(OthelloError::RaggedRows);
        }
        if size > MAX_SIZE {
            return Err(OthelloError::InvalidBoardSize(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let before = cells.len();
            for ch in row.chars().filter(|c| !c.is_whitespace()) {
                cells.push(match ch.to_ascii_uppercase() {
                    'X' | 'B' => Some(Color::Black),
                    'O' | 'W' => Some(Color::White),
                    '.' | '-' => None,
                    other => return Err(OthelloError::InvalidCell(other)),
                });
            }
            if cells.len() - before != size {
                return Err(OthelloError::RaggedRows);
            }
        }
        Ok(Self {
            size,
            scale: DEFAULT_SCALE,
            cells,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    #[inline]
    fn idx(&self, p: Position) -> Option<usize> {
        if self.is_valid_position(p) {
            Some(p.y as usize * self.size + p.x as usize)
        } else {
            None
        }
    }

    /// True iff `p` lies on the board.
    #[inline]
    pub fn is_valid_position(&self, p: Position) -> bool {
        let n = self.size as i32;
        (0..n).contains(&p.x) && (0..n).contains(&p.y)
    }

    /// Disc at `p`, or `None` if the cell is empty or off the board.
    #[inline]
    pub fn get(&self, p: Position) -> Option<Color> {
        self.idx(p).and_then(|i| self.cells[i])
    }

    /// Overwrite a single cell, bypassing the rules.
    pub fn set(&mut self, p: Position, cell: Option<Color>) -> Result<(), OthelloError> {
        let i = self.idx(p).ok_or(OthelloError::OutOfBounds(p))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Iterate over every position on the board, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let n = self.size as i32;
        (0..n).flat_map(move |x| (0..n).map(move |y| Position::new(x, y)))
    }

    /// Collect the opponent discs bracketed by `color` walking from `p` along `dir`.
    ///
    /// Appends nothing unless the run of opponent discs is closed by a disc of
    /// `color` before an empty cell or the edge.
    fn flips_in_direction(
        &self,
        p: Position,
        color: Color,
        dir: Direction,
        out: &mut Vec<Position>,
    ) {
        let start = out.len();
        let mut cursor = p.shifted(dir);
        while self.is_valid_position(cursor) {
            match self.get(cursor) {
                None => break,
                Some(c) if c == color => return,
                Some(_) => out.push(cursor),
            }
            cursor = cursor.shifted(dir);
        }
        out.truncate(start);
    }

    /// Place a disc and flip every bracketed opponent disc.
    ///
    /// Returns the flip-set. An empty result means the move is illegal (occupied,
    /// off the board, or captures nothing) and the board is untouched. With
    /// `perform_flip == false` the flip-set is computed without mutating the grid.
    pub fn place_and_flip_discs(
        &mut self,
        p: Position,
        color: Color,
        perform_flip: bool,
    ) -> Vec<Position> {
        let flipped = self.flip_set(p, color);
        if perform_flip && !flipped.is_empty() {
            self.apply(p, color, &flipped);
        }
        flipped
    }

    /// Flip-set for playing `color` at `p`, without touching the grid.
    pub fn flip_set(&self, p: Position, color: Color) -> Vec<Position> {
        let mut flipped = Vec::new();
        if self.idx(p).is_none() || self.get(p).is_some() {
            return flipped;
        }
        for dir in DIRECTIONS {
            self.flips_in_direction(p, color, dir, &mut flipped);
        }
        flipped
    }

    fn apply(&mut self, p: Position, color: Color, flipped: &[Position]) {
        for &q in std::iter::once(&p).chain(flipped) {
            if let Some(i) = self.idx(q) {
                self.cells[i] = Some(color);
            }
        }
    }

    /// True iff `color` may play at `p`.
    pub fn is_legal_move(&self, p: Position, color: Color) -> bool {
        !self.flip_set(p, color).is_empty()
    }

    /// All legal moves for `color`, column by column.
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.is_legal_move(p, color))
            .collect()
    }

    /// Legal moves for `color` with corners first and corner-exposing squares last.
    pub fn ordered_legal_moves(&self, color: Color) -> Vec<Position> {
        let mut moves = self.legal_moves(color);
        moves.sort_by_key(|&p| self.move_rank(p));
        moves
    }

    fn move_rank(&self, p: Position) -> u8 {
        let corner = self.closest_corner(p);
        if p == corner {
            0
        } else if self.get(corner).is_none()
            && (p.x - corner.x).abs() <= 1
            && (p.y - corner.y).abs() <= 1
        {
            2
        } else {
            1
        }
    }

    /// Apply a legal move in place, returning the information to take it back.
    ///
    /// Returns `None` and leaves the board untouched if the move is illegal.
    pub fn make_move(&mut self, p: Position, color: Color) -> Option<Undo> {
        let flipped = self.place_and_flip_discs(p, color, true);
        if flipped.is_empty() {
            return None;
        }
        Some(Undo {
            pos: p,
            color,
            flipped,
        })
    }

    /// Take back a move applied with [`Board::make_move`].
    ///
    /// Must be called in LIFO order relative to other `make_move` calls.
    pub fn undo_move(&mut self, undo: &Undo) {
        let prior = Some(undo.color.opponent());
        for &q in &undo.flipped {
            if let Some(i) = self.idx(q) {
                self.cells[i] = prior;
            }
        }
        if let Some(i) = self.idx(undo.pos) {
            self.cells[i] = None;
        }
    }

    /// True iff neither colour has a legal move.
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move(Color::Black) && !self.has_legal_move(Color::White)
    }

    /// True iff `color` has at least one legal move.
    pub fn has_legal_move(&self, color: Color) -> bool {
        self.positions().any(|p| self.is_legal_move(p, color))
    }

    /// Number of discs of `color` on the board.
    pub fn points_for_color(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Number of discs of either colour.
    pub fn disc_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.disc_count()
    }

    /// The four corners, in fixed order.
    pub fn corners(&self) -> [Position; 4] {
        let m = self.size as i32 - 1;
        [
            Position::new(0, 0),
            Position::new(0, m),
            Position::new(m, 0),
            Position::new(m, m),
        ]
    }

    /// Corner nearest to `p`; ties go to the earlier corner in [`Board::corners`].
    pub fn closest_corner(&self, p: Position) -> Position {
        let corners = self.corners();
        let mut best = corners[0];
        let mut best_dist = p.dist(best);
        for &c in &corners[1..] {
            let d = p.dist(c);
            if d < best_dist {
                best = c;
                best_dist = d;
            }
        }
        best
    }

    /// True iff the `color` disc at `p` can never be flipped back.
    ///
    /// Each of the 8 directions is walked to the edge; a direction is blocked
    /// when it reaches the edge without meeting an empty cell. The disc is
    /// stable once all 4 axes have at least one blocked direction.
    pub fn is_stable_piece(&self, p: Position, color: Color) -> bool {
        if self.get(p) != Some(color) {
            return false;
        }
        let mut stable_axes = [false; AXES];
        for dir in DIRECTIONS {
            let mut cursor = p;
            cursor.shift(dir.dx, dir.dy);
            let mut blocked = true;
            while self.is_valid_position(cursor) {
                if self.get(cursor).is_none() {
                    blocked = false;
                    break;
                }
                cursor.shift(dir.dx, dir.dy);
            }
            if blocked {
                stable_axes[dir.axis()] = true;
            }
        }
        stable_axes.iter().filter(|&&s| s).count() == AXES
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gap = " ".repeat(self.scale);
        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, "{gap}{}", (b'a' + x as u8) as char)?;
        }
        writeln!(f)?;
        for y in 0..self.size {
            write!(f, "{:2} ", y + 1)?;
            for x in 0..self.size {
                let ch = self
                    .get(Position::new(x as i32, y as i32))
                    .map_or('.', Color::marker);
                write!(f, "{gap}{ch}")?;
            }
            writeln!(f)?;
            for _ in 1..self.scale {
                writeln!(f, "   |")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.size(), 8);
        assert_eq!(board.get(p(3, 3)), Some(Color::White));
        assert_eq!(board.get(p(4, 4)), Some(Color::White));
        assert_eq!(board.get(p(4, 3)), Some(Color::Black));
        assert_eq!(board.get(p(3, 4)), Some(Color::Black));
        assert_eq!(board.points_for_color(Color::Black), 2);
        assert_eq!(board.points_for_color(Color::White), 2);
        assert_eq!(board.disc_count(), 4);
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn test_with_size() {
        let board = Board::with_size(6).unwrap();
        assert_eq!(board.disc_count(), 4);
        assert_eq!(board.get(p(2, 2)), Some(Color::White));
        assert_eq!(Board::with_size(7), Err(OthelloError::InvalidBoardSize(7)));
        assert_eq!(Board::with_size(2), Err(OthelloError::InvalidBoardSize(2)));
    }

    #[test]
    fn test_size_limit() {
        let board = Board::with_size(MAX_SIZE).unwrap();
        let text = board.to_string();
        assert!(text.lines().next().unwrap().trim_end().ends_with('z'));
        assert!(text.contains("26 "));
        assert_eq!(Board::with_size(28), Err(OthelloError::InvalidBoardSize(28)));
        assert_eq!(Board::with_size(160), Err(OthelloError::InvalidBoardSize(160)));

        let row = ".".repeat(28);
        let rows = vec![row.as_str(); 28];
        assert_eq!(Board::from_rows(&rows), Err(OthelloError::InvalidBoardSize(28)));
    }

    #[test]
    fn test_scale_is_cosmetic() {
        let board = Board::new().with_scale(2);
        assert_eq!(board.scale(), 2);
        assert_eq!(board.legal_moves(Color::Black), Board::new().legal_moves(Color::Black));
    }

    #[test]
    fn test_is_valid_position() {
        let board = Board::new();
        assert!(board.is_valid_position(p(0, 0)));
        assert!(board.is_valid_position(p(7, 7)));
        assert!(!board.is_valid_position(p(-1, 0)));
        assert!(!board.is_valid_position(p(0, -1)));
        assert!(!board.is_valid_position(p(8, 0)));
        assert!(!board.is_valid_position(p(0, 8)));
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::new();
        assert_eq!(
            board.legal_moves(Color::Black),
            vec![p(2, 3), p(3, 2), p(4, 5), p(5, 4)]
        );
        assert_eq!(board.legal_moves(Color::White).len(), 4);
        assert!(board.is_legal_move(p(2, 3), Color::Black));
        assert!(!board.is_legal_move(p(3, 3), Color::Black));
        assert!(!board.is_legal_move(p(0, 0), Color::Black));
    }

    #[test]
    fn test_place_and_flip() {
        let mut board = Board::new();
        let flipped = board.place_and_flip_discs(p(2, 3), Color::Black, true);
        assert_eq!(flipped, vec![p(3, 3)]);
        assert_eq!(board.get(p(2, 3)), Some(Color::Black));
        assert_eq!(board.get(p(3, 3)), Some(Color::Black));
        assert_eq!(board.points_for_color(Color::Black), 4);
        assert_eq!(board.points_for_color(Color::White), 1);
    }

    #[test]
    fn test_illegal_placement_is_rejected() {
        let mut board = Board::new();
        let before = board.clone();
        assert!(board.place_and_flip_discs(p(3, 3), Color::Black, true).is_empty());
        assert!(board.place_and_flip_discs(p(0, 0), Color::Black, true).is_empty());
        assert!(board.place_and_flip_discs(p(-1, 9), Color::Black, true).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_dry_run_does_not_mutate() {
        let mut board = Board::new();
        let before = board.clone();
        let flipped = board.place_and_flip_discs(p(2, 3), Color::Black, false);
        assert!(!flipped.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_multi_direction_flip() {
        let mut board = Board::from_rows(&[
            "X . X . X",
            ". O O O .",
            "X O . O X",
            ". O O O .",
            "X . X . X",
        ])
        .unwrap();
        let flipped = board.place_and_flip_discs(p(2, 2), Color::Black, true);
        assert_eq!(flipped.len(), 8);
        assert_eq!(board.points_for_color(Color::White), 0);
    }

    #[test]
    fn test_make_undo_roundtrip() {
        let mut board = Board::new();
        board.place_and_flip_discs(p(2, 3), Color::Black, true);
        for color in [Color::White, Color::Black] {
            for mv in board.legal_moves(color) {
                let before = board.clone();
                let undo = board.make_move(mv, color).unwrap();
                assert_ne!(board, before);
                board.undo_move(&undo);
                assert_eq!(board, before);
            }
        }
    }

    #[test]
    fn test_make_move_illegal() {
        let mut board = Board::new();
        assert!(board.make_move(p(0, 0), Color::Black).is_none());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_game_over() {
        assert!(!Board::new().is_game_over());
        let mut board = Board::new();
        for q in board.positions().collect::<Vec<_>>() {
            board.set(q, Some(Color::Black)).unwrap();
        }
        assert!(board.is_game_over());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.set(p(8, 0), Some(Color::Black)),
            Err(OthelloError::OutOfBounds(p(8, 0)))
        );
        assert_eq!(board.get(p(8, 0)), None);
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(Board::from_rows(&[]), Err(OthelloError::RaggedRows));
        assert_eq!(Board::from_rows(&["..", "."]), Err(OthelloError::RaggedRows));
        assert_eq!(Board::from_rows(&[".?", ".."]), Err(OthelloError::InvalidCell('?')));
    }

    #[test]
    fn test_closest_corner() {
        let board = Board::new();
        assert_eq!(board.closest_corner(p(1, 1)), p(0, 0));
        assert_eq!(board.closest_corner(p(6, 6)), p(7, 7));
        assert_eq!(board.closest_corner(p(1, 6)), p(0, 7));
        assert_eq!(board.closest_corner(p(6, 1)), p(7, 0));
        assert_eq!(board.closest_corner(p(2, 2)), p(0, 0));
        // Equidistant from all four corners: first in the list wins.
        let board = Board::from_rows(&["...", "...", "..."]).unwrap();
        assert_eq!(board.closest_corner(p(1, 1)), p(0, 0));
    }

    #[test]
    fn test_stable_boxed_corner() {
        let mut board = Board::new();
        for i in 0..8 {
            board.set(p(i, 0), Some(Color::Black)).unwrap();
            board.set(p(0, i), Some(Color::Black)).unwrap();
        }
        board.set(p(1, 1), Some(Color::Black)).unwrap();
        assert!(board.is_stable_piece(p(0, 0), Color::Black));
        assert!(!board.is_stable_piece(p(0, 0), Color::White));
    }

    #[test]
    fn test_isolated_disc_not_stable() {
        let board = Board::from_rows(&[
            ".....",
            ".....",
            "..X..",
            ".....",
            ".....",
        ])
        .unwrap();
        assert!(!board.is_stable_piece(p(2, 2), Color::Black));
        assert!(!Board::new().is_stable_piece(p(3, 3), Color::White));
    }

    #[test]
    fn test_full_board_is_stable() {
        let mut board = Board::new();
        for q in board.positions().collect::<Vec<_>>() {
            board.set(q, Some(Color::White)).unwrap();
        }
        assert!(board.is_stable_piece(p(3, 3), Color::White));
    }

    #[test]
    fn test_ordered_moves_prefer_corners() {
        let board = Board::from_rows(&[
            ". O X . .",
            ". . . . .",
            ". . . . .",
            ". . . . .",
            ". . . . .",
        ])
        .unwrap();
        let moves = board.ordered_legal_moves(Color::Black);
        assert_eq!(moves, vec![p(0, 0)]);

        let board = Board::from_rows(&[
            "......",
            "......",
            "..O...",
            "...XO.",
            "......",
            "......",
        ])
        .unwrap();
        assert_eq!(board.legal_moves(Color::Black), vec![p(1, 1), p(5, 3)]);
        // The square next to the empty corner is searched last.
        assert_eq!(board.ordered_legal_moves(Color::Black), vec![p(5, 3), p(1, 1)]);
    }

    #[test]
    fn test_display_contains_markers() {
        let s = Board::new().to_string();
        assert!(s.contains('a'));
        assert!(s.contains('8'));
        assert!(s.contains('X'));
        assert!(s.contains('O'));
    }
}
