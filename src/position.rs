//! Board coordinates and compass directions.
//!
//! A [`Position`] is a plain `(x, y)` value: `x` is the column and `y` the row,
//! both 0-indexed. Direction walking always happens on a working copy, and the
//! 8 compass [`Direction`]s are kept as a separate immutable type so that a scan
//! cursor can never be mistaken for the direction it is walking in.

use std::fmt;
use std::str::FromStr;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move this position in place. Only used on local scan cursors, such as
    /// the edge walk in [`Board::is_stable_piece`](crate::board::Board::is_stable_piece).
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Return the neighbouring position one step along `dir`.
    #[inline]
    pub fn shifted(self, dir: Direction) -> Position {
        Position::new(self.x + dir.dx, self.y + dir.dy)
    }

    /// Euclidean distance to another position.
    pub fn dist(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..26).contains(&self.x) && self.y >= 0 {
            let col = (b'a' + self.x as u8) as char;
            write!(f, "({col}, {})", self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Parse a coordinate like `d3`: column letter followed by a 1-based row.
impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(|| format!("invalid coordinate: {s}"))?;
        let row: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("invalid coordinate: {s}"))?;
        if row < 1 {
            return Err(format!("invalid coordinate: {s}"));
        }
        let x = (col.to_ascii_lowercase() as u8 - b'a') as i32;
        Ok(Position::new(x, row - 1))
    }
}

/// A unit step towards one of the 8 neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// The direction pointing the opposite way.
    pub const fn mirror(self) -> Direction {
        Direction::new(-self.dx, -self.dy)
    }

    /// Index (0..4) of the line this direction lies on.
    ///
    /// A direction and its mirror share the same axis:
    /// 0 = horizontal, 1 = vertical, 2 = main diagonal, 3 = anti-diagonal.
    pub const fn axis(self) -> usize {
        match (self.dx, self.dy) {
            (_, 0) => 0,
            (0, _) => 1,
            (dx, dy) if dx == dy => 2,
            _ => 3,
        }
    }
}

/// Offsets to the 8 neighbouring cells.
/// Order: West, SW, South, SE, East, NE, North, NW
pub const DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, 0),
    Direction::new(-1, 1),
    Direction::new(0, 1),
    Direction::new(1, 1),
    Direction::new(1, 0),
    Direction::new(1, -1),
    Direction::new(0, -1),
    Direction::new(-1, -1),
];

/// Number of distinct axes through a cell.
pub const AXES: usize = 4;
