//! Grid geometry: positions and step directions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the layered grid.
///
/// `layer` selects a floor of the grid; movement steps never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    pub layer: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32, layer: i32) -> Self {
        Self { x, y, layer }
    }

    /// The adjacent cell one step in `dir`, on the same layer.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            layer: self.layer,
        }
    }

    /// Chebyshev distance to another cell.
    ///
    /// Cells on different layers are never near each other; the distance
    /// saturates to `i32::MAX`.
    pub fn chebyshev(self, other: Pos) -> i32 {
        if self.layer != other.layer {
            return i32::MAX;
        }
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }

    /// Check if another cell is one step away (including diagonals).
    pub fn is_adjacent(self, other: Pos) -> bool {
        self != other && self.chebyshev(other) <= 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layer == 0 {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            write!(f, "({}, {}, L{})", self.x, self.y, self.layer)
        }
    }
}

/// The eight step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset for this direction. North is -y.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_on_layer() {
        let pos = Pos::new(4, 4, 2);
        for dir in Direction::ALL {
            assert_eq!(pos.step(dir).layer, 2);
        }
    }

    #[test]
    fn test_all_steps_are_adjacent() {
        let pos = Pos::new(10, 10, 0);
        for dir in Direction::ALL {
            let next = pos.step(dir);
            assert!(pos.is_adjacent(next), "{dir:?} step should be adjacent");
        }
    }

    #[test]
    fn test_chebyshev() {
        let a = Pos::new(0, 0, 0);
        assert_eq!(a.chebyshev(Pos::new(3, -2, 0)), 3);
        assert_eq!(a.chebyshev(Pos::new(1, 1, 0)), 1);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn test_cross_layer_is_never_adjacent() {
        let a = Pos::new(5, 5, 0);
        let b = Pos::new(5, 6, 1);
        assert_eq!(a.chebyshev(b), i32::MAX);
        assert!(!a.is_adjacent(b));
    }

    #[test]
    fn test_not_adjacent_to_self() {
        let a = Pos::new(2, 2, 0);
        assert!(!a.is_adjacent(a));
    }
}
