//! The six axis-aligned directions a light packet can travel in.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One of the six grid directions.
///
/// North is `-Z`, East is `+X`, Up is `+Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    /// All six directions in array form for iteration.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// The horizontal directions in clockwise order (viewed from above).
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit grid offset for this direction.
    pub const fn vector(self) -> IVec3 {
        match self {
            Direction::North => IVec3::new(0, 0, -1),
            Direction::South => IVec3::new(0, 0, 1),
            Direction::East => IVec3::new(1, 0, 0),
            Direction::West => IVec3::new(-1, 0, 0),
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::Down => IVec3::new(0, -1, 0),
        }
    }

    /// Inverse of [`vector`](Self::vector). Returns `None` for anything that
    /// is not one of the six unit offsets.
    pub fn from_vector(v: IVec3) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.vector() == v)
    }

    /// Returns the opposite direction.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Next cardinal direction clockwise: North → East → South → West → North.
    ///
    /// Vertical directions have no horizontal successor and map to North.
    pub const fn clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::Up | Direction::Down => Direction::North,
        }
    }

    /// Returns `true` for Up and Down.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Returns `true` if both directions lie on the same axis.
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_are_unit_length() {
        for d in Direction::ALL {
            let v = d.vector();
            assert_eq!(v.abs().element_sum(), 1, "{d} is not a unit offset");
        }
    }

    #[test]
    fn test_opposite_negates_vector() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().vector(), -d.vector());
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_from_vector_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_vector(d.vector()), Some(d));
        }
        assert_eq!(Direction::from_vector(IVec3::new(1, 1, 0)), None);
        assert_eq!(Direction::from_vector(IVec3::ZERO), None);
    }

    #[test]
    fn test_clockwise_cycles_cardinals() {
        let mut d = Direction::North;
        for expected in [
            Direction::East,
            Direction::South,
            Direction::West,
            Direction::North,
        ] {
            d = d.clockwise();
            assert_eq!(d, expected);
        }
        assert_eq!(Direction::Up.clockwise(), Direction::North);
    }

    #[test]
    fn test_clockwise_is_perpendicular_for_cardinals() {
        for d in Direction::CARDINAL {
            assert_eq!(d.vector().dot(d.clockwise().vector()), 0);
        }
    }

    #[test]
    fn test_parallel() {
        assert!(Direction::East.is_parallel(Direction::West));
        assert!(Direction::Up.is_parallel(Direction::Up));
        assert!(!Direction::North.is_parallel(Direction::East));
    }
}
