//! The four movement directions of the tile grid

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Order in which equally good turns are preferred
    pub const TURN_PRIORITY: [Direction; 4] =
        [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in tile coordinates (rows grow downwards)
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn unit(self) -> Vec2 {
        self.vector().as_vec2()
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
}

/// Tile `n` steps ahead of `tile`. Looking up also shifts `n` tiles to the
/// left, like the arcade's overflow error in ghost targeting.
pub fn tiles_ahead(tile: IVec2, dir: Direction, n: i32) -> IVec2 {
    let ahead = tile + dir.vector() * n;
    if dir == Direction::Up {
        ahead - IVec2::new(n, 0)
    } else {
        ahead
    }
}
