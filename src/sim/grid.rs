//! Grid coordinates, movement directions and sprite orientation
//!
//! Screen convention: x grows to the right, y grows downward, so `Up`
//! decreases y. Rotation angles are in radians, clockwise from the +x axis
//! (matching a y-down screen).

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer grid cell. Bounds are contextual to a level's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another cell
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Pixel centre of this cell for a renderer drawing `tile_size` squares
    /// below a `top_offset` pixel HUD bar
    pub fn to_world(self, tile_size: u32, top_offset: u32) -> Vec2 {
        let tile = tile_size as f32;
        Vec2::new(
            self.x as f32 * tile + tile / 2.0,
            self.y as f32 * tile + tile / 2.0 + top_offset as f32,
        )
    }
}

/// Movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step (dx, dy)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Sprite rotation for a head/body/tail facing this way
    pub fn rotation(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Down => FRAC_PI_2,
            Direction::Left => PI,
            Direction::Up => 3.0 * FRAC_PI_2,
        }
    }

    /// Direction of travel from `segment` toward `ahead`, where `ahead` is the
    /// segment one step closer to the head.
    ///
    /// Only meaningful for adjacent cells; other inputs still resolve through
    /// the same comparisons (column match first).
    pub fn between(ahead: Position, segment: Position) -> Direction {
        if ahead.x == segment.x {
            if ahead.y < segment.y {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if ahead.x < segment.x {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Sprite rotation for a corner piece where travel turns from `old` to `new`
pub fn corner_rotation(old: Direction, new: Direction) -> f32 {
    match old {
        Direction::Right if new == Direction::Up => 0.0,
        Direction::Right => 3.0 * FRAC_PI_2,
        Direction::Left if new == Direction::Up => FRAC_PI_2,
        Direction::Left => PI,
        Direction::Up if new == Direction::Left => 3.0 * FRAC_PI_2,
        Direction::Up => PI,
        Direction::Down if new == Direction::Left => 0.0,
        Direction::Down => FRAC_PI_2,
    }
}
