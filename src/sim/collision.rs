//! Collision detection on the grid
//!
//! Checks run against the snake's freshly inserted head, in the fixed order
//! wall, border, (food), self.

use super::grid::Position;
use super::level::Level;
use super::snake::Snake;

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Border,
    SelfBody,
}

/// Head sits on a wall cell
pub fn hits_wall(level: &Level, head: Position) -> bool {
    level.is_wall(head)
}

/// Head left the grid
pub fn hits_border(level: &Level, head: Position) -> bool {
    !level.in_bounds(head)
}

/// First environmental collision for the head, wall before border
pub fn environment_collision(level: &Level, head: Position) -> Option<Collision> {
    if hits_wall(level, head) {
        Some(Collision::Wall)
    } else if hits_border(level, head) {
        Some(Collision::Border)
    } else {
        None
    }
}

/// True if moving the head into `cell` next step would be fatal
///
/// The current tail is treated as free when the snake is not about to grow,
/// since it moves out of the way in the same step.
pub fn is_fatal_cell(level: &Level, snake: &Snake, cell: Position, growing: bool) -> bool {
    if environment_collision(level, cell).is_some() {
        return true;
    }
    let skip_tail = usize::from(!growing);
    snake
        .body()
        .take(snake.len() - skip_tail)
        .any(|segment| segment == cell)
}
