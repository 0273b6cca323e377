//! Food placement over free grid cells

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::grid::Position;
use super::level::Level;

/// Cells that are neither wall nor snake
pub fn free_cells(level: &Level, snake_body: impl IntoIterator<Item = Position>) -> Vec<Position> {
    let occupied: HashSet<Position> = level.walls().iter().copied().chain(snake_body).collect();
    level.cells().filter(|c| !occupied.contains(c)).collect()
}

/// Pick a uniformly random free cell for the next food.
///
/// Returns `None` (and logs) when the grid is full; callers keep playing
/// without food in that case.
pub fn spawn_food<R: Rng + ?Sized>(
    level: &Level,
    snake_body: impl IntoIterator<Item = Position>,
    rng: &mut R,
) -> Option<Position> {
    let free = free_cells(level, snake_body);
    match free.choose(rng) {
        Some(&pos) => {
            log::debug!("new food created at ({}, {})", pos.x, pos.y);
            Some(pos)
        }
        None => {
            log::warn!("failed to create food: no free space left");
            None
        }
    }
}
