//! Grid simulation module
//!
//! All gameplay rules live here. This module must stay pure:
//! - Fixed tick cadence only
//! - Seeded RNG only
//! - No rendering, input-device or file dependencies

pub mod collision;
pub mod food;
pub mod grid;
pub mod level;
pub mod snake;
pub mod state;
pub mod tick;

pub use collision::Collision;
pub use food::{free_cells, spawn_food};
pub use grid::{Direction, Position, corner_rotation};
pub use level::{Level, LevelError, is_valid_level_name};
pub use snake::{SegmentKind, SegmentSprite, Snake, SnakeError};
pub use state::{GameState, Playfield, SnakeSpec, StepOutcome};
pub use tick::{Button, Click, TextField, TickInput, idle_direction};
