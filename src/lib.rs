//! Grid Snake - a tile-grid snake arcade game
//!
//! Core modules:
//! - `sim`: Grid simulation (snake, level, food, collisions, tick input)
//! - `scenes`: Scene state machine (menu, playing, game over, editor, ranking)
//! - `game`: Orchestrator holding the active scene, score and run time
//! - `persistence`: Record store interface with deadline-bounded calls
//! - `levels`: Level files on disk
//! - `settings`: Data-driven game configuration

pub mod error;
pub mod game;
pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod scenes;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::Game;
pub use highscores::{Record, RecordFilter};
pub use settings::Settings;

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Wall-clock length of one tick
    pub const SIM_DT: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

    /// Longest player name accepted on the game over screen
    pub const MAX_PLAYER_NAME: usize = 13;
    /// Longest level name accepted by the editor and the level model
    pub const MAX_LEVEL_NAME: usize = 30;
    /// Smallest level side the editor accepts
    pub const MIN_LEVEL_SIDE: u32 = 3;
    /// Rows shown on the ranking screen
    pub const RECORDS_PAGE: usize = 20;

    /// Characters a level name may not contain (it doubles as a file name)
    pub const FORBIDDEN_NAME_CHARS: &str = "/\\:*?\"<>| ";
    /// Player name stored when the field is left blank
    pub const ANONYMOUS_PLAYER: &str = "undefined";
}

/// Format a run duration as `MM:SS` (minutes keep growing past an hour)
pub fn format_clock(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
