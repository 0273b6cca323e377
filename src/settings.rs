//! Game settings
//!
//! Loaded from a JSON file; every missing field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::SnakeSpec;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Layout ===
    /// Playfield width in pixels
    pub screen_width: u32,
    /// Playfield height in pixels (HUD bar excluded)
    pub screen_height: u32,
    /// Pixels per grid cell
    pub tile_size: u32,
    /// HUD bar height above the playfield
    pub top_bar_height: u32,

    // === Snake ===
    pub initial_snake_len: usize,
    /// Starting ticks between moves
    pub initial_move_interval: u32,
    /// Fastest allowed ticks between moves
    pub min_move_interval: u32,
    /// Speed up after every N points (0 disables)
    pub speed_increase_interval: u32,
    /// Ticks removed from the move interval per speed-up
    pub speed_increase_amount: u32,

    // === Storage ===
    /// Directory scanned for `*.json` levels
    pub levels_dir: PathBuf,
    /// Ranking file; `None` keeps records in memory only
    pub records_path: Option<PathBuf>,
    /// Deadline for a single record store call, in milliseconds
    pub persistence_timeout_ms: u64,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 480,
            screen_height: 360,
            tile_size: 20,
            top_bar_height: 40,

            initial_snake_len: 2,
            initial_move_interval: 45,
            min_move_interval: 5,
            speed_increase_interval: 5,
            speed_increase_amount: 5,

            levels_dir: PathBuf::from("levels"),
            records_path: None,
            persistence_timeout_ms: 5_000,

            seed: None,
        }
    }
}

impl Settings {
    /// Widest level that fits the screen
    pub fn max_grid_width(&self) -> u32 {
        self.screen_width / self.tile_size.max(1)
    }

    /// Tallest level that fits the screen
    pub fn max_grid_height(&self) -> u32 {
        self.screen_height / self.tile_size.max(1)
    }

    pub fn persistence_timeout(&self) -> Duration {
        Duration::from_millis(self.persistence_timeout_ms)
    }

    pub fn snake_spec(&self) -> SnakeSpec {
        SnakeSpec {
            length: self.initial_snake_len,
            move_interval: self.initial_move_interval,
            min_move_interval: self.min_move_interval,
        }
    }

    /// True if eating brought the score to a speed-up threshold
    pub fn speeds_up_at(&self, score: u32) -> bool {
        self.speed_increase_interval != 0 && score % self.speed_increase_interval == 0
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Malformed settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
