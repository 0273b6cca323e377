//! Static playfield description: name, grid size and wall cells
//!
//! Serialized as `{"name", "grid_width", "grid_height", "walls": [{"x","y"}]}`.
//! Deserialization goes through the same validation as `Level::new`.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Position;
use crate::consts::{FORBIDDEN_NAME_CHARS, MAX_LEVEL_NAME};

/// Level validation and level-file failures
#[derive(Debug)]
pub enum LevelError {
    InvalidName(String),
    InvalidSize { width: i64, height: i64 },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::InvalidName(name) => write!(f, "invalid level name {name:?}"),
            LevelError::InvalidSize { width, height } => {
                write!(f, "invalid level size {width}x{height}")
            }
            LevelError::Io(e) => write!(f, "level file error: {e}"),
            LevelError::Json(e) => write!(f, "level json error: {e}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            LevelError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Json(e)
    }
}

/// True if `name` can be used as a level name and file stem
pub fn is_valid_level_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_LEVEL_NAME
        && !name.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(c))
}

/// On-disk shape of a level
#[derive(Serialize, Deserialize)]
struct LevelFile {
    name: String,
    grid_width: i64,
    grid_height: i64,
    #[serde(default)]
    walls: Vec<Position>,
}

/// Immutable playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LevelFile", into = "LevelFile")]
pub struct Level {
    name: String,
    width: u32,
    height: u32,
    /// Walls in first-seen order, duplicates removed
    walls: Vec<Position>,
    wall_set: HashSet<Position>,
}

impl Level {
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        walls: impl IntoIterator<Item = Position>,
    ) -> Result<Self, LevelError> {
        let name = name.into();
        if !is_valid_level_name(&name) {
            return Err(LevelError::InvalidName(name));
        }
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(LevelError::InvalidSize {
                width: width.into(),
                height: height.into(),
            });
        }

        let mut wall_set = HashSet::new();
        let walls = walls.into_iter().filter(|w| wall_set.insert(*w)).collect();

        Ok(Self {
            name,
            width,
            height,
            walls,
            wall_set,
        })
    }

    /// Wall-free level
    pub fn empty(name: impl Into<String>, width: u32, height: u32) -> Result<Self, LevelError> {
        Self::new(name, width, height, [])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn walls(&self) -> &[Position] {
        &self.walls
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.wall_set.contains(&pos)
    }

    /// True if `pos` lies inside `[0, width) x [0, height)`
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Every cell of the grid, column by column
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width as i32).flat_map(move |x| (0..self.height as i32).map(move |y| Position::new(x, y)))
    }

    /// Start cell for a new snake
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<LevelFile> for Level {
    type Error = LevelError;

    fn try_from(file: LevelFile) -> Result<Self, Self::Error> {
        let size_err = || LevelError::InvalidSize {
            width: file.grid_width,
            height: file.grid_height,
        };
        let width = u32::try_from(file.grid_width).map_err(|_| size_err())?;
        let height = u32::try_from(file.grid_height).map_err(|_| size_err())?;
        Level::new(file.name, width, height, file.walls)
    }
}

impl From<Level> for LevelFile {
    fn from(level: Level) -> Self {
        LevelFile {
            name: level.name,
            grid_width: level.width.into(),
            grid_height: level.height.into(),
            walls: level.walls,
        }
    }
}
