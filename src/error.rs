//! Errors that escape the tick loop
//!
//! Persistence and level-file failures stay inside the scenes (logged and
//! shown as view state). What reaches `Game::update` is either a broken
//! snake invariant or a transition to a scene nobody registered - both
//! programming errors that end the run.

use std::fmt;

use crate::sim::{GameState, LevelError, SnakeError};

#[derive(Debug)]
pub enum GameError {
    Snake(SnakeError),
    Level(LevelError),
    /// A scene asked for a state with no registered scene instance
    UnknownState(GameState),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Snake(e) => write!(f, "snake error: {e}"),
            GameError::Level(e) => write!(f, "level error: {e}"),
            GameError::UnknownState(state) => write!(f, "unknown game state {state:?}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Snake(e) => Some(e),
            GameError::Level(e) => Some(e),
            GameError::UnknownState(_) => None,
        }
    }
}

impl From<SnakeError> for GameError {
    fn from(e: SnakeError) -> Self {
        GameError::Snake(e)
    }
}

impl From<LevelError> for GameError {
    fn from(e: LevelError) -> Self {
        GameError::Level(e)
    }
}
