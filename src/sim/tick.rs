//! Per-tick input and the idle-mode autopilot
//!
//! Input is edge-triggered: every field describes what was *just* pressed
//! or typed during this tick. Pointer clicks arrive already hit-tested by
//! the layout layer as semantic targets.

use super::collision::is_fatal_cell;
use super::grid::{Direction, Position};
use super::state::Playfield;

/// Buttons the scenes react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    NewGame,
    CreateLevel,
    Ranking,
    Quit,
    MainMenu,
    SaveRecord,
    ToggleScoreOrder,
    ToggleTimeOrder,
    ResetLevel,
    SaveLevel,
}

/// Text inputs the scenes own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    PlayerName,
    LevelName,
    Width,
    Height,
}

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Button(Button),
    Field(TextField),
    /// Grid cell of the playfield area
    Cell(Position),
    /// Anywhere else (clears focus)
    Elsewhere,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow key just pressed
    pub direction: Option<Direction>,
    /// Enter
    pub confirm: bool,
    /// Restart the current run (R)
    pub reset: bool,
    /// Escape
    pub back: bool,
    /// Move focus to the next text field
    pub tab: bool,
    pub backspace: bool,
    /// Characters typed this tick
    pub text: String,
    pub click: Option<Click>,
    /// Idle/demo mode - the autopilot steers the snake
    pub idle_mode: bool,
}

impl TickInput {
    pub fn direction(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Default::default()
        }
    }

    pub fn click(click: Click) -> Self {
        Self {
            click: Some(click),
            ..Default::default()
        }
    }

    pub fn button(button: Button) -> Self {
        Self::click(Click::Button(button))
    }

    pub fn typed(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    pub fn back() -> Self {
        Self {
            back: true,
            ..Default::default()
        }
    }
}

/// Pick a heading for idle mode: the safe move that closes the most
/// distance to the food, keeping the current heading on ties.
///
/// Returns `None` when every move is fatal (the snake just carries on).
pub fn idle_direction(field: &Playfield) -> Option<Direction> {
    let snake = field.snake();
    let head = snake.head();
    let current = snake.direction();

    // Keep current heading first so ties favour going straight
    let candidates = std::iter::once(current).chain(
        Direction::ALL
            .into_iter()
            .filter(move |&d| d != current && !d.is_opposite(current)),
    );

    candidates
        .filter_map(|d| {
            let cell = head.step(d);
            let growing = field.food() == Some(cell);
            if is_fatal_cell(field.level(), snake, cell, growing) {
                return None;
            }
            let distance = field.food().map_or(0, |food| cell.manhattan(food));
            Some((distance, d))
        })
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, d)| d)
}
