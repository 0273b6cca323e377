//! Level editor: name, size and wall layout of a new level

use std::collections::BTreeSet;

use crate::consts::{MAX_LEVEL_NAME, MIN_LEVEL_SIDE};
use crate::settings::Settings;
use crate::sim::{Button, Click, GameState, Level, Position, TextField, TickInput, is_valid_level_name};

use super::{SceneContext, edit_text};

const DEFAULT_NAME: &str = "new_level";
/// Digits accepted in the width/height fields
const MAX_SIDE_DIGITS: usize = 4;

/// Which part of the editor receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    #[default]
    None,
    Grid,
    Name,
    Width,
    Height,
}

impl EditorFocus {
    /// Tab order over the text fields
    fn next(self) -> Self {
        match self {
            EditorFocus::Name => EditorFocus::Width,
            EditorFocus::Width => EditorFocus::Height,
            EditorFocus::Height | EditorFocus::None | EditorFocus::Grid => EditorFocus::Name,
        }
    }
}

#[derive(Debug)]
pub struct LevelEditorScene {
    focus: EditorFocus,
    name: String,
    width_text: String,
    height_text: String,
    /// Last accepted size
    width: u32,
    height: u32,
    walls: BTreeSet<Position>,
    max_width: u32,
    max_height: u32,
    name_valid: bool,
    width_valid: bool,
    height_valid: bool,
    save_error: Option<String>,
}

#[derive(Debug)]
pub struct LevelEditorView<'a> {
    pub focus: EditorFocus,
    pub name: &'a str,
    pub width_text: &'a str,
    pub height_text: &'a str,
    pub width: u32,
    pub height: u32,
    /// Walls inside the current size
    pub walls: Vec<Position>,
    pub name_valid: bool,
    pub width_valid: bool,
    pub height_valid: bool,
    pub save_error: Option<&'a str>,
}

impl LevelEditorScene {
    pub fn new(settings: &Settings) -> Self {
        Self {
            focus: EditorFocus::None,
            name: DEFAULT_NAME.to_string(),
            width_text: MIN_LEVEL_SIDE.to_string(),
            height_text: MIN_LEVEL_SIDE.to_string(),
            width: MIN_LEVEL_SIDE,
            height: MIN_LEVEL_SIDE,
            walls: BTreeSet::new(),
            max_width: settings.max_grid_width(),
            max_height: settings.max_grid_height(),
            name_valid: true,
            width_valid: true,
            height_valid: true,
            save_error: None,
        }
    }

    pub fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        *self = Self::new(ctx.settings);
    }

    pub fn is_valid(&self) -> bool {
        self.name_valid && self.width_valid && self.height_valid
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput) -> GameState {
        if input.back {
            log::debug!("level editor closed without saving");
            return GameState::MainMenu;
        }

        match input.click {
            Some(Click::Button(Button::MainMenu)) => return GameState::MainMenu,
            Some(Click::Button(Button::ResetLevel)) => {
                *self = Self::new(ctx.settings);
                return GameState::LevelCreate;
            }
            Some(Click::Button(Button::SaveLevel)) => return self.save(ctx),
            Some(Click::Field(TextField::LevelName)) => self.focus = EditorFocus::Name,
            Some(Click::Field(TextField::Width)) => self.focus = EditorFocus::Width,
            Some(Click::Field(TextField::Height)) => self.focus = EditorFocus::Height,
            Some(Click::Cell(cell)) => {
                self.focus = EditorFocus::Grid;
                self.toggle_wall(cell);
            }
            Some(Click::Field(TextField::PlayerName) | Click::Elsewhere) => {
                self.focus = EditorFocus::None;
            }
            Some(Click::Button(_)) | None => {}
        }

        if input.tab {
            self.focus = self.focus.next();
        }

        match self.focus {
            EditorFocus::Name => {
                if edit_text(&mut self.name, input, MAX_LEVEL_NAME) {
                    self.name_valid = is_valid_level_name(&self.name);
                }
            }
            EditorFocus::Width => {
                if edit_text(&mut self.width_text, input, MAX_SIDE_DIGITS) {
                    self.width_valid =
                        accept_side(&self.width_text, self.max_width, &mut self.width);
                }
            }
            EditorFocus::Height => {
                if edit_text(&mut self.height_text, input, MAX_SIDE_DIGITS) {
                    self.height_valid =
                        accept_side(&self.height_text, self.max_height, &mut self.height);
                }
            }
            EditorFocus::None | EditorFocus::Grid => {}
        }

        GameState::LevelCreate
    }

    pub fn view(&self) -> LevelEditorView<'_> {
        LevelEditorView {
            focus: self.focus,
            name: &self.name,
            width_text: &self.width_text,
            height_text: &self.height_text,
            width: self.width,
            height: self.height,
            walls: self.walls_in_bounds().collect(),
            name_valid: self.name_valid,
            width_valid: self.width_valid,
            height_valid: self.height_valid,
            save_error: self.save_error.as_deref(),
        }
    }

    fn inside(&self, cell: Position) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    fn walls_in_bounds(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls.iter().copied().filter(|&w| self.inside(w))
    }

    fn toggle_wall(&mut self, cell: Position) {
        if !self.inside(cell) {
            return;
        }
        if !self.walls.remove(&cell) {
            self.walls.insert(cell);
        }
    }

    fn save(&mut self, ctx: &mut SceneContext<'_>) -> GameState {
        if !self.is_valid() {
            log::warn!("level not saved: invalid fields");
            self.save_error = Some("fix the invalid fields first".to_string());
            return GameState::LevelCreate;
        }

        let level = match Level::new(
            self.name.clone(),
            self.width,
            self.height,
            self.walls_in_bounds(),
        ) {
            Ok(level) => level,
            Err(e) => {
                log::error!("level not saved: {e}");
                self.save_error = Some(e.to_string());
                return GameState::LevelCreate;
            }
        };

        match ctx.levels.save(&level) {
            Ok(_) => GameState::MainMenu,
            Err(e) => {
                log::error!("failed to save level {}: {e}", level.name());
                self.save_error = Some(e.to_string());
                GameState::LevelCreate
            }
        }
    }
}

/// Parse a side length; stores it in `side` and returns true when it lies
/// in `[MIN_LEVEL_SIDE, max]`
fn accept_side(text: &str, max: u32, side: &mut u32) -> bool {
    match text.parse::<u32>() {
        Ok(value) if (MIN_LEVEL_SIDE..=max).contains(&value) => {
            *side = value;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Session;
    use crate::levels::LevelLibrary;
    use crate::persistence::Repository;

    fn library(name: &str) -> LevelLibrary {
        let dir = std::env::temp_dir().join(format!("grid-snake-editor-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        LevelLibrary::new(dir)
    }

    fn backspaces(n: usize, editor: &mut LevelEditorScene, ctx: &mut SceneContext<'_>) {
        let input = TickInput {
            backspace: true,
            ..Default::default()
        };
        for _ in 0..n {
            editor.update(ctx, &input);
        }
    }

    #[test]
    fn test_defaults() {
        let editor = LevelEditorScene::new(&Settings::default());
        let view = editor.view();
        assert_eq!(view.name, "new_level");
        assert_eq!((view.width, view.height), (3, 3));
        assert_eq!(view.focus, EditorFocus::None);
        assert!(editor.is_valid());
    }

    #[test]
    fn test_build_and_save_level() {
        let settings = Settings::default();
        let lib = library("save");
        let repo = Repository::in_memory();
        let mut session = Session::default();
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut editor = LevelEditorScene::new(&settings);
        editor.update(&mut ctx, &TickInput::click(Click::Field(TextField::LevelName)));
        backspaces(9, &mut editor, &mut ctx);
        editor.update(&mut ctx, &TickInput::typed("maze"));

        editor.update(&mut ctx, &TickInput::click(Click::Field(TextField::Width)));
        backspaces(1, &mut editor, &mut ctx);
        editor.update(&mut ctx, &TickInput::typed("6"));
        let tab = TickInput {
            tab: true,
            ..Default::default()
        };
        editor.update(&mut ctx, &tab);
        assert_eq!(editor.view().focus, EditorFocus::Height);
        backspaces(1, &mut editor, &mut ctx);
        editor.update(&mut ctx, &TickInput::typed("5"));

        editor.update(&mut ctx, &TickInput::click(Click::Cell(Position::new(4, 4))));
        editor.update(&mut ctx, &TickInput::click(Click::Cell(Position::new(1, 1))));
        editor.update(&mut ctx, &TickInput::click(Click::Cell(Position::new(1, 1))));
        // Outside the grid: ignored
        editor.update(&mut ctx, &TickInput::click(Click::Cell(Position::new(9, 0))));
        assert_eq!(editor.view().focus, EditorFocus::Grid);
        assert_eq!(editor.view().walls, [Position::new(4, 4)]);

        assert_eq!(
            editor.update(&mut ctx, &TickInput::button(Button::SaveLevel)),
            GameState::MainMenu
        );
        let saved = lib.load("maze.json").unwrap();
        assert_eq!((saved.width(), saved.height()), (6, 5));
        assert_eq!(saved.walls(), [Position::new(4, 4)]);
    }

    #[test]
    fn test_invalid_fields_block_save() {
        let settings = Settings::default();
        let lib = library("invalid");
        let repo = Repository::in_memory();
        let mut session = Session::default();
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut editor = LevelEditorScene::new(&settings);
        editor.update(&mut ctx, &TickInput::click(Click::Field(TextField::Width)));
        editor.update(&mut ctx, &TickInput::typed("0"));
        // "30" exceeds the 24-cell screen width
        assert!(!editor.view().width_valid);
        assert_eq!(editor.view().width, 3);
        assert_eq!(
            editor.update(&mut ctx, &TickInput::button(Button::SaveLevel)),
            GameState::LevelCreate
        );
        assert!(editor.view().save_error.is_some());
        assert!(lib.scan().unwrap().is_empty());

        editor.update(&mut ctx, &TickInput::click(Click::Field(TextField::LevelName)));
        editor.update(&mut ctx, &TickInput::typed("a/b"));
        assert!(!editor.view().name_valid);
    }

    #[test]
    fn test_shrinking_drops_walls_and_reset() {
        let settings = Settings::default();
        let lib = library("shrink");
        let repo = Repository::in_memory();
        let mut session = Session::default();
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut editor = LevelEditorScene::new(&settings);
        editor.update(&mut ctx, &TickInput::click(Click::Field(TextField::Width)));
        backspaces(1, &mut editor, &mut ctx);
        editor.update(&mut ctx, &TickInput::typed("8"));
        editor.update(&mut ctx, &TickInput::click(Click::Cell(Position::new(7, 0))));
        assert_eq!(editor.view().walls, [Position::new(7, 0)]);

        editor.update(&mut ctx, &TickInput::click(Click::Field(TextField::Width)));
        backspaces(1, &mut editor, &mut ctx);
        editor.update(&mut ctx, &TickInput::typed("4"));
        assert!(editor.view().walls.is_empty());

        editor.update(&mut ctx, &TickInput::button(Button::ResetLevel));
        assert_eq!(editor.view().width, 3);
        assert_eq!(editor.view().name, "new_level");
        assert_eq!(editor.update(&mut ctx, &TickInput::back()), GameState::MainMenu);
    }
}
