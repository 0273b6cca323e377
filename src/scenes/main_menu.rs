//! Main menu: level picker and navigation to the other scenes

use crate::levels::display_name;
use crate::sim::{Button, Click, Direction, GameState, Level, TickInput};

use super::SceneContext;

#[derive(Debug, Default)]
pub struct MainMenuScene {
    /// Level file names found on the last scan
    levels: Vec<String>,
    selected: usize,
    error: Option<String>,
}

#[derive(Debug)]
pub struct MainMenuView<'a> {
    /// Level display names, in menu order
    pub levels: Vec<&'a str>,
    /// Index into `levels`; `None` when no level exists
    pub selected: Option<usize>,
    pub error: Option<&'a str>,
}

impl MainMenuScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        self.selected = 0;
        self.error = None;
        self.levels = match ctx.levels.scan() {
            Ok(levels) => levels,
            Err(e) => {
                log::error!("failed to scan levels in {}: {e}", ctx.levels.dir().display());
                self.error = Some(e.to_string());
                Vec::new()
            }
        };
        log::debug!("main menu: {} levels available", self.levels.len());
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput) -> GameState {
        match input.click {
            Some(Click::Button(Button::NewGame)) => return self.start_selected(ctx),
            Some(Click::Button(Button::CreateLevel)) => return GameState::LevelCreate,
            Some(Click::Button(Button::Ranking)) => return GameState::BestScores,
            Some(Click::Button(Button::Quit)) => {
                log::info!("quit requested from main menu");
                ctx.quit();
                return GameState::MainMenu;
            }
            _ => {}
        }

        if input.confirm {
            return self.start_selected(ctx);
        }

        let count = self.levels.len();
        if count > 0 {
            match input.direction {
                Some(Direction::Up) => self.selected = (self.selected + count - 1) % count,
                Some(Direction::Down) => self.selected = (self.selected + 1) % count,
                _ => {}
            }
        }

        GameState::MainMenu
    }

    pub fn view(&self) -> MainMenuView<'_> {
        MainMenuView {
            levels: self.levels.iter().map(|l| display_name(l)).collect(),
            selected: (!self.levels.is_empty()).then_some(self.selected),
            error: self.error.as_deref(),
        }
    }

    fn start_selected(&mut self, ctx: &mut SceneContext<'_>) -> GameState {
        let Some(file_name) = self.levels.get(self.selected) else {
            log::warn!("no levels to play");
            return GameState::MainMenu;
        };

        let level = match ctx.levels.load(file_name) {
            Ok(level) => level,
            Err(e) => {
                log::error!("failed to load level {file_name}: {e}");
                self.error = Some(e.to_string());
                return GameState::MainMenu;
            }
        };

        if !fits_screen(&level, ctx) {
            log::warn!(
                "level {} is {}x{}, screen fits at most {}x{}",
                level.name(),
                level.width(),
                level.height(),
                ctx.settings.max_grid_width(),
                ctx.settings.max_grid_height()
            );
            self.error = Some(format!("level {} does not fit the screen", level.name()));
            return GameState::MainMenu;
        }

        log::info!("starting level {}", level.name());
        ctx.start_game(level);
        GameState::Playing
    }
}

fn fits_screen(level: &Level, ctx: &SceneContext<'_>) -> bool {
    level.width() <= ctx.settings.max_grid_width() && level.height() <= ctx.settings.max_grid_height()
}
