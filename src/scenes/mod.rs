//! Scene state machine
//!
//! The scene set is closed: `Scene` is a tagged variant per kind, each
//! carrying only its own state, and `update`/`on_enter`/`view` dispatch on
//! the tag. Scenes never touch the orchestrator directly; they read and
//! write the run through `SceneContext` and queue `SceneRequest`s for the
//! orchestrator to apply after the update.

pub mod game_over;
pub mod level_editor;
pub mod main_menu;
pub mod playing;
pub mod ranking;

pub use game_over::{GameOverScene, GameOverView};
pub use level_editor::{EditorFocus, LevelEditorScene, LevelEditorView};
pub use main_menu::{MainMenuScene, MainMenuView};
pub use playing::{PlayingScene, PlayingView};
pub use ranking::{RankingFocus, RankingScene, RankingView};

use std::time::Duration;

use crate::error::GameError;
use crate::game::Session;
use crate::levels::LevelLibrary;
use crate::persistence::Repository;
use crate::settings::Settings;
use crate::sim::{GameState, Level, TickInput};

/// Work a scene hands back to the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum SceneRequest {
    /// Fresh playing + game over scenes bound to this level, run reset
    StartGame(Level),
    /// Leave the run loop
    Quit,
}

/// Everything a scene may use during `update` / `on_enter`
pub struct SceneContext<'a> {
    pub settings: &'a Settings,
    pub levels: &'a LevelLibrary,
    pub records: &'a Repository,
    session: &'a mut Session,
    requests: Vec<SceneRequest>,
}

impl<'a> SceneContext<'a> {
    pub fn new(
        settings: &'a Settings,
        levels: &'a LevelLibrary,
        records: &'a Repository,
        session: &'a mut Session,
    ) -> Self {
        Self {
            settings,
            levels,
            records,
            session,
            requests: Vec::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn game_time(&self) -> Duration {
        self.session.elapsed
    }

    /// Count one eaten food; true if the new score earns a speed-up
    pub fn notify_food_eaten(&mut self) -> bool {
        self.session.score += 1;
        self.settings.speeds_up_at(self.session.score)
    }

    /// Zero score and time for a restarted run
    pub fn reset_session(&mut self) {
        *self.session = Session::default();
    }

    pub fn start_game(&mut self, level: Level) {
        self.requests.push(SceneRequest::StartGame(level));
    }

    pub fn quit(&mut self) {
        self.requests.push(SceneRequest::Quit);
    }

    pub fn into_requests(self) -> Vec<SceneRequest> {
        self.requests
    }
}

/// One scene instance
#[derive(Debug)]
pub enum Scene {
    MainMenu(MainMenuScene),
    Playing(PlayingScene),
    GameOver(GameOverScene),
    LevelCreate(LevelEditorScene),
    BestScores(RankingScene),
}

impl Scene {
    /// Tag this instance is registered under
    pub fn state(&self) -> GameState {
        match self {
            Scene::MainMenu(_) => GameState::MainMenu,
            Scene::Playing(_) => GameState::Playing,
            Scene::GameOver(_) => GameState::GameOver,
            Scene::LevelCreate(_) => GameState::LevelCreate,
            Scene::BestScores(_) => GameState::BestScores,
        }
    }

    /// Run one tick; returns the state that should be active next
    pub fn update(
        &mut self,
        ctx: &mut SceneContext<'_>,
        input: &TickInput,
    ) -> Result<GameState, GameError> {
        match self {
            Scene::MainMenu(s) => Ok(s.update(ctx, input)),
            Scene::Playing(s) => s.update(ctx, input),
            Scene::GameOver(s) => Ok(s.update(ctx, input)),
            Scene::LevelCreate(s) => Ok(s.update(ctx, input)),
            Scene::BestScores(s) => Ok(s.update(ctx, input)),
        }
    }

    /// Reset transient state when the scene becomes active
    pub fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        match self {
            Scene::MainMenu(s) => s.on_enter(ctx),
            Scene::Playing(s) => s.on_enter(),
            Scene::GameOver(s) => s.on_enter(),
            Scene::LevelCreate(s) => s.on_enter(ctx),
            Scene::BestScores(s) => s.on_enter(ctx),
        }
    }

    /// Read-only snapshot for the renderer
    pub fn view<'a>(&'a self, session: &Session) -> SceneView<'a> {
        match self {
            Scene::MainMenu(s) => SceneView::MainMenu(s.view()),
            Scene::Playing(s) => SceneView::Playing(s.view(session)),
            Scene::GameOver(s) => SceneView::GameOver(s.view(session)),
            Scene::LevelCreate(s) => SceneView::LevelCreate(s.view()),
            Scene::BestScores(s) => SceneView::BestScores(s.view()),
        }
    }
}

/// What the renderer draws this frame
#[derive(Debug)]
pub enum SceneView<'a> {
    MainMenu(MainMenuView<'a>),
    Playing(PlayingView<'a>),
    GameOver(GameOverView<'a>),
    LevelCreate(LevelEditorView<'a>),
    BestScores(RankingView<'a>),
}

/// Apply typed characters and backspace to a text buffer capped at `max`
/// characters. Returns true if the contents changed.
pub(crate) fn edit_text(buffer: &mut String, input: &TickInput, max: usize) -> bool {
    let before = buffer.len();
    let before_text = if input.backspace { Some(buffer.clone()) } else { None };

    for c in input.text.chars().filter(|c| !c.is_control()) {
        if buffer.chars().count() >= max {
            break;
        }
        buffer.push(c);
    }
    if input.backspace {
        buffer.pop();
    }

    match before_text {
        Some(old) => old != *buffer,
        None => buffer.len() != before,
    }
}
