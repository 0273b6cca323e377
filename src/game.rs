//! Orchestrator: owns the scene instances, the run's score and time, and
//! drives one scene update per tick

use std::collections::HashMap;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SIM_DT;
use crate::error::GameError;
use crate::levels::LevelLibrary;
use crate::persistence::Repository;
use crate::scenes::{
    GameOverScene, LevelEditorScene, MainMenuScene, PlayingScene, RankingScene, Scene,
    SceneContext, SceneRequest, SceneView,
};
use crate::settings::Settings;
use crate::sim::{GameState, Level, TickInput};

/// Score and play time of the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    /// Time spent in the playing scene
    pub elapsed: Duration,
}

pub struct Game {
    settings: Settings,
    levels: LevelLibrary,
    records: Repository,
    /// One owned instance per registered state
    scenes: HashMap<GameState, Scene>,
    current: GameState,
    session: Session,
    /// Seeds each new playing scene
    rng: Pcg32,
    quit: bool,
}

impl Game {
    /// Register the menu, editor and ranking scenes and enter the main menu
    pub fn new(settings: Settings, levels: LevelLibrary, records: Repository) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("new game, seed {seed}");

        let mut scenes = HashMap::new();
        scenes.insert(GameState::MainMenu, Scene::MainMenu(MainMenuScene::new()));
        scenes.insert(
            GameState::LevelCreate,
            Scene::LevelCreate(LevelEditorScene::new(&settings)),
        );
        scenes.insert(GameState::BestScores, Scene::BestScores(RankingScene::new()));

        let mut game = Self {
            settings,
            levels,
            records,
            scenes,
            current: GameState::MainMenu,
            session: Session::default(),
            rng: Pcg32::seed_from_u64(seed),
            quit: false,
        };
        game.enter_current();
        game
    }

    /// Advance one tick
    pub fn update(&mut self, input: &TickInput) -> Result<(), GameError> {
        if self.current == GameState::Playing {
            self.session.elapsed += SIM_DT;
        }

        let scene = self
            .scenes
            .get_mut(&self.current)
            .ok_or(GameError::UnknownState(self.current))?;
        let mut ctx = SceneContext::new(
            &self.settings,
            &self.levels,
            &self.records,
            &mut self.session,
        );
        let next = scene.update(&mut ctx, input)?;
        let requests = ctx.into_requests();

        let mut replaced = Vec::new();
        for request in requests {
            match request {
                SceneRequest::StartGame(level) => {
                    self.start_game(level)?;
                    replaced.extend([GameState::Playing, GameState::GameOver]);
                }
                SceneRequest::Quit => self.quit = true,
            }
        }

        if next != self.current || replaced.contains(&next) {
            self.switch_to(next)?;
        }
        Ok(())
    }

    /// Make `state` the active scene and run its enter hook
    pub fn switch_to(&mut self, state: GameState) -> Result<(), GameError> {
        if !self.scenes.contains_key(&state) {
            log::error!("no scene registered for {state:?}");
            return Err(GameError::UnknownState(state));
        }
        log::debug!("scene {:?} -> {:?}", self.current, state);
        self.current = state;
        self.enter_current();
        Ok(())
    }

    /// Bind fresh playing and game over scenes to `level` and reset the run
    pub fn start_game(&mut self, level: Level) -> Result<(), GameError> {
        let seed = self.rng.random::<u64>();
        let playing = PlayingScene::new(level.clone(), self.settings.snake_spec(), seed)?;
        self.scenes.insert(GameState::Playing, Scene::Playing(playing));
        self.scenes
            .insert(GameState::GameOver, Scene::GameOver(GameOverScene::new(level)));
        self.session = Session::default();
        Ok(())
    }

    /// Snapshot of the active scene for the renderer
    pub fn view(&self) -> Result<SceneView<'_>, GameError> {
        self.scenes
            .get(&self.current)
            .map(|scene| scene.view(&self.session))
            .ok_or(GameError::UnknownState(self.current))
    }

    pub fn current_state(&self) -> GameState {
        self.current
    }

    pub fn scene(&self, state: GameState) -> Option<&Scene> {
        self.scenes.get(&state)
    }

    pub fn scene_mut(&mut self, state: GameState) -> Option<&mut Scene> {
        self.scenes.get_mut(&state)
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn elapsed(&self) -> Duration {
        self.session.elapsed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn enter_current(&mut self) {
        if let Some(scene) = self.scenes.get_mut(&self.current) {
            let mut ctx = SceneContext::new(
                &self.settings,
                &self.levels,
                &self.records,
                &mut self.session,
            );
            scene.on_enter(&mut ctx);
        }
    }
}
