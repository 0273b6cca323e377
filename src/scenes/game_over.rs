//! Game over: final score, name entry and record saving

use std::time::Duration;

use crate::consts::MAX_PLAYER_NAME;
use crate::format_clock;
use crate::game::Session;
use crate::highscores::{Record, now_millis};
use crate::sim::{Button, Click, GameState, Level, TickInput};

use super::{SceneContext, edit_text};

/// Game over screen bound to the level that was just played
#[derive(Debug)]
pub struct GameOverScene {
    level: Level,
    player_name: String,
    /// Record already stored during this visit
    saved: bool,
    save_error: Option<String>,
}

#[derive(Debug)]
pub struct GameOverView<'a> {
    pub level_name: &'a str,
    pub score: u32,
    pub elapsed: Duration,
    pub clock: String,
    pub player_name: &'a str,
    pub saved: bool,
    pub save_error: Option<&'a str>,
}

impl GameOverScene {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            player_name: String::new(),
            saved: false,
            save_error: None,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn on_enter(&mut self) {
        self.saved = false;
        self.save_error = None;
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput) -> GameState {
        edit_text(&mut self.player_name, input, MAX_PLAYER_NAME);

        match input.click {
            Some(Click::Button(Button::NewGame)) => {
                ctx.start_game(self.level.clone());
                return GameState::Playing;
            }
            Some(Click::Button(Button::MainMenu)) => return GameState::MainMenu,
            Some(Click::Button(Button::SaveRecord)) => self.save_record(ctx),
            _ => {}
        }

        if input.back {
            return GameState::MainMenu;
        }
        if input.confirm {
            self.save_record(ctx);
        }

        GameState::GameOver
    }

    pub fn view(&self, session: &Session) -> GameOverView<'_> {
        GameOverView {
            level_name: self.level.name(),
            score: session.score,
            elapsed: session.elapsed,
            clock: format_clock(session.elapsed),
            player_name: &self.player_name,
            saved: self.saved,
            save_error: self.save_error.as_deref(),
        }
    }

    fn save_record(&mut self, ctx: &mut SceneContext<'_>) {
        if self.saved {
            log::debug!("record already saved");
            return;
        }

        let record = Record::new(
            &self.player_name,
            ctx.score(),
            ctx.game_time(),
            self.level.name(),
            now_millis(),
        );
        log::info!(
            "saving record: {} scored {} on {} in {}",
            record.player_name,
            record.score,
            record.level_name,
            format_clock(record.time)
        );

        match ctx.records.save_record(record) {
            Ok(()) => {
                self.saved = true;
                self.save_error = None;
            }
            Err(e) => self.save_error = Some(e.to_string()),
        }
    }
}
