//! Best scores: filtered, ordered list of saved records

use crate::consts::{MAX_LEVEL_NAME, MAX_PLAYER_NAME};
use crate::highscores::{Record, RecordFilter};
use crate::sim::{Button, Click, GameState, TextField, TickInput};

use super::{SceneContext, edit_text};

/// Which filter field receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingFocus {
    #[default]
    None,
    PlayerName,
    LevelName,
}

#[derive(Debug, Default)]
pub struct RankingScene {
    focus: RankingFocus,
    filter: RecordFilter,
    records: Vec<Record>,
    load_error: Option<String>,
}

#[derive(Debug)]
pub struct RankingView<'a> {
    pub focus: RankingFocus,
    pub filter: &'a RecordFilter,
    pub records: &'a [Record],
    pub load_error: Option<&'a str>,
}

impl RankingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self, ctx: &mut SceneContext<'_>) {
        self.focus = RankingFocus::None;
        self.filter = RecordFilter::default();
        self.reload(ctx);
    }

    pub fn update(&mut self, ctx: &mut SceneContext<'_>, input: &TickInput) -> GameState {
        if input.back {
            return GameState::MainMenu;
        }

        match input.click {
            Some(Click::Button(Button::MainMenu)) => return GameState::MainMenu,
            Some(Click::Button(Button::ToggleScoreOrder)) => {
                self.filter.score_ascending = !self.filter.score_ascending;
                self.reload(ctx);
            }
            Some(Click::Button(Button::ToggleTimeOrder)) => {
                self.filter.time_ascending = !self.filter.time_ascending;
                self.reload(ctx);
            }
            Some(Click::Field(TextField::PlayerName)) => self.focus = RankingFocus::PlayerName,
            Some(Click::Field(TextField::LevelName)) => self.focus = RankingFocus::LevelName,
            Some(Click::Field(_) | Click::Cell(_) | Click::Elsewhere) => {
                self.focus = RankingFocus::None;
            }
            Some(Click::Button(_)) | None => {}
        }

        if input.tab {
            self.focus = match self.focus {
                RankingFocus::PlayerName => RankingFocus::LevelName,
                RankingFocus::LevelName | RankingFocus::None => RankingFocus::PlayerName,
            };
        }

        let edited = match self.focus {
            RankingFocus::PlayerName => {
                edit_text(&mut self.filter.player_name_prefix, input, MAX_PLAYER_NAME)
            }
            RankingFocus::LevelName => edit_text(&mut self.filter.level_name, input, MAX_LEVEL_NAME),
            RankingFocus::None => false,
        };
        if edited {
            self.reload(ctx);
        }

        GameState::BestScores
    }

    pub fn view(&self) -> RankingView<'_> {
        RankingView {
            focus: self.focus,
            filter: &self.filter,
            records: &self.records,
            load_error: self.load_error.as_deref(),
        }
    }

    fn reload(&mut self, ctx: &SceneContext<'_>) {
        match ctx.records.top_records(self.filter.clone()) {
            Ok(records) => {
                log::debug!("ranking: {} records loaded", records.len());
                self.records = records;
                self.load_error = None;
            }
            Err(e) => {
                self.records.clear();
                self.load_error = Some(e.to_string());
            }
        }
    }
}
