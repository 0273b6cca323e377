//! Playing scene: one snake on one level

use std::time::Duration;

use crate::error::GameError;
use crate::format_clock;
use crate::game::Session;
use crate::sim::{
    GameState, Level, Playfield, Position, SegmentSprite, SnakeError, SnakeSpec, StepOutcome,
    TickInput, idle_direction,
};

use super::SceneContext;

#[derive(Debug)]
pub struct PlayingScene {
    spec: SnakeSpec,
    seed: u64,
    /// Reset-key restarts so far; mixed into the food seed
    restarts: u64,
    playfield: Playfield,
    last_outcome: StepOutcome,
}

#[derive(Debug)]
pub struct PlayingView<'a> {
    pub level: &'a Level,
    /// Head first, with per-segment kind and orientation
    pub segments: Vec<SegmentSprite>,
    pub food: Option<Position>,
    pub score: u32,
    pub elapsed: Duration,
    /// HUD clock, `MM:SS`
    pub clock: String,
    pub alive: bool,
}

impl PlayingScene {
    /// Build a fresh run on `level`
    pub fn new(level: Level, spec: SnakeSpec, seed: u64) -> Result<Self, SnakeError> {
        let playfield = Playfield::new(level, spec, seed)?;
        log::info!(
            "playing {} ({}x{}), snake length {}, move interval {}",
            playfield.level().name(),
            playfield.level().width(),
            playfield.level().height(),
            spec.length,
            spec.move_interval
        );
        Ok(Self {
            spec,
            seed,
            restarts: 0,
            playfield,
            last_outcome: StepOutcome::default(),
        })
    }

    pub fn level(&self) -> &Level {
        self.playfield.level()
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    /// What the most recent step did
    pub fn last_outcome(&self) -> StepOutcome {
        self.last_outcome
    }

    pub fn on_enter(&mut self) {
        self.last_outcome = StepOutcome::default();
    }

    pub fn update(
        &mut self,
        ctx: &mut SceneContext<'_>,
        input: &TickInput,
    ) -> Result<GameState, GameError> {
        if !self.playfield.snake().is_alive() {
            return Ok(GameState::GameOver);
        }

        // Arrow keys win over the reset key; the fresh snake still steps this tick
        if input.reset && input.direction.is_none() {
            self.restart()?;
            ctx.reset_session();
        }

        let turn = if input.idle_mode {
            idle_direction(&self.playfield)
        } else {
            input.direction
        };

        let amount = ctx.settings.speed_increase_amount;
        self.last_outcome = self
            .playfield
            .step(turn, amount, || ctx.notify_food_eaten())?;

        if self.playfield.snake().is_alive() {
            Ok(GameState::Playing)
        } else {
            log::info!("game over with score {}", ctx.score());
            Ok(GameState::GameOver)
        }
    }

    pub fn view(&self, session: &Session) -> PlayingView<'_> {
        PlayingView {
            level: self.playfield.level(),
            segments: self.playfield.snake().sprites(),
            food: self.playfield.food(),
            score: session.score,
            elapsed: session.elapsed,
            clock: format_clock(session.elapsed),
            alive: self.playfield.snake().is_alive(),
        }
    }

    /// Rebuild snake and food on the same level
    fn restart(&mut self) -> Result<(), SnakeError> {
        self.restarts += 1;
        let level = self.playfield.level().clone();
        self.playfield = Playfield::new(level, self.spec, self.seed.wrapping_add(self.restarts))?;
        self.last_outcome = StepOutcome::default();
        log::info!("run restarted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelLibrary;
    use crate::persistence::Repository;
    use crate::settings::Settings;
    use crate::sim::Direction;

    fn spec() -> SnakeSpec {
        SnakeSpec {
            length: 4,
            move_interval: 1,
            min_move_interval: 1,
        }
    }

    fn scene() -> PlayingScene {
        PlayingScene::new(Level::empty("open", 10, 10).unwrap(), spec(), 11).unwrap()
    }

    #[test]
    fn test_rejects_invalid_snake() {
        let bad = SnakeSpec {
            length: 1,
            ..spec()
        };
        assert!(matches!(
            PlayingScene::new(Level::empty("open", 10, 10).unwrap(), bad, 0),
            Err(SnakeError::InvalidLength(1))
        ));
    }

    #[test]
    fn test_food_increments_score() {
        let settings = Settings::default();
        let lib = LevelLibrary::new(std::env::temp_dir());
        let repo = Repository::in_memory();
        let mut session = Session::default();
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut scene = scene();
        assert_eq!(scene.playfield().snake().head(), Position::new(5, 5));
        scene.playfield_mut().set_food(Some(Position::new(6, 5)));

        let next = scene.update(&mut ctx, &TickInput::default()).unwrap();
        assert_eq!(next, GameState::Playing);
        assert_eq!(ctx.score(), 1);
        assert!(scene.last_outcome().ate_food);
        assert_eq!(scene.playfield().snake().len(), 5);
    }

    #[test]
    fn test_crash_leads_to_game_over() {
        let settings = Settings::default();
        let lib = LevelLibrary::new(std::env::temp_dir());
        let repo = Repository::in_memory();
        let mut session = Session::default();
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut scene = scene();
        scene.playfield_mut().set_food(None);
        let mut next = GameState::Playing;
        for _ in 0..10 {
            next = scene.update(&mut ctx, &TickInput::default()).unwrap();
            if next == GameState::GameOver {
                break;
            }
        }
        assert_eq!(next, GameState::GameOver);
        assert_eq!(scene.playfield().snake().head(), Position::new(10, 5));
        // Dead snake keeps answering game over
        assert_eq!(
            scene.update(&mut ctx, &TickInput::default()).unwrap(),
            GameState::GameOver
        );
    }

    #[test]
    fn test_reset_restarts_run() {
        let settings = Settings::default();
        let lib = LevelLibrary::new(std::env::temp_dir());
        let repo = Repository::in_memory();
        let mut session = Session {
            score: 4,
            elapsed: Duration::from_secs(9),
        };
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut scene = scene();
        scene.update(&mut ctx, &TickInput::direction(Direction::Down)).unwrap();
        assert_eq!(scene.playfield().snake().head(), Position::new(5, 6));
        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        assert_eq!(scene.update(&mut ctx, &reset).unwrap(), GameState::Playing);
        // New snake from the center, already one step along
        assert_eq!(ctx.score(), u32::from(scene.last_outcome().ate_food));
        assert_eq!(ctx.game_time(), Duration::ZERO);
        assert!(scene.last_outcome().moved);
        assert_eq!(scene.playfield().snake().head(), Position::new(6, 5));
        assert_eq!(scene.playfield().snake().direction(), Direction::Right);
    }

    #[test]
    fn test_direction_wins_over_reset() {
        let settings = Settings::default();
        let lib = LevelLibrary::new(std::env::temp_dir());
        let repo = Repository::in_memory();
        let mut session = Session {
            score: 4,
            elapsed: Duration::from_secs(9),
        };
        let mut ctx = SceneContext::new(&settings, &lib, &repo, &mut session);

        let mut scene = scene();
        scene.playfield_mut().set_food(None);
        let input = TickInput {
            reset: true,
            ..TickInput::direction(Direction::Down)
        };
        assert_eq!(scene.update(&mut ctx, &input).unwrap(), GameState::Playing);
        assert_eq!(ctx.score(), 4);
        assert_eq!(ctx.game_time(), Duration::from_secs(9));
        assert_eq!(scene.playfield().snake().head(), Position::new(5, 6));
        assert_eq!(scene.playfield().snake().direction(), Direction::Down);
    }

    #[test]
    fn test_view_snapshot() {
        let scene = scene();
        let session = Session {
            score: 3,
            elapsed: Duration::from_secs(75),
        };
        let view = scene.view(&session);
        assert_eq!(view.segments.len(), 4);
        assert_eq!(view.segments[0].position, Position::new(5, 5));
        assert_eq!(view.clock, "01:15");
        assert_eq!(view.score, 3);
        assert!(view.alive);
    }
}
