//! Scene tags and the playfield simulated by the playing scene

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collision, environment_collision};
use super::food::spawn_food;
use super::grid::{Direction, Position};
use super::level::Level;
use super::snake::{Snake, SnakeError};

/// Which scene is (or should become) active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameState {
    MainMenu,
    Playing,
    /// Reserved: no scene transitions into it yet
    Paused,
    GameOver,
    LevelCreate,
    BestScores,
}

/// Snake parameters for a fresh playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeSpec {
    pub length: usize,
    pub move_interval: u32,
    pub min_move_interval: u32,
}

/// Result of one playfield step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The snake advanced this tick
    pub moved: bool,
    /// Food was consumed (score already reported)
    pub ate_food: bool,
    /// Move interval was lowered after eating
    pub sped_up: bool,
    /// Fatal collision registered this tick
    pub collision: Option<Collision>,
}

/// Snake + level + food, stepped once per tick
#[derive(Debug, Clone)]
pub struct Playfield {
    level: Level,
    snake: Snake,
    food: Option<Position>,
    rng: Pcg32,
}

impl Playfield {
    /// Place a new snake at the level centre and spawn the first food
    pub fn new(level: Level, spec: SnakeSpec, seed: u64) -> Result<Self, SnakeError> {
        let snake = Snake::new(
            level.center(),
            spec.length,
            spec.move_interval,
            spec.min_move_interval,
        )?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let food = spawn_food(&level, snake.body(), &mut rng);
        Ok(Self {
            level,
            snake,
            food,
            rng,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Move the food (tests and scripted setups)
    pub fn set_food(&mut self, food: Option<Position>) {
        self.food = food;
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    /// Run one simulation step.
    ///
    /// `on_food` reports the eaten food to the score owner and answers
    /// whether the new score earns a speed-up of `speed_up_amount` ticks.
    /// Food is only consumed while the snake is still alive this step; the
    /// tail is cut on every non-eating move.
    pub fn step(
        &mut self,
        turn: Option<Direction>,
        speed_up_amount: u32,
        on_food: impl FnOnce() -> bool,
    ) -> Result<StepOutcome, SnakeError> {
        let mut outcome = StepOutcome::default();
        if !self.snake.is_alive() {
            return Ok(outcome);
        }

        if let Some(direction) = turn {
            self.snake.set_next_direction(direction);
        }

        outcome.moved = self.snake.tick();
        if !outcome.moved {
            return Ok(outcome);
        }

        let head = self.snake.head();
        if let Some(collision) = environment_collision(&self.level, head) {
            match collision {
                Collision::Wall => log::info!("snake crashed in wall"),
                _ => log::info!("snake crashed in border"),
            }
            self.snake.kill();
            outcome.collision = Some(collision);
        }

        if self.snake.is_alive() && self.food == Some(head) {
            log::info!("snake ate food");
            outcome.ate_food = true;
            if on_food() {
                self.snake.decrease_move_interval(speed_up_amount);
                outcome.sped_up = true;
                log::info!("snake speed changed, move interval {}", self.snake.move_interval());
            }
            if let Some(food) = spawn_food(&self.level, self.snake.body(), &mut self.rng) {
                self.food = Some(food);
            }
        } else {
            self.snake.cut_tail()?;
        }

        if self.snake.is_alive() {
            self.snake.check_self_collision();
            if !self.snake.is_alive() {
                log::info!("snake crashed in its body");
                outcome.collision = Some(Collision::SelfBody);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(length: usize) -> SnakeSpec {
        SnakeSpec {
            length,
            move_interval: 1,
            min_move_interval: 1,
        }
    }

    fn field(length: usize) -> Playfield {
        let level = Level::empty("open", 10, 10).unwrap();
        let mut pf = Playfield::new(level, spec(length), 42).unwrap();
        pf.snake = Snake::new(Position::new(5, 5), length, 1, 1).unwrap();
        pf
    }

    #[test]
    fn test_step_moves_and_cuts_tail() {
        let mut pf = field(4);
        pf.set_food(Some(Position::new(0, 0)));
        let outcome = pf.step(None, 5, || panic!("no food expected")).unwrap();
        assert!(outcome.moved);
        assert!(!outcome.ate_food);
        assert_eq!(pf.snake().head(), Position::new(6, 5));
        assert_eq!(pf.snake().len(), 4);
        assert!(!pf.snake().occupies(Position::new(2, 5)));
    }

    #[test]
    fn test_step_eats_food_and_grows() {
        let mut pf = field(4);
        pf.set_food(Some(Position::new(6, 5)));
        let mut reported = 0;
        let outcome = pf
            .step(None, 5, || {
                reported += 1;
                false
            })
            .unwrap();
        assert!(outcome.ate_food);
        assert_eq!(reported, 1);
        assert_eq!(pf.snake().len(), 5);
        let food = pf.food().unwrap();
        assert!(!pf.snake().occupies(food));
    }

    #[test]
    fn test_step_border_crash() {
        let level = Level::empty("open", 10, 10).unwrap();
        let mut pf = Playfield::new(level, spec(3), 1).unwrap();
        pf.snake = Snake::new(Position::new(0, 5), 3, 1, 1).unwrap();
        pf.snake.set_next_direction(Direction::Up);
        pf.snake.tick();
        pf.snake.cut_tail().unwrap();
        // Now heading up at (0,4); turn left off the grid
        let outcome = pf.step(Some(Direction::Left), 5, || false).unwrap();
        assert_eq!(outcome.collision, Some(Collision::Border));
        assert_eq!(pf.snake().head(), Position::new(-1, 4));
        assert!(!pf.snake().is_alive());
    }

    #[test]
    fn test_step_wall_crash() {
        let level = Level::new("walled", 10, 10, [Position::new(6, 5)]).unwrap();
        let mut pf = Playfield::new(level, spec(3), 3).unwrap();
        pf.snake = Snake::new(Position::new(5, 5), 3, 1, 1).unwrap();
        let outcome = pf.step(None, 5, || false).unwrap();
        assert_eq!(outcome.collision, Some(Collision::Wall));
        assert_eq!(pf.snake().len(), 3);
    }

    #[test]
    fn test_dead_snake_does_not_move() {
        let mut pf = field(3);
        pf.snake_mut().kill();
        let before: Vec<_> = pf.snake().body().collect();
        let outcome = pf.step(Some(Direction::Up), 5, || false).unwrap();
        assert!(!outcome.moved);
        assert_eq!(pf.snake().body().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_speed_up_on_food() {
        let level = Level::empty("open", 10, 10).unwrap();
        let spec = SnakeSpec {
            length: 2,
            move_interval: 2,
            min_move_interval: 1,
        };
        let mut pf = Playfield::new(level, spec, 9).unwrap();
        let ahead = pf.snake().head().step(Direction::Right);
        pf.set_food(Some(ahead));
        assert!(!pf.step(None, 5, || true).unwrap().moved);
        let outcome = pf.step(None, 5, || true).unwrap();
        assert!(outcome.sped_up);
        assert_eq!(pf.snake().move_interval(), 1);
    }
}
