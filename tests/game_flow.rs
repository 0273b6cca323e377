//! End-to-end scenarios driven through `Game::update`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use grid_snake::levels::LevelLibrary;
use grid_snake::persistence::{JsonRecordStore, Repository};
use grid_snake::scenes::{Scene, SceneView};
use grid_snake::sim::{
    Button, Click, Direction, GameState, Level, Playfield, Position, Snake, SnakeSpec, TextField,
    TickInput,
};
use grid_snake::{Game, RecordFilter, Settings};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grid-snake-flow-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn fast_settings(dir: &std::path::Path) -> Settings {
    Settings {
        seed: Some(17),
        initial_snake_len: 2,
        initial_move_interval: 1,
        min_move_interval: 1,
        levels_dir: dir.join("levels"),
        ..Settings::default()
    }
}

fn new_game(name: &str, levels: &[Level], repository: Repository) -> (Game, PathBuf) {
    let dir = temp_dir(name);
    let settings = fast_settings(&dir);
    let library = LevelLibrary::new(settings.levels_dir.clone());
    for level in levels {
        library.save(level).unwrap();
    }
    (Game::new(settings, library, repository), dir)
}

fn playfield(game: &mut Game) -> &mut Playfield {
    match game.scene_mut(GameState::Playing) {
        Some(Scene::Playing(scene)) => scene.playfield_mut(),
        _ => panic!("no playing scene"),
    }
}

fn key(direction: Direction) -> TickInput {
    TickInput::direction(direction)
}

#[test]
fn four_segment_snake_advances_one_cell() {
    let spec = SnakeSpec {
        length: 4,
        move_interval: 1,
        min_move_interval: 1,
    };
    let mut field = Playfield::new(Level::empty("open", 10, 10).unwrap(), spec, 1).unwrap();
    field.set_food(Some(Position::new(0, 0)));
    assert_eq!(field.snake().head(), Position::new(5, 5));

    let outcome = field.step(None, 5, || false).unwrap();
    assert!(outcome.moved);
    assert_eq!(field.snake().head(), Position::new(6, 5));
    assert_eq!(field.snake().len(), 4);
    assert!(!field.snake().occupies(Position::new(2, 5)));
}

#[test]
fn eating_food_scores_and_grows() {
    let (mut game, _dir) = new_game(
        "eat",
        &[Level::empty("open", 10, 10).unwrap()],
        Repository::in_memory(),
    );
    game.update(&TickInput::confirm()).unwrap();
    assert_eq!(game.current_state(), GameState::Playing);
    assert_eq!(game.score(), 0);

    playfield(&mut game).set_food(Some(Position::new(6, 5)));
    game.update(&TickInput::default()).unwrap();

    assert_eq!(game.score(), 1);
    let field = playfield(&mut game);
    assert_eq!(field.snake().len(), 3);
    let food = field.food().unwrap();
    assert!(!field.snake().occupies(food));
    assert!(!field.level().is_wall(food));
}

#[test]
fn leaving_the_grid_ends_the_run() {
    let (mut game, _dir) = new_game(
        "border",
        &[Level::empty("open", 10, 10).unwrap()],
        Repository::in_memory(),
    );
    game.update(&TickInput::confirm()).unwrap();
    playfield(&mut game).set_food(None);

    // (5,5) -> up to (5,4), left to (0,4), down to (0,5), left off the grid
    game.update(&key(Direction::Up)).unwrap();
    game.update(&key(Direction::Left)).unwrap();
    for _ in 0..4 {
        game.update(&TickInput::default()).unwrap();
    }
    game.update(&key(Direction::Down)).unwrap();
    assert_eq!(playfield(&mut game).snake().head(), Position::new(0, 5));
    game.update(&key(Direction::Left)).unwrap();

    assert_eq!(game.current_state(), GameState::GameOver);
    match game.scene(GameState::Playing) {
        Some(Scene::Playing(scene)) => {
            assert_eq!(scene.playfield().snake().head(), Position::new(-1, 5));
            assert!(!scene.playfield().snake().is_alive());
        }
        _ => panic!("playing scene missing"),
    }
}

#[test]
fn speed_up_respects_the_floor() {
    let mut snake = Snake::new(Position::new(5, 5), 3, 10, 10).unwrap();
    snake.decrease_move_interval(5);
    assert_eq!(snake.move_interval(), 10);
}

#[test]
fn crash_save_record_and_view_ranking() {
    let dir = temp_dir("ranking-store");
    std::fs::create_dir_all(&dir).unwrap();
    let records_path = dir.join("records.json");
    let repository = Repository::new(
        Arc::new(JsonRecordStore::new(records_path.clone())),
        Duration::from_secs(5),
    );
    let (mut game, _dir) = new_game(
        "ranking",
        &[Level::new("pillar", 10, 10, [Position::new(7, 5)]).unwrap()],
        repository.clone(),
    );

    game.update(&TickInput::confirm()).unwrap();
    playfield(&mut game).set_food(Some(Position::new(6, 5)));
    while game.current_state() == GameState::Playing {
        game.update(&TickInput::default()).unwrap();
    }
    // Ate at (6,5), then ran into the pillar at (7,5)
    assert_eq!(game.current_state(), GameState::GameOver);
    assert_eq!(game.score(), 1);
    let elapsed = game.elapsed();
    assert!(elapsed > Duration::ZERO);

    game.update(&TickInput::typed("zoe")).unwrap();
    game.update(&TickInput::button(Button::SaveRecord)).unwrap();
    game.update(&TickInput::button(Button::SaveRecord)).unwrap();
    match game.view().unwrap() {
        SceneView::GameOver(view) => {
            assert!(view.saved);
            assert_eq!(view.score, 1);
            assert_eq!(view.player_name, "zoe");
        }
        other => panic!("unexpected view {other:?}"),
    }

    game.update(&TickInput::button(Button::MainMenu)).unwrap();
    assert_eq!(game.current_state(), GameState::MainMenu);
    game.update(&TickInput::button(Button::Ranking)).unwrap();
    assert_eq!(game.current_state(), GameState::BestScores);
    match game.view().unwrap() {
        SceneView::BestScores(view) => {
            assert!(view.load_error.is_none());
            assert_eq!(view.records.len(), 1);
            assert_eq!(view.records[0].player_name, "zoe");
            assert_eq!(view.records[0].level_name, "pillar");
            assert_eq!(view.records[0].time, elapsed);
        }
        other => panic!("unexpected view {other:?}"),
    }

    // Records survive in the file store
    let reopened = Repository::new(Arc::new(JsonRecordStore::new(records_path)), Duration::from_secs(5));
    assert_eq!(reopened.top_records(RecordFilter::default()).unwrap().len(), 1);
}

#[test]
fn created_level_appears_in_menu() {
    let (mut game, _dir) = new_game("editor", &[], Repository::in_memory());
    game.update(&TickInput::button(Button::CreateLevel)).unwrap();
    assert_eq!(game.current_state(), GameState::LevelCreate);

    game.update(&TickInput::click(Click::Field(TextField::Width))).unwrap();
    game.update(&TickInput {
        backspace: true,
        ..Default::default()
    })
    .unwrap();
    game.update(&TickInput::typed("9")).unwrap();
    game.update(&TickInput::click(Click::Cell(Position::new(7, 1)))).unwrap();
    game.update(&TickInput::button(Button::SaveLevel)).unwrap();
    assert_eq!(game.current_state(), GameState::MainMenu);

    match game.view().unwrap() {
        SceneView::MainMenu(menu) => {
            assert_eq!(menu.levels, ["new_level"]);
            assert_eq!(menu.selected, Some(0));
        }
        other => panic!("unexpected view {other:?}"),
    }

    game.update(&TickInput::confirm()).unwrap();
    assert_eq!(game.current_state(), GameState::Playing);
    let field = playfield(&mut game);
    assert_eq!((field.level().width(), field.level().height()), (9, 3));
    assert!(field.level().is_wall(Position::new(7, 1)));
}

#[test]
fn reset_key_restarts_the_run() {
    let (mut game, _dir) = new_game(
        "reset",
        &[Level::empty("open", 16, 10).unwrap()],
        Repository::in_memory(),
    );
    game.update(&TickInput::confirm()).unwrap();
    playfield(&mut game).set_food(Some(Position::new(9, 5)));
    game.update(&TickInput::default()).unwrap();
    assert_eq!(game.score(), 1);

    game.update(&TickInput {
        reset: true,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(game.current_state(), GameState::Playing);
    assert_eq!(game.elapsed(), Duration::ZERO);
    // The new snake starts at the center and steps once in the reset tick
    let ate = match game.scene(GameState::Playing) {
        Some(Scene::Playing(scene)) => scene.last_outcome().ate_food,
        _ => panic!("playing scene missing"),
    };
    assert_eq!(game.score(), u32::from(ate));
    let snake = playfield(&mut game).snake();
    assert_eq!(snake.head(), Position::new(9, 5));
    assert_eq!(snake.len(), 2 + usize::from(ate));

    // A direction key pressed with reset wins; the run goes on
    let score = game.score();
    game.update(&TickInput {
        reset: true,
        ..key(Direction::Down)
    })
    .unwrap();
    assert_eq!(game.elapsed(), grid_snake::consts::SIM_DT);
    assert!(game.score() >= score);
    assert_eq!(playfield(&mut game).snake().head(), Position::new(9, 6));
}
