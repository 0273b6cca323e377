//! Grid Snake entry point
//!
//! Headless runner: picks a level from the main menu, lets the autopilot
//! play it, stores the run in the ranking and prints the best scores.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use grid_snake::consts::TICKS_PER_SECOND;
use grid_snake::format_clock;
use grid_snake::highscores::now_millis;
use grid_snake::levels::LevelLibrary;
use grid_snake::persistence::{JsonRecordStore, MemoryRecordStore, RecordStore, Repository};
use grid_snake::scenes::SceneView;
use grid_snake::sim::{Direction, GameState, Level, Position, TickInput};
use grid_snake::{Game, Record, RecordFilter, Settings};

const DEFAULT_LEVEL: &str = "classic";

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Tile-grid snake with levels and rankings (headless autopilot runner)")]
struct Cli {
    /// Settings file (JSON); missing fields use defaults
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Level to play, by name
    #[arg(long, default_value = DEFAULT_LEVEL)]
    level: String,

    /// Stop after this many ticks even if the snake is still alive
    #[arg(long, default_value_t = 10 * 60 * TICKS_PER_SECOND as u64)]
    ticks: u64,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Name stored with the record
    #[arg(long, default_value = "autopilot")]
    player: String,

    /// Ranking file (overrides the settings file)
    #[arg(long)]
    records: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings);
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if cli.records.is_some() {
        settings.records_path = cli.records.clone();
    }
    log::info!("Grid Snake (headless) starting...");

    let library = LevelLibrary::new(settings.levels_dir.clone());
    ensure_default_level(&library, &settings)?;

    let store: Arc<dyn RecordStore> = match &settings.records_path {
        Some(path) => Arc::new(JsonRecordStore::new(path.clone())),
        None => Arc::new(MemoryRecordStore::default()),
    };
    let repository = Repository::new(store, settings.persistence_timeout());

    let mut game = Game::new(settings, library, repository.clone());
    select_level(&mut game, &cli.level)?;
    game.update(&TickInput::confirm())?;
    if game.current_state() != GameState::Playing {
        bail!("level {} could not be started", cli.level);
    }

    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut ticks = 0;
    while ticks < cli.ticks && game.current_state() == GameState::Playing {
        game.update(&autopilot)?;
        ticks += 1;
    }

    log::info!(
        "run finished after {ticks} ticks: score {}, time {}",
        game.score(),
        format_clock(game.elapsed())
    );

    if game.current_state() == GameState::GameOver {
        game.update(&TickInput::typed(&cli.player))?;
        game.update(&TickInput::confirm())?;
        if let SceneView::GameOver(view) = game.view()? {
            if let Some(err) = view.save_error {
                log::warn!("record not saved: {err}");
            }
        }
    } else {
        log::info!("tick limit reached, snake still alive");
        let record = Record::new(&cli.player, game.score(), game.elapsed(), &cli.level, now_millis());
        if let Err(e) = repository.save_record(record) {
            log::warn!("record not saved: {e}");
        }
    }

    let filter = RecordFilter {
        level_name: cli.level.clone(),
        ..Default::default()
    };
    let records = repository
        .top_records(filter)
        .context("failed to load the ranking")?;
    println!("Best scores on {}:", cli.level);
    for (rank, record) in records.iter().enumerate() {
        println!(
            "{:>3}. {:<13} {:>5}  {}",
            rank + 1,
            record.player_name,
            record.score,
            format_clock(record.time)
        );
    }

    Ok(())
}

/// Write a `classic` level (screen-sized, pillars in the corners) if the
/// library has none
fn ensure_default_level(library: &LevelLibrary, settings: &Settings) -> Result<()> {
    let file_name = format!("{DEFAULT_LEVEL}.json");
    let existing = library
        .scan()
        .with_context(|| format!("failed to scan {}", library.dir().display()))?;
    if existing.contains(&file_name) {
        return Ok(());
    }

    let width = settings.max_grid_width();
    let height = settings.max_grid_height();
    let (w, h) = (width as i32, height as i32);
    let pillars = [
        Position::new(2, 2),
        Position::new(w - 3, 2),
        Position::new(2, h - 3),
        Position::new(w - 3, h - 3),
    ];
    let level = Level::new(DEFAULT_LEVEL, width, height, pillars)
        .context("screen too small for the default level")?;
    library
        .save(&level)
        .context("failed to write the default level")?;
    Ok(())
}

/// Move the main menu cursor onto `name`
fn select_level(game: &mut Game, name: &str) -> Result<()> {
    let (count, target) = match game.view()? {
        SceneView::MainMenu(menu) => (
            menu.levels.len(),
            menu.levels.iter().position(|&level| level == name),
        ),
        _ => bail!("not in the main menu"),
    };
    let Some(target) = target else {
        bail!("level {name} not found");
    };

    for _ in 0..count {
        let selected = match game.view()? {
            SceneView::MainMenu(menu) => menu.selected,
            _ => None,
        };
        if selected == Some(target) {
            return Ok(());
        }
        game.update(&TickInput::direction(Direction::Down))?;
    }
    bail!("could not select level {name}")
}
