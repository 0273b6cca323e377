//! Level files on disk
//!
//! One level per `*.json` file in a single directory. File names are the
//! level name, suffixed `_1`, `_2`, ... when the name is already taken.

use std::fs;
use std::path::{Path, PathBuf};

use crate::sim::{Level, LevelError};

#[derive(Debug, Clone)]
pub struct LevelLibrary {
    dir: PathBuf,
}

impl LevelLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sorted `*.json` file names, creating the directory if needed
    pub fn scan(&self) -> Result<Vec<String>, LevelError> {
        fs::create_dir_all(&self.dir)?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".json") {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Parse the level stored under `file_name`
    pub fn load(&self, file_name: &str) -> Result<Level, LevelError> {
        let path = self.dir.join(file_name);
        log::info!("loading level {}", path.display());
        let json = fs::read_to_string(&path)?;
        Level::from_json(&json)
    }

    /// Write `level` to the first free file name; returns the path written
    pub fn save(&self, level: &Level) -> Result<PathBuf, LevelError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.available_path(level.name());
        fs::write(&path, level.to_json()?)?;
        log::info!(
            "level saved: {} ({}x{}, {} walls) -> {}",
            level.name(),
            level.width(),
            level.height(),
            level.walls().len(),
            path.display()
        );
        Ok(path)
    }

    fn available_path(&self, name: &str) -> PathBuf {
        let base = self.dir.join(format!("{name}.json"));
        if !base.exists() {
            return base;
        }
        (1..)
            .map(|i| self.dir.join(format!("{name}_{i}.json")))
            .find(|p| !p.exists())
            .unwrap_or(base)
    }
}

/// Display name of a level file (`classic.json` -> `classic`)
pub fn display_name(file_name: &str) -> &str {
    file_name.strip_suffix(".json").unwrap_or(file_name)
}
