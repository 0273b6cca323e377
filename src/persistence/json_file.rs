//! Record store backed by a single JSON file
//!
//! Writes go to `<file>.tmp` first and are renamed over the real file, so a
//! crash mid-write leaves the previous contents in place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{RecordStore, StorageError};
use crate::highscores::{Record, RecordFilter};

/// File envelope
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    version: u32,
    records: Vec<Record>,
}

const FILE_VERSION: u32 = 1;

#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RecordFile, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(RecordFile {
                version: FILE_VERSION,
                records: Vec::new(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, file: &RecordFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(file)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn save_record(&self, record: &Record) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut file = self.read()?;
        file.version = FILE_VERSION;
        file.records.push(record.clone());
        self.write(&file)?;
        log::info!(
            "record saved: player={} score={} level={} ({} total)",
            record.player_name,
            record.score,
            record.level_name,
            file.records.len()
        );
        Ok(())
    }

    fn top_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, StorageError> {
        let file = self.read()?;
        Ok(filter.apply(&file.records))
    }
}
