//! Process-local record store

use std::sync::Mutex;

use super::{RecordStore, StorageError};
use crate::highscores::{Record, RecordFilter};

/// Records kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock only means a writer panicked mid-push; the Vec is intact
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for MemoryRecordStore {
    fn save_record(&self, record: &Record) -> Result<(), StorageError> {
        self.lock().push(record.clone());
        Ok(())
    }

    fn top_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, StorageError> {
        Ok(filter.apply(self.lock().iter()))
    }
}
