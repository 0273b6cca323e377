//! Ranking record persistence
//!
//! Features:
//! - `RecordStore` trait: the narrow interface scenes talk to
//! - In-memory store (no backend configured, tests)
//! - JSON file store with tmp -> save rotation
//! - `Repository`: every call runs under a deadline so a slow backend can
//!   never stall the tick loop indefinitely

pub mod json_file;
pub mod memory;

pub use json_file::JsonRecordStore;
pub use memory::MemoryRecordStore;

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::highscores::{Record, RecordFilter};

/// Default deadline for a single store call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// The store did not answer before the deadline
    Timeout(Duration),
    /// The worker running the call went away without answering
    Disconnected,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "record store i/o error: {e}"),
            StorageError::Json(e) => write!(f, "record store data error: {e}"),
            StorageError::Timeout(d) => write!(f, "record store timed out after {d:?}"),
            StorageError::Disconnected => write!(f, "record store worker disconnected"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// Backend holding ranking records
pub trait RecordStore: Send + Sync {
    fn save_record(&self, record: &Record) -> Result<(), StorageError>;

    /// Records matching `filter`, ordered and truncated by it
    fn top_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, StorageError>;
}

/// Shared handle to a record store with a per-call deadline
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn RecordStore>,
    timeout: Duration,
}

impl Repository {
    pub fn new(store: Arc<dyn RecordStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// In-memory repository (no backend configured)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRecordStore::default()), DEFAULT_TIMEOUT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn save_record(&self, record: Record) -> Result<(), StorageError> {
        let result = self.with_deadline(move |store| store.save_record(&record));
        match &result {
            Ok(()) => log::info!("record saved"),
            Err(e) => log::error!("failed to save record: {e}"),
        }
        result
    }

    pub fn top_records(&self, filter: RecordFilter) -> Result<Vec<Record>, StorageError> {
        let result = self.with_deadline(move |store| store.top_records(&filter));
        if let Err(e) = &result {
            log::error!("failed to load records: {e}");
        }
        result
    }

    /// Run `op` on a worker thread and wait at most `timeout` for its answer.
    /// A call that overruns keeps running detached; its result is dropped.
    fn with_deadline<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn RecordStore) -> Result<T, StorageError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("record-store".into())
            .spawn(move || {
                // Receiver may have given up already
                let _ = tx.send(op(store.as_ref()));
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(StorageError::Timeout(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(StorageError::Disconnected),
        }
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
