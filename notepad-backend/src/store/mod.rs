//! Slot storage — the persisted key-value state behind the notebook
//!
//! Each slot holds one serialized collection that is read and written
//! wholesale. The notebook never sees the medium, only `SlotStore`.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use crate::config::StorageBackend;

/// Well-known slot names
pub mod slots {
    /// JSON array of notes, newest first
    pub const NOTES: &str = "notes";
    /// JSON array of explicitly created folder names
    pub const FOLDERS: &str = "folders";
    /// JSON integer: highest note id ever assigned
    pub const NOTE_SEQUENCE: &str = "notes.sequence";
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare storage location: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait SlotStore: Send + Sync {
    /// Raw serialized value of a slot, `None` if it was never written
    fn read(&self, slot: &str) -> StoreResult<Option<String>>;

    /// Replace a slot's value
    fn write(&self, slot: &str, value: &str) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}

/// Open the store selected by configuration
pub fn open(backend: &StorageBackend) -> StoreResult<Arc<dyn SlotStore>> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::Sqlite { path } => Ok(Arc::new(SqliteStore::new(path)?)),
    }
}
