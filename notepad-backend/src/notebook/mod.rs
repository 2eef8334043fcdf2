//! Notebook — note and folder repositories over a `SlotStore`
//!
//! Every operation is a whole-value read-modify-write of one or more slots,
//! serialized behind a single lock so callers never observe a partial update.
//! Folder existence is derived on read (see `folders.rs`), not kept in sync.

mod folders;
mod notes;
mod seed;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::models::ValidationError;
use crate::store::{SlotStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("The {0} folder cannot be deleted")]
    ProtectedFolder(String),
    #[error("slot '{slot}' holds unreadable data: {source}")]
    Corrupt {
        slot: &'static str,
        source: serde_json::Error,
    },
    #[error("failed to encode slot '{slot}': {source}")]
    Encode {
        slot: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type NotebookResult<T> = Result<T, NotebookError>;

pub struct Notebook {
    store: Arc<dyn SlotStore>,
    max_attachment_bytes: Option<usize>,
    lock: Mutex<()>,
}

impl Notebook {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self {
            store,
            max_attachment_bytes: None,
            lock: Mutex::new(()),
        }
    }

    /// Cap the decoded size of `data:` attachments. Unlimited by default.
    pub fn with_attachment_limit(mut self, max_bytes: Option<usize>) -> Self {
        self.max_attachment_bytes = max_bytes;
        self
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::store::MemoryStore::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Deserialize a slot, treating a never-written slot as the type's default
    fn load<T: DeserializeOwned + Default>(&self, slot: &'static str) -> NotebookResult<T> {
        match self.store.read(slot)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| NotebookError::Corrupt { slot, source })
            }
            None => Ok(T::default()),
        }
    }

    fn save<T: Serialize + ?Sized>(&self, slot: &'static str, value: &T) -> NotebookResult<()> {
        let raw =
            serde_json::to_string(value).map_err(|source| NotebookError::Encode { slot, source })?;
        self.store.write(slot, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewNote;
    use crate::store::{slots, MemoryStore};

    #[test]
    fn test_corrupt_slot_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.write(slots::NOTES, "{not json").unwrap();
        let notebook = Notebook::new(store);

        match notebook.list_notes(None) {
            Err(NotebookError::Corrupt { slot, .. }) => assert_eq!(slot, "notes"),
            other => panic!("expected corrupt slot error, got {:?}", other),
        }
    }

    #[test]
    fn test_state_shared_through_store() {
        let store: Arc<dyn SlotStore> = Arc::new(MemoryStore::new());
        let first = Notebook::new(Arc::clone(&store));
        first.create_note(NewNote::new("A", "B").in_folder("Work")).unwrap();

        let second = Notebook::new(store);
        assert_eq!(second.list_notes(None).unwrap().len(), 1);
        assert!(second.list_folders().unwrap().iter().any(|f| f.name == "Work"));
    }

    #[test]
    fn test_attachments_unchecked_by_default() {
        let notebook = Notebook::in_memory();
        let attachment = crate::models::Attachment {
            name: String::new(),
            url: format!("data:text/plain,{}", "a".repeat(10 * 1024 * 1024)),
            media_type: String::new(),
        };
        let note = notebook
            .create_note(NewNote::new("A", "B").with_attachments(vec![attachment]))
            .unwrap();
        assert_eq!(note.attachments[0].media_type, "text/plain");
    }

    #[test]
    fn test_attachment_limit_applies_when_set() {
        let notebook = Notebook::in_memory().with_attachment_limit(Some(2));
        let attachment = crate::models::Attachment {
            name: "a.txt".to_string(),
            url: "data:text/plain,abc".to_string(),
            media_type: String::new(),
        };
        let err = notebook
            .create_note(NewNote::new("A", "B").with_attachments(vec![attachment]))
            .unwrap_err();
        assert!(matches!(err, NotebookError::Validation(ref v) if v.field == "attachments.0.url"));
        assert!(notebook.list_notes(None).unwrap().is_empty());
    }

    #[test]
    fn test_unencodable_value_is_an_encode_error() {
        use std::collections::HashMap;

        let notebook = Notebook::in_memory();
        let value: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
        match notebook.save(slots::FOLDERS, &value) {
            Err(NotebookError::Encode { slot, .. }) => assert_eq!(slot, "folders"),
            other => panic!("expected encode error, got {:?}", other),
        }
        assert_eq!(notebook.store.read(slots::FOLDERS).unwrap(), None);
    }
}
