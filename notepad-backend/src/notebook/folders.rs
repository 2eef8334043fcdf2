use std::collections::BTreeSet;

use super::{Notebook, NotebookError, NotebookResult};
use crate::models::folder::is_default_folder;
use crate::models::{Folder, NewFolder, Note, ValidationError, DEFAULT_FOLDER};
use crate::store::slots;

/// Outcome of a folder delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDeletion {
    pub name: String,
    /// Notes removed along with the folder
    pub removed_notes: usize,
    /// Whether the folder existed at all (explicitly or through a note)
    pub existed: bool,
}

impl Notebook {
    /// Sorted union of the default folder, every folder named on a note,
    /// and every explicitly created folder
    pub fn list_folders(&self) -> NotebookResult<Vec<Folder>> {
        let _guard = self.lock.lock();
        let notes: Vec<Note> = self.load(slots::NOTES)?;
        let explicit: Vec<String> = self.load(slots::FOLDERS)?;

        let mut names: BTreeSet<String> = BTreeSet::new();
        names.insert(DEFAULT_FOLDER.to_string());
        names.extend(notes.into_iter().map(|n| n.folder));
        names.extend(explicit);

        Ok(names.into_iter().map(Folder::new).collect())
    }

    /// Idempotent: creating an existing folder returns it unchanged
    pub fn create_folder(&self, request: NewFolder) -> NotebookResult<Folder> {
        let name = request.validate()?;
        let _guard = self.lock.lock();
        self.remember_folder(&name)?;
        Ok(Folder::new(name))
    }

    /// Remove a folder and cascade to every note filed under it.
    /// The default folder is refused and nothing is touched.
    pub fn delete_folder(&self, name: &str) -> NotebookResult<FolderDeletion> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "Folder name is required").into());
        }
        if is_default_folder(name) {
            log::warn!("[FOLDERS] Refused to delete the default folder");
            return Err(NotebookError::ProtectedFolder(DEFAULT_FOLDER.to_string()));
        }

        let _guard = self.lock.lock();
        let mut notes: Vec<Note> = self.load(slots::NOTES)?;
        let mut explicit: Vec<String> = self.load(slots::FOLDERS)?;

        let explicit_before = explicit.len();
        explicit.retain(|f| f != name);
        let was_explicit = explicit.len() != explicit_before;

        let notes_before = notes.len();
        notes.retain(|n| n.folder != name);
        let removed_notes = notes_before - notes.len();

        if removed_notes > 0 {
            self.save(slots::NOTES, &notes)?;
        }
        if was_explicit {
            self.save(slots::FOLDERS, &explicit)?;
        }

        let existed = was_explicit || removed_notes > 0;
        if existed {
            log::info!(
                "[FOLDERS] Deleted folder '{}' and {} note(s)",
                name,
                removed_notes
            );
        }

        Ok(FolderDeletion {
            name: name.to_string(),
            removed_notes,
            existed,
        })
    }

    /// Add a name to the explicit folder set if missing. Caller must hold `self.lock`.
    pub(super) fn remember_folder(&self, name: &str) -> NotebookResult<()> {
        let mut explicit: Vec<String> = self.load(slots::FOLDERS)?;
        if explicit.iter().any(|f| f == name) {
            return Ok(());
        }

        explicit.push(name.to_string());
        self.save(slots::FOLDERS, &explicit)?;
        log::info!("[FOLDERS] Created folder '{}'", name);
        Ok(())
    }
}
