use chrono::Utc;

use super::{Notebook, NotebookResult};
use crate::models::{NewNote, Note, NoteDraft};
use crate::models::folder::is_default_folder;
use crate::store::slots;

impl Notebook {
    /// All notes, newest first, optionally restricted to one folder
    pub fn list_notes(&self, folder: Option<&str>) -> NotebookResult<Vec<Note>> {
        let _guard = self.lock.lock();
        let mut notes: Vec<Note> = self.load(slots::NOTES)?;

        if let Some(folder) = folder.map(str::trim).filter(|f| !f.is_empty()) {
            notes.retain(|n| n.folder == folder);
        }

        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    /// Validate and store a new note. Nothing is written if validation fails.
    pub fn create_note(&self, request: NewNote) -> NotebookResult<Note> {
        let draft = request.validate(self.max_attachment_bytes)?;
        let _guard = self.lock.lock();
        self.insert_note(draft)
    }

    /// Returns whether a note was removed. Deleting an absent id is not an error.
    pub fn delete_note(&self, id: i64) -> NotebookResult<bool> {
        let _guard = self.lock.lock();
        let mut notes: Vec<Note> = self.load(slots::NOTES)?;

        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            log::debug!("[NOTES] Delete of unknown note {} ignored", id);
            return Ok(false);
        }

        self.save(slots::NOTES, &notes)?;
        log::info!("[NOTES] Deleted note {}", id);
        Ok(true)
    }

    /// Caller must hold `self.lock`
    pub(super) fn insert_note(&self, draft: NoteDraft) -> NotebookResult<Note> {
        let mut notes: Vec<Note> = self.load(slots::NOTES)?;
        let last_assigned: i64 = self.load(slots::NOTE_SEQUENCE)?;

        let id = next_note_id(last_assigned, &notes);
        let note = draft.into_note(id, Utc::now());

        notes.insert(0, note.clone());
        self.save(slots::NOTES, &notes)?;
        self.save(slots::NOTE_SEQUENCE, &id)?;

        // Second, separate write: the folder becomes explicit the first time a note uses it
        if !is_default_folder(&note.folder) {
            self.remember_folder(&note.folder)?;
        }

        log::info!("[NOTES] Created note {} in folder '{}'", note.id, note.folder);
        Ok(note)
    }
}

/// One past the larger of the persisted high-water mark and the largest stored id,
/// so ids are never handed out twice even after the newest note is deleted
pub(crate) fn next_note_id(last_assigned: i64, notes: &[Note]) -> i64 {
    let max_stored = notes.iter().map(|n| n.id).max().unwrap_or(0);
    max_stored.max(last_assigned) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::NotebookError;

    #[test]
    fn test_first_note_gets_id_one_and_default_folder() {
        let notebook = Notebook::in_memory();
        let note = notebook.create_note(NewNote::new("A", "B")).unwrap();

        assert_eq!(note.id, 1);
        assert_eq!(note.folder, "General");
        assert!(note.attachments.is_empty());
        assert_eq!(notebook.list_notes(None).unwrap(), vec![note]);
    }

    #[test]
    fn test_ids_strictly_increase_and_are_not_reused() {
        let notebook = Notebook::in_memory();
        let a = notebook.create_note(NewNote::new("A", "1")).unwrap();
        let b = notebook.create_note(NewNote::new("B", "2")).unwrap();
        assert!(b.id > a.id);

        assert!(notebook.delete_note(b.id).unwrap());
        let c = notebook.create_note(NewNote::new("C", "3")).unwrap();
        assert!(c.id > b.id);
    }

    #[test]
    fn test_next_id_respects_stored_notes_without_sequence() {
        let note = NewNote::new("A", "B").validate(Some(16)).unwrap().into_note(41, Utc::now());
        assert_eq!(next_note_id(0, &[note.clone()]), 42);
        assert_eq!(next_note_id(50, &[note]), 51);
        assert_eq!(next_note_id(0, &[]), 1);
    }

    #[test]
    fn test_list_is_newest_first_and_filterable() {
        let notebook = Notebook::in_memory();
        notebook.create_note(NewNote::new("A", "1")).unwrap();
        notebook.create_note(NewNote::new("B", "2").in_folder("Work")).unwrap();
        notebook.create_note(NewNote::new("C", "3").in_folder("Work")).unwrap();

        let titles: Vec<String> = notebook
            .list_notes(None)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["C", "B", "A"]);

        let work = notebook.list_notes(Some("Work")).unwrap();
        assert_eq!(work.len(), 2);
        assert!(work.iter().all(|n| n.folder == "Work"));

        assert!(notebook.list_notes(Some("Nope")).unwrap().is_empty());
        assert_eq!(notebook.list_notes(Some("  ")).unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_note_leaves_collection_unchanged() {
        let notebook = Notebook::in_memory();
        notebook.create_note(NewNote::new("A", "B")).unwrap();

        let err = notebook.create_note(NewNote::new("", "content")).unwrap_err();
        assert!(matches!(err, NotebookError::Validation(ref v) if v.field == "title"));
        let err = notebook.create_note(NewNote::new("title", "")).unwrap_err();
        assert!(matches!(err, NotebookError::Validation(ref v) if v.field == "content"));

        assert_eq!(notebook.list_notes(None).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let notebook = Notebook::in_memory();
        let note = notebook.create_note(NewNote::new("A", "B")).unwrap();

        assert!(!notebook.delete_note(999).unwrap());
        assert_eq!(notebook.list_notes(None).unwrap(), vec![note.clone()]);

        assert!(notebook.delete_note(note.id).unwrap());
        assert!(notebook.list_notes(None).unwrap().is_empty());
        assert!(!notebook.delete_note(note.id).unwrap());
    }

    #[test]
    fn test_creating_note_makes_folder_explicit() {
        let notebook = Notebook::in_memory();
        let note = notebook.create_note(NewNote::new("A", "B").in_folder("Ideas")).unwrap();
        notebook.delete_note(note.id).unwrap();

        assert!(notebook.list_folders().unwrap().iter().any(|f| f.name == "Ideas"));
    }
}
