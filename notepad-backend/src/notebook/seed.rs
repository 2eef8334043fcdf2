use super::{Notebook, NotebookResult};
use crate::models::{NewNote, Note, DEFAULT_FOLDER};
use crate::store::slots;

/// Inserted oldest-first, so the first entry ends up on top of the list
const WELCOME_NOTES: &[(&str, &str)] = &[
    (
        "Welcome to your Notes",
        "This is a simple notepad. Create a note with a title and some content, \
         file it into a folder, and delete it when you no longer need it.",
    ),
    (
        "Folders and attachments",
        "Notes without a folder land in General. Deleting any other folder also \
         deletes the notes inside it. Small files can be attached to a note.",
    ),
];

impl Notebook {
    /// Insert the welcome notes when the notebook is empty or General has no notes.
    /// Returns how many notes were added; zero once General has a member.
    pub fn seed_welcome_notes(&self) -> NotebookResult<usize> {
        let _guard = self.lock.lock();
        let notes: Vec<Note> = self.load(slots::NOTES)?;
        if notes.iter().any(|n| n.folder == DEFAULT_FOLDER) {
            return Ok(0);
        }

        for (title, content) in WELCOME_NOTES.iter().rev() {
            let draft = NewNote::new(*title, *content).validate(self.max_attachment_bytes)?;
            self.insert_note(draft)?;
        }

        log::info!("[NOTES] Seeded {} welcome note(s)", WELCOME_NOTES.len());
        Ok(WELCOME_NOTES.len())
    }
}
