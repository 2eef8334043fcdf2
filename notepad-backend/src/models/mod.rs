pub mod attachment;
pub mod folder;
pub mod note;

pub use attachment::Attachment;
pub use folder::{Folder, NewFolder, DEFAULT_FOLDER};
pub use note::{NewNote, Note, NoteDraft};

/// A request field that failed boundary validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `attachments.0.url`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
