use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Attachment;
use super::folder::{resolve_note_folder, DEFAULT_FOLDER};
use super::ValidationError;

/// A user-authored text record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

/// Absent, `null` and `[]` attachments all mean "no attachments"
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Attachment>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Attachment>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for creating a note. Identity and timestamp are assigned by the notebook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

/// A creation request that passed validation, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub folder: String,
    pub attachments: Vec<Attachment>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    /// Reports the first failing field in declaration order
    pub fn validate(self, max_attachment_bytes: Option<usize>) -> Result<NoteDraft, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "Title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::new("content", "Content is required"));
        }

        let folder = resolve_note_folder(self.folder.as_deref())?;

        let attachments = self
            .attachments
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, a)| a.validate(i, max_attachment_bytes))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NoteDraft {
            title: self.title,
            content: self.content,
            folder,
            attachments,
        })
    }
}

impl NoteDraft {
    pub fn into_note(self, id: i64, created_at: DateTime<Utc>) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            folder: self.folder,
            attachments: self.attachments,
            created_at,
        }
    }
}
