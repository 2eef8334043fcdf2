use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Implicit destination for notes created without a folder. Never deletable.
pub const DEFAULT_FOLDER: &str = "General";

pub const MAX_FOLDER_NAME_LEN: usize = 64;

/// A named grouping of notes, addressed by its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub fn is_default_folder(name: &str) -> bool {
    name.trim() == DEFAULT_FOLDER
}

/// Request body for creating a folder
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFolder {
    #[serde(default)]
    pub name: String,
}

impl NewFolder {
    /// Trimmed folder name, or the reason it is unusable
    pub fn validate(&self) -> Result<String, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "Folder name is required"));
        }
        check_folder_len("name", name)?;
        Ok(name.to_string())
    }
}

/// Resolve an optional folder field on a note: blank or missing means the default folder
pub(crate) fn resolve_note_folder(folder: Option<&str>) -> Result<String, ValidationError> {
    match folder.map(str::trim) {
        None | Some("") => Ok(DEFAULT_FOLDER.to_string()),
        Some(name) => {
            check_folder_len("folder", name)?;
            Ok(name.to_string())
        }
    }
}

fn check_folder_len(field: &str, name: &str) -> Result<(), ValidationError> {
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("Folder name must be at most {} characters", MAX_FOLDER_NAME_LEN),
        ));
    }
    Ok(())
}
