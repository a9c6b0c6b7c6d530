use crate::{
    models::Note,
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

pub const MAX_TEXT_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Note text is required.")]
    Missing,

    #[error("Note text must not be empty.")]
    Empty,

    #[error("Note text must be at most {max} characters (got {actual}).")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Note \"{0}\" not found.")]
    NotFound(String),
}

/// Trims `raw` and checks it against the note text bounds.
pub fn validate_text(raw: Option<&str>) -> Result<String, ValidationError> {
    let trimmed = raw.ok_or(ValidationError::Missing)?.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let len = trimmed.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            max: MAX_TEXT_LEN,
            actual: len,
        });
    }

    Ok(trimmed.to_string())
}

/// Note operations on top of a [`NoteStore`].
///
/// Every load-modify-save sequence runs while holding the store lock, so
/// writers inside this process never overwrite each other's changes. Separate
/// processes sharing one file are not coordinated.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<tokio::sync::Mutex<Arc<dyn NoteStore>>>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store: Arc::new(tokio::sync::Mutex::new(store)),
        }
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        Ok(self.store.lock().await.load().await?)
    }

    pub async fn create_note(&self, text: Option<String>) -> Result<Note, NoteError> {
        let text = validate_text(text.as_deref())?;

        let store = self.store.lock().await;
        let mut notes = store.load().await?;

        let note = Note::new(text);
        notes.push(note.clone());
        store.save(&notes).await?;

        tracing::info!("created note {}", note.id);

        Ok(note)
    }

    /// Removes the note with `id` and returns that id.
    pub async fn delete_note(&self, id: &str) -> Result<String, NoteError> {
        let store = self.store.lock().await;
        let mut notes = store.load().await?;

        let Some(index) = notes.iter().position(|note| note.id == id) else {
            return Err(NoteError::NotFound(id.to_string()));
        };
        let removed = notes.remove(index);
        store.save(&notes).await?;

        tracing::info!("deleted note {}", removed.id);

        Ok(removed.id)
    }
}
