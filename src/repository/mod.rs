mod file;
#[cfg(test)]
mod memory;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;

use async_trait::async_trait;

use std::io;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Could not read notes from storage.")]
    Read(#[source] io::Error),

    #[error("Stored notes are corrupted and could not be read.")]
    Corrupt(#[source] serde_json::Error),

    #[error("Could not save notes to storage.")]
    Write(#[source] io::Error),
}

/// Whole-collection persistence for notes.
///
/// `load` never returns partial data: either the full ordered sequence or an
/// error. `save` replaces the stored sequence as one unit.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Note>, StoreError>;

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError>;
}

/// Parses a stored document. Blank content is an empty collection.
fn decode(contents: &str) -> Result<Vec<Note>, StoreError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(contents).map_err(StoreError::Corrupt)
}

fn encode(notes: &[Note]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(notes).map_err(|e| StoreError::Write(io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_document_is_empty_collection() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("  \n\t").unwrap().is_empty());
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn non_sequence_document_is_corrupt() {
        for doc in ["{}", "{\"id\": \"a\"}", "not json", "42", "[{\"id\": \"a\"}]"] {
            assert!(
                matches!(decode(doc), Err(StoreError::Corrupt(_))),
                "expected corrupt for {doc:?}"
            );
        }
    }

    #[test]
    fn encoded_notes_decode_to_same_sequence() {
        let notes = vec![Note::new("first".into()), Note::new("second".into())];
        let bytes = encode(&notes).unwrap();
        let decoded = decode(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(decoded, notes);
    }
}
