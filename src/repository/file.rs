use async_trait::async_trait;
use tempfile::NamedTempFile;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::{NoteStore, StoreError, decode, encode};
use crate::models::Note;

/// Stores the note collection as a JSON array in a single file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl NoteStore for FileStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!("failed to read notes file {}: {e}", self.path.display());
                return Err(StoreError::Read(e));
            }
        };

        decode(&contents).inspect_err(|e| {
            if let StoreError::Corrupt(cause) = e {
                tracing::error!(
                    "notes file {} is not a valid note list: {cause}",
                    self.path.display()
                );
            }
        })
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let body = encode(notes)?;
        let path = self.path.clone();

        let result = tokio::task::spawn_blocking(move || replace_file(&path, &body))
            .await
            .unwrap_or_else(|e| Err(io::Error::other(e.to_string())));

        result.map_err(|e| {
            tracing::error!("failed to write notes file {}: {e}", self.path.display());
            StoreError::Write(e)
        })
    }
}

/// Writes `body` next to `path` and renames it into place, so readers see
/// either the previous document or the new one.
fn replace_file(path: &Path, body: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
