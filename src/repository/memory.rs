use async_trait::async_trait;

use std::{
    io,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use super::{NoteStore, StoreError, decode, encode};
use crate::models::Note;

/// Keeps the serialized document in memory. Used by tests to exercise the
/// store contract without touching the filesystem.
#[derive(Default)]
pub struct MemoryStore {
    buffer: Mutex<String>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an arbitrary raw document, valid or not.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            buffer: Mutex::new(contents.into()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        decode(&self.contents())
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write(io::Error::new(
                io::ErrorKind::StorageFull,
                "simulated write failure",
            )));
        }

        let body = encode(notes)?;
        let body = String::from_utf8(body).map_err(|e| StoreError::Write(io::Error::other(e)))?;
        *self
            .buffer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = body;

        Ok(())
    }
}
