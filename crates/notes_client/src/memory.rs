//! In-memory notes service for tests and local development.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use entities::{Note, NoteSubmission, UserId};
use futures_util::{stream, StreamExt};
use tokio::sync::RwLock;

use crate::{ListError, NoteStream, NotesClient, SubmitError};

/// Notes client that keeps notes in memory and counts calls.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotesClient {
    notes: Arc<RwLock<Vec<(UserId, Note)>>>,
    submit_calls: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
}

impl MemoryNotesClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `submit_note` calls made so far.
    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_notes` calls made so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotesClient for MemoryNotesClient {
    async fn submit_note(&self, submission: &NoteSubmission) -> Result<(), SubmitError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        let mut notes = self.notes.write().await;
        let note = Note {
            id: notes.len() as i64 + 1,
            content: submission.content().to_string(),
            created: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        notes.push((submission.user_id(), note));
        Ok(())
    }

    async fn list_notes(&self, user_id: UserId) -> Result<NoteStream, ListError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let notes: Vec<_> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, note)| Ok(note.clone()))
            .collect();
        Ok(stream::iter(notes).boxed())
    }
}
