//! Note-related entity definitions.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::UserId;

/// A note owned by the external notes service.
///
/// Field names are accepted in both the lowercase form and the capitalized form
/// produced by services that serialize untagged struct fields. Missing or null
/// fields decode to their zero value rather than failing the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Identifier assigned by the notes service.
    #[serde(alias = "ID", alias = "Id", default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// Note text.
    #[serde(alias = "Content", default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Creation timestamp, passed through without parsing.
    #[serde(alias = "Created", default, deserialize_with = "null_as_default")]
    pub created: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returned when note content is empty after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot submit an empty note.")]
pub struct EmptyNoteError;

/// A validated request to attach a note to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSubmission {
    user_id: UserId,
    content: String,
}

impl NoteSubmission {
    /// Trims `content` and rejects it if nothing is left.
    pub fn new(user_id: UserId, content: &str) -> Result<Self, EmptyNoteError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(EmptyNoteError);
        }
        Ok(Self {
            user_id,
            content: content.to_string(),
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
