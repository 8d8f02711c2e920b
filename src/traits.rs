use std::error::Error;

use async_trait::async_trait;

use crate::store::DateKey;
use crate::wire::{Note, NotePayload};

/// A remote store of notes.
///
/// The regular implementor is [`Client`](crate::client::Client), which talks
/// to the actual server. Tests use [`MockSource`](crate::mock_source::MockSource)
/// instead, so that flows can be exercised without a network.
///
/// Implementors are stateless request/response translators: the authoritative
/// local state lives in a [`TaskStore`](crate::store::TaskStore), never here.
#[async_trait]
pub trait NoteSource {
    /// List every note, or only the notes of one date when `date` is given
    async fn list_notes(&self, date: Option<&DateKey>) -> Result<Vec<Note>, Box<dyn Error>>;

    /// Create a note and return its server-assigned id
    async fn create_note(&self, payload: &NotePayload) -> Result<String, Box<dyn Error>>;

    /// Overwrite the note matching `id` with `payload`
    async fn update_note(&self, id: &str, payload: &NotePayload) -> Result<(), Box<dyn Error>>;

    /// Delete the note matching `id`
    async fn delete_note(&self, id: &str) -> Result<(), Box<dyn Error>>;
}
