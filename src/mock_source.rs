//! An in-memory stand-in for the note server, used by tests
#![cfg(any(test, feature = "mock_remote_source"))]

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::mock_behaviour::MockBehaviour;
use crate::store::DateKey;
use crate::traits::NoteSource;
use crate::wire::{Note, NoteNotification, NotePayload, NoteProperties};

/// A [`NoteSource`] backed by a plain `Vec` instead of a server.
///
/// It applies the same id assignment and not-found rules as the real server,
/// and an attached [`MockBehaviour`] can make any operation fail on demand.
#[derive(Default)]
pub struct MockSource {
    notes: Mutex<Vec<(String, NotePayload)>>,
    mock_behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            mock_behaviour,
        }
    }

    pub fn behaviour(&self) -> &Arc<Mutex<MockBehaviour>> {
        &self.mock_behaviour
    }

    /// Put a note on the "server" directly, bypassing the behaviour tweaks.
    /// This is how tests seed pre-existing server state with known ids.
    pub fn seed_note<S: ToString>(&self, id: S, payload: NotePayload) {
        self.notes.lock().unwrap().push((id.to_string(), payload));
    }

    pub fn note_count(&self) -> usize {
        self.notes.lock().unwrap().len()
    }

    fn to_note(id: &str, payload: &NotePayload) -> Note {
        let notifications = match &payload.notification {
            None => Vec::new(),
            Some(n) => vec![NoteNotification {
                title: Some(n.title.clone()),
                time: Some(n.time.clone()),
            }],
        };
        Note {
            id: id.to_string(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            done: payload.done,
            date: payload.date.clone(),
            properties: Some(NoteProperties {
                category: Some(payload.properties.category.clone()),
            }),
            notifications,
        }
    }
}

#[async_trait]
impl NoteSource for MockSource {
    async fn list_notes(&self, date: Option<&DateKey>) -> Result<Vec<Note>, Box<dyn Error>> {
        self.mock_behaviour.lock().unwrap().can_list_notes()?;

        let notes = self.notes.lock().unwrap();
        let mut result = Vec::new();
        for (id, payload) in notes.iter() {
            if let Some(wanted) = date {
                match DateKey::from_timestamp(&payload.date) {
                    Ok(day) if &day == wanted => (),
                    _ => continue,
                }
            }
            result.push(Self::to_note(id, payload));
        }
        Ok(result)
    }

    async fn create_note(&self, payload: &NotePayload) -> Result<String, Box<dyn Error>> {
        self.mock_behaviour.lock().unwrap().can_create_note()?;

        let id = Uuid::new_v4().to_hyphenated().to_string();
        self.notes.lock().unwrap().push((id.clone(), payload.clone()));
        Ok(id)
    }

    async fn update_note(&self, id: &str, payload: &NotePayload) -> Result<(), Box<dyn Error>> {
        self.mock_behaviour.lock().unwrap().can_update_note()?;

        let mut notes = self.notes.lock().unwrap();
        match notes.iter_mut().find(|(note_id, _)| note_id == id) {
            None => Err(format!("No note for id {}", id).into()),
            Some((_, existing)) => {
                *existing = payload.clone();
                Ok(())
            }
        }
    }

    async fn delete_note(&self, id: &str) -> Result<(), Box<dyn Error>> {
        self.mock_behaviour.lock().unwrap().can_delete_note()?;

        let mut notes = self.notes.lock().unwrap();
        match notes.iter().position(|(note_id, _)| note_id == id) {
            None => Err(format!("No note for id {}", id).into()),
            Some(index) => {
                notes.remove(index);
                Ok(())
            }
        }
    }
}
