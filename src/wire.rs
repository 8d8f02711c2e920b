//! The server's note schema, and translations from/to the local [`Task`] shape
//!
//! The server persists tasks as "notes": the category lives in a nested
//! `properties` object and the notification time in a `notifications` array,
//! while the local [`Task`] keeps both flat. Everything that crosses the wire
//! goes through this module, in particular every outgoing update is built by
//! the single [`note_payload`] function, so the different write flows cannot
//! drift apart.

use std::error::Error;

use serde::{Deserialize, Deserializer, Serialize};

use crate::store::DateKey;
use crate::task::Task;

/// A note, as the server returns it
#[derive(Clone, Debug, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
    /// ISO-8601 timestamp; its calendar day decides the local bucket
    pub date: String,
    #[serde(default)]
    pub properties: Option<NoteProperties>,
    #[serde(default)]
    pub notifications: Vec<NoteNotification>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoteProperties {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoteNotification {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// The body sent on note creation and update
#[derive(Clone, Debug, Serialize)]
pub struct NotePayload {
    pub title: String,
    pub description: String,
    pub done: bool,
    pub date: String,
    pub properties: PropertiesPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationPayload>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertiesPayload {
    pub category: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub time: String,
}

/// The `{ data: { id, ... } }` envelope a successful creation returns
#[derive(Clone, Debug, Deserialize)]
pub struct CreateResponse {
    pub data: CreatedNote,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreatedNote {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// Note ids have been observed both as JSON numbers and as strings
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(u64),
        Str(String),
    }
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Str(s) => s,
    })
}

/// Translate a server note into its date bucket and local task.
///
/// `notifications[0].time` becomes the flat `time`, `properties.category`
/// becomes the flat `category` (the "uncategorized" sentinel when absent).
pub fn parse_note(note: Note) -> Result<(DateKey, Task), Box<dyn Error>> {
    let date = DateKey::from_timestamp(&note.date)?;

    let category = note
        .properties
        .and_then(|p| p.category)
        .unwrap_or_else(crate::config::default_category);

    let first_notification = note.notifications.into_iter().next();
    let (notification_title, time) = match first_notification {
        Some(n) => (n.title, n.time),
        None => (None, None),
    };

    let task = Task::new_with_parameters(
        note.id,
        note.title,
        note.done,
        category,
        note.description,
        time,
        notification_title,
    );
    Ok((date, task))
}

/// Build the wire payload for a task, for creation as well as updates.
///
/// The notification wrapper is only present when the task has a time; its
/// title falls back to the task title.
pub fn note_payload(task: &Task, date: &DateKey) -> NotePayload {
    let notification = task.time().map(|time| NotificationPayload {
        title: task.notification_title().unwrap_or_else(|| task.title()).to_string(),
        time: time.to_string(),
    });

    NotePayload {
        title: task.title().to_string(),
        description: task.description().to_string(),
        done: task.done(),
        date: date.noon_timestamp(),
        properties: PropertiesPayload {
            category: task.category().to_string(),
        },
        notification,
    }
}
