//! This module combines the local [`TaskStore`] with a remote [`NoteSource`],
//! and implements the user-level task flows on top of them
//!
//! Every flow talks to the remote first and only touches the local store once
//! the remote call has succeeded, so the store never gets ahead of the server.
//! Per the original application's behaviour, toggle/edit/delete failures are
//! logged rather than surfaced; only the list fetch hands its error back, so
//! a UI can show a notification for it.

use std::error::Error;

use crate::store::{DateKey, TaskStore};
use crate::task::{NewTask, Task, TaskPatch};
use crate::traits::NoteSource;
use crate::wire;

/// A provider combines a remote source (usually a [`Client`](crate::client::Client))
/// with the local [`TaskStore`] it keeps up to date.
///
/// The store is owned, not global: create one provider per logged-in session
/// (or per test) and pass it around explicitly.
pub struct Provider<S: NoteSource> {
    source: S,
    store: TaskStore,
}

impl<S: NoteSource> Provider<S> {
    /// Create a provider with an empty local store
    pub fn new(source: S) -> Self {
        Self {
            source,
            store: TaskStore::new(),
        }
    }

    /// Create a provider over an existing store (e.g. one restored from disk)
    pub fn with_store(source: S, store: TaskStore) -> Self {
        Self { source, store }
    }

    /// The local store. This is what a view layer renders from
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The remote source.
    ///
    /// Apart from tests, there are very few (if any) reasons to access it directly
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch notes from the server (all of them, or one date's worth) and
    /// merge them into the store.
    ///
    /// This merge only inserts items that are new to their bucket: a note
    /// whose id is already present locally is skipped, so local edits are
    /// never overwritten by a fetch. Re-fetching overlapping date ranges is
    /// therefore idempotent. Returns how many tasks were actually inserted.
    pub async fn fetch_tasks(&mut self, date: Option<&DateKey>) -> Result<usize, Box<dyn Error>> {
        let notes = self.source.list_notes(date).await?;

        let mut inserted = 0;
        for note in notes {
            let (day, task) = match wire::parse_note(note) {
                Ok(parsed) => parsed,
                Err(err) => {
                    log::warn!("Skipping a malformed note: {}", err);
                    continue;
                }
            };
            if self.store.task(&day, task.id()).is_some() {
                continue;
            }
            self.store.add_task(&day, task);
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Create a task on the server, then insert it locally under the
    /// server-assigned id.
    ///
    /// Returns the new id, or `None` when the remote call failed (in which
    /// case the failure has been logged and the store is untouched).
    pub async fn create_task(&mut self, date: &DateKey, draft: NewTask) -> Option<String> {
        let pending = Task::new(String::new(), draft);
        let payload = wire::note_payload(&pending, date);

        match self.source.create_note(&payload).await {
            Err(err) => {
                log::error!("Could not create task {:?}: {}", pending.title(), err);
                None
            }
            Ok(id) => {
                let task = pending.with_server_id(id.clone());
                self.store.add_task(date, task);
                Some(id)
            }
        }
    }

    /// Flip the completion flag of a task.
    ///
    /// A no-op when the task is absent. The full task payload, with the
    /// negated flag, is sent to the server first; the local flag is flipped
    /// only once that call has succeeded. A failure leaves the local state
    /// unchanged and is only logged.
    pub async fn toggle_task(&mut self, date: &DateKey, task_id: &str) {
        let mut updated = match self.store.task(date, task_id) {
            None => return,
            Some(task) => task.clone(),
        };
        updated.set_done(updated.done() == false);
        let payload = wire::note_payload(&updated, date);

        match self.source.update_note(task_id, &payload).await {
            Err(err) => log::error!("Could not toggle task {}: {}", task_id, err),
            Ok(()) => {
                let patch = TaskPatch {
                    done: Some(updated.done()),
                    ..TaskPatch::default()
                };
                self.store.edit_task(date, task_id, &patch);
            }
        }
    }

    /// Send an edited task to the server, and apply the patch locally once
    /// the server has accepted it.
    ///
    /// A no-op when the task is absent. Like [`Self::toggle_task`], a remote
    /// failure leaves the local state unchanged and is only logged.
    pub async fn save_task_edit(&mut self, date: &DateKey, task_id: &str, patch: TaskPatch) {
        let mut updated = match self.store.task(date, task_id) {
            None => return,
            Some(task) => task.clone(),
        };
        updated.apply_patch(&patch);
        let payload = wire::note_payload(&updated, date);

        match self.source.update_note(task_id, &payload).await {
            Err(err) => log::error!("Could not update task {}: {}", task_id, err),
            Ok(()) => self.store.edit_task(date, task_id, &patch),
        }
    }

    /// Delete a task from the server, then from its local bucket.
    ///
    /// Returns whether the deletion happened, so the caller can show an
    /// acknowledgment; a remote failure keeps the task locally and is logged.
    pub async fn delete_task(&mut self, date: &DateKey, task_id: &str) -> bool {
        if self.store.task(date, task_id).is_none() {
            log::debug!("Not deleting task {}: not in the {} bucket", task_id, date);
            return false;
        }

        match self.source.delete_note(task_id).await {
            Err(err) => {
                log::error!("Could not delete task {}: {}", task_id, err);
                false
            }
            Ok(()) => {
                self.store.remove_task(date, task_id);
                true
            }
        }
    }
}
