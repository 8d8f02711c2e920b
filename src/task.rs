//! Dated to-do tasks, as the client sees them

use std::error::Error;

use serde::{Deserialize, Serialize};

/// A task, as displayed in a calendar day.
///
/// This is the flat, local shape. The server stores tasks as "notes" with a
/// nested schema; the [`wire`](crate::wire) module translates between the two.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The server-assigned note identifier. Unique within a date bucket
    id: String,
    /// The display title. Required, non-empty
    title: String,
    /// The completion flag
    done: bool,
    /// A free-form label. Defaults to the "uncategorized" sentinel
    category: String,
    /// An optional longer text. Defaults to the empty string
    description: String,
    /// The notification time, as an ISO-8601 timestamp, if any
    time: Option<String>,
    /// An optional override for the notification's display title.
    /// When absent, the task title is used
    notification_title: Option<String>,
}

impl Task {
    /// Create a task from a server-assigned id and a draft.
    ///
    /// Tasks only come into existence once the server has acknowledged them,
    /// so there is no constructor that picks an id locally.
    pub fn new(id: String, draft: NewTask) -> Self {
        Self {
            id,
            title: draft.title,
            done: false,
            category: draft.category,
            description: draft.description,
            time: draft.time,
            notification_title: draft.notification_title,
        }
    }

    /// Create a task whose every field is already known (e.g. parsed from a server note)
    pub fn new_with_parameters(
        id: String,
        title: String,
        done: bool,
        category: String,
        description: String,
        time: Option<String>,
        notification_title: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            done,
            category,
            description,
            time,
            notification_title,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn done(&self) -> bool { self.done }
    pub fn category(&self) -> &str { &self.category }
    pub fn description(&self) -> &str { &self.description }
    pub fn time(&self) -> Option<&str> { self.time.as_deref() }
    pub fn notification_title(&self) -> Option<&str> { self.notification_title.as_deref() }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// Attach the id the server assigned to a freshly created task
    pub(crate) fn with_server_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    /// Shallow-merge a patch into this task. Fields the patch does not carry
    /// are left untouched; the id never changes.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(time) = &patch.time {
            self.time = time.clone();
        }
        if let Some(nt) = &patch.notification_title {
            self.notification_title = nt.clone();
        }
    }

    /// Shallow-merge every field of `other` into this task (the id is kept)
    pub fn merge_from(&mut self, other: &Task) {
        self.title = other.title.clone();
        self.done = other.done;
        self.category = other.category.clone();
        self.description = other.description.clone();
        self.time = other.time.clone();
        self.notification_title = other.notification_title.clone();
    }
}

/// A task the user has filled in but the server has not assigned an id to yet
#[derive(Clone, Debug)]
pub struct NewTask {
    pub(crate) title: String,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) time: Option<String>,
    pub(crate) notification_title: Option<String>,
}

impl NewTask {
    /// Start a draft. The title is the only required field; an empty or
    /// blank title is rejected before any network call is made.
    pub fn new<S: Into<String>>(title: S) -> Result<Self, Box<dyn Error>> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("A task requires a non-empty title".into());
        }
        Ok(Self {
            title,
            category: crate::config::default_category(),
            description: String::new(),
            time: None,
            notification_title: None,
        })
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Set the notification time (an ISO-8601 timestamp)
    pub fn time<S: Into<String>>(mut self, time: S) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn notification_title<S: Into<String>>(mut self, title: S) -> Self {
        self.notification_title = Some(title.into());
        self
    }
}

/// A partial update to a task.
///
/// `None` fields are left as-is. For the two optional task fields, the outer
/// `Option` says whether the patch touches them and the inner one is the new
/// value (`Some(None)` clears).
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub done: Option<bool>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub time: Option<Option<String>>,
    pub notification_title: Option<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.done.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.time.is_none()
            && self.notification_title.is_none()
    }
}
