//! The local, in-memory view of tasks, grouped by calendar date

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::task::{Task, TaskPatch};

/// A calendar date in `YYYY-MM-DD` form, used as the bucketing key for tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    date: NaiveDate,
}

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn as_date(&self) -> NaiveDate {
        self.date
    }

    /// Extract the date key from a server timestamp (e.g. `2024-05-01T12:00:00Z`).
    /// The server occasionally sends a bare date, which is accepted too.
    pub fn from_timestamp(stamp: &str) -> Result<Self, Box<dyn Error>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
            return Ok(Self::new(dt.date_naive()));
        }
        match NaiveDate::parse_from_str(stamp, "%Y-%m-%d") {
            Ok(date) => Ok(Self::new(date)),
            Err(err) => Err(format!("Invalid note timestamp {:?}: {}", stamp, err).into()),
        }
    }

    /// The timestamp the server expects for this date: noon UTC of that day.
    /// (Noon rather than midnight, so time-zone drift cannot move the note to a neighbouring day.)
    pub fn noon_timestamp(&self) -> String {
        let noon = self.date.and_hms_opt(12, 0, 0).unwrap(/* noon is always a valid time of day */);
        Utc.from_utc_datetime(&noon).to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok(Self::new(date))
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

/// Used to support serde
impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<DateKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The in-memory task store: one ordered bucket of tasks per date.
///
/// Within a bucket, insertion order is preserved and ids are unique. All
/// mutations are synchronous and leave no partial bucket state observable.
/// This is a plain value, meant to be owned by a [`Provider`](crate::provider::Provider)
/// (or by a test) rather than living in a process-wide global.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStore {
    buckets: BTreeMap<DateKey, Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task into the bucket for `date`.
    ///
    /// If the bucket already holds a task with the same id, that task is
    /// replaced in place (full overwrite). Otherwise the task is appended.
    pub fn add_task(&mut self, date: &DateKey, task: Task) {
        let bucket = self.buckets.entry(*date).or_insert_with(Vec::new);
        match bucket.iter_mut().find(|t| t.id() == task.id()) {
            Some(existing) => *existing = task,
            None => bucket.push(task),
        }
    }

    /// Shallow-merge `patch` into the task matching `task_id`.
    /// A missing bucket or task makes this a no-op.
    pub fn edit_task(&mut self, date: &DateKey, task_id: &str, patch: &TaskPatch) {
        if let Some(task) = self.task_mut(date, task_id) {
            task.apply_patch(patch);
        }
    }

    /// Shallow-merge every field of `task` into the existing entry with the
    /// same id. A missing bucket or task makes this a no-op; this never inserts.
    pub fn update_task(&mut self, date: &DateKey, task: &Task) {
        if let Some(existing) = self.task_mut(date, task.id()) {
            existing.merge_from(task);
        }
    }

    /// Remove the task matching `task_id` from its bucket and return it
    pub fn remove_task(&mut self, date: &DateKey, task_id: &str) -> Option<Task> {
        let bucket = self.buckets.get_mut(date)?;
        let index = bucket.iter().position(|t| t.id() == task_id)?;
        Some(bucket.remove(index))
    }

    /// The tasks for a given date, in insertion order (empty when the date has none)
    pub fn tasks_for(&self, date: &DateKey) -> &[Task] {
        self.buckets.get(date).map(|b| b.as_slice()).unwrap_or(&[])
    }

    pub fn task(&self, date: &DateKey, task_id: &str) -> Option<&Task> {
        self.buckets.get(date)?.iter().find(|t| t.id() == task_id)
    }

    fn task_mut(&mut self, date: &DateKey, task_id: &str) -> Option<&mut Task> {
        self.buckets.get_mut(date)?.iter_mut().find(|t| t.id() == task_id)
    }

    /// Iterate over every (date, bucket) pair, in date order
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[Task])> {
        self.buckets.iter().map(|(date, bucket)| (date, bucket.as_slice()))
    }

    /// The total number of tasks, across all dates
    pub fn task_count(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }
}
