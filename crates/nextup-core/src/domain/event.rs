//! Event snapshot: what the engine reads from the external store.
//!
//! Events are owned elsewhere. The engine never creates or deletes them; it
//! only reads snapshots and asks the tag service to attach or detach the
//! marker. `start` is optional on purpose: an event with no readable start
//! instant is a data anomaly the rotation procedure must report, not a state
//! this type should make unrepresentable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::EventId;

/// Read-mostly snapshot of a dated calendar item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,

    /// Start instant, when the store has one.
    pub start: Option<DateTime<Utc>>,

    /// Unpublished events are invisible to every query.
    pub published: bool,
}

impl Event {
    /// Calendar day of the start instant (day granularity, for elapsed checks).
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start.map(|s| s.date_naive())
    }
}

/// Id + title reference carried in rotation results and log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRef {
    pub id: EventId,
    pub title: String,
}

impl From<&Event> for EventRef {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
        }
    }
}
