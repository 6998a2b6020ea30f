//! Read models for status displays.
//!
//! These are projections for presentation, not inputs to the rotation
//! decision. They are built from the same store queries and the same
//! "future" predicate as the decision path, so what an operator sees is
//! what a rotation run would act on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EventId, TagSlug};

/// The event currently carrying the marker, as shown in status output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEventStatus {
    pub id: EventId,
    pub title: String,
    pub start: Option<DateTime<Utc>>,

    /// True when the start day is strictly before today; an event with no
    /// readable start is not considered elapsed.
    pub elapsed: bool,
}

/// One row of the upcoming-events listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub id: EventId,
    pub title: String,
    pub start: Option<DateTime<Utc>>,

    /// Whether this event already carries the marker tag.
    pub has_tag: bool,
}

/// Everything the status display needs in one read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub tag_slug: TagSlug,

    /// Whether the slug exists in the tag namespace at all.
    pub tag_exists: bool,

    pub current: Option<TaggedEventStatus>,

    /// The event a rotation run would promote next.
    pub next: Option<UpcomingEvent>,

    /// Next automatic rotation, when a scheduler is wired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_at: Option<DateTime<Utc>>,
}
