//! EventStore port - read-only chronological queries over the event store.
//!
//! The engine deliberately queries raw chronology rather than going through
//! whatever richer, filtered listing API a host platform imposes. An adapter
//! must expose unfiltered "earliest start first" semantics; inherited query
//! filters on the host side have caused the marker to skip events before.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Event, EventId, RotatorError, TagSlug};

/// Read side of the external event store.
///
/// Contracts an adapter must honor:
/// - Only published events are visible through any of these queries.
/// - "Future" means `start >= now`, everywhere, so status displays agree
///   with what a rotation run would do.
/// - Ordering is ascending by start instant; ties resolve in the store's
///   native, stable order.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// The event currently carrying `tag`, or `None`.
    ///
    /// If several events carry the tag (a data anomaly), the earliest start
    /// wins; events with no readable start order last so they stay findable.
    async fn find_tagged_event(&self, tag: &TagSlug) -> Result<Option<Event>, RotatorError>;

    /// The earliest event with `start >= now`, or `None`.
    async fn find_next_future_event(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Event>, RotatorError>;

    /// The `limit` soonest events with `start >= now`, ascending by start.
    async fn list_future_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, RotatorError>;

    /// Start instant of one event, or `None` when the store has no readable
    /// date for it.
    async fn start_instant(&self, id: EventId) -> Result<Option<DateTime<Utc>>, RotatorError>;
}
