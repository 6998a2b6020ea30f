//! TagService port - marker attach/detach against the external store.

use async_trait::async_trait;

use crate::domain::{EventId, RotatorError, TagSlug};

/// Mutating side of the tag relationship.
///
/// Attach/detach are best-effort: `Ok(false)` means the store refused or
/// ignored the mutation (the engine reports this in the run result but never
/// aborts on it). `Err` is reserved for transport faults - an unreachable
/// store - and aborts the run.
#[async_trait]
pub trait TagService: Send + Sync {
    /// Does the slug exist in the tag namespace at all?
    async fn tag_exists(&self, tag: &TagSlug) -> Result<bool, RotatorError>;

    /// Attach `tag` to the event. `Ok(true)` on success.
    async fn attach_tag(&self, event: EventId, tag: &TagSlug) -> Result<bool, RotatorError>;

    /// Detach `tag` from the event. Detaching an absent tag is a success.
    async fn detach_tag(&self, event: EventId, tag: &TagSlug) -> Result<bool, RotatorError>;

    /// Does the event currently carry `tag`?
    async fn event_has_tag(&self, event: EventId, tag: &TagSlug) -> Result<bool, RotatorError>;
}
