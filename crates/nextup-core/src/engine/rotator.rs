//! The rotation engine.
//!
//! One decision procedure: look at which event carries the marker tag,
//! decide whether it has elapsed, and move the marker forward if so. Every
//! run produces exactly one [`RotationResult`] and appends it to the
//! activity log, no-op runs included.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    EventRef, RotationAction, RotationResult, RotatorConfig, RotatorError, RunId,
};
use crate::engine::views::{StatusView, TaggedEventStatus, UpcomingEvent};
use crate::ports::{ActivityLog, EventStore, IdGenerator, Schedule, TagService};

/// Rotates the marker tag from elapsed events to the next future event.
///
/// Collaborators come in through ports at construction; the engine holds no
/// ambient state and reads no live clock - "now" is a parameter everywhere.
pub struct Rotator {
    events: Arc<dyn EventStore>,
    tags: Arc<dyn TagService>,
    log: Arc<dyn ActivityLog>,
    ids: Arc<dyn IdGenerator>,
    schedule: Option<Arc<dyn Schedule>>,
    config: RotatorConfig,

    /// Serializes runs. Overlapping triggers (scheduler + manual) would
    /// otherwise race the read-then-mutate sequence against each other.
    run_guard: tokio::sync::Mutex<()>,
}

impl Rotator {
    pub fn new(
        events: Arc<dyn EventStore>,
        tags: Arc<dyn TagService>,
        log: Arc<dyn ActivityLog>,
        ids: Arc<dyn IdGenerator>,
        config: RotatorConfig,
    ) -> Self {
        Self {
            events,
            tags,
            log,
            ids,
            schedule: None,
            config,
            run_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Wire a scheduler so the status projection can report its next fire.
    pub fn with_schedule(mut self, schedule: Arc<dyn Schedule>) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    /// Run one rotation check against the injected instant.
    ///
    /// Business conditions (nothing tagged, nothing upcoming, event not yet
    /// elapsed) come back inside the result; only collaborator faults
    /// surface as `Err`, in which case nothing was logged.
    pub async fn run_rotation(&self, now: DateTime<Utc>) -> Result<RotationResult, RotatorError> {
        let _guard = self.run_guard.lock().await;
        debug!(tag = %self.config.tag_slug, %now, "rotation check");

        let result = self.decide(now).await?;
        if result.success {
            info!(run_id = %result.run_id, action = %result.action, "{}", result.message);
        } else {
            warn!(run_id = %result.run_id, action = %result.action, "{}", result.message);
        }

        self.log.append(result.clone()).await?;
        Ok(result)
    }

    async fn decide(&self, now: DateTime<Utc>) -> Result<RotationResult, RotatorError> {
        let run_id = self.ids.run_id();
        let tag = &self.config.tag_slug;

        // Nothing carries the tag: seed it onto the next future event.
        let Some(current) = self.events.find_tagged_event(tag).await? else {
            return self.assign_fresh(run_id, now).await;
        };
        let current_ref = EventRef::from(&current);

        // Data-integrity condition, and the sole failure outcome: a tagged
        // event whose start date the store cannot produce.
        let Some(start) = self.events.start_instant(current.id).await? else {
            return Ok(RotationResult::failure(
                run_id,
                RotationAction::None,
                format!(
                    "Current tagged event \"{}\" has no start date.",
                    current.title
                ),
                now,
            )
            .with_old_event(current_ref));
        };

        // Day granularity, today inclusive: an event starting today has not
        // elapsed yet.
        let event_day = start.date_naive();
        let today = now.date_naive();
        if event_day >= today {
            return Ok(RotationResult::success(
                run_id,
                RotationAction::NoChange,
                format!(
                    "Current event \"{}\" (date: {}) has not passed yet. No rotation needed.",
                    current.title, event_day
                ),
                now,
            )
            .with_old_event(current_ref));
        }

        // Elapsed. Find a successor, or at least drop the stale marker.
        let Some(next) = self.events.find_next_future_event(now).await? else {
            let detached = self.tags.detach_tag(current.id, tag).await?;
            let result = if detached {
                RotationResult::success(
                    run_id,
                    RotationAction::RemovedOnly,
                    format!(
                        "Removed tag from past event \"{}\". No upcoming events found to assign the tag to.",
                        current.title
                    ),
                    now,
                )
            } else {
                RotationResult::failure(
                    run_id,
                    RotationAction::RemovedOnly,
                    format!(
                        "Failed to remove the \"{tag}\" tag from past event \"{}\".",
                        current.title
                    ),
                    now,
                )
            };
            return Ok(result.with_old_event(current_ref));
        };
        let next_ref = EventRef::from(&next);

        // Detach before attach, and only attach once the detach took: an
        // observer must never see the marker on two events at once.
        let detached = self.tags.detach_tag(current.id, tag).await?;
        if !detached {
            return Ok(RotationResult::failure(
                run_id,
                RotationAction::Rotated,
                format!(
                    "Tag rotation from \"{}\" to \"{}\" did not complete: detaching the old tag failed, so the new tag was not attached.",
                    current.title, next.title
                ),
                now,
            )
            .with_old_event(current_ref)
            .with_new_event(next_ref));
        }

        let attached = self.tags.attach_tag(next.id, tag).await?;
        let result = if attached {
            RotationResult::success(
                run_id,
                RotationAction::Rotated,
                format!(
                    "Rotated tag from \"{}\" to \"{}\".",
                    current.title, next.title
                ),
                now,
            )
        } else {
            RotationResult::failure(
                run_id,
                RotationAction::Rotated,
                format!(
                    "Tag rotation from \"{}\" to \"{}\" did not complete: the old tag was detached but attaching the new tag failed.",
                    current.title, next.title
                ),
                now,
            )
        };
        Ok(result.with_old_event(current_ref).with_new_event(next_ref))
    }

    /// Step for the untagged state: promote the next future event, or report
    /// that there is nothing to promote.
    async fn assign_fresh(
        &self,
        run_id: RunId,
        now: DateTime<Utc>,
    ) -> Result<RotationResult, RotatorError> {
        let tag = &self.config.tag_slug;

        let Some(next) = self.events.find_next_future_event(now).await? else {
            return Ok(RotationResult::success(
                run_id,
                RotationAction::NoEvents,
                "No upcoming events found to tag.",
                now,
            ));
        };
        let next_ref = EventRef::from(&next);

        let attached = self.tags.attach_tag(next.id, tag).await?;
        let result = if attached {
            RotationResult::success(
                run_id,
                RotationAction::Assigned,
                format!(
                    "No event had the \"{tag}\" tag. Assigned to: {}",
                    next.title
                ),
                now,
            )
        } else {
            RotationResult::failure(
                run_id,
                RotationAction::Assigned,
                format!(
                    "Failed to attach the \"{tag}\" tag to \"{}\".",
                    next.title
                ),
                now,
            )
        };
        Ok(result.with_new_event(next_ref))
    }

    /// Status projection for presentation: current marked event, the event a
    /// run would promote, tag-namespace existence, and the scheduler's next
    /// fire time.
    pub async fn status(&self, now: DateTime<Utc>) -> Result<StatusView, RotatorError> {
        let tag = &self.config.tag_slug;

        let tag_exists = self.tags.tag_exists(tag).await?;

        let current = match self.events.find_tagged_event(tag).await? {
            Some(event) => {
                let start = self.events.start_instant(event.id).await?;
                let elapsed = start
                    .map(|s| s.date_naive() < now.date_naive())
                    .unwrap_or(false);
                Some(TaggedEventStatus {
                    id: event.id,
                    title: event.title,
                    start,
                    elapsed,
                })
            }
            None => None,
        };

        let next = match self.events.find_next_future_event(now).await? {
            Some(event) => {
                let has_tag = self.tags.event_has_tag(event.id, tag).await?;
                Some(UpcomingEvent {
                    id: event.id,
                    title: event.title,
                    start: event.start,
                    has_tag,
                })
            }
            None => None,
        };

        let next_run_at = self.schedule.as_ref().and_then(|s| s.next_run_at(now));

        Ok(StatusView {
            tag_slug: tag.clone(),
            tag_exists,
            current,
            next,
            next_run_at,
        })
    }

    /// The `limit` soonest future events, each annotated with whether it
    /// already carries the marker.
    pub async fn upcoming(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<UpcomingEvent>, RotatorError> {
        let tag = &self.config.tag_slug;

        let events = self.events.list_future_events(now, limit).await?;
        let mut listing = Vec::with_capacity(events.len());
        for event in events {
            let has_tag = self.tags.event_has_tag(event.id, tag).await?;
            listing.push(UpcomingEvent {
                id: event.id,
                title: event.title,
                start: event.start,
                has_tag,
            });
        }
        Ok(listing)
    }

    /// Retained rotation outcomes, oldest first.
    pub async fn activity_log(&self) -> Result<Vec<RotationResult>, RotatorError> {
        self.log.list().await
    }

    pub async fn clear_activity_log(&self) -> Result<(), RotatorError> {
        self.log.clear().await
    }
}
