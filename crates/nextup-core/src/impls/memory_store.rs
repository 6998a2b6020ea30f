//! In-memory event store + tag service.
//!
//! One adapter implements both ports: tags live next to the events they are
//! attached to, exactly as they would in a host datastore. Used by the demo
//! CLI and by the engine tests; a deployment fronts a real store instead.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::domain::{Event, EventId, RotatorError, TagSlug};
use crate::ports::{EventStore, IdGenerator, TagService};

/// Seed description for one event, also the CLI fixture-file row format.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSeed {
    pub title: String,

    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    #[serde(default = "default_published")]
    pub published: bool,

    /// Attach the marker tag to this event at seed time.
    #[serde(default)]
    pub tagged: bool,
}

fn default_published() -> bool {
    true
}

struct StoredEvent {
    event: Event,
    tags: HashSet<String>,
}

struct StoreState {
    /// Insertion order doubles as the store-native tie-break.
    events: Vec<StoredEvent>,

    /// Tag namespace: every slug ever seeded or attached.
    known_tags: HashSet<String>,

    /// When set, attach/detach report `false` without touching state.
    fail_mutations: bool,
}

impl StoreState {
    fn get_mut(&mut self, id: EventId) -> Option<&mut StoredEvent> {
        self.events.iter_mut().find(|stored| stored.event.id == id)
    }

    /// Published future events, ascending by start; stable sort keeps
    /// insertion order on equal starts.
    fn future_events(&self, now: DateTime<Utc>) -> Vec<Event> {
        let mut future: Vec<&Event> = self
            .events
            .iter()
            .map(|stored| &stored.event)
            .filter(|event| event.published && event.start.is_some_and(|start| start >= now))
            .collect();
        future.sort_by_key(|event| event.start);
        future.into_iter().cloned().collect()
    }
}

/// In-memory adapter for [`EventStore`] and [`TagService`].
pub struct MemoryEventStore {
    state: Arc<Mutex<StoreState>>,
    ids: Arc<dyn IdGenerator>,
}

impl MemoryEventStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                events: Vec::new(),
                known_tags: HashSet::new(),
                fail_mutations: false,
            })),
            ids,
        }
    }

    /// Insert one event, minting its id. The marker is attached when the
    /// seed says so.
    pub async fn insert_event(&self, seed: EventSeed, marker: &TagSlug) -> EventId {
        let id = self.ids.event_id();
        let mut state = self.state.lock().await;

        let mut tags = HashSet::new();
        if seed.tagged {
            tags.insert(marker.as_str().to_string());
            state.known_tags.insert(marker.as_str().to_string());
        }

        state.events.push(StoredEvent {
            event: Event {
                id,
                title: seed.title,
                start: seed.start,
                published: seed.published,
            },
            tags,
        });
        id
    }

    /// Seed a batch in order; returns the minted ids, same order.
    pub async fn seed_events(&self, seeds: Vec<EventSeed>, marker: &TagSlug) -> Vec<EventId> {
        let mut ids = Vec::with_capacity(seeds.len());
        for seed in seeds {
            ids.push(self.insert_event(seed, marker).await);
        }
        ids
    }

    /// Make a slug known to the tag namespace without attaching it anywhere.
    pub async fn define_tag(&self, tag: &TagSlug) {
        let mut state = self.state.lock().await;
        state.known_tags.insert(tag.as_str().to_string());
    }

    /// Make subsequent attach/detach calls report `false`.
    pub async fn set_fail_mutations(&self, fail: bool) {
        let mut state = self.state.lock().await;
        state.fail_mutations = fail;
    }

    /// Ids of every event carrying `tag`, in store order.
    pub async fn tagged_event_ids(&self, tag: &TagSlug) -> Vec<EventId> {
        let state = self.state.lock().await;
        state
            .events
            .iter()
            .filter(|stored| stored.tags.contains(tag.as_str()))
            .map(|stored| stored.event.id)
            .collect()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find_tagged_event(&self, tag: &TagSlug) -> Result<Option<Event>, RotatorError> {
        let state = self.state.lock().await;

        let mut tagged: Vec<&Event> = state
            .events
            .iter()
            .filter(|stored| stored.event.published && stored.tags.contains(tag.as_str()))
            .map(|stored| &stored.event)
            .collect();

        // Earliest start first; events with no readable start order last so
        // the missing-date condition stays observable.
        tagged.sort_by(|a, b| match (a.start, b.start) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        Ok(tagged.first().map(|event| (*event).clone()))
    }

    async fn find_next_future_event(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Event>, RotatorError> {
        let state = self.state.lock().await;
        Ok(state.future_events(now).into_iter().next())
    }

    async fn list_future_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, RotatorError> {
        let state = self.state.lock().await;
        let mut future = state.future_events(now);
        future.truncate(limit);
        Ok(future)
    }

    async fn start_instant(&self, id: EventId) -> Result<Option<DateTime<Utc>>, RotatorError> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .iter()
            .find(|stored| stored.event.id == id)
            .and_then(|stored| stored.event.start))
    }
}

#[async_trait]
impl TagService for MemoryEventStore {
    async fn tag_exists(&self, tag: &TagSlug) -> Result<bool, RotatorError> {
        let state = self.state.lock().await;
        Ok(state.known_tags.contains(tag.as_str()))
    }

    async fn attach_tag(&self, event: EventId, tag: &TagSlug) -> Result<bool, RotatorError> {
        let mut state = self.state.lock().await;
        if state.fail_mutations {
            return Ok(false);
        }

        state.known_tags.insert(tag.as_str().to_string());
        match state.get_mut(event) {
            Some(stored) => {
                stored.tags.insert(tag.as_str().to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn detach_tag(&self, event: EventId, tag: &TagSlug) -> Result<bool, RotatorError> {
        let mut state = self.state.lock().await;
        if state.fail_mutations {
            return Ok(false);
        }

        match state.get_mut(event) {
            Some(stored) => {
                // Detaching an absent tag is a success, same as the host
                // stores this adapter stands in for.
                stored.tags.remove(tag.as_str());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn event_has_tag(&self, event: EventId, tag: &TagSlug) -> Result<bool, RotatorError> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .iter()
            .find(|stored| stored.event.id == event)
            .is_some_and(|stored| stored.tags.contains(tag.as_str())))
    }
}
