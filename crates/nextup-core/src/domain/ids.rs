//! Domain identifiers (strongly-typed ULID ids).
//!
//! Events are owned by an external store, so their ids are opaque here: we
//! never derive meaning from them beyond equality and ordering. Rotation runs
//! get an id of their own so activity-log entries stay addressable after the
//! ring evicts older neighbours.
//!
//! `Id<T>` is a phantom-typed wrapper over [`Ulid`]: one implementation, one
//! byte layout, but `EventId` and `RunId` cannot be mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for id types; supplies the Display prefix.
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic ULID-backed id.
///
/// The marker `T` costs nothing at runtime (PhantomData) and exists only so
/// distinct id types are distinct Rust types.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Marker for event ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Event {}

impl IdMarker for Event {
    fn prefix() -> &'static str {
        "event-"
    }
}

/// Marker for rotation-run ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Run {}

impl IdMarker for Run {
    fn prefix() -> &'static str {
        "run-"
    }
}

/// Identifier of an event in the external store.
pub type EventId = Id<Event>;

/// Identifier of one rotation run.
pub type RunId = Id<Run>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types_with_distinct_prefixes() {
        let ulid = Ulid::new();

        let event = EventId::from_ulid(ulid);
        let run = RunId::from_ulid(ulid);

        assert_eq!(event.as_ulid(), ulid);
        assert_eq!(run.as_ulid(), ulid);
        assert!(event.to_string().starts_with("event-"));
        assert!(run.to_string().starts_with("run-"));

        // The whole point: you can't accidentally mix these types.
        // (Compile-time property, kept as a comment.)
        // let _: EventId = run; // <- does not compile
    }

    #[test]
    fn ids_sort_by_creation_order() {
        let id1 = RunId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RunId::from_ulid(Ulid::new());

        assert!(id1 < id2);
    }

    #[test]
    fn ids_roundtrip_through_serde() {
        let id = EventId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: EventId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }

    #[test]
    fn phantom_marker_costs_nothing() {
        use std::mem::size_of;

        assert_eq!(size_of::<EventId>(), size_of::<Ulid>());
        assert_eq!(size_of::<RunId>(), size_of::<Ulid>());
    }
}
