//! nextup-core
//!
//! Rotates a "next event" marker tag across a calendar of dated items: when
//! the marked event's day has passed, the marker moves to the nearest future
//! event. Runs are triggered daily or on demand, and every outcome lands in
//! a bounded activity log.
//!
//! Module map:
//! - **domain**: value objects (ids, events, tag slug, action kinds, results,
//!   errors, config)
//! - **ports**: collaborator seams (EventStore, TagService, ActivityLog,
//!   Clock, Schedule, IdGenerator)
//! - **engine**: the rotation decision procedure and its status/listing
//!   read models
//! - **impls**: in-memory adapters for demo and test wiring
//! - **app**: the background daily rotation loop
//!
//! The engine owns no store and reads no live clock; everything external
//! comes in through the ports, so the decision logic is testable against
//! fixed instants and fixture events.

pub mod app;
pub mod domain;
pub mod engine;
pub mod impls;
pub mod ports;

pub use domain::{
    DEFAULT_TAG_SLUG, DEFAULT_UPCOMING_LIMIT, Event, EventId, EventRef, RotationAction,
    RotationResult, RotatorConfig, RotatorError, RunId, TagSlug,
};
pub use engine::{Rotator, StatusView, TaggedEventStatus, UpcomingEvent};
