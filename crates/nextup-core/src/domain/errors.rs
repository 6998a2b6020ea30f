//! Error type for collaborator faults.
//!
//! Expected business conditions (nothing tagged, no upcoming event, elapsed
//! event with no successor) are not errors; they are reported through
//! [`RotationResult`](super::RotationResult). Only faults from collaborators
//! the engine cannot reason about surface as `Err`, so a triggering scheduler
//! can alert instead of logging a false success.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotatorError {
    #[error("event store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("tag service unavailable: {0}")]
    TagServiceUnavailable(String),

    #[error("activity log unavailable: {0}")]
    LogUnavailable(String),
}
