//! ActivityLog port - bounded append-only record of rotation outcomes.

use async_trait::async_trait;

use crate::domain::{RotationResult, RotatorError};

/// Most recent entries an adapter retains; appending beyond this evicts the
/// oldest entry first.
pub const LOG_CAPACITY: usize = 20;

/// Append-only outcome log, capped at [`LOG_CAPACITY`] entries.
///
/// Every rotation run appends exactly one entry, no-op runs included. The
/// log is durable process-wide state: it survives across runs and is only
/// emptied by an explicit operator `clear`.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn append(&self, entry: RotationResult) -> Result<(), RotatorError>;

    /// All retained entries, oldest first.
    async fn list(&self) -> Result<Vec<RotationResult>, RotatorError>;

    async fn clear(&self) -> Result<(), RotatorError>;
}
