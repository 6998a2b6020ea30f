//! In-memory activity log.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RotationResult, RotatorError};
use crate::ports::{ActivityLog, LOG_CAPACITY};

/// Ring of the most recent rotation outcomes.
///
/// Append evicts the oldest entry once the ring is full, so the log never
/// holds more than [`LOG_CAPACITY`] entries and never reorders survivors.
pub struct MemoryActivityLog {
    entries: Arc<Mutex<VecDeque<RotationResult>>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY))),
        }
    }
}

impl Default for MemoryActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityLog for MemoryActivityLog {
    async fn append(&self, entry: RotationResult) -> Result<(), RotatorError> {
        let mut entries = self.entries.lock().await;
        if entries.len() >= LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<RotationResult>, RotatorError> {
        let entries = self.entries.lock().await;
        Ok(entries.iter().cloned().collect())
    }

    async fn clear(&self) -> Result<(), RotatorError> {
        let mut entries = self.entries.lock().await;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RotationAction, RunId};
    use chrono::{TimeZone, Utc};
    use ulid::Ulid;

    fn entry(message: &str) -> RotationResult {
        RotationResult::success(
            RunId::from_ulid(Ulid::new()),
            RotationAction::NoChange,
            message,
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 5, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn lists_in_append_order() {
        let log = MemoryActivityLog::new();

        log.append(entry("first")).await.unwrap();
        log.append(entry("second")).await.unwrap();

        let entries = log.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
    }

    #[tokio::test]
    async fn twenty_first_append_evicts_the_oldest() {
        let log = MemoryActivityLog::new();

        for i in 0..LOG_CAPACITY {
            log.append(entry(&format!("entry {i}"))).await.unwrap();
        }
        log.append(entry("one more")).await.unwrap();

        let entries = log.list().await.unwrap();
        assert_eq!(entries.len(), LOG_CAPACITY);
        assert_eq!(entries[0].message, "entry 1");
        assert_eq!(entries[LOG_CAPACITY - 1].message, "one more");
    }

    #[tokio::test]
    async fn clear_empties_unconditionally() {
        let log = MemoryActivityLog::new();
        log.append(entry("kept until cleared")).await.unwrap();

        log.clear().await.unwrap();

        assert!(log.list().await.unwrap().is_empty());
    }
}
