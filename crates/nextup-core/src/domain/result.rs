//! Rotation result: the value object every run produces.
//!
//! One `RotationResult` is built per invocation of the rotation procedure,
//! appended to the activity log, and handed back to the caller. It is
//! immutable once built; the `with_*` methods are construction-time builders,
//! not mutators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventRef, RotationAction, RunId};

/// Outcome of one rotation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationResult {
    pub run_id: RunId,

    /// False only for the data-integrity failure (missing start date) and for
    /// runs where a tag mutation reported it did not complete.
    pub success: bool,

    pub action: RotationAction,

    /// Operator-facing explanation of what happened.
    pub message: String,

    /// Event that carried the marker when the run started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_event: Option<EventRef>,

    /// Event that carries the marker after the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_event: Option<EventRef>,

    /// The injected "now" of the run.
    pub timestamp: DateTime<Utc>,
}

impl RotationResult {
    pub fn success(
        run_id: RunId,
        action: RotationAction,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            success: true,
            action,
            message: message.into(),
            old_event: None,
            new_event: None,
            timestamp: at,
        }
    }

    pub fn failure(
        run_id: RunId,
        action: RotationAction,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            success: false,
            ..Self::success(run_id, action, message, at)
        }
    }

    pub fn with_old_event(mut self, event: EventRef) -> Self {
        self.old_event = Some(event);
        self
    }

    pub fn with_new_event(mut self, event: EventRef) -> Self {
        self.new_event = Some(event);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventId;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 0, 5, 0).unwrap()
    }

    #[test]
    fn builders_populate_event_refs() {
        let old = EventRef {
            id: EventId::from_ulid(Ulid::new()),
            title: "Spring tasting".to_string(),
        };
        let new = EventRef {
            id: EventId::from_ulid(Ulid::new()),
            title: "Summer tasting".to_string(),
        };

        let result = RotationResult::success(
            RunId::from_ulid(Ulid::new()),
            RotationAction::Rotated,
            "Rotated tag from \"Spring tasting\" to \"Summer tasting\".",
            at(),
        )
        .with_old_event(old.clone())
        .with_new_event(new.clone());

        assert!(result.success);
        assert_eq!(result.old_event, Some(old));
        assert_eq!(result.new_event, Some(new));
    }

    #[test]
    fn failure_flips_only_the_success_flag() {
        let result = RotationResult::failure(
            RunId::from_ulid(Ulid::new()),
            RotationAction::None,
            "Current tagged event \"X\" has no start date.",
            at(),
        );

        assert!(!result.success);
        assert_eq!(result.action, RotationAction::None);
        assert_eq!(result.timestamp, at());
    }

    #[test]
    fn absent_event_refs_are_not_serialized() {
        let result = RotationResult::success(
            RunId::from_ulid(Ulid::new()),
            RotationAction::NoEvents,
            "No upcoming events found to tag.",
            at(),
        );

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("old_event").is_none());
        assert!(value.get("new_event").is_none());
        assert_eq!(value["action"], "no_events");
    }

    #[test]
    fn roundtrips_through_serde() {
        let result = RotationResult::success(
            RunId::from_ulid(Ulid::new()),
            RotationAction::Assigned,
            "No event had the \"next-event\" tag. Assigned to: Summer tasting",
            at(),
        )
        .with_new_event(EventRef {
            id: EventId::from_ulid(Ulid::new()),
            title: "Summer tasting".to_string(),
        });

        let serialized = serde_json::to_string(&result).unwrap();
        let back: RotationResult = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back, result);
    }
}
