//! Action kinds: the enumerated outcome of a rotation run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a rotation run did (or declined to do).
///
/// Serialized snake_case to match the operational vocabulary used in log
/// entries and status displays: `assigned`, `no_change`, `rotated`,
/// `removed_only`, `no_events`, `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationAction {
    /// Nothing carried the marker; it was attached to the next future event.
    Assigned,

    /// The marked event has not started yet (today counts as not started).
    NoChange,

    /// The marker moved from an elapsed event to the next future event.
    Rotated,

    /// The marker was detached from an elapsed event; no successor existed.
    RemovedOnly,

    /// Nothing carried the marker and nothing upcoming could receive it.
    NoEvents,

    /// No decision applied; the sole producer is the missing-start-date
    /// failure on the currently marked event.
    None,
}

impl RotationAction {
    /// Did this run attach or detach the marker tag?
    pub fn mutates_tags(self) -> bool {
        matches!(
            self,
            RotationAction::Assigned | RotationAction::Rotated | RotationAction::RemovedOnly
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationAction::Assigned => "assigned",
            RotationAction::NoChange => "no_change",
            RotationAction::Rotated => "rotated",
            RotationAction::RemovedOnly => "removed_only",
            RotationAction::NoEvents => "no_events",
            RotationAction::None => "none",
        }
    }
}

impl fmt::Display for RotationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RotationAction::Assigned, "assigned")]
    #[case(RotationAction::NoChange, "no_change")]
    #[case(RotationAction::Rotated, "rotated")]
    #[case(RotationAction::RemovedOnly, "removed_only")]
    #[case(RotationAction::NoEvents, "no_events")]
    #[case(RotationAction::None, "none")]
    fn serializes_snake_case(#[case] action: RotationAction, #[case] expected: &str) {
        let serialized = serde_json::to_string(&action).unwrap();
        assert_eq!(serialized, format!("\"{expected}\""));
        assert_eq!(action.as_str(), expected);
    }

    #[test]
    fn only_the_mutating_kinds_mutate() {
        assert!(RotationAction::Assigned.mutates_tags());
        assert!(RotationAction::Rotated.mutates_tags());
        assert!(RotationAction::RemovedOnly.mutates_tags());
        assert!(!RotationAction::NoChange.mutates_tags());
        assert!(!RotationAction::NoEvents.mutates_tags());
        assert!(!RotationAction::None.mutates_tags());
    }
}
