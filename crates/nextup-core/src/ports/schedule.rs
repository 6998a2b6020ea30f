//! Schedule port - when the next automatic rotation fires.
//!
//! The scheduler is an external collaborator as far as the engine is
//! concerned: the status projection reports its next fire time, and the
//! rotation loop sleeps until it. The engine itself never schedules.

use chrono::{DateTime, Days, FixedOffset, Offset, Utc};

pub trait Schedule: Send + Sync {
    /// Next instant a rotation should run, strictly after `now`, or `None`
    /// when the schedule has nothing further to fire.
    fn next_run_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// Fires once per day at midnight in the site's local timezone.
///
/// The offset is fixed (no DST rules); a site with a UTC+2 calendar
/// constructs `DailySchedule::new(FixedOffset::east_opt(2 * 3600)?)`.
#[derive(Debug, Clone, Copy)]
pub struct DailySchedule {
    site_offset: FixedOffset,
}

impl DailySchedule {
    pub fn new(site_offset: FixedOffset) -> Self {
        Self { site_offset }
    }

    /// Schedule for a site that keeps its calendar in UTC.
    pub fn utc() -> Self {
        Self {
            site_offset: Utc.fix(),
        }
    }
}

impl Schedule for DailySchedule {
    fn next_run_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let local = now.with_timezone(&self.site_offset);
        let next_midnight = local
            .date_naive()
            .checked_add_days(Days::new(1))?
            .and_hms_opt(0, 0, 0)?
            .and_local_timezone(self.site_offset)
            .single()?;
        Some(next_midnight.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_schedule_fires_at_next_utc_midnight() {
        let schedule = DailySchedule::utc();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 15, 30, 0).unwrap();

        assert_eq!(
            schedule.next_run_at(now),
            Some(Utc.with_ymd_and_hms(2024, 6, 11, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn exactly_midnight_schedules_the_following_day() {
        let schedule = DailySchedule::utc();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();

        assert_eq!(
            schedule.next_run_at(now),
            Some(Utc.with_ymd_and_hms(2024, 6, 11, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn site_offset_shifts_the_boundary() {
        // Site at UTC+2: local midnight is 22:00 UTC the evening before.
        let schedule = DailySchedule::new(FixedOffset::east_opt(2 * 3600).unwrap());
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 15, 30, 0).unwrap();

        assert_eq!(
            schedule.next_run_at(now),
            Some(Utc.with_ymd_and_hms(2024, 6, 10, 22, 0, 0).unwrap())
        );
    }
}
