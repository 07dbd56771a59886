//! Overlap rule for schedules of one user on one date.
//!
//! Slots are half-open `[start, end)`: a slot ending at 10:00 and another
//! starting at 10:00 do not overlap.

use chrono::NaiveTime;
use uuid::Uuid;

use crate::contract::model::Schedule;

pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && a_end > b_start
}

/// First schedule in `existing` overlapping `[start, end)`, skipping `exclude`.
pub fn find_conflict<'a>(
    existing: &'a [Schedule],
    start: NaiveTime,
    end: NaiveTime,
    exclude: Option<Uuid>,
) -> Option<&'a Schedule> {
    existing
        .iter()
        .filter(|s| Some(s.id) != exclude)
        .find(|s| overlaps(s.start_time, s.end_time, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sched(start: NaiveTime, end: NaiveTime) -> Schedule {
        let now = Utc::now();
        Schedule {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            category_id: None,
            title: "x".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start_time: start,
            end_time: end,
            color: None,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn touching_slots_do_not_conflict() {
        let day = vec![sched(t(9, 0), t(10, 0))];
        assert!(find_conflict(&day, t(10, 0), t(11, 0), None).is_none());
        assert!(find_conflict(&day, t(8, 0), t(9, 0), None).is_none());
    }

    #[test]
    fn partial_and_enclosing_overlaps_conflict() {
        let day = vec![sched(t(9, 0), t(10, 0))];
        assert!(find_conflict(&day, t(9, 30), t(10, 30), None).is_some());
        assert!(find_conflict(&day, t(8, 30), t(9, 5), None).is_some());
        assert!(find_conflict(&day, t(8, 0), t(12, 0), None).is_some());
        assert!(find_conflict(&day, t(9, 15), t(9, 45), None).is_some());
    }

    #[test]
    fn excluded_schedule_is_ignored() {
        let day = vec![sched(t(9, 0), t(10, 0)), sched(t(12, 0), t(13, 0))];
        let own = day[0].id;
        assert!(find_conflict(&day, t(9, 30), t(10, 30), Some(own)).is_none());

        let hit = find_conflict(&day, t(9, 30), t(12, 30), Some(own)).unwrap();
        assert_eq!(hit.id, day[1].id);
    }
}
