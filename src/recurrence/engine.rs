//! Due-date evaluation for recurring tasks.
//!
//! Pure functions over a [`Task`] snapshot and a reference date. The
//! reference date is always threaded in by the caller (today, or a
//! date the calendar view is browsing); the engine never reads the
//! clock, so every answer is deterministic and testable.
//!
//! # Invariants
//! - No mutation of the task, its rule, or its completion set.
//! - Every path terminates: the day-count cadence is solved with
//!   direct arithmetic, the day-of-month walk is bounded below by the
//!   task's creation date.
//! - Degenerate rules (empty day/date sets) are never due and always
//!   overdue, flagged for attention rather than silently dropped.

use chrono::{Datelike, Days, NaiveDate};

use crate::task::Task;

/// Whether `date` is a day on which `task` is scheduled to occur,
/// independent of completion status.
pub fn is_due(task: &Task, date: NaiveDate) -> bool {
    use crate::recurrence::Recurrence::*;

    match task.recurrence() {
        Single => true,
        EveryNumDays { interval } => {
            let diff = date
                .signed_duration_since(task.created_date())
                .num_days();
            diff % i64::from(interval.get()) == 0
        }
        EveryDaysOfWeek { days } => days.contains(&weekday_number(date)),
        EveryDaysOfMonth { days } => {
            u8::try_from(date.day()).is_ok_and(|d| days.contains(&d))
        }
        OnDates { dates } => dates.contains(&date),
    }
}

/// Whether `task` has an unmet obligation as of `date`: its most
/// recent due date on or before `date` has not been marked complete.
///
/// A singular task is overdue exactly while it has never been
/// completed, regardless of `date`. For every other kind, the absence
/// of a computable last due date (empty rule set, or `date` before the
/// first occurrence) is treated conservatively as overdue.
pub fn is_overdue(task: &Task, date: NaiveDate) -> bool {
    use crate::recurrence::Recurrence::*;

    match task.recurrence() {
        Single => task.completed_on_dates().is_empty(),
        _ => match last_due_on_or_before(task, date) {
            Some(last) => !task.completed_on_dates().contains(&last),
            None => true,
        },
    }
}

/// The most recent date on or before `date` on which `task` was due,
/// or `None` when no such date exists.
pub fn last_due_on_or_before(task: &Task, date: NaiveDate) -> Option<NaiveDate> {
    use crate::recurrence::Recurrence::*;

    match task.recurrence() {
        Single => Some(date),
        EveryNumDays { interval } => {
            let diff = date
                .signed_duration_since(task.created_date())
                .num_days();
            if diff < 0 {
                return None;
            }
            // Last cadence step at or before the reference date.
            let n = i64::from(interval.get());
            let stepped = (diff / n) * n;
            task.created_date().checked_add_days(Days::new(stepped as u64))
        }
        EveryDaysOfWeek { days } => {
            let valid: Vec<u8> = days.iter().copied().filter(|&d| d <= 6).collect();
            if valid.is_empty() {
                return None;
            }
            let weekday = weekday_number(date);
            if valid.contains(&weekday) {
                return Some(date);
            }
            // Largest scheduled weekday strictly before today's,
            // wrapping to the week's last scheduled day if none.
            let previous = valid
                .iter()
                .rev()
                .find(|&&d| d < weekday)
                .or_else(|| valid.last())
                .copied()?;
            let back =
                (i32::from(weekday) - i32::from(previous)).rem_euclid(7);
            date.checked_sub_days(Days::new(back as u64))
        }
        EveryDaysOfMonth { days } => {
            if u8::try_from(date.day()).is_ok_and(|d| days.contains(&d)) {
                return Some(date);
            }
            let days_desc: Vec<u8> = days
                .iter()
                .copied()
                .filter(|&d| (1..=31).contains(&d))
                .rev()
                .collect();
            if days_desc.is_empty() {
                return None;
            }

            let created = task.created_date();
            let mut year = date.year();
            let mut month = date.month();
            loop {
                for &day in &days_desc {
                    // Day may not exist in this month (e.g. the 31st
                    // in April, or Feb 29 outside leap years).
                    let Some(candidate) =
                        NaiveDate::from_ymd_opt(year, month, u32::from(day))
                    else {
                        continue;
                    };
                    if candidate > date {
                        continue;
                    }
                    if candidate < created {
                        // Walking backward in time: every remaining
                        // candidate is earlier still.
                        return None;
                    }
                    return Some(candidate);
                }
                if month == 1 {
                    month = 12;
                    year -= 1;
                } else {
                    month -= 1;
                }
                if (year, month) < (created.year(), created.month()) {
                    return None;
                }
            }
        }
        OnDates { dates } => dates.iter().rev().find(|&&d| d <= date).copied(),
    }
}

/// Weekday as 0 = Sunday .. 6 = Saturday, matching the stored rule
/// numbering.
fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Recurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(created: NaiveDate, recurrence: Recurrence) -> Task {
        Task::new("errand", created, recurrence).unwrap()
    }

    #[test]
    fn single_is_always_due() {
        let t = task(date(2024, 1, 1), Recurrence::Single);
        assert!(is_due(&t, date(2023, 6, 1)));
        assert!(is_due(&t, date(2024, 1, 1)));
        assert!(is_due(&t, date(2030, 12, 31)));
    }

    #[test]
    fn single_overdue_until_completed_once() {
        let mut t = task(date(2024, 1, 1), Recurrence::Single);
        assert!(is_overdue(&t, date(2024, 1, 1)));
        assert!(is_overdue(&t, date(2025, 1, 1)));

        t.mark_completed_on(date(2024, 3, 5));
        assert!(!is_overdue(&t, date(2024, 1, 1)));
        assert!(!is_overdue(&t, date(2025, 1, 1)));
    }

    #[test]
    fn every_num_days_due_on_cadence() {
        let t = task(date(2024, 1, 1), Recurrence::every_num_days(3).unwrap());
        assert!(is_due(&t, date(2024, 1, 1)));
        assert!(is_due(&t, date(2024, 1, 4)));
        assert!(is_due(&t, date(2024, 1, 7)));
        assert!(!is_due(&t, date(2024, 1, 8)));
        assert!(!is_due(&t, date(2024, 1, 9)));
        assert!(is_due(&t, date(2024, 1, 10)));
    }

    #[test]
    fn every_num_days_last_due_steps_back_to_cadence() {
        let t = task(date(2024, 1, 1), Recurrence::every_num_days(3).unwrap());
        assert_eq!(last_due_on_or_before(&t, date(2024, 1, 8)), Some(date(2024, 1, 7)));
        assert_eq!(last_due_on_or_before(&t, date(2024, 1, 7)), Some(date(2024, 1, 7)));
        assert_eq!(last_due_on_or_before(&t, date(2024, 1, 1)), Some(date(2024, 1, 1)));
    }

    #[test]
    fn every_num_days_before_creation_has_no_due_date() {
        let t = task(date(2024, 1, 10), Recurrence::every_num_days(3).unwrap());
        assert_eq!(last_due_on_or_before(&t, date(2024, 1, 7)), None);
        assert!(is_overdue(&t, date(2024, 1, 7)));
        // The raw cadence check still answers by divisibility for
        // dates before creation; callers are expected not to ask.
        assert!(is_due(&t, date(2024, 1, 7)));
        assert!(!is_due(&t, date(2024, 1, 8)));
    }

    #[test]
    fn every_num_days_crosses_month_and_year_boundaries() {
        let t = task(date(2023, 12, 30), Recurrence::every_num_days(5).unwrap());
        assert!(is_due(&t, date(2024, 1, 4)));
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 1, 8)),
            Some(date(2024, 1, 4))
        );
    }

    // 2024-01-01 was a Monday; weekday numbering is 0 = Sunday.

    #[test]
    fn days_of_week_due_only_on_matching_weekdays() {
        let t = task(
            date(2023, 12, 1),
            Recurrence::every_days_of_week([1, 3, 5]).unwrap(),
        );
        assert!(is_due(&t, date(2024, 1, 1))); // Monday
        assert!(!is_due(&t, date(2024, 1, 2))); // Tuesday
        assert!(is_due(&t, date(2024, 1, 3))); // Wednesday
        assert!(is_due(&t, date(2024, 1, 5))); // Friday
        assert!(!is_due(&t, date(2024, 1, 7))); // Sunday
    }

    #[test]
    fn days_of_week_last_due_is_preceding_match() {
        let t = task(
            date(2023, 12, 1),
            Recurrence::every_days_of_week([1, 3, 5]).unwrap(),
        );
        // A Tuesday steps back to Monday.
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 1, 2)),
            Some(date(2024, 1, 1))
        );
        // A matching day answers itself.
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 1, 3)),
            Some(date(2024, 1, 3))
        );
    }

    #[test]
    fn days_of_week_wraps_to_previous_week() {
        let t = task(
            date(2023, 12, 1),
            Recurrence::every_days_of_week([1, 3, 5]).unwrap(),
        );
        // Sunday the 7th has no earlier match that week: wrap to
        // Friday the 5th.
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 1, 7)),
            Some(date(2024, 1, 5))
        );

        // A Monday-only rule queried on a Sunday wraps a full six days.
        let mondays = task(
            date(2023, 12, 1),
            Recurrence::every_days_of_week([1]).unwrap(),
        );
        assert_eq!(
            last_due_on_or_before(&mondays, date(2024, 1, 7)),
            Some(date(2024, 1, 1))
        );
    }

    #[test]
    fn days_of_month_skips_short_months() {
        let t = task(
            date(2024, 1, 1),
            Recurrence::every_days_of_month([31]).unwrap(),
        );
        // April has 30 days: nothing due all month, last due is March 31.
        assert!(!is_due(&t, date(2024, 4, 15)));
        assert!(!is_due(&t, date(2024, 4, 30)));
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 4, 15)),
            Some(date(2024, 3, 31))
        );
        assert!(is_due(&t, date(2024, 3, 31)));
    }

    #[test]
    fn days_of_month_respects_leap_years() {
        let t = task(
            date(2022, 12, 1),
            Recurrence::every_days_of_month([29]).unwrap(),
        );
        // 2023 is not a leap year: the walk from March 1st skips
        // February entirely and lands on January 29th.
        assert_eq!(
            last_due_on_or_before(&t, date(2023, 3, 1)),
            Some(date(2023, 1, 29))
        );
        // 2024 is a leap year: February 29th exists.
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 3, 1)),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn days_of_month_multiple_days_picks_most_recent() {
        let t = task(
            date(2024, 1, 1),
            Recurrence::every_days_of_month([5, 20]).unwrap(),
        );
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 3, 12)),
            Some(date(2024, 3, 5))
        );
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 3, 25)),
            Some(date(2024, 3, 20))
        );
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 3, 20)),
            Some(date(2024, 3, 20))
        );
    }

    #[test]
    fn days_of_month_wraps_year_boundary() {
        let t = task(
            date(2023, 11, 1),
            Recurrence::every_days_of_month([15]).unwrap(),
        );
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 1, 10)),
            Some(date(2023, 12, 15))
        );
    }

    #[test]
    fn days_of_month_stops_at_creation_date() {
        // Created after the only scheduled day of its month, with no
        // reachable 31st before the query: no due date exists.
        let t = task(
            date(2024, 4, 2),
            Recurrence::every_days_of_month([31]).unwrap(),
        );
        assert_eq!(last_due_on_or_before(&t, date(2024, 4, 20)), None);
        assert!(is_overdue(&t, date(2024, 4, 20)));

        // A candidate equal to the creation date itself is valid.
        let t = task(
            date(2024, 3, 31),
            Recurrence::every_days_of_month([31]).unwrap(),
        );
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 4, 20)),
            Some(date(2024, 3, 31))
        );
    }

    #[test]
    fn on_dates_due_only_on_exact_dates() {
        let t = task(
            date(2024, 1, 1),
            Recurrence::on_dates([date(2024, 2, 10), date(2024, 5, 1)]),
        );
        assert!(is_due(&t, date(2024, 2, 10)));
        assert!(is_due(&t, date(2024, 5, 1)));
        assert!(!is_due(&t, date(2024, 2, 11)));
    }

    #[test]
    fn on_dates_last_due_ignores_future_dates() {
        let t = task(
            date(2024, 1, 1),
            Recurrence::on_dates([date(2024, 2, 10), date(2024, 5, 1)]),
        );
        assert_eq!(
            last_due_on_or_before(&t, date(2024, 3, 1)),
            Some(date(2024, 2, 10))
        );
        // Nothing at or before the query date: no due date, not the
        // earliest future one.
        assert_eq!(last_due_on_or_before(&t, date(2024, 1, 15)), None);
        assert!(is_overdue(&t, date(2024, 1, 15)));
    }

    #[test]
    fn empty_rule_sets_are_never_due_and_always_overdue() {
        let rules = [
            Recurrence::every_days_of_week([]).unwrap(),
            Recurrence::every_days_of_month([]).unwrap(),
            Recurrence::on_dates([]),
        ];
        for rule in rules {
            let t = task(date(2024, 1, 1), rule);
            for offset in 0..30 {
                let d = date(2024, 1, 1) + Days::new(offset);
                assert!(!is_due(&t, d));
                assert!(is_overdue(&t, d));
                assert_eq!(last_due_on_or_before(&t, d), None);
            }
        }
    }

    #[test]
    fn overdue_tracks_most_recent_due_date_only() {
        let mut t = task(date(2024, 1, 1), Recurrence::every_num_days(3).unwrap());

        // Completing an older occurrence does not settle the latest one.
        t.mark_completed_on(date(2024, 1, 4));
        assert!(is_overdue(&t, date(2024, 1, 8))); // last due = Jan 7

        t.mark_completed_on(date(2024, 1, 7));
        assert!(!is_overdue(&t, date(2024, 1, 8)));
        assert!(!is_overdue(&t, date(2024, 1, 9)));

        // The next occurrence reopens the obligation.
        assert!(is_overdue(&t, date(2024, 1, 10)));
    }

    #[test]
    fn overdue_weekday_rule_checks_preceding_match() {
        let mut t = task(
            date(2023, 12, 1),
            Recurrence::every_days_of_week([1, 3, 5]).unwrap(),
        );
        // Tuesday: the obligation is Monday's.
        assert!(is_overdue(&t, date(2024, 1, 2)));
        t.mark_completed_on(date(2024, 1, 1));
        assert!(!is_overdue(&t, date(2024, 1, 2)));
        // Wednesday opens a new one.
        assert!(is_overdue(&t, date(2024, 1, 3)));
    }

    #[test]
    fn last_due_round_trip_is_due_with_no_later_match() {
        let rules = [
            Recurrence::every_num_days(4).unwrap(),
            Recurrence::every_days_of_week([2, 6]).unwrap(),
            Recurrence::every_days_of_month([1, 15, 31]).unwrap(),
            Recurrence::on_dates([date(2024, 1, 20), date(2024, 3, 3)]),
        ];
        let created = date(2024, 1, 1);
        for rule in rules {
            let t = task(created, rule);
            for offset in 0..120 {
                let query = created + Days::new(offset);
                let Some(last) = last_due_on_or_before(&t, query) else {
                    continue;
                };
                assert!(last <= query);
                assert!(is_due(&t, last), "last due date must itself be due");
                let mut between = last + Days::new(1);
                while between < query {
                    assert!(
                        !is_due(&t, between),
                        "no due date may fall strictly between {last} and {query}"
                    );
                    between = between + Days::new(1);
                }
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let t = task(
            date(2024, 1, 1),
            Recurrence::every_days_of_month([15]).unwrap(),
        );
        let query = date(2024, 2, 20);
        assert_eq!(is_due(&t, query), is_due(&t, query));
        assert_eq!(is_overdue(&t, query), is_overdue(&t, query));
        assert_eq!(
            last_due_on_or_before(&t, query),
            last_due_on_or_before(&t, query)
        );
    }
}
