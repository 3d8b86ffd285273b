//! Recurrence rule definitions.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a task comes due.
///
/// # Invariants
/// - `EveryNumDays.interval >= 1`: a zero interval is unrepresentable,
///   and deserializing one is a hard error.
/// - `EveryDaysOfWeek.days` ⊆ `0..=6` (0 = Sunday) when built through
///   [`Recurrence::every_days_of_week`].
/// - `EveryDaysOfMonth.days` ⊆ `1..=31` when built through
///   [`Recurrence::every_days_of_month`].
///
/// Day values that arrive out of range through deserialized data are
/// tolerated rather than rejected: they match no calendar date, so the
/// rule degrades to "never due".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recurrence {
    /// Due once, from creation onward.
    Single,
    /// Due every `interval` days counted from the task's creation date.
    EveryNumDays { interval: NonZeroU32 },
    /// Due on each matching weekday (0 = Sunday .. 6 = Saturday).
    EveryDaysOfWeek { days: BTreeSet<u8> },
    /// Due on each matching day of month (1..=31). A day that does not
    /// exist in a given month is simply skipped for that month.
    EveryDaysOfMonth { days: BTreeSet<u8> },
    /// Due only on the listed dates.
    OnDates { dates: BTreeSet<NaiveDate> },
}

impl Recurrence {
    /// Build an every-N-days cadence.
    ///
    /// # Errors
    /// Returns `Err` when `interval` is zero.
    pub fn every_num_days(interval: u32) -> Result<Self, RecurrenceError> {
        let interval = NonZeroU32::new(interval).ok_or(RecurrenceError::ZeroInterval)?;
        Ok(Self::EveryNumDays { interval })
    }

    /// Build a days-of-week cadence (0 = Sunday .. 6 = Saturday).
    ///
    /// # Errors
    /// Returns `Err` when any weekday number is greater than 6.
    pub fn every_days_of_week(
        days: impl IntoIterator<Item = u8>,
    ) -> Result<Self, RecurrenceError> {
        let days: BTreeSet<u8> = days.into_iter().collect();
        if let Some(&day) = days.iter().find(|&&d| d > 6) {
            return Err(RecurrenceError::WeekdayOutOfRange { day });
        }
        Ok(Self::EveryDaysOfWeek { days })
    }

    /// Build a days-of-month cadence (1..=31).
    ///
    /// # Errors
    /// Returns `Err` when any day is zero or greater than 31.
    pub fn every_days_of_month(
        days: impl IntoIterator<Item = u8>,
    ) -> Result<Self, RecurrenceError> {
        let days: BTreeSet<u8> = days.into_iter().collect();
        if let Some(&day) = days.iter().find(|&&d| !(1..=31).contains(&d)) {
            return Err(RecurrenceError::DayOfMonthOutOfRange { day });
        }
        Ok(Self::EveryDaysOfMonth { days })
    }

    /// Build an explicit-dates cadence.
    pub fn on_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::OnDates {
            dates: dates.into_iter().collect(),
        }
    }

    /// Stable label for this rule's kind, matching the serialized tag.
    ///
    /// Used as a grouping key and in log output.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::EveryNumDays { .. } => "every_num_days",
            Self::EveryDaysOfWeek { .. } => "every_days_of_week",
            Self::EveryDaysOfMonth { .. } => "every_days_of_month",
            Self::OnDates { .. } => "on_dates",
        }
    }

    /// Whether `other` is the same kind of rule (payload ignored).
    pub fn same_kind(&self, other: &Recurrence) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind_label())
    }
}

/// Errors building a recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    #[error("Repeat interval must be at least one day")]
    ZeroInterval,

    #[error("Weekday {day} is out of range (expected 0..=6)")]
    WeekdayOutOfRange { day: u8 },

    #[error("Day of month {day} is out of range (expected 1..=31)")]
    DayOfMonthOutOfRange { day: u8 },
}
