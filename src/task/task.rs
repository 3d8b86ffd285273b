//! Core Task type.
//!
//! # Invariants
//! - `name` is non-empty
//! - `completed_on_dates` only ever grows or shrinks through the
//!   explicit completion methods; the recurrence engine never writes it

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::{engine, Recurrence};

/// Unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Create a new unique task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task with a recurrence rule and completion history.
///
/// # Invariants
/// - `name` is non-empty (enforced in `new` and `set_name`)
/// - `created_date` is the earliest date the recurrence rule applies
///   from; due dates before it are never reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task
    id: TaskId,

    /// Short human-readable name
    name: String,

    /// Free-form notes
    #[serde(default)]
    notes: String,

    /// Calendar date the task was created on
    created_date: NaiveDate,

    /// When the task repeats
    recurrence: Recurrence,

    /// Dates on which the task was marked complete
    #[serde(default)]
    completed_on_dates: BTreeSet<NaiveDate>,

    /// Per-task override for the views' show-details toggle
    #[serde(default)]
    show_details_override: bool,
}

impl Task {
    /// Create a new task.
    ///
    /// # Errors
    /// Returns `Err` if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        created_date: NaiveDate,
        recurrence: Recurrence,
    ) -> Result<Self, TaskError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }

        Ok(Self {
            id: TaskId::new(),
            name,
            notes: String::new(),
            created_date,
            recurrence,
            completed_on_dates: BTreeSet::new(),
            show_details_override: false,
        })
    }

    // Getters

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_date(&self) -> NaiveDate {
        self.created_date
    }

    pub fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    pub fn completed_on_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.completed_on_dates
    }

    pub fn show_details_override(&self) -> bool {
        self.show_details_override
    }

    // Mutations

    /// Rename the task.
    ///
    /// # Errors
    /// Returns `Err` if `name` is empty; the task is left unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TaskError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_show_details_override(&mut self, value: bool) {
        self.show_details_override = value;
    }

    /// Replace the recurrence rule.
    ///
    /// Switching to a different *kind* of rule clears the completion
    /// history: the old dates are meaningless under the new cadence.
    /// Re-saving with the same kind (e.g. changing which weekdays)
    /// preserves it.
    pub fn set_recurrence(&mut self, recurrence: Recurrence) {
        if !self.recurrence.same_kind(&recurrence) {
            self.completed_on_dates.clear();
        }
        self.recurrence = recurrence;
    }

    /// Record `date` as completed. Returns `false` if it already was.
    pub fn mark_completed_on(&mut self, date: NaiveDate) -> bool {
        self.completed_on_dates.insert(date)
    }

    /// Remove `date` from the completion history. Returns `false` if
    /// it was not recorded.
    pub fn clear_completed_on(&mut self, date: NaiveDate) -> bool {
        self.completed_on_dates.remove(&date)
    }

    /// Flip the completion state of `date` (the checkbox action).
    pub fn toggle_completed_on(&mut self, date: NaiveDate) {
        if !self.completed_on_dates.insert(date) {
            self.completed_on_dates.remove(&date);
        }
    }

    // Schedule queries, delegating to the recurrence engine

    /// Whether this task is scheduled to occur on `date`.
    pub fn is_due(&self, date: NaiveDate) -> bool {
        engine::is_due(self, date)
    }

    /// Whether this task's most recent occurrence at or before `date`
    /// is still outstanding.
    pub fn is_overdue(&self, date: NaiveDate) -> bool {
        engine::is_overdue(self, date)
    }
}

/// Errors that can occur during task operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Task name cannot be empty")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_empty_name() {
        assert_eq!(
            Task::new("", date(2024, 1, 1), Recurrence::Single).unwrap_err(),
            TaskError::EmptyName
        );
        assert_eq!(
            Task::new("   ", date(2024, 1, 1), Recurrence::Single).unwrap_err(),
            TaskError::EmptyName
        );
    }

    #[test]
    fn toggle_completed_flips_membership() {
        let mut task = Task::new("water plants", date(2024, 1, 1), Recurrence::Single).unwrap();
        let d = date(2024, 1, 5);

        task.toggle_completed_on(d);
        assert!(task.completed_on_dates().contains(&d));
        task.toggle_completed_on(d);
        assert!(!task.completed_on_dates().contains(&d));
    }

    #[test]
    fn changing_rule_kind_clears_completions() {
        let mut task = Task::new(
            "gym",
            date(2024, 1, 1),
            Recurrence::every_days_of_week([1, 4]).unwrap(),
        )
        .unwrap();
        task.mark_completed_on(date(2024, 1, 1));

        // Same kind, different payload: history survives.
        task.set_recurrence(Recurrence::every_days_of_week([2, 5]).unwrap());
        assert_eq!(task.completed_on_dates().len(), 1);

        // Different kind: history is wiped.
        task.set_recurrence(Recurrence::every_num_days(2).unwrap());
        assert!(task.completed_on_dates().is_empty());
    }

    #[test]
    fn task_serde_round_trip() {
        let mut task = Task::new(
            "water plants",
            date(2024, 1, 1),
            Recurrence::every_num_days(3).unwrap(),
        )
        .unwrap();
        task.set_notes("back porch too");
        task.mark_completed_on(date(2024, 1, 4));

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }
}
