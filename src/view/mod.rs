//! Display-side helpers shared by the list, matrix, and calendar
//! views: sorting, grouping, the show-done visibility rule, and
//! per-date due lookup.
//!
//! Everything here is pure over record slices; the views call these
//! per render with a reference date from the caller's clock.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::project::{GroupParam, Project, SortParam};
use crate::recurrence::engine;
use crate::task::{Task, TaskId};

/// Sort tasks in place by the chosen field.
pub fn sort_tasks(tasks: &mut [Task], sort: SortParam, descending: bool) {
    tasks.sort_by(|a, b| {
        let ordering = match sort {
            SortParam::Name => a.name().cmp(b.name()),
            SortParam::Notes => a.notes().cmp(b.notes()),
            SortParam::CreatedDate => a.created_date().cmp(&b.created_date()),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Group tasks by the chosen parameter.
///
/// Group keys are the formatted creation date, the owning project's
/// name, or the recurrence kind label. A task owned by no project
/// falls back to its creation date under `ProjectName`.
pub fn group_tasks(
    tasks: &[Task],
    group: GroupParam,
    projects: &[Project],
) -> BTreeMap<String, Vec<Task>> {
    let mut grouped: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        let key = match group {
            GroupParam::CreatedDate => task.created_date().to_string(),
            GroupParam::RecurrenceKind => task.recurrence().kind_label().to_string(),
            GroupParam::ProjectName => projects
                .iter()
                .find(|project| project.contains_task(task.id()))
                .map(|project| project.name().to_string())
                .unwrap_or_else(|| task.created_date().to_string()),
        };
        grouped.entry(key).or_default().push(task.clone());
    }
    grouped
}

/// Apply [`sort_tasks`] within every group.
pub fn sort_task_groups(
    groups: &mut BTreeMap<String, Vec<Task>>,
    sort: SortParam,
    descending: bool,
) {
    for tasks in groups.values_mut() {
        sort_tasks(tasks, sort, descending);
    }
}

/// IDs of the tasks due on `date`, for the calendar view's day cells.
pub fn due_task_ids(tasks: &[Task], date: NaiveDate) -> Vec<TaskId> {
    tasks
        .iter()
        .filter(|task| engine::is_due(task, date))
        .map(|task| task.id())
        .collect()
}

/// The visibility rule shared by all three views: a task is shown when
/// done tasks are shown, or when it is still overdue as of `today`.
pub fn is_visible(task: &Task, show_done: bool, today: NaiveDate) -> bool {
    show_done || engine::is_overdue(task, today)
}
