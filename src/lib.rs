//! # routinely
//!
//! Personal task manager core: projects, recurring tasks, and
//! due-date evaluation.
//!
//! This library provides:
//! - Task and project records with per-view display settings
//! - A recurrence engine answering "due on date D?" and "overdue as
//!   of date D?" for five cadence kinds
//! - A key-value preference store with file-backed and in-memory
//!   backends, and the shared data store loaded from it
//!
//! ## Evaluation Flow
//! 1. Views read record snapshots from the [`store::DataStore`]
//! 2. Each render threads a reference date (today, or a browsed
//!    calendar date) into [`recurrence::engine`]
//! 3. The engine answers with plain booleans; it never touches
//!    storage, the clock, or view state
//!
//! ## Modules
//! - `recurrence`: rule types and the evaluation engine
//! - `task` / `project`: the plain data records
//! - `store`: persistence shim and the shared data store
//! - `view`: sorting, grouping, and visibility helpers

pub mod config;
pub mod project;
pub mod recurrence;
pub mod store;
pub mod task;
pub mod util;
pub mod view;

pub use config::Config;
pub use project::{Project, ProjectId, ProjectList};
pub use recurrence::{is_due, is_overdue, last_due_on_or_before, Recurrence, RecurrenceError};
pub use store::DataStore;
pub use task::{Task, TaskError, TaskId};
