//! Task records: what a task is, when it was created, how it repeats,
//! and which of its occurrences have been completed.
//!
//! Whether a task is *due* or *overdue* on some date is answered by
//! [`crate::recurrence::engine`], which only ever reads a snapshot of
//! these records.

mod task;

pub use task::{Task, TaskError, TaskId};
