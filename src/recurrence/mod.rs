//! Recurrence rules and their evaluation against calendar dates.
//!
//! This module is the scheduling core of the crate:
//! - [`Recurrence`] describes *when* a task repeats, as an algebraic
//!   data type with one variant per cadence.
//! - [`engine`] answers *is this task due on date D* and *is it
//!   overdue as of date D* with pure functions over immutable inputs.
//!
//! All date arithmetic is in whole calendar days (midnight to
//! midnight); wall-clock time and timezones never enter the picture.

pub mod engine;
mod rule;

pub use engine::{is_due, is_overdue, last_due_on_or_before};
pub use rule::{Recurrence, RecurrenceError};
