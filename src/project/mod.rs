//! Project records: named, colored collections of tasks, each with its
//! own per-view display settings, plus the ordered project list shown
//! in the menu.

mod project;
mod view_settings;

pub use project::{Project, ProjectError, ProjectId, ProjectList};
pub use view_settings::{
    GroupParam, MatrixBlock, MatrixSettings, SortParam, ViewPrefs, ViewSettings,
};
