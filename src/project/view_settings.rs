//! Per-view display settings carried on each project.
//!
//! The list, matrix, and calendar views keep independent preferences;
//! the matrix view additionally owns its quadrant blocks (membership
//! only; drag mechanics are a UI concern).

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Field a task list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortParam {
    Name,
    Notes,
    CreatedDate,
}

/// Field a task list is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupParam {
    CreatedDate,
    ProjectName,
    RecurrenceKind,
}

/// Preferences shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPrefs {
    pub sort: SortParam,
    #[serde(default)]
    pub sort_desc: bool,
    #[serde(default)]
    pub group: Option<GroupParam>,
    /// Show tasks whose latest occurrence is already completed.
    #[serde(default)]
    pub show_done: bool,
    #[serde(default)]
    pub show_details: bool,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            sort: SortParam::CreatedDate,
            sort_desc: false,
            group: None,
            show_done: false,
            show_details: false,
        }
    }
}

/// One quadrant of the matrix view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

/// Matrix view settings: shared preferences plus the quadrant blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSettings {
    #[serde(default)]
    pub prefs: ViewPrefs,
    #[serde(default = "MatrixSettings::default_blocks")]
    pub blocks: Vec<MatrixBlock>,
}

impl MatrixSettings {
    /// The matrix always has four quadrants.
    fn default_blocks() -> Vec<MatrixBlock> {
        (0..4).map(|_| MatrixBlock::default()).collect()
    }
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            prefs: ViewPrefs::default(),
            blocks: Self::default_blocks(),
        }
    }
}

/// All per-view settings for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub list: ViewPrefs,
    #[serde(default)]
    pub matrix: MatrixSettings,
    #[serde(default)]
    pub calendar: ViewPrefs,
}
