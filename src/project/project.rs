//! Project and project list records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ViewSettings;
use crate::task::TaskId;

/// Unique identifier for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Create a new unique project ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named collection of tasks with per-view display settings.
///
/// # Invariants
/// - `name` is non-empty
/// - `task_ids` holds no duplicates and defines the project's own
///   task ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    /// Accent color, as a CSS color string chosen in the UI
    color: String,
    task_ids: Vec<TaskId>,
    #[serde(default)]
    view_settings: ViewSettings,
}

impl Project {
    /// Create a new project.
    ///
    /// # Errors
    /// Returns `Err` if `name` is empty.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Result<Self, ProjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectError::EmptyName);
        }

        Ok(Self {
            id: ProjectId::new(),
            name,
            color: color.into(),
            task_ids: Vec::new(),
            view_settings: ViewSettings::default(),
        })
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    pub fn view_settings(&self) -> &ViewSettings {
        &self.view_settings
    }

    pub fn view_settings_mut(&mut self) -> &mut ViewSettings {
        &mut self.view_settings
    }

    /// Rename the project.
    ///
    /// # Errors
    /// Returns `Err` if `name` is empty; the project is left unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ProjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Whether `task_id` belongs to this project.
    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.task_ids.contains(&task_id)
    }

    /// Append a task to the project, ignoring duplicates.
    pub fn add_task(&mut self, task_id: TaskId) {
        if !self.task_ids.contains(&task_id) {
            self.task_ids.push(task_id);
        }
    }

    /// Detach a task from the project, including every matrix block.
    /// Returns `true` if the task was a member.
    pub fn remove_task(&mut self, task_id: TaskId) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|id| *id != task_id);
        for block in &mut self.view_settings.matrix.blocks {
            block.task_ids.retain(|id| *id != task_id);
        }
        self.task_ids.len() != before
    }
}

/// Errors that can occur during project operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("Project name cannot be empty")]
    EmptyName,
}

/// Ordered list of a user's projects, as shown in the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectList {
    id: String,
    project_ids: Vec<ProjectId>,
}

impl ProjectList {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn project_ids(&self) -> &[ProjectId] {
        &self.project_ids
    }

    /// Append a project, ignoring duplicates.
    pub fn add_project(&mut self, project_id: ProjectId) {
        if !self.project_ids.contains(&project_id) {
            self.project_ids.push(project_id);
        }
    }

    /// Remove a project. Returns `true` if it was listed.
    pub fn remove_project(&mut self, project_id: ProjectId) -> bool {
        let before = self.project_ids.len();
        self.project_ids.retain(|id| *id != project_id);
        self.project_ids.len() != before
    }
}

impl Default for ProjectList {
    fn default() -> Self {
        Self::new("default")
    }
}
