//! The shared data store.
//!
//! One `DataStore` holds the loaded project list, projects, and tasks
//! behind `RwLock`s, and writes every mutation back through its
//! preference backend. It is the single source of truth the views
//! read from, mirroring the app's shared context.
//!
//! Load failures degrade to empty data with a warning: this state
//! feeds straight into rendering, and a corrupt snapshot must not take
//! the whole app down.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, warn};

use super::preferences::{PreferenceBackend, PreferenceKey};
use crate::project::{Project, ProjectId, ProjectList};
use crate::task::{Task, TaskId};

pub struct DataStore {
    backend: Arc<dyn PreferenceBackend>,
    project_list: RwLock<ProjectList>,
    projects: RwLock<Vec<Project>>,
    tasks: RwLock<Vec<Task>>,
    current_tab: RwLock<Option<String>>,
    current_project_id: RwLock<Option<String>>,
}

impl DataStore {
    /// Load all records from the backend.
    ///
    /// Missing slots start empty; unreadable slots are logged and
    /// start empty as well.
    pub async fn load(backend: Arc<dyn PreferenceBackend>) -> Self {
        let project_list = Self::load_slot(&*backend, PreferenceKey::ProjectList)
            .await
            .unwrap_or_default();
        let projects: Vec<Project> = Self::load_slot(&*backend, PreferenceKey::Projects)
            .await
            .unwrap_or_default();
        let tasks: Vec<Task> = Self::load_slot(&*backend, PreferenceKey::Tasks)
            .await
            .unwrap_or_default();

        let current_tab = Self::load_raw(&*backend, PreferenceKey::CurrentTab).await;
        let current_project_id =
            Self::load_raw(&*backend, PreferenceKey::CurrentProjectId).await;

        Self {
            backend,
            project_list: RwLock::new(project_list),
            projects: RwLock::new(projects),
            tasks: RwLock::new(tasks),
            current_tab: RwLock::new(current_tab),
            current_project_id: RwLock::new(current_project_id),
        }
    }

    async fn load_slot<T: DeserializeOwned>(
        backend: &dyn PreferenceBackend,
        key: PreferenceKey,
    ) -> Option<T> {
        let raw = match backend.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read {}: {}, starting empty", key.as_str(), e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to parse {}: {}, starting empty", key.as_str(), e);
                None
            }
        }
    }

    async fn load_raw(backend: &dyn PreferenceBackend, key: PreferenceKey) -> Option<String> {
        match backend.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read {}: {}", key.as_str(), e);
                None
            }
        }
    }

    async fn persist<T: Serialize>(&self, key: PreferenceKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(e) = self.backend.set(key, json).await {
                    error!("Failed to persist {}: {}", key.as_str(), e);
                }
            }
            Err(e) => error!("Failed to serialize {}: {}", key.as_str(), e),
        }
    }

    async fn persist_project_list(&self) {
        let list = self.project_list.read().await.clone();
        self.persist(PreferenceKey::ProjectList, &list).await;
    }

    async fn persist_projects(&self) {
        let projects = self.projects.read().await.clone();
        self.persist(PreferenceKey::Projects, &projects).await;
    }

    async fn persist_tasks(&self) {
        let tasks = self.tasks.read().await.clone();
        self.persist(PreferenceKey::Tasks, &tasks).await;
    }

    // Lookups

    pub async fn project_list(&self) -> ProjectList {
        self.project_list.read().await.clone()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.projects.read().await.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id() == id)
            .cloned()
    }

    pub async fn task(&self, id: TaskId) -> Option<Task> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|t| t.id() == id)
            .cloned()
    }

    /// Tasks belonging to a project, in the project's own order.
    pub async fn tasks_for_project(&self, id: ProjectId) -> Vec<Task> {
        let Some(project) = self.project(id).await else {
            return Vec::new();
        };
        let tasks = self.tasks.read().await;
        project
            .task_ids()
            .iter()
            .filter_map(|task_id| tasks.iter().find(|t| t.id() == *task_id).cloned())
            .collect()
    }

    // Mutations, each written back through the backend

    /// Insert or replace a task by id.
    pub async fn upsert_task(&self, task: Task) {
        {
            let mut tasks = self.tasks.write().await;
            match tasks.iter_mut().find(|t| t.id() == task.id()) {
                Some(existing) => *existing = task,
                None => tasks.push(task),
            }
        }
        self.persist_tasks().await;
    }

    /// Delete a task and detach its id from every project and matrix
    /// block. Returns `false` if the task was unknown.
    pub async fn delete_task(&self, id: TaskId) -> bool {
        let existed = {
            let mut tasks = self.tasks.write().await;
            let before = tasks.len();
            tasks.retain(|t| t.id() != id);
            tasks.len() != before
        };
        if !existed {
            return false;
        }

        let detached = {
            let mut projects = self.projects.write().await;
            let mut any = false;
            for project in projects.iter_mut() {
                any |= project.remove_task(id);
            }
            any
        };

        self.persist_tasks().await;
        if detached {
            self.persist_projects().await;
        }
        true
    }

    /// Insert or replace a project by id, listing it in the project
    /// list if it is new there.
    pub async fn upsert_project(&self, project: Project) {
        let id = project.id();
        {
            let mut projects = self.projects.write().await;
            match projects.iter_mut().find(|p| p.id() == id) {
                Some(existing) => *existing = project,
                None => projects.push(project),
            }
        }
        {
            let mut list = self.project_list.write().await;
            list.add_project(id);
        }
        self.persist_projects().await;
        self.persist_project_list().await;
    }

    /// Delete a project, its list entry, and every task it owns.
    /// Returns `false` if the project was unknown.
    pub async fn delete_project(&self, id: ProjectId) -> bool {
        let owned: Vec<TaskId> = {
            let mut projects = self.projects.write().await;
            let Some(index) = projects.iter().position(|p| p.id() == id) else {
                return false;
            };
            projects.remove(index).task_ids().to_vec()
        };

        {
            let mut list = self.project_list.write().await;
            list.remove_project(id);
        }
        {
            let mut tasks = self.tasks.write().await;
            tasks.retain(|t| !owned.contains(&t.id()));
        }

        self.persist_projects().await;
        self.persist_project_list().await;
        self.persist_tasks().await;
        true
    }

    pub async fn set_project_list(&self, list: ProjectList) {
        *self.project_list.write().await = list;
        self.persist_project_list().await;
    }

    // Selection, restored across launches

    pub async fn current_tab(&self) -> Option<String> {
        self.current_tab.read().await.clone()
    }

    pub async fn set_current_tab(&self, tab: impl Into<String>) {
        let tab = tab.into();
        *self.current_tab.write().await = Some(tab.clone());
        if let Err(e) = self.backend.set(PreferenceKey::CurrentTab, tab).await {
            error!("Failed to persist current tab: {}", e);
        }
    }

    pub async fn current_project_id(&self) -> Option<String> {
        self.current_project_id.read().await.clone()
    }

    pub async fn set_current_project_id(&self, id: impl Into<String>) {
        let id = id.into();
        *self.current_project_id.write().await = Some(id.clone());
        if let Err(e) = self
            .backend
            .set(PreferenceKey::CurrentProjectId, id)
            .await
        {
            error!("Failed to persist current project id: {}", e);
        }
    }
}
