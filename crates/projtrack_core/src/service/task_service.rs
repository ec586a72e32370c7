//! Task tree use-case service.
//!
//! # Responsibility
//! - Provide create/list/update/delete/progress entry points for tasks.
//! - Enforce the two-level nesting limit the schema leaves unchecked.
//!
//! # Invariants
//! - A subtask never owns subtasks; creation under a subtask is rejected.
//! - Status strings are parsed here; the repository only sees valid values.
//! - An empty name no-ops creation and field updates silently.

use crate::model::project::ProjectId;
use crate::model::task::{progress_percent, Task, TaskId, TaskStatus};
use crate::repo::task_repo::{NewTask, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Status string is outside the closed pending/in_progress/completed set.
    InvalidStatus(String),
    /// Creation target is already a subtask; nesting stops at two levels.
    SubtaskDepthExceeded(TaskId),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(value) => write!(f, "invalid task status: `{value}`"),
            Self::SubtaskDepthExceeded(id) => {
                write!(f, "task {id} is a subtask and cannot own subtasks")
            }
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "task", id } => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Task tree facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task or subtask from form input.
    ///
    /// Returns `Ok(None)` without touching the store when the name is empty
    /// or the project id is missing. A parent id of zero or less is
    /// normalized to "no parent". Creating under a subtask is rejected.
    pub fn create_task(
        &self,
        project_id: ProjectId,
        parent_task_id: Option<TaskId>,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<TaskId>, TaskServiceError> {
        let name = name.trim();
        if name.is_empty() || project_id <= 0 {
            return Ok(None);
        }

        let parent_task_id = parent_task_id.filter(|&parent| parent > 0);
        if let Some(parent) = parent_task_id {
            let parent_task = self
                .repo
                .get_task(parent)?
                .ok_or(TaskServiceError::TaskNotFound(parent))?;
            if !parent_task.is_top_level() {
                return Err(TaskServiceError::SubtaskDepthExceeded(parent));
            }
        }

        let task = NewTask {
            project_id,
            parent_task_id,
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        let id = self.repo.create_task(&task)?;
        Ok(Some(id))
    }

    /// Gets one task by id.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.repo.get_task(id)?)
    }

    /// Top-level tasks for a project: open work first, then by recency.
    pub fn list_top_level(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.repo.list_top_level(project_id)
    }

    /// Subtasks of a task, most recently created first.
    pub fn list_subtasks(&self, parent_id: TaskId) -> RepoResult<Vec<Task>> {
        self.repo.list_subtasks(parent_id)
    }

    /// Subtask-derived progress percentage.
    ///
    /// `None` when the task has no subtasks (no progress bar is shown);
    /// otherwise the truncated mean of pending=0 / in_progress=50 /
    /// completed=100 scores.
    pub fn progress(&self, id: TaskId) -> Result<Option<u32>, TaskServiceError> {
        let statuses = self.repo.subtask_statuses(id)?;
        Ok(progress_percent(&statuses))
    }

    /// Overwrites name/description.
    ///
    /// Returns `Ok(false)` without touching the store when the name is empty.
    pub fn update_fields(
        &self,
        id: TaskId,
        name: &str,
        description: Option<&str>,
    ) -> Result<bool, TaskServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        self.repo.update_fields(id, name, description)?;
        Ok(true)
    }

    /// Updates the lifecycle status from its wire representation.
    ///
    /// Rejects anything outside the closed status set with an explicit
    /// error; the JSON surface maps it to a failure flag.
    pub fn update_status(&self, id: TaskId, status: &str) -> Result<(), TaskServiceError> {
        let status = TaskStatus::parse(status)
            .ok_or_else(|| TaskServiceError::InvalidStatus(status.to_string()))?;
        self.repo.update_status(id, status)?;
        Ok(())
    }

    /// Deletes a task; the store cascades the removal to its subtasks.
    ///
    /// Returns the owning project id so the caller can redirect. Comments on
    /// the task and its subtasks are left dangling in the comment log.
    pub fn delete_task(&self, id: TaskId) -> Result<ProjectId, TaskServiceError> {
        Ok(self.repo.delete_task(id)?)
    }
}
