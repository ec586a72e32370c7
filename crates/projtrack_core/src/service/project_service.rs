//! Project directory use-case service.
//!
//! # Responsibility
//! - Provide create/list/update/delete/aggregation entry points for projects.
//! - Apply form-submission semantics: missing required fields no-op silently.
//!
//! # Invariants
//! - An empty (or whitespace-only) name never reaches the repository.
//! - A project owning at least one task is never deleted.
//! - Icon bytes are base64-encoded exactly once, here.

use crate::model::project::{Project, ProjectId, TaskStatusCounts};
use crate::repo::project_repo::{NewProject, ProjectRepository};
use crate::repo::{RepoError, RepoResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Project directory facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a project from form input.
    ///
    /// Returns `Ok(None)` without touching the store when the name is empty;
    /// form submissions surface no error for that case.
    pub fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
        icon_bytes: Option<&[u8]>,
    ) -> RepoResult<Option<ProjectId>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let project = NewProject {
            name: name.to_string(),
            description: description.map(str::to_string),
            icon: encode_icon(icon_bytes),
        };
        let id = self.repo.create_project(&project)?;
        Ok(Some(id))
    }

    /// Gets one project by id.
    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    /// Lists all projects, most recently created first.
    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.list_projects()
    }

    /// Overwrites name/description; replaces the icon only when new bytes
    /// are supplied.
    ///
    /// Returns `Ok(false)` without touching the store when the name is empty.
    pub fn update_project(
        &self,
        id: ProjectId,
        name: &str,
        description: Option<&str>,
        icon_bytes: Option<&[u8]>,
    ) -> RepoResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        self.repo
            .update_project(id, name, description, encode_icon(icon_bytes).as_deref())?;
        Ok(true)
    }

    /// Deletes a project only when it owns zero tasks (subtasks included).
    ///
    /// Returns `Ok(false)` when the deletion is refused or the project is
    /// already gone; the form surface redirects with no error detail either
    /// way. Comments never block deletion and are left dangling.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<bool> {
        if self.repo.count_tasks(id)? > 0 {
            return Ok(false);
        }

        match self.repo.delete_project(id) {
            Ok(()) => Ok(true),
            Err(RepoError::NotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Per-status counts of top-level tasks, for the progress summary.
    pub fn task_stats(&self, id: ProjectId) -> RepoResult<TaskStatusCounts> {
        self.repo.task_stats(id)
    }

    /// Total task count (top-level + subtasks), for the JSON count endpoint.
    pub fn task_count(&self, id: ProjectId) -> RepoResult<u32> {
        self.repo.count_tasks(id)
    }
}

fn encode_icon(icon_bytes: Option<&[u8]>) -> Option<String> {
    icon_bytes
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| BASE64.encode(bytes))
}
