//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and aggregation APIs over the `projects` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Insert/update callers supply already-validated names; emptiness rules
//!   live in the service layer.
//! - `task_stats` counts top-level tasks only; `count_tasks` counts all rows
//!   owned by the project, subtasks included.

use crate::model::project::{Project, ProjectId, TaskStatusCounts};
use crate::model::task::TaskStatus;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    status,
    icon_data,
    created_at
FROM projects";

/// Insert model for a new project row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    /// Base64 icon text, already encoded by the caller.
    pub icon: Option<String>,
}

/// Repository interface for project directory operations.
pub trait ProjectRepository {
    fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Lists all projects, most recently created first.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Overwrites name/description; overwrites icon only when `Some`.
    fn update_project(
        &self,
        id: ProjectId,
        name: &str,
        description: Option<&str>,
        icon: Option<&str>,
    ) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
    /// Total tasks owned by the project, subtasks included.
    fn count_tasks(&self, id: ProjectId) -> RepoResult<u32>;
    /// Per-status counts over top-level tasks only.
    fn task_stats(&self, id: ProjectId) -> RepoResult<TaskStatusCounts>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["projects", "tasks"])?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO projects (name, description, icon_data) VALUES (?1, ?2, ?3);",
            params![
                project.name.as_str(),
                project.description.as_deref(),
                project.icon.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn update_project(
        &self,
        id: ProjectId,
        name: &str,
        description: Option<&str>,
        icon: Option<&str>,
    ) -> RepoResult<()> {
        // COALESCE keeps the stored icon when no replacement is supplied.
        let changed = self.conn.execute(
            "UPDATE projects
             SET
                name = ?2,
                description = ?3,
                icon_data = COALESCE(?4, icon_data)
             WHERE id = ?1;",
            params![id, name, description, icon],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        }
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "project",
                id,
            });
        }
        Ok(())
    }

    fn count_tasks(&self, id: ProjectId) -> RepoResult<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE project_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn task_stats(&self, id: ProjectId) -> RepoResult<TaskStatusCounts> {
        let mut stmt = self.conn.prepare(
            "SELECT status, COUNT(*)
             FROM tasks
             WHERE project_id = ?1 AND parent_task_id IS NULL
             GROUP BY status;",
        )?;

        let mut rows = stmt.query([id])?;
        let mut counts = TaskStatusCounts::default();
        while let Some(row) = rows.next()? {
            let status_text: String = row.get(0)?;
            let count: u32 = row.get(1)?;
            let status = TaskStatus::parse(&status_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid task status `{status_text}` in tasks.status"
                ))
            })?;
            match status {
                TaskStatus::Pending => counts.pending = count,
                TaskStatus::InProgress => counts.in_progress = count,
                TaskStatus::Completed => counts.completed = count,
            }
        }
        Ok(counts)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: row.get("status")?,
        icon: row.get("icon_data")?,
        created_at: row.get("created_at")?,
    })
}
