//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and tree-listing APIs over the `tasks` table.
//! - Own the top-level ordering rule (status rank, then recency).
//!
//! # Invariants
//! - Top-level listings order by status rank (pending < in_progress <
//!   completed), then `created_at DESC, id DESC` within rank.
//! - Deleting a task removes its subtasks via the store's cascade; no
//!   application-level fan-out happens here.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    parent_task_id,
    name,
    description,
    status,
    created_at
FROM tasks";

/// Insert model for a new task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub parent_task_id: Option<TaskId>,
    pub name: String,
    pub description: Option<String>,
}

/// Repository interface for task tree operations.
pub trait TaskRepository {
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Top-level tasks for a project, open work first.
    fn list_top_level(&self, project_id: ProjectId) -> RepoResult<Vec<Task>>;
    /// Subtasks of a task, most recently created first.
    fn list_subtasks(&self, parent_id: TaskId) -> RepoResult<Vec<Task>>;
    /// Statuses of all subtasks, in no particular order.
    fn subtask_statuses(&self, parent_id: TaskId) -> RepoResult<Vec<TaskStatus>>;
    fn update_fields(&self, id: TaskId, name: &str, description: Option<&str>) -> RepoResult<()>;
    fn update_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<()>;
    /// Deletes a task and returns the owning project id for redirects.
    fn delete_task(&self, id: TaskId) -> RepoResult<ProjectId>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["tasks"])?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (project_id, parent_task_id, name, description)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.project_id,
                task.parent_task_id,
                task.name.as_str(),
                task.description.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_top_level(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE project_id = ?1 AND parent_task_id IS NULL
             ORDER BY
                CASE status
                    WHEN 'pending' THEN 0
                    WHEN 'in_progress' THEN 1
                    WHEN 'completed' THEN 2
                END,
                created_at DESC,
                id DESC;"
        ))?;

        let tasks = collect_tasks(stmt.query([project_id])?);
        tasks
    }

    fn list_subtasks(&self, parent_id: TaskId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE parent_task_id = ?1
             ORDER BY created_at DESC, id DESC;"
        ))?;

        let tasks = collect_tasks(stmt.query([parent_id])?);
        tasks
    }

    fn subtask_statuses(&self, parent_id: TaskId) -> RepoResult<Vec<TaskStatus>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status FROM tasks WHERE parent_task_id = ?1;")?;

        let mut rows = stmt.query([parent_id])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            let status_text: String = row.get(0)?;
            statuses.push(parse_status(&status_text)?);
        }
        Ok(statuses)
    }

    fn update_fields(&self, id: TaskId, name: &str, description: Option<&str>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET name = ?2, description = ?3 WHERE id = ?1;",
            params![id, name, description],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }
        Ok(())
    }

    fn update_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?2 WHERE id = ?1;",
            params![id, status.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<ProjectId> {
        let project_id: Option<ProjectId> = self
            .conn
            .query_row("SELECT project_id FROM tasks WHERE id = ?1;", [id], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(project_id) = project_id else {
            return Err(RepoError::NotFound { entity: "task", id });
        };

        // Subtask rows go with it through ON DELETE CASCADE.
        self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        Ok(project_id)
    }
}

fn collect_tasks(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Task>> {
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;
    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        parent_task_id: row.get("parent_task_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        status: parse_status(&status_text)?,
        created_at: row.get("created_at")?,
    })
}

fn parse_status(value: &str) -> RepoResult<TaskStatus> {
    TaskStatus::parse(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{value}` in tasks.status"))
    })
}
