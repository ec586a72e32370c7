//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and the closed status set.
//! - Own status ordering and progress scoring rules.
//!
//! # Invariants
//! - `status` is always one of pending/in_progress/completed.
//! - A task with `parent_task_id = None` is top-level; `Some(_)` is a subtask.
//! - Nesting is exactly two levels deep; the task service enforces it.

use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};

/// Store-generated identifier for a task row.
pub type TaskId = i64;

/// Task lifecycle state.
///
/// The declaration order doubles as the display rank: open work sorts before
/// completed work in top-level listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not started.
    Pending,
    /// Work is in progress.
    InProgress,
    /// Completed successfully.
    Completed,
}

impl TaskStatus {
    /// Parses the wire/store representation. Unknown strings yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Wire/store representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Sort rank for top-level listings: open work before completed.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    /// Contribution of one subtask to the parent's progress percentage.
    pub fn progress_score(self) -> u32 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 50,
            Self::Completed => 100,
        }
    }
}

/// Unit of work under a project; may own subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-generated rowid.
    pub id: TaskId,
    /// Owning project. Cascade-deleted with it.
    pub project_id: ProjectId,
    /// Parent task for subtasks; `None` for top-level tasks.
    pub parent_task_id: Option<TaskId>,
    /// Display name. Never empty for persisted rows.
    pub name: String,
    /// Optional markup text.
    pub description: Option<String>,
    /// Lifecycle state. Defaults to `pending` at creation.
    pub status: TaskStatus,
    /// Creation timestamp in epoch milliseconds. Immutable.
    pub created_at: i64,
}

impl Task {
    /// Returns whether this task sits directly under its project.
    pub fn is_top_level(&self) -> bool {
        self.parent_task_id.is_none()
    }
}

/// Computes the subtask-derived progress percentage for a parent task.
///
/// Returns `None` for an empty slice (no progress bar is shown without
/// subtasks); otherwise the integer-truncated mean of per-subtask scores.
pub fn progress_percent(subtask_statuses: &[TaskStatus]) -> Option<u32> {
    if subtask_statuses.is_empty() {
        return None;
    }
    let sum: u32 = subtask_statuses
        .iter()
        .map(|status| status.progress_score())
        .sum();
    Some(sum / subtask_statuses.len() as u32)
}
