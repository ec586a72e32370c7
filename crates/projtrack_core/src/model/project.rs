//! Project domain model.
//!
//! # Responsibility
//! - Define the project record and its creation-time defaults.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused.
//! - `icon` holds base64 text, never raw bytes.

use serde::{Deserialize, Serialize};

/// Store-generated identifier for a project row.
pub type ProjectId = i64;

/// Top-level unit of work ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-generated rowid.
    pub id: ProjectId,
    /// Display name. Never empty for persisted rows.
    pub name: String,
    /// Optional markup text shown on the detail page.
    pub description: Option<String>,
    /// Lifecycle label. Defaults to `active`; no current operation mutates it.
    pub status: String,
    /// Optional project icon, base64-encoded image bytes.
    pub icon: Option<String>,
    /// Creation timestamp in epoch milliseconds. Immutable.
    pub created_at: i64,
}

/// Per-project summary of top-level tasks by status.
///
/// Subtasks are deliberately excluded; the progress strip on the project
/// list only reflects top-level work items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatusCounts {
    pub pending: u32,
    pub in_progress: u32,
    pub completed: u32,
}

impl TaskStatusCounts {
    /// Total top-level tasks covered by this summary.
    pub fn total(&self) -> u32 {
        self.pending + self.in_progress + self.completed
    }
}
