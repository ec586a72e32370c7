//! Comment domain model.
//!
//! # Responsibility
//! - Define the comment record and its polymorphic entity reference.
//!
//! # Invariants
//! - `EntityRef` is the only way to name a commented-on entity; raw
//!   `entity_type` strings are parsed exactly once at the boundary.
//! - No store-level constraint ties a comment to its entity: deleting a
//!   project or task leaves its comments dangling by design.

use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};

/// Store-generated identifier for a comment row.
pub type CommentId = i64;

/// Author recorded when the caller supplies none.
pub const DEFAULT_AUTHOR: &str = "User";

/// The entity a comment is attached to.
///
/// Serialized to the `entity_type`/`entity_id` column pair. The id is not a
/// foreign key, so a ref may dangle after its entity is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity_type", content = "entity_id", rename_all = "snake_case")]
pub enum EntityRef {
    Project(ProjectId),
    Task(TaskId),
}

impl EntityRef {
    /// Parses the wire pair. Unknown entity types yield `None`.
    pub fn parse(entity_type: &str, entity_id: i64) -> Option<Self> {
        match entity_type {
            "project" => Some(Self::Project(entity_id)),
            "task" => Some(Self::Task(entity_id)),
            _ => None,
        }
    }

    /// Wire/store representation of the entity type.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Task(_) => "task",
        }
    }

    /// Raw id of the referenced entity.
    pub fn entity_id(self) -> i64 {
        match self {
            Self::Project(id) | Self::Task(id) => id,
        }
    }
}

/// Freeform note attached to a project or task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-generated rowid.
    pub id: CommentId,
    /// Commented-on entity. May dangle after that entity is deleted.
    #[serde(flatten)]
    pub entity: EntityRef,
    /// Markup body. Never empty for persisted rows.
    pub content: String,
    /// Display author. Defaults to [`DEFAULT_AUTHOR`].
    pub author: String,
    /// Creation timestamp in epoch milliseconds. Immutable.
    pub created_at: i64,
}
