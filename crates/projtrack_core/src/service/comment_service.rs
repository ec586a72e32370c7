//! Comment log use-case service.
//!
//! # Responsibility
//! - Provide create/list/latest/update/delete entry points for comments.
//! - Validate the polymorphic entity reference at the string boundary.
//!
//! # Invariants
//! - Unknown entity types and empty content are rejected explicitly; the
//!   JSON surface maps these to machine-readable failure flags.
//! - A blank author falls back to the default author, never to empty text.

use crate::model::comment::{Comment, CommentId, EntityRef, DEFAULT_AUTHOR};
use crate::repo::comment_repo::{CommentRepository, NewComment};
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for comment use-cases.
#[derive(Debug)]
pub enum CommentServiceError {
    /// Entity type string is outside the project/task set.
    InvalidEntityType(String),
    /// Entity id is missing or non-positive.
    InvalidEntityId(i64),
    /// Comment content is empty after trimming.
    EmptyContent,
    /// Author is empty after trimming (update only; create falls back).
    EmptyAuthor,
    /// Target comment does not exist.
    CommentNotFound(CommentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CommentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntityType(value) => write!(f, "invalid entity type: `{value}`"),
            Self::InvalidEntityId(value) => write!(f, "invalid entity id: {value}"),
            Self::EmptyContent => write!(f, "comment content cannot be empty"),
            Self::EmptyAuthor => write!(f, "comment author cannot be empty"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CommentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "comment",
                id,
            } => Self::CommentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Comment log facade over repository implementations.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a comment on a project or task from wire input.
    ///
    /// The entity type is parsed here; anything outside project/task is
    /// rejected before the store is touched. A blank author becomes the
    /// default author.
    pub fn create_comment(
        &self,
        entity_type: &str,
        entity_id: i64,
        content: &str,
        author: Option<&str>,
    ) -> Result<CommentId, CommentServiceError> {
        if entity_id <= 0 {
            return Err(CommentServiceError::InvalidEntityId(entity_id));
        }
        let entity = EntityRef::parse(entity_type, entity_id)
            .ok_or_else(|| CommentServiceError::InvalidEntityType(entity_type.to_string()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(CommentServiceError::EmptyContent);
        }

        let author = author
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_AUTHOR);

        let comment = NewComment {
            entity,
            content: content.to_string(),
            author: author.to_string(),
        };
        Ok(self.repo.create_comment(&comment)?)
    }

    /// Comments on one entity, most recent first.
    ///
    /// Dangling refs are served like any other: the log never checks whether
    /// the entity still exists.
    pub fn list_for(&self, entity: EntityRef) -> RepoResult<Vec<Comment>> {
        self.repo.list_for(entity)
    }

    /// Most recent comment on one entity, if any.
    pub fn latest_for(&self, entity: EntityRef) -> RepoResult<Option<Comment>> {
        self.repo.latest_for(entity)
    }

    /// Overwrites content and author; both are required.
    pub fn update_comment(
        &self,
        id: CommentId,
        content: &str,
        author: &str,
    ) -> Result<(), CommentServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CommentServiceError::EmptyContent);
        }
        let author = author.trim();
        if author.is_empty() {
            return Err(CommentServiceError::EmptyAuthor);
        }

        self.repo.update_comment(id, content, author)?;
        Ok(())
    }

    /// Deletes a comment and reports which entity it belonged to, so the
    /// caller can refresh the right view.
    pub fn delete_comment(&self, id: CommentId) -> Result<EntityRef, CommentServiceError> {
        Ok(self.repo.delete_comment(id)?)
    }
}
