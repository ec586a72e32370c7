//! Comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and latest-comment APIs over the `comments` table.
//! - Translate between `EntityRef` and the `entity_type`/`entity_id` pair.
//!
//! # Invariants
//! - Comments are never cascade-deleted; a stored `entity_id` may dangle
//!   after its project or task is removed.
//! - Listings order by `created_at DESC, id DESC`.

use crate::model::comment::{Comment, CommentId, EntityRef};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    id,
    entity_type,
    entity_id,
    content,
    author,
    created_at
FROM comments";

/// Insert model for a new comment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub entity: EntityRef,
    pub content: String,
    pub author: String,
}

/// Repository interface for the comment log.
pub trait CommentRepository {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<CommentId>;
    /// Comments on one entity, most recent first.
    fn list_for(&self, entity: EntityRef) -> RepoResult<Vec<Comment>>;
    /// Most recent comment on one entity, if any.
    fn latest_for(&self, entity: EntityRef) -> RepoResult<Option<Comment>>;
    fn update_comment(&self, id: CommentId, content: &str, author: &str) -> RepoResult<()>;
    /// Deletes a comment and returns the entity it belonged to.
    fn delete_comment(&self, id: CommentId) -> RepoResult<EntityRef>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["comments"])?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<CommentId> {
        self.conn.execute(
            "INSERT INTO comments (entity_type, entity_id, content, author)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                comment.entity.kind(),
                comment.entity.entity_id(),
                comment.content.as_str(),
                comment.author.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_for(&self, entity: EntityRef) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL}
             WHERE entity_type = ?1 AND entity_id = ?2
             ORDER BY created_at DESC, id DESC;"
        ))?;

        let mut rows = stmt.query(params![entity.kind(), entity.entity_id()])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }
        Ok(comments)
    }

    fn latest_for(&self, entity: EntityRef) -> RepoResult<Option<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL}
             WHERE entity_type = ?1 AND entity_id = ?2
             ORDER BY created_at DESC, id DESC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![entity.kind(), entity.entity_id()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_row(row)?));
        }
        Ok(None)
    }

    fn update_comment(&self, id: CommentId, content: &str, author: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments SET content = ?2, author = ?3 WHERE id = ?1;",
            params![id, content, author],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id,
            });
        }
        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> RepoResult<EntityRef> {
        let entity: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT entity_type, entity_id FROM comments WHERE id = ?1;",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((entity_type, entity_id)) = entity else {
            return Err(RepoError::NotFound {
                entity: "comment",
                id,
            });
        };
        let entity = parse_entity(&entity_type, entity_id)?;

        self.conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])?;
        Ok(entity)
    }
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let entity_type: String = row.get("entity_type")?;
    let entity_id: i64 = row.get("entity_id")?;
    Ok(Comment {
        id: row.get("id")?,
        entity: parse_entity(&entity_type, entity_id)?,
        content: row.get("content")?,
        author: row.get("author")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_entity(entity_type: &str, entity_id: i64) -> RepoResult<EntityRef> {
    EntityRef::parse(entity_type, entity_id).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid entity type `{entity_type}` in comments.entity_type"
        ))
    })
}
