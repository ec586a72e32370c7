//! Core domain logic for the projtrack project/task tracker.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod markup;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId, EntityRef, DEFAULT_AUTHOR};
pub use model::project::{Project, ProjectId, TaskStatusCounts};
pub use model::task::{progress_percent, Task, TaskId, TaskStatus};
pub use repo::comment_repo::{CommentRepository, NewComment, SqliteCommentRepository};
pub use repo::project_repo::{NewProject, ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{NewTask, SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::comment_service::{CommentService, CommentServiceError};
pub use service::project_service::ProjectService;
pub use service::task_service::{TaskService, TaskServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
