//! Domain model for the project/task/comment tracker.
//!
//! # Responsibility
//! - Define the canonical records persisted by the repository layer.
//! - Keep wire naming (snake_case statuses, entity type strings) in one place.
//!
//! # Invariants
//! - Every entity is identified by a store-generated `i64` rowid.
//! - `TaskStatus` is a closed set; unknown strings never become a status.

pub mod comment;
pub mod project;
pub mod task;
