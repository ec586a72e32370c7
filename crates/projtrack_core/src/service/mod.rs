//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the validation rules the HTTP layer relies on: silent no-ops for
//!   form submissions, typed rejections for JSON-surface operations.

pub mod comment_service;
pub mod project_service;
pub mod task_service;
