use projtrack_core::db::open_db_in_memory;
use projtrack_core::{
    CommentId, CommentService, CommentServiceError, EntityRef, ProjectId, ProjectService,
    SqliteCommentRepository, SqliteProjectRepository,
};
use rusqlite::Connection;

#[test]
fn create_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);

    let id = service
        .create_comment("project", project, "kickoff went well", Some("alice"))
        .unwrap();

    let comments = service.list_for(EntityRef::Project(project)).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, id);
    assert_eq!(comments[0].entity, EntityRef::Project(project));
    assert_eq!(comments[0].content, "kickoff went well");
    assert_eq!(comments[0].author, "alice");
}

#[test]
fn create_rejects_unknown_entity_type() {
    let conn = open_db_in_memory().unwrap();
    let service = comment_service(&conn);

    let err = service
        .create_comment("widget", 1, "does not matter", None)
        .unwrap_err();
    assert!(matches!(err, CommentServiceError::InvalidEntityType(value) if value == "widget"));
}

#[test]
fn create_rejects_missing_entity_id_and_empty_content() {
    let conn = open_db_in_memory().unwrap();
    let service = comment_service(&conn);

    let id_err = service.create_comment("project", 0, "text", None).unwrap_err();
    assert!(matches!(id_err, CommentServiceError::InvalidEntityId(0)));

    let content_err = service.create_comment("project", 1, "  ", None).unwrap_err();
    assert!(matches!(content_err, CommentServiceError::EmptyContent));
}

#[test]
fn blank_author_falls_back_to_default() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);

    service
        .create_comment("project", project, "anonymous note", Some("  "))
        .unwrap();

    let latest = service
        .latest_for(EntityRef::Project(project))
        .unwrap()
        .unwrap();
    assert_eq!(latest.author, "User");
}

#[test]
fn listing_and_latest_prefer_most_recent() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);
    let entity = EntityRef::Project(project);

    let older = service
        .create_comment("project", project, "older", None)
        .unwrap();
    let newer = service
        .create_comment("project", project, "newer", None)
        .unwrap();
    set_created_at(&conn, older, 1000);
    set_created_at(&conn, newer, 2000);

    let contents: Vec<String> = service
        .list_for(entity)
        .unwrap()
        .into_iter()
        .map(|comment| comment.content)
        .collect();
    assert_eq!(contents, vec!["newer".to_string(), "older".to_string()]);

    let latest = service.latest_for(entity).unwrap().unwrap();
    assert_eq!(latest.id, newer);
}

#[test]
fn latest_is_none_for_uncommented_entity() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);

    assert!(service
        .latest_for(EntityRef::Project(project))
        .unwrap()
        .is_none());
}

#[test]
fn comments_on_projects_and_tasks_are_kept_apart() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);

    service
        .create_comment("project", project, "on the project", None)
        .unwrap();
    // Same id on the task side; the entity type keeps the logs separate.
    service
        .create_comment("task", project, "on a task", None)
        .unwrap();

    let on_project = service.list_for(EntityRef::Project(project)).unwrap();
    assert_eq!(on_project.len(), 1);
    assert_eq!(on_project[0].content, "on the project");

    let on_task = service.list_for(EntityRef::Task(project)).unwrap();
    assert_eq!(on_task.len(), 1);
    assert_eq!(on_task[0].content, "on a task");
}

#[test]
fn update_overwrites_both_fields_or_rejects() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);

    let id = service
        .create_comment("project", project, "draft", Some("alice"))
        .unwrap();

    let content_err = service.update_comment(id, " ", "alice").unwrap_err();
    assert!(matches!(content_err, CommentServiceError::EmptyContent));

    let author_err = service.update_comment(id, "final", " ").unwrap_err();
    assert!(matches!(author_err, CommentServiceError::EmptyAuthor));

    service.update_comment(id, "final", "bob").unwrap();
    let latest = service
        .latest_for(EntityRef::Project(project))
        .unwrap()
        .unwrap();
    assert_eq!(latest.content, "final");
    assert_eq!(latest.author, "bob");
}

#[test]
fn delete_reports_owning_entity_then_not_found() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = comment_service(&conn);

    let id = service
        .create_comment("project", project, "temporary", None)
        .unwrap();

    let entity = service.delete_comment(id).unwrap();
    assert_eq!(entity, EntityRef::Project(project));

    let err = service.delete_comment(id).unwrap_err();
    assert!(matches!(err, CommentServiceError::CommentNotFound(missing) if missing == id));
}

fn seed_project(conn: &Connection) -> ProjectId {
    let service = ProjectService::new(SqliteProjectRepository::try_new(conn).unwrap());
    service
        .create_project("fixture", None, None)
        .unwrap()
        .unwrap()
}

fn comment_service(conn: &Connection) -> CommentService<SqliteCommentRepository<'_>> {
    CommentService::new(SqliteCommentRepository::try_new(conn).unwrap())
}

fn set_created_at(conn: &Connection, id: CommentId, created_at: i64) {
    conn.execute(
        "UPDATE comments SET created_at = ?2 WHERE id = ?1;",
        [id, created_at],
    )
    .unwrap();
}
