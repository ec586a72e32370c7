use projtrack_core::db::open_db_in_memory;
use projtrack_core::{
    CommentService, EntityRef, ProjectId, ProjectService, SqliteCommentRepository,
    SqliteProjectRepository, SqliteTaskRepository, TaskId, TaskService, TaskServiceError,
    TaskStatus,
};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let id = service
        .create_task(project, None, "write docs", Some("outline first"))
        .unwrap()
        .unwrap();

    let task = service.get_task(id).unwrap().unwrap();
    assert_eq!(task.project_id, project);
    assert_eq!(task.parent_task_id, None);
    assert_eq!(task.name, "write docs");
    assert_eq!(task.description.as_deref(), Some("outline first"));
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.is_top_level());
}

#[test]
fn create_with_missing_name_or_project_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    assert_eq!(service.create_task(project, None, " ", None).unwrap(), None);
    assert_eq!(service.create_task(0, None, "orphan", None).unwrap(), None);
    assert!(service.list_top_level(project).unwrap().is_empty());
}

#[test]
fn zero_parent_id_is_normalized_to_top_level() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let id = service
        .create_task(project, Some(0), "form default", None)
        .unwrap()
        .unwrap();

    assert!(service.get_task(id).unwrap().unwrap().is_top_level());
}

#[test]
fn subtask_of_a_subtask_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let parent = service
        .create_task(project, None, "parent", None)
        .unwrap()
        .unwrap();
    let child = service
        .create_task(project, Some(parent), "child", None)
        .unwrap()
        .unwrap();

    let err = service
        .create_task(project, Some(child), "grandchild", None)
        .unwrap_err();
    assert!(matches!(err, TaskServiceError::SubtaskDepthExceeded(id) if id == child));
}

#[test]
fn top_level_listing_orders_by_status_rank_then_recency() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let done_new = service
        .create_task(project, None, "done new", None)
        .unwrap()
        .unwrap();
    let pending_old = service
        .create_task(project, None, "pending old", None)
        .unwrap()
        .unwrap();
    let pending_new = service
        .create_task(project, None, "pending new", None)
        .unwrap()
        .unwrap();
    let active = service
        .create_task(project, None, "active", None)
        .unwrap()
        .unwrap();

    service.update_status(done_new, "completed").unwrap();
    service.update_status(active, "in_progress").unwrap();
    set_created_at(&conn, done_new, 4000);
    set_created_at(&conn, pending_old, 1000);
    set_created_at(&conn, pending_new, 3000);
    set_created_at(&conn, active, 2000);

    let names: Vec<String> = service
        .list_top_level(project)
        .unwrap()
        .into_iter()
        .map(|task| task.name)
        .collect();

    // Completed sorts last despite being the newest row.
    assert_eq!(
        names,
        vec![
            "pending new".to_string(),
            "pending old".to_string(),
            "active".to_string(),
            "done new".to_string(),
        ]
    );
}

#[test]
fn subtask_listing_orders_by_recency_and_excludes_top_level() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let parent = service
        .create_task(project, None, "parent", None)
        .unwrap()
        .unwrap();
    let older = service
        .create_task(project, Some(parent), "older", None)
        .unwrap()
        .unwrap();
    let newer = service
        .create_task(project, Some(parent), "newer", None)
        .unwrap()
        .unwrap();
    set_created_at(&conn, older, 1000);
    set_created_at(&conn, newer, 2000);

    let names: Vec<String> = service
        .list_subtasks(parent)
        .unwrap()
        .into_iter()
        .map(|task| task.name)
        .collect();
    assert_eq!(names, vec!["newer".to_string(), "older".to_string()]);

    let top_level: Vec<TaskId> = service
        .list_top_level(project)
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect();
    assert_eq!(top_level, vec![parent]);
}

#[test]
fn progress_is_none_without_subtasks_and_truncated_mean_with_them() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let parent = service
        .create_task(project, None, "parent", None)
        .unwrap()
        .unwrap();
    assert_eq!(service.progress(parent).unwrap(), None);

    let first = service
        .create_task(project, Some(parent), "first", None)
        .unwrap()
        .unwrap();
    service
        .create_task(project, Some(parent), "second", None)
        .unwrap()
        .unwrap();
    service.update_status(first, "completed").unwrap();

    // (100 + 0) / 2
    assert_eq!(service.progress(parent).unwrap(), Some(50));
}

#[test]
fn update_status_rejects_unknown_values() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let id = service
        .create_task(project, None, "task", None)
        .unwrap()
        .unwrap();

    let err = service.update_status(id, "archived").unwrap_err();
    assert!(matches!(err, TaskServiceError::InvalidStatus(value) if value == "archived"));
    assert_eq!(
        service.get_task(id).unwrap().unwrap().status,
        TaskStatus::Pending
    );

    service.update_status(id, "completed").unwrap();
    assert_eq!(
        service.get_task(id).unwrap().unwrap().status,
        TaskStatus::Completed
    );
}

#[test]
fn update_status_of_missing_task_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn);
    let service = task_service(&conn);

    let err = service.update_status(404, "pending").unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(404)));
}

#[test]
fn update_fields_overwrites_when_name_present() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let service = task_service(&conn);

    let id = service
        .create_task(project, None, "draft", Some("old"))
        .unwrap()
        .unwrap();

    assert!(!service.update_fields(id, "", Some("ignored")).unwrap());
    assert_eq!(service.get_task(id).unwrap().unwrap().name, "draft");

    assert!(service.update_fields(id, "final", Some("new")).unwrap());
    let task = service.get_task(id).unwrap().unwrap();
    assert_eq!(task.name, "final");
    assert_eq!(task.description.as_deref(), Some("new"));
}

#[test]
fn delete_cascades_to_subtasks_but_orphans_their_comments() {
    let conn = open_db_in_memory().unwrap();
    let project = seed_project(&conn);
    let tasks = task_service(&conn);
    let comments = CommentService::new(SqliteCommentRepository::try_new(&conn).unwrap());

    let parent = tasks
        .create_task(project, None, "parent", None)
        .unwrap()
        .unwrap();
    let child = tasks
        .create_task(project, Some(parent), "child", None)
        .unwrap()
        .unwrap();
    comments
        .create_comment("task", child, "note on the child", None)
        .unwrap();

    let owning_project = tasks.delete_task(parent).unwrap();
    assert_eq!(owning_project, project);
    assert!(tasks.get_task(parent).unwrap().is_none());
    assert!(tasks.get_task(child).unwrap().is_none());

    // The comment row survives with a now-dangling entity id.
    let orphaned = comments.list_for(EntityRef::Task(child)).unwrap();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].content, "note on the child");
}

#[test]
fn delete_of_missing_task_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed_project(&conn);
    let service = task_service(&conn);

    let err = service.delete_task(404).unwrap_err();
    assert!(matches!(err, TaskServiceError::TaskNotFound(404)));
}

fn seed_project(conn: &Connection) -> ProjectId {
    let service = ProjectService::new(SqliteProjectRepository::try_new(conn).unwrap());
    service
        .create_project("fixture", None, None)
        .unwrap()
        .unwrap()
}

fn task_service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>> {
    TaskService::new(SqliteTaskRepository::try_new(conn).unwrap())
}

fn set_created_at(conn: &Connection, id: TaskId, created_at: i64) {
    conn.execute(
        "UPDATE tasks SET created_at = ?2 WHERE id = ?1;",
        [id, created_at],
    )
    .unwrap();
}
