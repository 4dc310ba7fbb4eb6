//! Behavioural integration tests for the inline-edit lifecycle.
//!
//! These tests exercise the exclusive edit session end to end over the
//! in-memory gateway: draft editing with cascading option refreshes,
//! commit through the gateway, and the recoverable failure paths.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use tessera::session::{SaveOutcome, SessionError, SessionStatus, TaskBoard};
use tessera::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::{TaskField, TaskId, TaskRecord, TaskSeed},
    ports::TaskGateway,
};
use tessera::taxonomy::domain::Dimension;

fn seeded() -> (InMemoryTaskGateway, TaskRecord) {
    let gateway = InMemoryTaskGateway::new();
    let backend = gateway.seed_category("Backend").expect("seed category");
    let frontend = gateway.seed_category("Frontend").expect("seed category");
    let api = gateway
        .seed_subcategory(backend, "API")
        .expect("seed subcategory");
    let spa = gateway
        .seed_subcategory(frontend, "SPA")
        .expect("seed subcategory");
    gateway
        .seed_technology(api, "Rust")
        .expect("seed technology");
    gateway
        .seed_technology(spa, "TypeScript")
        .expect("seed technology");
    gateway
        .seed_flat(Dimension::Status, &["open", "done"])
        .expect("seed statuses");
    gateway
        .seed_flat(Dimension::Priority, &["low", "high"])
        .expect("seed priorities");
    gateway
        .seed_flat(Dimension::Kind, &["feature", "bug"])
        .expect("seed kinds");
    gateway
        .seed_flat(Dimension::Level, &["junior", "senior"])
        .expect("seed levels");
    gateway
        .seed_flat(Dimension::Source, &["roadmap"])
        .expect("seed sources");

    let record = TaskRecord::from_seed(TaskSeed {
        id: TaskId::new(),
        display_id: "T-1".to_owned(),
        title: "Ship the editor".to_owned(),
        technology: "Rust".to_owned(),
        subcategory: "API".to_owned(),
        category: "Backend".to_owned(),
        topics: vec!["async".to_owned()],
        section: "core".to_owned(),
        source: "roadmap".to_owned(),
        level: "senior".to_owned(),
        kind: "feature".to_owned(),
        status: "open".to_owned(),
        priority: "high".to_owned(),
        progress: 40,
        order: 1,
        estimated_duration: 8.0,
        actual_duration: 2.5,
        due_date: None,
        start_date: None,
        end_date: None,
        done: false,
    })
    .expect("valid seed");
    gateway.seed_task(record.clone()).expect("seed task");
    (gateway, record)
}

#[tokio::test(flavor = "multi_thread")]
async fn a_cascading_edit_saves_a_consistent_row() {
    let (gateway, record) = seeded();
    let handle = Arc::new(gateway);
    let board = TaskBoard::new(Arc::clone(&handle));
    board.reload().await.expect("reload should succeed");

    let session = board.session();
    session
        .start_edit(&record)
        .await
        .expect("edit should start");

    // Moving the row to the other category invalidates both dependent
    // levels; the user then picks fresh values from the refreshed lists.
    session
        .edit_field(TaskField::Category, "Frontend")
        .await
        .expect("category edit");
    session
        .edit_field(TaskField::Subcategory, "SPA")
        .await
        .expect("subcategory edit");
    session
        .edit_field(TaskField::Technology, "TypeScript")
        .await
        .expect("technology edit");
    session
        .edit_field(TaskField::Status, "done")
        .await
        .expect("status edit");
    session
        .edit_field(TaskField::Progress, "100")
        .await
        .expect("progress edit");

    let outcome = session.save_edit().await.expect("save should succeed");
    assert!(matches!(outcome, SaveOutcome::Saved(_)));
    assert_eq!(session.status().expect("status"), SessionStatus::Idle);

    let stored = handle.list_tasks().await.expect("list should succeed");
    let saved = stored.first().expect("row exists");
    assert_eq!(saved.category(), "Frontend");
    assert_eq!(saved.subcategory(), "SPA");
    assert_eq!(saved.technology(), "TypeScript");
    assert_eq!(saved.status(), "done");
    assert_eq!(saved.progress(), 100);
    assert_eq!(saved.id(), record.id());
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelling_mid_cascade_leaves_the_committed_row_intact() {
    let (gateway, record) = seeded();
    let board = TaskBoard::new(Arc::new(gateway));
    board.reload().await.expect("reload should succeed");

    let session = board.session();
    session
        .start_edit(&record)
        .await
        .expect("edit should start");
    session
        .edit_field(TaskField::Category, "Frontend")
        .await
        .expect("category edit");
    session.cancel_edit().expect("cancel should succeed");

    let committed = board
        .rows()
        .get(record.id())
        .expect("get")
        .expect("row exists");
    assert_eq!(committed.category(), "Backend");
    assert_eq!(committed.subcategory(), "API");
    assert_eq!(committed.technology(), "Rust");
}

#[tokio::test(flavor = "multi_thread")]
async fn a_failed_translation_keeps_the_session_retryable() {
    let (gateway, record) = seeded();
    let board = TaskBoard::new(Arc::new(gateway));
    board.reload().await.expect("reload should succeed");

    let session = board.session();
    session
        .start_edit(&record)
        .await
        .expect("edit should start");
    session
        .edit_field(TaskField::Priority, "urgent")
        .await
        .expect("priority edit");

    let err = session
        .save_edit()
        .await
        .expect_err("unknown priority should fail the save");
    assert!(matches!(
        err,
        SessionError::UnknownOption {
            dimension: Dimension::Priority,
            ..
        }
    ));
    assert_eq!(session.status().expect("status"), SessionStatus::Failed);

    // Correcting the field and retrying commits cleanly.
    session
        .edit_field(TaskField::Priority, "low")
        .await
        .expect_err("editing requires the editing phase");
    session.cancel_edit().expect("cancel should succeed");

    session
        .start_edit(&record)
        .await
        .expect("edit should restart");
    session
        .edit_field(TaskField::Priority, "low")
        .await
        .expect("priority edit");
    let outcome = session.save_edit().await.expect("save should succeed");
    assert!(matches!(outcome, SaveOutcome::Saved(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn the_board_refuses_to_delete_the_row_under_edit() {
    let (gateway, record) = seeded();
    let handle = Arc::new(gateway);
    let board = TaskBoard::new(Arc::clone(&handle));
    board.reload().await.expect("reload should succeed");

    board
        .session()
        .start_edit(&record)
        .await
        .expect("edit should start");
    board
        .delete_task(record.id())
        .await
        .expect_err("deletion should be refused while editing");

    assert_eq!(
        handle
            .list_tasks()
            .await
            .expect("list should succeed")
            .len(),
        1
    );
}
