//! Behavioural integration tests for view derivation over a live board.
//!
//! These tests drive the board facade the way a dashboard front-end
//! would: load rows through the gateway, then derive filtered, sorted,
//! paginated views from the committed collection.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use tessera::session::TaskBoard;
use tessera::table::TableView;
use tessera::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::{NewTask, TaskField, TaskId, TaskRecord, TaskSeed},
    ports::TaskGateway,
};
use tessera::taxonomy::domain::Dimension;

fn seeded_gateway() -> InMemoryTaskGateway {
    let gateway = InMemoryTaskGateway::new();
    let backend = gateway.seed_category("Backend").expect("seed category");
    let api = gateway
        .seed_subcategory(backend, "API")
        .expect("seed subcategory");
    gateway
        .seed_technology(api, "Rust")
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
    gateway
}

fn task(title: &str, status: &str, progress: i64) -> TaskRecord {
    TaskRecord::from_seed(TaskSeed {
        id: TaskId::new(),
        display_id: format!("T-{title}"),
        title: title.to_owned(),
        technology: "Rust".to_owned(),
        subcategory: "API".to_owned(),
        category: "Backend".to_owned(),
        topics: Vec::new(),
        section: "core".to_owned(),
        source: "roadmap".to_owned(),
        level: "senior".to_owned(),
        kind: "feature".to_owned(),
        status: status.to_owned(),
        priority: "high".to_owned(),
        progress,
        order: 0,
        estimated_duration: 4.0,
        actual_duration: 0.0,
        due_date: None,
        start_date: None,
        end_date: None,
        done: false,
    })
    .expect("valid seed")
}

fn titles(view: &TableView) -> Vec<String> {
    view.rows()
        .iter()
        .map(|row| row.title().to_owned())
        .collect()
}

/// Asserts a derived page shows exactly the expected titles in order.
///
/// # Errors
///
/// Returns an error when the page differs from the expectation.
fn assert_page_titles(view: &TableView, expected: &[&str]) -> Result<(), eyre::Report> {
    eyre::ensure!(
        view.rows().len() == expected.len(),
        "expected {} rows on the page, found {}",
        expected.len(),
        view.rows().len()
    );
    eyre::ensure!(
        titles(view) == expected,
        "page titles mismatch: {:?} != {expected:?}",
        titles(view)
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn filters_sorts_and_pages_compose_over_loaded_rows() {
    let gateway = seeded_gateway();
    let plan: [(&str, &str, i64); 8] = [
        ("Task 0", "open", 0),
        ("Task 1", "done", 10),
        ("Task 2", "open", 20),
        ("Task 3", "done", 30),
        ("Task 4", "open", 40),
        ("Task 5", "done", 50),
        ("Task 6", "open", 60),
        ("Task 7", "done", 70),
    ];
    for (title, status, progress) in plan {
        gateway
            .seed_task(task(title, status, progress))
            .expect("seed task");
    }
    let mut board = TaskBoard::new(Arc::new(gateway));
    board.reload().await.expect("reload should succeed");

    board
        .table_mut()
        .set_column_filter(TaskField::Status, ["open".to_owned()]);
    board.table_mut().toggle_sort(TaskField::Progress);
    board.table_mut().toggle_sort(TaskField::Progress);
    board.table_mut().set_page_size(3);

    let first = board.view().expect("view should derive");
    assert_eq!(first.total(), 4);
    assert_eq!(first.page_count(), 2);
    assert_page_titles(&first, &["Task 6", "Task 4", "Task 2"]).expect("first page");

    board.table_mut().set_page_index(1);
    let second = board.view().expect("view should derive");
    assert_page_titles(&second, &["Task 0"]).expect("second page");
}

#[tokio::test(flavor = "multi_thread")]
async fn hidden_columns_disappear_from_rendered_pages_only() {
    let gateway = seeded_gateway();
    gateway
        .seed_task(task("Visible row", "open", 10))
        .expect("seed task");
    let mut board = TaskBoard::new(Arc::new(gateway));
    board.reload().await.expect("reload should succeed");

    board
        .table_mut()
        .set_column_visible(TaskField::Progress, false);
    board.table_mut().toggle_sort(TaskField::Progress);

    let view = board.view().expect("view should derive");
    assert!(!view.columns().contains(&TaskField::Progress));
    assert_eq!(view.total(), 1);
    assert_eq!(
        view.rendered_rows().first().map(Vec::len),
        Some(view.columns().len())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn created_and_deleted_rows_flow_into_the_view() {
    let gateway = seeded_gateway();
    let board = TaskBoard::new(Arc::new(gateway));
    board.reload().await.expect("reload should succeed");
    assert_eq!(board.view().expect("view").total(), 0);

    let created = board
        .add_task(&NewTask::with_title("Fresh work"))
        .await
        .expect("creation should succeed");
    assert_eq!(board.view().expect("view").total(), 1);

    board
        .delete_task(created.id())
        .await
        .expect("deletion should succeed");
    assert_eq!(board.view().expect("view").total(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn reloading_drops_rows_that_vanished_from_the_store() {
    let gateway = seeded_gateway();
    let keeper = task("Keeper", "open", 10);
    let goner = task("Goner", "open", 20);
    gateway.seed_task(keeper.clone()).expect("seed task");
    gateway.seed_task(goner.clone()).expect("seed task");

    let board = TaskBoard::new(Arc::new(gateway.clone()));
    assert_eq!(board.reload().await.expect("reload"), 2);

    gateway
        .delete_task(goner.id())
        .await
        .expect("delete should succeed");
    assert_eq!(board.reload().await.expect("reload"), 1);
    assert_page_titles(&board.view().expect("view"), &["Keeper"]).expect("remaining rows");
}
