//! Unit tests for the edit session and the board facade.


use crate::task::adapters::memory::InMemoryTaskGateway;
use crate::task::domain::{TaskId, TaskRecord, TaskSeed};
use crate::taxonomy::domain::{Dimension, OptionId};

/// Identifiers of the seeded taxonomy, for assertions against selections.
struct Seeds {
    backend: OptionId,
    frontend: OptionId,
    done_status: OptionId,
}

/// Seeds a two-category taxonomy, the flat enumerations, and one task.
fn seeded_gateway() -> (InMemoryTaskGateway, TaskRecord, Seeds) {
    let gateway = InMemoryTaskGateway::new();
    let backend = gateway.seed_category("Backend").expect("seed category");
    let frontend = gateway.seed_category("Frontend").expect("seed category");
    let api = gateway
        .seed_subcategory(backend, "API")
        .expect("seed subcategory");
    gateway
        .seed_subcategory(backend, "CLI")
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
    let statuses = gateway
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
        .seed_flat(Dimension::Source, &["roadmap", "backlog"])
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

    let done_status = statuses.get(1).copied().expect("seeded status id");
    (
        gateway,
        record,
        Seeds {
            backend,
            frontend,
            done_status,
        },
    )
}
