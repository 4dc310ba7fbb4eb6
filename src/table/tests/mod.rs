//! Unit tests for the table module.


use crate::task::domain::{TaskId, TaskRecord, TaskSeed};

/// Builds a valid row with the given title, letting callers tweak the
/// seed before construction.
fn record_with(title: &str, tweak: impl FnOnce(&mut TaskSeed)) -> TaskRecord {
    let mut seed = TaskSeed {
        id: TaskId::new(),
        display_id: format!("T-{title}"),
        title: title.to_owned(),
        ..TaskSeed::default()
    };
    tweak(&mut seed);
    TaskRecord::from_seed(seed).expect("valid seed")
}

fn record(title: &str) -> TaskRecord {
    record_with(title, |_| {})
}
