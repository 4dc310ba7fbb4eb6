//! Registry and coercion tests for the typed field set.

use crate::task::domain::{FieldKind, FieldValue, PROGRESS_BOUNDS, TaskField};
use crate::taxonomy::domain::Dimension;
use chrono::NaiveDate;
use rstest::rstest;
use std::collections::HashSet;

#[rstest]
fn every_column_has_a_unique_wire_key() {
    let keys: HashSet<&str> = TaskField::ALL.iter().map(|field| field.as_str()).collect();
    assert_eq!(keys.len(), TaskField::ALL.len());
}

#[rstest]
#[case(TaskField::DisplayId, "task_id")]
#[case(TaskField::Title, "task")]
#[case(TaskField::Kind, "type")]
#[case(TaskField::EstimatedDuration, "estimated_duration")]
fn wire_keys_match_the_rest_contract(#[case] field: TaskField, #[case] key: &str) {
    assert_eq!(field.as_str(), key);
}

#[rstest]
fn progress_is_bounded_by_the_registry() {
    assert_eq!(
        TaskField::Progress.kind(),
        FieldKind::BoundedInteger {
            min: PROGRESS_BOUNDS.0,
            max: PROGRESS_BOUNDS.1,
        }
    );
}

#[rstest]
#[case(TaskField::Category, Dimension::Category)]
#[case(TaskField::Subcategory, Dimension::Subcategory)]
#[case(TaskField::Technology, Dimension::Technology)]
#[case(TaskField::Status, Dimension::Status)]
#[case(TaskField::Priority, Dimension::Priority)]
#[case(TaskField::Kind, Dimension::Kind)]
#[case(TaskField::Level, Dimension::Level)]
#[case(TaskField::Source, Dimension::Source)]
fn choice_fields_name_their_dimension(#[case] field: TaskField, #[case] dimension: Dimension) {
    assert_eq!(field.choice_dimension(), Some(dimension));
}

#[rstest]
#[case(TaskField::Title)]
#[case(TaskField::Progress)]
#[case(TaskField::DueDate)]
#[case(TaskField::Done)]
fn scalar_fields_have_no_dimension(#[case] field: TaskField) {
    assert_eq!(field.choice_dimension(), None);
}

#[rstest]
#[case("42", 42)]
#[case(" 7 ", 7)]
#[case("not a number", 0)]
#[case("", 0)]
fn integer_coercion_falls_back_to_zero(#[case] raw: &str, #[case] expected: i64) {
    assert_eq!(
        FieldKind::Integer.coerce(raw),
        FieldValue::Integer(expected)
    );
}

#[rstest]
#[case("150", 100)]
#[case("-3", 0)]
#[case("55", 55)]
#[case("junk", 0)]
fn bounded_integer_coercion_clamps(#[case] raw: &str, #[case] expected: i64) {
    assert_eq!(
        TaskField::Progress.kind().coerce(raw),
        FieldValue::Integer(expected)
    );
}

#[rstest]
fn number_coercion_falls_back_to_zero() {
    assert_eq!(FieldKind::Number.coerce("2.5"), FieldValue::Number(2.5));
    assert_eq!(FieldKind::Number.coerce("junk"), FieldValue::Number(0.0));
}

#[rstest]
#[case("true", true)]
#[case("yes", true)]
#[case("1", true)]
#[case("false", false)]
#[case(" FALSE ", false)]
#[case("0", false)]
#[case("", false)]
fn flag_coercion_uses_truthiness(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(FieldKind::Flag.coerce(raw), FieldValue::Flag(expected));
}

#[rstest]
fn date_coercion_accepts_iso_dates() {
    assert_eq!(
        FieldKind::Date.coerce("2026-03-01"),
        FieldValue::Date(NaiveDate::from_ymd_opt(2026, 3, 1))
    );
}

#[rstest]
fn date_coercion_accepts_rfc3339_timestamps() {
    assert_eq!(
        FieldKind::Date.coerce("2026-03-01T10:30:00Z"),
        FieldValue::Date(NaiveDate::from_ymd_opt(2026, 3, 1))
    );
}

#[rstest]
#[case("not a date")]
#[case("")]
#[case("2026-13-45")]
fn date_coercion_clears_malformed_input(#[case] raw: &str) {
    assert_eq!(FieldKind::Date.coerce(raw), FieldValue::Date(None));
}

#[rstest]
fn topics_coercion_trims_and_drops_empty_entries() {
    assert_eq!(
        FieldKind::Topics.coerce(" async , tokio ,,net "),
        FieldValue::Topics(vec![
            "async".to_owned(),
            "tokio".to_owned(),
            "net".to_owned(),
        ])
    );
}

#[rstest]
fn choice_coercion_keeps_the_name_verbatim() {
    assert_eq!(
        TaskField::Status.kind().coerce("in progress"),
        FieldValue::Text("in progress".to_owned())
    );
}
