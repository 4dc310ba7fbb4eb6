//! Per-type cell comparison semantics for view sorting.

use crate::task::domain::{TaskField, TaskRecord};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first; absent values lead.
    Ascending,
    /// Largest first; absent values trail.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orients an ascending comparison result.
    ///
    /// Applying the direction to the whole result makes absent-value
    /// ordering direction-relative: absent sorts first ascending and last
    /// descending.
    #[must_use]
    pub const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A field's value lifted into the comparable representation used by the
/// sorter.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value present (unset date).
    Missing,
    /// Textual value; lists compare through their comma-joined form.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Fractional number.
    Number(f64),
    /// Boolean flag; false sorts before true.
    Flag(bool),
    /// Calendar date.
    Date(NaiveDate),
}

impl CellValue {
    const fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Text(_) => 1,
            Self::Integer(_) => 2,
            Self::Number(_) => 3,
            Self::Flag(_) => 4,
            Self::Date(_) => 5,
        }
    }
}

/// Extracts the comparable value of a field from a row.
#[must_use]
pub fn cell_value(record: &TaskRecord, field: TaskField) -> CellValue {
    match field {
        TaskField::DisplayId => CellValue::Text(record.display_id().to_owned()),
        TaskField::Title => CellValue::Text(record.title().to_owned()),
        TaskField::Category => CellValue::Text(record.category().to_owned()),
        TaskField::Subcategory => CellValue::Text(record.subcategory().to_owned()),
        TaskField::Technology => CellValue::Text(record.technology().to_owned()),
        TaskField::Topics => CellValue::Text(record.topics().join(",")),
        TaskField::Section => CellValue::Text(record.section().to_owned()),
        TaskField::Source => CellValue::Text(record.source().to_owned()),
        TaskField::Level => CellValue::Text(record.level().to_owned()),
        TaskField::Kind => CellValue::Text(record.kind().to_owned()),
        TaskField::Status => CellValue::Text(record.status().to_owned()),
        TaskField::Priority => CellValue::Text(record.priority().to_owned()),
        TaskField::Progress => CellValue::Integer(record.progress()),
        TaskField::Order => CellValue::Integer(record.order()),
        TaskField::EstimatedDuration => CellValue::Number(record.estimated_duration()),
        TaskField::ActualDuration => CellValue::Number(record.actual_duration()),
        TaskField::DueDate => record
            .due_date()
            .map_or(CellValue::Missing, CellValue::Date),
        TaskField::StartDate => record
            .start_date()
            .map_or(CellValue::Missing, CellValue::Date),
        TaskField::EndDate => record
            .end_date()
            .map_or(CellValue::Missing, CellValue::Date),
        TaskField::Done => CellValue::Flag(record.done()),
    }
}

/// Compares two cells in ascending orientation.
///
/// Missing values sort before any present value; text compares
/// case-folded with a byte-order tiebreak; numbers use total ordering;
/// false sorts before true. Cells of different kinds (possible only when
/// a column mixes presence) fall back to kind rank.
#[must_use]
pub fn compare_cells(left: &CellValue, right: &CellValue) -> Ordering {
    match (left, right) {
        (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
        (CellValue::Missing, _) => Ordering::Less,
        (_, CellValue::Missing) => Ordering::Greater,
        (CellValue::Text(a), CellValue::Text(b)) => compare_text(a, b),
        (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
        (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
        (CellValue::Flag(a), CellValue::Flag(b)) => a.cmp(b),
        (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
        (a, b) => a.rank().cmp(&b.rank()),
    }
}

/// Case-folded lexicographic comparison approximating locale collation,
/// with the raw byte order as a deterministic tiebreak.
fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
