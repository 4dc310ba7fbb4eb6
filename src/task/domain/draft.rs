//! Uncommitted edit drafts.

use super::{FieldValue, TaskField, TaskRecord};

/// Dependent lists that must be refreshed after a field edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeEffect {
    /// No dependent field was affected.
    None,
    /// The category changed: subcategory and technology were cleared.
    CategoryChanged,
    /// The subcategory changed: technology was cleared.
    SubcategoryChanged,
}

/// An in-memory, uncommitted copy of exactly one task row.
///
/// The draft may transiently violate the taxonomy invariant while the
/// user is still picking dependent values; the committed row is never
/// touched until a save succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    record: TaskRecord,
}

impl TaskDraft {
    /// Snapshots a committed row into a draft.
    #[must_use]
    pub const fn new(record: TaskRecord) -> Self {
        Self { record }
    }

    /// Returns the draft's current contents.
    #[must_use]
    pub const fn record(&self) -> &TaskRecord {
        &self.record
    }

    /// Consumes the draft, yielding its contents.
    #[must_use]
    pub fn into_record(self) -> TaskRecord {
        self.record
    }

    /// Coerces raw input through the field registry and writes it into
    /// the draft, clearing dependent taxonomy fields when a cascade
    /// parent changed.
    pub fn apply(&mut self, field: TaskField, raw: &str) -> CascadeEffect {
        let value = field.kind().coerce(raw);
        self.record.set_cell(field, value);
        match field {
            TaskField::Category => {
                self.record
                    .set_cell(TaskField::Subcategory, FieldValue::Text(String::new()));
                self.record
                    .set_cell(TaskField::Technology, FieldValue::Text(String::new()));
                CascadeEffect::CategoryChanged
            }
            TaskField::Subcategory => {
                self.record
                    .set_cell(TaskField::Technology, FieldValue::Text(String::new()));
                CascadeEffect::SubcategoryChanged
            }
            _ => CascadeEffect::None,
        }
    }
}
