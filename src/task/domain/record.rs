//! Task row aggregate and its construction parameter objects.

use super::{FieldValue, TaskDomainError, TaskField, TaskId, fields::PROGRESS_BOUNDS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameter object carrying every attribute of a task row.
///
/// Used to reconstruct committed rows from the persistence boundary; the
/// aggregate itself keeps its fields private.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSeed {
    /// Row identity.
    pub id: TaskId,
    /// Human-facing task code.
    pub display_id: String,
    /// Task title.
    pub title: String,
    /// Technology display name.
    pub technology: String,
    /// Subcategory display name.
    pub subcategory: String,
    /// Category display name.
    pub category: String,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Section grouping.
    pub section: String,
    /// Origin of the task.
    pub source: String,
    /// Difficulty or seniority level.
    pub level: String,
    /// Kind of work.
    pub kind: String,
    /// Workflow status.
    pub status: String,
    /// Priority bucket.
    pub priority: String,
    /// Completion percentage, 0–100 inclusive.
    pub progress: i64,
    /// Manual ordering weight.
    pub order: i64,
    /// Estimated duration in hours.
    pub estimated_duration: f64,
    /// Actual duration in hours.
    pub actual_duration: f64,
    /// Due date, if set.
    pub due_date: Option<NaiveDate>,
    /// Start date, if set.
    pub start_date: Option<NaiveDate>,
    /// End date, if set.
    pub end_date: Option<NaiveDate>,
    /// Completion flag.
    pub done: bool,
}

/// A committed task row.
///
/// Outside of an edit session the taxonomy invariant holds: the
/// subcategory belongs to the category and the technology to the
/// subcategory. The row identity never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    id: TaskId,
    display_id: String,
    title: String,
    technology: String,
    subcategory: String,
    category: String,
    topics: Vec<String>,
    section: String,
    source: String,
    level: String,
    kind: String,
    status: String,
    priority: String,
    progress: i64,
    order: i64,
    estimated_duration: f64,
    actual_duration: f64,
    due_date: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    done: bool,
}

impl TaskRecord {
    /// Reconstructs a row from its full attribute set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] when the progress
    /// value is not within 0–100 inclusive.
    pub fn from_seed(seed: TaskSeed) -> Result<Self, TaskDomainError> {
        let (min, max) = PROGRESS_BOUNDS;
        if seed.progress < min || seed.progress > max {
            return Err(TaskDomainError::ProgressOutOfRange(seed.progress));
        }
        Ok(Self {
            id: seed.id,
            display_id: seed.display_id,
            title: seed.title,
            technology: seed.technology,
            subcategory: seed.subcategory,
            category: seed.category,
            topics: seed.topics,
            section: seed.section,
            source: seed.source,
            level: seed.level,
            kind: seed.kind,
            status: seed.status,
            priority: seed.priority,
            progress: seed.progress,
            order: seed.order,
            estimated_duration: seed.estimated_duration,
            actual_duration: seed.actual_duration,
            due_date: seed.due_date,
            start_date: seed.start_date,
            end_date: seed.end_date,
            done: seed.done,
        })
    }

    /// Returns the row identity.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the human-facing task code.
    #[must_use]
    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the technology display name.
    #[must_use]
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// Returns the subcategory display name.
    #[must_use]
    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    /// Returns the category display name.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the topic tags.
    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Returns the section grouping.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the task origin.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the difficulty or seniority level.
    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Returns the kind of work.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the workflow status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the priority bucket.
    #[must_use]
    pub fn priority(&self) -> &str {
        &self.priority
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> i64 {
        self.progress
    }

    /// Returns the manual ordering weight.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the estimated duration in hours.
    #[must_use]
    pub const fn estimated_duration(&self) -> f64 {
        self.estimated_duration
    }

    /// Returns the actual duration in hours.
    #[must_use]
    pub const fn actual_duration(&self) -> f64 {
        self.actual_duration
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the start date, if set.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the end date, if set.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.done
    }

    /// Renders the field as the string shown in a table cell.
    #[must_use]
    pub fn display_value(&self, field: TaskField) -> String {
        match field {
            TaskField::DisplayId => self.display_id.clone(),
            TaskField::Title => self.title.clone(),
            TaskField::Category => self.category.clone(),
            TaskField::Subcategory => self.subcategory.clone(),
            TaskField::Technology => self.technology.clone(),
            TaskField::Topics => self.topics.join(", "),
            TaskField::Section => self.section.clone(),
            TaskField::Source => self.source.clone(),
            TaskField::Level => self.level.clone(),
            TaskField::Kind => self.kind.clone(),
            TaskField::Status => self.status.clone(),
            TaskField::Priority => self.priority.clone(),
            TaskField::Progress => self.progress.to_string(),
            TaskField::Order => self.order.to_string(),
            TaskField::EstimatedDuration => self.estimated_duration.to_string(),
            TaskField::ActualDuration => self.actual_duration.to_string(),
            TaskField::DueDate => render_date(self.due_date),
            TaskField::StartDate => render_date(self.start_date),
            TaskField::EndDate => render_date(self.end_date),
            TaskField::Done => self.done.to_string(),
        }
    }

    /// Writes a coerced value into the addressed field.
    ///
    /// The registry guarantees the value variant matches the field kind;
    /// a mismatched pairing cannot be produced through
    /// [`FieldKind::coerce`](super::FieldKind::coerce) and is ignored.
    pub(crate) fn set_cell(&mut self, field: TaskField, value: FieldValue) {
        match (field, value) {
            (TaskField::DisplayId, FieldValue::Text(text)) => self.display_id = text,
            (TaskField::Title, FieldValue::Text(text)) => self.title = text,
            (TaskField::Category, FieldValue::Text(text)) => self.category = text,
            (TaskField::Subcategory, FieldValue::Text(text)) => self.subcategory = text,
            (TaskField::Technology, FieldValue::Text(text)) => self.technology = text,
            (TaskField::Topics, FieldValue::Topics(topics)) => self.topics = topics,
            (TaskField::Section, FieldValue::Text(text)) => self.section = text,
            (TaskField::Source, FieldValue::Text(text)) => self.source = text,
            (TaskField::Level, FieldValue::Text(text)) => self.level = text,
            (TaskField::Kind, FieldValue::Text(text)) => self.kind = text,
            (TaskField::Status, FieldValue::Text(text)) => self.status = text,
            (TaskField::Priority, FieldValue::Text(text)) => self.priority = text,
            (TaskField::Progress, FieldValue::Integer(number)) => self.progress = number,
            (TaskField::Order, FieldValue::Integer(number)) => self.order = number,
            (TaskField::EstimatedDuration, FieldValue::Number(number)) => {
                self.estimated_duration = number;
            }
            (TaskField::ActualDuration, FieldValue::Number(number)) => {
                self.actual_duration = number;
            }
            (TaskField::DueDate, FieldValue::Date(date)) => self.due_date = date,
            (TaskField::StartDate, FieldValue::Date(date)) => self.start_date = date,
            (TaskField::EndDate, FieldValue::Date(date)) => self.end_date = date,
            (TaskField::Done, FieldValue::Flag(flag)) => self.done = flag,
            _ => {}
        }
    }
}

fn render_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parameter object for creating a new task through the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Human-facing task code.
    pub display_id: String,
    /// Task title.
    pub title: String,
    /// Technology display name.
    pub technology: String,
    /// Subcategory display name.
    pub subcategory: String,
    /// Category display name.
    pub category: String,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Section grouping.
    pub section: String,
    /// Origin of the task.
    pub source: String,
    /// Difficulty or seniority level.
    pub level: String,
    /// Kind of work.
    pub kind: String,
    /// Workflow status.
    pub status: String,
    /// Priority bucket.
    pub priority: String,
    /// Completion percentage, 0–100 inclusive.
    pub progress: i64,
    /// Manual ordering weight.
    pub order: i64,
    /// Estimated duration in hours.
    pub estimated_duration: f64,
    /// Actual duration in hours.
    pub actual_duration: f64,
    /// Due date, if set.
    pub due_date: Option<NaiveDate>,
    /// Start date, if set.
    pub start_date: Option<NaiveDate>,
    /// End date, if set.
    pub end_date: Option<NaiveDate>,
    /// Completion flag.
    pub done: bool,
}

impl NewTask {
    /// Creates a new-task payload with the given title and defaults
    /// everywhere else.
    #[must_use]
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
