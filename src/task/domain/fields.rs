//! Typed registry of editable task fields.
//!
//! Every editable column is a [`TaskField`] with a statically known
//! [`FieldKind`]; each kind carries exactly one coercion strategy, so raw
//! user input is always folded into a representable [`FieldValue`] instead
//! of being dispatched through stringly-typed field names.

use crate::taxonomy::domain::Dimension;
use chrono::{DateTime, NaiveDate};

/// Inclusive progress bounds enforced by coercion.
pub const PROGRESS_BOUNDS: (i64, i64) = (0, 100);

/// An editable column of a task row.
///
/// The committed identity (`id`) is deliberately absent: no edit may ever
/// change a row's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Human-facing task code (wire `task_id`).
    DisplayId,
    /// Task title (wire `task`).
    Title,
    /// Taxonomy category, displayed by name.
    Category,
    /// Taxonomy subcategory, displayed by name.
    Subcategory,
    /// Taxonomy technology, displayed by name.
    Technology,
    /// Free-form topic tags.
    Topics,
    /// Section grouping within the dashboard.
    Section,
    /// Origin of the task.
    Source,
    /// Difficulty or seniority level.
    Level,
    /// Kind of work (wire `type`).
    Kind,
    /// Workflow status.
    Status,
    /// Priority bucket.
    Priority,
    /// Completion percentage, 0–100 inclusive.
    Progress,
    /// Manual ordering weight.
    Order,
    /// Estimated duration in hours.
    EstimatedDuration,
    /// Actual duration in hours.
    ActualDuration,
    /// Due date.
    DueDate,
    /// Start date.
    StartDate,
    /// End date.
    EndDate,
    /// Completion flag.
    Done,
}

impl TaskField {
    /// Every editable field in canonical column order.
    pub const ALL: [Self; 20] = [
        Self::DisplayId,
        Self::Title,
        Self::Category,
        Self::Subcategory,
        Self::Technology,
        Self::Topics,
        Self::Section,
        Self::Source,
        Self::Level,
        Self::Kind,
        Self::Status,
        Self::Priority,
        Self::Progress,
        Self::Order,
        Self::EstimatedDuration,
        Self::ActualDuration,
        Self::DueDate,
        Self::StartDate,
        Self::EndDate,
        Self::Done,
    ];

    /// Returns the column key used on the wire and in view state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DisplayId => "task_id",
            Self::Title => "task",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Technology => "technology",
            Self::Topics => "topics",
            Self::Section => "section",
            Self::Source => "source",
            Self::Level => "level",
            Self::Kind => "type",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Progress => "progress",
            Self::Order => "order",
            Self::EstimatedDuration => "estimated_duration",
            Self::ActualDuration => "actual_duration",
            Self::DueDate => "due_date",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Done => "done",
        }
    }

    /// Looks up the field's coercion kind in the registry.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::DisplayId | Self::Title | Self::Section => FieldKind::Text,
            Self::Category => FieldKind::Choice(Dimension::Category),
            Self::Subcategory => FieldKind::Choice(Dimension::Subcategory),
            Self::Technology => FieldKind::Choice(Dimension::Technology),
            Self::Topics => FieldKind::Topics,
            Self::Source => FieldKind::Choice(Dimension::Source),
            Self::Level => FieldKind::Choice(Dimension::Level),
            Self::Kind => FieldKind::Choice(Dimension::Kind),
            Self::Status => FieldKind::Choice(Dimension::Status),
            Self::Priority => FieldKind::Choice(Dimension::Priority),
            Self::Progress => FieldKind::BoundedInteger {
                min: PROGRESS_BOUNDS.0,
                max: PROGRESS_BOUNDS.1,
            },
            Self::Order => FieldKind::Integer,
            Self::EstimatedDuration | Self::ActualDuration => FieldKind::Number,
            Self::DueDate | Self::StartDate | Self::EndDate => FieldKind::Date,
            Self::Done => FieldKind::Flag,
        }
    }

    /// Returns the dimension backing this field when it is a choice field.
    #[must_use]
    pub const fn choice_dimension(self) -> Option<Dimension> {
        match self.kind() {
            FieldKind::Choice(dimension) => Some(dimension),
            _ => None,
        }
    }
}

/// Coercion strategy attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, kept verbatim.
    Text,
    /// Whole number; unparseable input falls back to zero.
    Integer,
    /// Whole number clamped into an inclusive range.
    BoundedInteger {
        /// Lower inclusive bound.
        min: i64,
        /// Upper inclusive bound.
        max: i64,
    },
    /// Fractional number; unparseable input falls back to zero.
    Number,
    /// Boolean coerced through truthiness.
    Flag,
    /// Calendar date normalised to ISO-8601, cleared when malformed.
    Date,
    /// Comma-separated list of trimmed tags.
    Topics,
    /// Reference into a taxonomy or enumeration dimension, held by name.
    Choice(Dimension),
}

impl FieldKind {
    /// Coerces raw user input into a value representable by this kind.
    ///
    /// Coercion is total: malformed input folds to a safe default rather
    /// than failing, so a draft can never hold an unrepresentable value.
    #[must_use]
    pub fn coerce(self, raw: &str) -> FieldValue {
        match self {
            Self::Text | Self::Choice(_) => FieldValue::Text(raw.to_owned()),
            Self::Integer => FieldValue::Integer(parse_integer(raw)),
            Self::BoundedInteger { min, max } => {
                FieldValue::Integer(parse_integer(raw).clamp(min, max))
            }
            Self::Number => FieldValue::Number(raw.trim().parse().unwrap_or(0.0)),
            Self::Flag => FieldValue::Flag(parse_flag(raw)),
            Self::Date => FieldValue::Date(parse_date(raw)),
            Self::Topics => FieldValue::Topics(parse_topics(raw)),
        }
    }
}

/// A coerced field value, tagged by representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Verbatim or name-valued text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Fractional number.
    Number(f64),
    /// Boolean flag.
    Flag(bool),
    /// Present or cleared calendar date.
    Date(Option<NaiveDate>),
    /// Trimmed topic tags.
    Topics(Vec<String>),
}

fn parse_integer(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Truthiness folding: empty, `false`, and `0` are falsy; everything else
/// is truthy.
fn parse_flag(raw: &str) -> bool {
    let normalized = raw.trim().to_ascii_lowercase();
    !(normalized.is_empty() || normalized == "false" || normalized == "0")
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; anything else clears the
/// date.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_owned)
        .collect()
}
