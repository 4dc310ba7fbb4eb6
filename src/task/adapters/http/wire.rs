//! Wire models for the REST persistence boundary.

use crate::task::{
    domain::{NewTask, TaskId, TaskRecord, TaskSeed},
    ports::{TaskGatewayError, TaskUpdate},
};
use crate::taxonomy::domain::{OptionId, OptionItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task row as it travels over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWire {
    /// Row identity.
    pub id: Uuid,
    /// Human-facing task code.
    pub task_id: String,
    /// Task title.
    pub task: String,
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
    #[serde(rename = "type")]
    pub kind: String,
    /// Workflow status.
    pub status: String,
    /// Priority bucket.
    pub priority: String,
    /// Completion percentage.
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

impl TaskWire {
    /// Converts the wire row into the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::MalformedResponse`] when the payload
    /// violates domain invariants.
    pub fn into_record(self) -> Result<TaskRecord, TaskGatewayError> {
        let seed = TaskSeed {
            id: TaskId::from_uuid(self.id),
            display_id: self.task_id,
            title: self.task,
            technology: self.technology,
            subcategory: self.subcategory,
            category: self.category,
            topics: self.topics,
            section: self.section,
            source: self.source,
            level: self.level,
            kind: self.kind,
            status: self.status,
            priority: self.priority,
            progress: self.progress,
            order: self.order,
            estimated_duration: self.estimated_duration,
            actual_duration: self.actual_duration,
            due_date: self.due_date,
            start_date: self.start_date,
            end_date: self.end_date,
            done: self.done,
        };
        TaskRecord::from_seed(seed)
            .map_err(|err| TaskGatewayError::MalformedResponse(err.to_string()))
    }
}

/// Update payload as transmitted on `PUT /tasks/{id}`.
///
/// Every categorical display-name field has been translated to its
/// corresponding `*_id` field before transmission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWire {
    /// Human-facing task code.
    pub task_id: String,
    /// Task title.
    pub task: String,
    /// Category option reference.
    pub category_id: Option<i64>,
    /// Subcategory option reference.
    pub subcategory_id: Option<i64>,
    /// Technology option reference.
    pub technology_id: Option<i64>,
    /// Status option reference.
    pub status_id: Option<i64>,
    /// Priority option reference.
    pub priority_id: Option<i64>,
    /// Kind option reference.
    #[serde(rename = "type_id")]
    pub kind_id: Option<i64>,
    /// Level option reference.
    pub level_id: Option<i64>,
    /// Source option reference.
    pub source_id: Option<i64>,
    /// Topic tags.
    pub topics: Vec<String>,
    /// Section grouping.
    pub section: String,
    /// Completion percentage.
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

impl From<&TaskUpdate> for UpdateWire {
    fn from(update: &TaskUpdate) -> Self {
        Self {
            task_id: update.display_id.clone(),
            task: update.title.clone(),
            category_id: update.category_id.map(OptionId::value),
            subcategory_id: update.subcategory_id.map(OptionId::value),
            technology_id: update.technology_id.map(OptionId::value),
            status_id: update.status_id.map(OptionId::value),
            priority_id: update.priority_id.map(OptionId::value),
            kind_id: update.kind_id.map(OptionId::value),
            level_id: update.level_id.map(OptionId::value),
            source_id: update.source_id.map(OptionId::value),
            topics: update.topics.clone(),
            section: update.section.clone(),
            progress: update.progress,
            order: update.order,
            estimated_duration: update.estimated_duration,
            actual_duration: update.actual_duration,
            due_date: update.due_date,
            start_date: update.start_date,
            end_date: update.end_date,
            done: update.done,
        }
    }
}

/// New-task payload as transmitted on `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskWire {
    /// Human-facing task code.
    pub task_id: String,
    /// Task title.
    pub task: String,
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
    #[serde(rename = "type")]
    pub kind: String,
    /// Workflow status.
    pub status: String,
    /// Priority bucket.
    pub priority: String,
    /// Completion percentage.
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

impl From<&NewTask> for NewTaskWire {
    fn from(new_task: &NewTask) -> Self {
        Self {
            task_id: new_task.display_id.clone(),
            task: new_task.title.clone(),
            technology: new_task.technology.clone(),
            subcategory: new_task.subcategory.clone(),
            category: new_task.category.clone(),
            topics: new_task.topics.clone(),
            section: new_task.section.clone(),
            source: new_task.source.clone(),
            level: new_task.level.clone(),
            kind: new_task.kind.clone(),
            status: new_task.status.clone(),
            priority: new_task.priority.clone(),
            progress: new_task.progress,
            order: new_task.order,
            estimated_duration: new_task.estimated_duration,
            actual_duration: new_task.actual_duration,
            due_date: new_task.due_date,
            start_date: new_task.start_date,
            end_date: new_task.end_date,
            done: new_task.done,
        }
    }
}

/// Option as it travels over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionWire {
    /// Option identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl From<OptionWire> for OptionItem {
    fn from(wire: OptionWire) -> Self {
        Self::new(OptionId::new(wire.id), wire.name)
    }
}
