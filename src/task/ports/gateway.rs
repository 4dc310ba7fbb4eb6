//! Persistence gateway port for task rows and option lookups.

use crate::task::domain::{NewTask, TaskId, TaskRecord};
use crate::taxonomy::domain::{Dimension, OptionId, OptionItem};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// Asynchronous persistence boundary the editing engine commits through.
///
/// The engine depends only on this contract's shape; responses may arrive
/// in any order relative to issuance and callers are responsible for
/// discarding stale ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Fetches every task row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError`] when the backing store is unreachable
    /// or replies with a malformed payload.
    async fn list_tasks(&self) -> TaskGatewayResult<Vec<TaskRecord>>;

    /// Creates a task and returns the canonical stored row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError`] when the store rejects the payload.
    async fn create_task(&self, new_task: &NewTask) -> TaskGatewayResult<TaskRecord>;

    /// Updates a task and returns the canonical stored row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the row does not exist,
    /// or another variant when the store rejects the payload.
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskGatewayResult<TaskRecord>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the row does not exist.
    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()>;

    /// Lists the options of a dimension, scoped to a parent option for the
    /// dependent taxonomy levels.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::MissingScope`] when a scoped dimension
    /// is queried without a parent.
    async fn list_options(
        &self,
        dimension: Dimension,
        parent: Option<OptionId>,
    ) -> TaskGatewayResult<Vec<OptionItem>>;
}

/// Update payload sent over the wire on save.
///
/// Categorical fields travel as option identifiers; the edit session
/// translates display names before building this payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    /// Human-facing task code.
    pub display_id: String,
    /// Task title.
    pub title: String,
    /// Category option reference.
    pub category_id: Option<OptionId>,
    /// Subcategory option reference.
    pub subcategory_id: Option<OptionId>,
    /// Technology option reference.
    pub technology_id: Option<OptionId>,
    /// Status option reference.
    pub status_id: Option<OptionId>,
    /// Priority option reference.
    pub priority_id: Option<OptionId>,
    /// Kind option reference.
    pub kind_id: Option<OptionId>,
    /// Level option reference.
    pub level_id: Option<OptionId>,
    /// Source option reference.
    pub source_id: Option<OptionId>,
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

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The task row was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A scoped dimension was queried without a parent option.
    #[error("{0} options require a parent scope")]
    MissingScope(Dimension),

    /// An option reference did not resolve within its dimension.
    #[error("unknown {dimension} option id {id}")]
    UnknownOption {
        /// Dimension the lookup ran against.
        dimension: Dimension,
        /// The unresolved identifier.
        id: OptionId,
    },

    /// The store rejected the submitted payload.
    #[error("payload rejected: {0}")]
    Rejected(String),

    /// The store replied with a payload the engine cannot interpret.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Transport or persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskGatewayError {
    /// Wraps a persistence or transport error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
