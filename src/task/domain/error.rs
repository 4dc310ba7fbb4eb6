//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The progress value lies outside the inclusive 0–100 range.
    #[error("progress {0} outside the 0..=100 range")]
    ProgressOutOfRange(i64),
}
