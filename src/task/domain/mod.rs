//! Domain model for task rows and their editable fields.
//!
//! The task domain models the committed row aggregate, the uncommitted
//! edit draft, and the typed registry of editable fields with their
//! coercion strategies, keeping all fetching and persistence concerns
//! outside of the domain boundary.

mod draft;
mod error;
mod fields;
mod ids;
mod record;

pub use draft::{CascadeEffect, TaskDraft};
pub use error::TaskDomainError;
pub use fields::{FieldKind, FieldValue, PROGRESS_BOUNDS, TaskField};
pub use ids::TaskId;
pub use record::{NewTask, TaskRecord, TaskSeed};
