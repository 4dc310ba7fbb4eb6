//! Identity-keyed, insertion-ordered store of committed task rows.

use crate::task::domain::{TaskId, TaskRecord};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Result type for row store operations.
pub type RowsResult<T> = Result<T, RowCollectionError>;

/// Errors returned by the row store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowCollectionError {
    /// The shared row store was poisoned by a panicked thread.
    #[error("row store poisoned")]
    Poisoned,
}

/// Thread-safe, insertion-ordered collection of committed rows.
///
/// A row's id is immutable for its lifetime; no operation changes an
/// existing row's id or position. Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct RowCollection {
    state: Arc<RwLock<Vec<TaskRecord>>>,
}

impl RowCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire set after a full fetch.
    ///
    /// Duplicate ids keep the position of their first occurrence with the
    /// last occurrence's data.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn load(&self, rows: Vec<TaskRecord>) -> RowsResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RowCollectionError::Poisoned)?;
        state.clear();
        for row in rows {
            upsert_in(&mut state, row);
        }
        Ok(())
    }

    /// Inserts the row, or replaces it in place when the id is known.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn upsert(&self, row: TaskRecord) -> RowsResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RowCollectionError::Poisoned)?;
        upsert_in(&mut state, row);
        Ok(())
    }

    /// Removes the row with the given id; a no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn remove(&self, id: TaskId) -> RowsResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RowCollectionError::Poisoned)?;
        state.retain(|row| row.id() != id);
        Ok(())
    }

    /// Returns a copy of the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn get(&self, id: TaskId) -> RowsResult<Option<TaskRecord>> {
        let state = self.state.read().map_err(|_| RowCollectionError::Poisoned)?;
        Ok(state.iter().find(|row| row.id() == id).cloned())
    }

    /// Returns a point-in-time copy of every row in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn snapshot(&self) -> RowsResult<Vec<TaskRecord>> {
        let state = self.state.read().map_err(|_| RowCollectionError::Poisoned)?;
        Ok(state.clone())
    }

    /// Returns the number of rows.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn len(&self) -> RowsResult<usize> {
        let state = self.state.read().map_err(|_| RowCollectionError::Poisoned)?;
        Ok(state.len())
    }

    /// Whether the collection holds no rows.
    ///
    /// # Errors
    ///
    /// Returns [`RowCollectionError::Poisoned`] when the store lock is
    /// poisoned.
    pub fn is_empty(&self) -> RowsResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn upsert_in(rows: &mut Vec<TaskRecord>, row: TaskRecord) {
    match rows.iter_mut().find(|existing| existing.id() == row.id()) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}
