//! Board facade tying the row store, resolver, table model, and edit
//! session to one gateway.

use super::edit::{EditSession, SessionError};
use crate::table::{RowCollection, RowCollectionError, TableModel, TableView};
use crate::task::{
    domain::{NewTask, TaskId, TaskRecord},
    ports::{TaskGateway, TaskGatewayError},
};
use crate::taxonomy::services::{TaxonomyError, TaxonomyResolver};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors surfaced by the board facade.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// The persistence boundary failed or rejected the request.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),

    /// The row store lock was poisoned.
    #[error(transparent)]
    Rows(#[from] RowCollectionError),

    /// Option resolution failed.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// The edit session rejected the request.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The row has an open edit session and cannot be deleted.
    #[error("row {0} has an active edit session")]
    RowLocked(TaskId),
}

/// One editable task table: committed rows, derived view state, taxonomy
/// cache, and the exclusive edit session, all over a single gateway.
#[derive(Debug)]
pub struct TaskBoard<G> {
    gateway: Arc<G>,
    rows: RowCollection,
    resolver: Arc<TaxonomyResolver<G>>,
    session: EditSession<G>,
    table: TableModel,
}

impl<G: TaskGateway> TaskBoard<G> {
    /// Creates an empty board over the given gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        let rows = RowCollection::new();
        let resolver = Arc::new(TaxonomyResolver::new(Arc::clone(&gateway)));
        let session = EditSession::new(Arc::clone(&gateway), Arc::clone(&resolver), rows.clone());
        Self {
            gateway,
            rows,
            resolver,
            session,
            table: TableModel::new(),
        }
    }

    /// Overrides the edit session's defensive save timeout.
    #[must_use]
    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.session = EditSession::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.resolver),
            self.rows.clone(),
        )
        .with_save_timeout(timeout);
        self
    }

    /// Refetches every row and replaces the committed set, dropping any
    /// cached option lists.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the fetch fails; the existing
    /// rows are left untouched in that case.
    pub async fn reload(&self) -> BoardResult<usize> {
        let tasks = self.gateway.list_tasks().await?;
        let count = tasks.len();
        self.resolver.clear()?;
        self.rows.load(tasks)?;
        info!(rows = count, "row collection reloaded");
        Ok(count)
    }

    /// Creates a task through the gateway and inserts the canonical row.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when creation fails; no row is
    /// inserted in that case.
    pub async fn add_task(&self, new_task: &NewTask) -> BoardResult<TaskRecord> {
        let record = self.gateway.create_task(new_task).await?;
        self.rows.upsert(record.clone())?;
        info!(row = %record.id(), "task created");
        Ok(record)
    }

    /// Deletes a task pessimistically: the row leaves the collection only
    /// after the gateway acknowledges the delete.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RowLocked`] when the row has an open edit
    /// session, and [`BoardError::Gateway`] when the gateway refuses; the
    /// row stays in place on any failure.
    pub async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        if self.session.editing_row()? == Some(id) {
            return Err(BoardError::RowLocked(id));
        }
        self.gateway.delete_task(id).await?;
        self.rows.remove(id)?;
        info!(row = %id, "task deleted");
        Ok(())
    }

    /// Derives the current page from a snapshot of the committed rows.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Rows`] when the row store lock is poisoned.
    pub fn view(&self) -> BoardResult<TableView> {
        Ok(self.table.page(&self.rows.snapshot()?))
    }

    /// Returns the committed row store.
    #[must_use]
    pub const fn rows(&self) -> &RowCollection {
        &self.rows
    }

    /// Returns the edit session.
    #[must_use]
    pub const fn session(&self) -> &EditSession<G> {
        &self.session
    }

    /// Returns the taxonomy resolver.
    #[must_use]
    pub const fn resolver(&self) -> &Arc<TaxonomyResolver<G>> {
        &self.resolver
    }

    /// Returns the view state.
    #[must_use]
    pub const fn table(&self) -> &TableModel {
        &self.table
    }

    /// Returns the view state mutably for filter, sort, visibility, and
    /// pagination changes.
    pub const fn table_mut(&mut self) -> &mut TableModel {
        &mut self.table
    }
}
