//! Exclusive inline-edit session state machine.

use crate::table::{RowCollection, RowCollectionError};
use crate::task::{
    domain::{CascadeEffect, TaskDraft, TaskField, TaskId, TaskRecord},
    ports::{TaskGateway, TaskGatewayError, TaskUpdate},
};
use crate::taxonomy::{
    domain::{CascadeParent, Dimension, OptionId},
    services::{CascadeOutcome, EditOptions, TaxonomyResolver},
};
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default ceiling on how long a save may stay in flight.
pub const DEFAULT_SAVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for edit session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the edit session.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A row is already being edited or saved; one edit per table.
    #[error("a row is already being edited")]
    EditInProgress,

    /// The operation needs an active edit and none exists.
    #[error("no edit in progress")]
    NoActiveEdit,

    /// A categorical display name did not resolve to an option id.
    #[error("unknown {dimension} option: {name}")]
    UnknownOption {
        /// Dimension the translation ran against.
        dimension: Dimension,
        /// The unresolved display name.
        name: String,
    },

    /// The gateway rejected the save; the draft is retained.
    #[error("save failed: {0}")]
    SaveFailed(#[source] TaskGatewayError),

    /// The save did not complete within the defensive timeout.
    #[error("save timed out after {timeout:?}")]
    SaveTimedOut {
        /// The ceiling that elapsed.
        timeout: Duration,
    },

    /// Committing the canonical row to the row store failed.
    #[error(transparent)]
    Rows(#[from] RowCollectionError),

    /// Shared session state was poisoned by a panicked thread.
    #[error("session state poisoned")]
    StatePoisoned,
}

/// Observable phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No active edit.
    Idle,
    /// A draft is open for editing.
    Editing,
    /// A save is in flight.
    Saving,
    /// The last save failed; the draft is retained for retry.
    Failed,
}

/// Result of a completed save call.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum SaveOutcome {
    /// The canonical row was committed to the row store.
    Saved(TaskRecord),
    /// The session moved on while the save was in flight; the response
    /// was discarded without observable effect.
    Superseded,
}

#[derive(Debug)]
struct ActiveEdit {
    draft: TaskDraft,
    options: EditOptions,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Editing(Box<ActiveEdit>),
    Saving(Box<ActiveEdit>),
    Failed {
        edit: Box<ActiveEdit>,
        message: String,
    },
}

#[derive(Debug)]
struct SessionCore {
    phase: Phase,
    epoch: u64,
}

impl SessionCore {
    /// Advances the epoch, logically invalidating any in-flight request
    /// issued under an earlier one.
    const fn bump(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }
}

/// Per-table edit session holding at most one row's draft.
///
/// The exclusive-edit invariant lives here, not in any rendering layer:
/// starting a second edit is rejected by the state machine itself.
#[derive(Debug)]
pub struct EditSession<G> {
    gateway: Arc<G>,
    resolver: Arc<TaxonomyResolver<G>>,
    rows: RowCollection,
    state: Mutex<SessionCore>,
    save_timeout: Duration,
}

impl<G: TaskGateway> EditSession<G> {
    /// Creates an idle session over the given collaborators.
    #[must_use]
    pub const fn new(
        gateway: Arc<G>,
        resolver: Arc<TaxonomyResolver<G>>,
        rows: RowCollection,
    ) -> Self {
        Self {
            gateway,
            resolver,
            rows,
            state: Mutex::new(SessionCore {
                phase: Phase::Idle,
                epoch: 0,
            }),
            save_timeout: DEFAULT_SAVE_TIMEOUT,
        }
    }

    /// Overrides the defensive save timeout.
    #[must_use]
    pub const fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.save_timeout = timeout;
        self
    }

    fn lock(&self) -> SessionResult<MutexGuard<'_, SessionCore>> {
        self.state.lock().map_err(|_| SessionError::StatePoisoned)
    }

    /// Returns the current phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StatePoisoned`] when the session lock is
    /// poisoned.
    pub fn status(&self) -> SessionResult<SessionStatus> {
        Ok(match self.lock()?.phase {
            Phase::Idle => SessionStatus::Idle,
            Phase::Editing(_) => SessionStatus::Editing,
            Phase::Saving(_) => SessionStatus::Saving,
            Phase::Failed { .. } => SessionStatus::Failed,
        })
    }

    /// Returns the id of the row under edit, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StatePoisoned`] when the session lock is
    /// poisoned.
    pub fn editing_row(&self) -> SessionResult<Option<TaskId>> {
        Ok(match &self.lock()?.phase {
            Phase::Idle => None,
            Phase::Editing(edit) | Phase::Saving(edit) | Phase::Failed { edit, .. } => {
                Some(edit.draft.record().id())
            }
        })
    }

    /// Returns a copy of the draft's current contents, if a draft exists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StatePoisoned`] when the session lock is
    /// poisoned.
    pub fn draft_record(&self) -> SessionResult<Option<TaskRecord>> {
        Ok(match &self.lock()?.phase {
            Phase::Idle => None,
            Phase::Editing(edit) | Phase::Saving(edit) | Phase::Failed { edit, .. } => {
                Some(edit.draft.record().clone())
            }
        })
    }

    /// Returns a copy of the option snapshot backing the edit form.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StatePoisoned`] when the session lock is
    /// poisoned.
    pub fn edit_options(&self) -> SessionResult<Option<EditOptions>> {
        Ok(match &self.lock()?.phase {
            Phase::Idle => None,
            Phase::Editing(edit) | Phase::Saving(edit) | Phase::Failed { edit, .. } => {
                Some(edit.options.clone())
            }
        })
    }

    /// Returns the failure message of the last save, if the session is
    /// in the failed phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StatePoisoned`] when the session lock is
    /// poisoned.
    pub fn failure_message(&self) -> SessionResult<Option<String>> {
        Ok(match &self.lock()?.phase {
            Phase::Failed { message, .. } => Some(message.clone()),
            _ => None,
        })
    }

    /// Starts editing a row, snapshotting it into a draft and prefetching
    /// the option lists its edit form preselects against.
    ///
    /// Allowed only while idle: the session enforces a single concurrent
    /// edit per table. Prefetch failure is recoverable; the session opens
    /// with empty option lists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EditInProgress`] when another edit is
    /// active; the session state is left unchanged.
    pub async fn start_edit(&self, row: &TaskRecord) -> SessionResult<()> {
        let epoch = {
            let mut core = self.lock()?;
            if !matches!(core.phase, Phase::Idle) {
                return Err(SessionError::EditInProgress);
            }
            core.phase = Phase::Editing(Box::new(ActiveEdit {
                draft: TaskDraft::new(row.clone()),
                options: EditOptions::empty(),
            }));
            core.bump()
        };
        debug!(row = %row.id(), "edit started");

        match self.resolver.resolve_row(row).await {
            Ok(options) => {
                let mut core = self.lock()?;
                if core.epoch == epoch
                    && let Phase::Editing(edit) = &mut core.phase
                {
                    edit.options = options;
                }
            }
            Err(err) => {
                warn!(row = %row.id(), error = %err, "option prefetch failed; edit continues");
            }
        }
        Ok(())
    }

    /// Writes raw input into the draft through the field registry,
    /// cascading dependent option lists when a taxonomy parent changed.
    ///
    /// Coercion is total, so malformed input can never corrupt the
    /// draft. Cascade fetch failures are recoverable and leave the
    /// previously loaded lists in place.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveEdit`] unless the session is in
    /// the editing phase.
    pub async fn edit_field(&self, field: TaskField, raw: &str) -> SessionResult<()> {
        let pending = {
            let mut core = self.lock()?;
            let epoch = core.epoch;
            let Phase::Editing(edit) = &mut core.phase else {
                return Err(SessionError::NoActiveEdit);
            };
            let input = normalize_choice_input(&edit.options, field, raw);
            match edit.draft.apply(field, &input) {
                CascadeEffect::None => None,
                CascadeEffect::CategoryChanged => {
                    edit.options.clear_list(Dimension::Subcategory);
                    edit.options.clear_list(Dimension::Technology);
                    let parent_id = edit
                        .options
                        .find_id(Dimension::Category, edit.draft.record().category());
                    edit.options.set_selection(Dimension::Category, parent_id);
                    Some((CascadeParent::Category, parent_id, epoch))
                }
                CascadeEffect::SubcategoryChanged => {
                    edit.options.clear_list(Dimension::Technology);
                    let parent_id = edit
                        .options
                        .find_id(Dimension::Subcategory, edit.draft.record().subcategory());
                    edit.options
                        .set_selection(Dimension::Subcategory, parent_id);
                    Some((CascadeParent::Subcategory, parent_id, epoch))
                }
            }
        };

        if let Some((parent, parent_id, epoch)) = pending {
            match self.resolver.on_parent_change(parent, parent_id).await {
                Ok(CascadeOutcome::Applied(list)) => {
                    let mut core = self.lock()?;
                    if core.epoch == epoch
                        && let Phase::Editing(edit) = &mut core.phase
                    {
                        edit.options.replace_list(parent.child_dimension(), list);
                    }
                }
                Ok(CascadeOutcome::Superseded) => {}
                Err(err) => {
                    warn!(parent = %parent.dimension(), error = %err, "cascade refresh failed");
                }
            }
        }
        Ok(())
    }

    /// Discards the draft and returns to idle; the committed row is
    /// unaffected regardless of how many fields were modified.
    ///
    /// Also logically invalidates any in-flight prefetch or save for
    /// this session: their eventual completion produces no observable
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveEdit`] when the session is idle.
    pub fn cancel_edit(&self) -> SessionResult<()> {
        let mut core = self.lock()?;
        if matches!(core.phase, Phase::Idle) {
            return Err(SessionError::NoActiveEdit);
        }
        core.phase = Phase::Idle;
        core.bump();
        debug!("edit cancelled; draft discarded");
        Ok(())
    }

    /// Saves the draft: translates categorical display names to ids,
    /// commits through the gateway under the defensive timeout, and
    /// applies the canonical result to the row store.
    ///
    /// On failure the draft is retained exactly as the user left it and
    /// the row store is untouched; the call may be retried or cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveEdit`] unless a draft is open or
    /// retryable, [`SessionError::UnknownOption`] when a display name
    /// does not resolve, and [`SessionError::SaveFailed`] or
    /// [`SessionError::SaveTimedOut`] when the gateway commit fails.
    pub async fn save_edit(&self) -> SessionResult<SaveOutcome> {
        let (row_id, update, epoch) = {
            let mut core = self.lock()?;
            let edit = match mem::replace(&mut core.phase, Phase::Idle) {
                Phase::Editing(edit) => edit,
                Phase::Failed { edit, .. } => edit,
                other => {
                    core.phase = other;
                    return Err(SessionError::NoActiveEdit);
                }
            };
            let row_id = edit.draft.record().id();
            match build_update(&edit) {
                Ok(update) => {
                    core.phase = Phase::Saving(edit);
                    let epoch = core.bump();
                    (row_id, update, epoch)
                }
                Err(err) => {
                    core.phase = Phase::Failed {
                        edit,
                        message: err.to_string(),
                    };
                    core.bump();
                    return Err(err);
                }
            }
        };
        debug!(row = %row_id, "saving draft");

        let result = tokio::time::timeout(
            self.save_timeout,
            self.gateway.update_task(row_id, &update),
        )
        .await;

        let mut core = self.lock()?;
        if core.epoch != epoch {
            debug!(row = %row_id, "discarding stale save completion");
            return Ok(SaveOutcome::Superseded);
        }
        let Phase::Saving(edit) = mem::replace(&mut core.phase, Phase::Idle) else {
            return Ok(SaveOutcome::Superseded);
        };
        match result {
            Ok(Ok(record)) => {
                core.bump();
                drop(core);
                self.rows.upsert(record.clone())?;
                debug!(row = %record.id(), "save committed");
                Ok(SaveOutcome::Saved(record))
            }
            Ok(Err(err)) => {
                warn!(row = %row_id, error = %err, "save failed; draft retained");
                core.phase = Phase::Failed {
                    edit,
                    message: err.to_string(),
                };
                core.bump();
                Err(SessionError::SaveFailed(err))
            }
            Err(_elapsed) => {
                warn!(
                    row = %row_id,
                    timeout = ?self.save_timeout,
                    "save timed out; draft retained"
                );
                core.phase = Phase::Failed {
                    edit,
                    message: format!("save timed out after {:?}", self.save_timeout),
                };
                core.bump();
                Err(SessionError::SaveTimedOut {
                    timeout: self.save_timeout,
                })
            }
        }
    }
}

/// Select inputs arrive as option ids; free text arrives verbatim. Both
/// are folded to the option's display name when they resolve within the
/// field's dimension.
fn normalize_choice_input(options: &EditOptions, field: TaskField, raw: &str) -> String {
    field
        .choice_dimension()
        .and_then(|dimension| options.find_option(dimension, raw))
        .map_or_else(|| raw.to_owned(), |option| option.name().to_owned())
}

fn build_update(edit: &ActiveEdit) -> SessionResult<TaskUpdate> {
    let record = edit.draft.record();
    Ok(TaskUpdate {
        display_id: record.display_id().to_owned(),
        title: record.title().to_owned(),
        category_id: translate(&edit.options, Dimension::Category, record.category())?,
        subcategory_id: translate(&edit.options, Dimension::Subcategory, record.subcategory())?,
        technology_id: translate(&edit.options, Dimension::Technology, record.technology())?,
        status_id: translate(&edit.options, Dimension::Status, record.status())?,
        priority_id: translate(&edit.options, Dimension::Priority, record.priority())?,
        kind_id: translate(&edit.options, Dimension::Kind, record.kind())?,
        level_id: translate(&edit.options, Dimension::Level, record.level())?,
        source_id: translate(&edit.options, Dimension::Source, record.source())?,
        topics: record.topics().to_vec(),
        section: record.section().to_owned(),
        progress: record.progress(),
        order: record.order(),
        estimated_duration: record.estimated_duration(),
        actual_duration: record.actual_duration(),
        due_date: record.due_date(),
        start_date: record.start_date(),
        end_date: record.end_date(),
        done: record.done(),
    })
}

fn translate(
    options: &EditOptions,
    dimension: Dimension,
    name: &str,
) -> SessionResult<Option<OptionId>> {
    if name.is_empty() {
        return Ok(None);
    }
    options
        .find_id(dimension, name)
        .map(Some)
        .ok_or_else(|| SessionError::UnknownOption {
            dimension,
            name: name.to_owned(),
        })
}
