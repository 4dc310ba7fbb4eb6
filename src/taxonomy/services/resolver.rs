//! Cascading option resolution with a single, explicitly invalidated cache.

use crate::task::ports::{TaskGateway, TaskGatewayError};
use crate::task::domain::TaskRecord;
use crate::taxonomy::domain::{CascadeParent, Dimension, OptionId, OptionItem};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for taxonomy resolution.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

/// Errors surfaced by taxonomy resolution.
///
/// All of them are recoverable: previously loaded option lists stay in
/// place and the edit session remains usable.
#[derive(Debug, Clone, Error)]
pub enum TaxonomyError {
    /// The option fetch failed at the persistence boundary.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),

    /// Shared resolver state was poisoned by a panicked thread.
    #[error("resolver state poisoned")]
    StatePoisoned,
}

/// One consistent snapshot of option lists and the row's selections,
/// ready for an edit form to preselect against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions {
    lists: HashMap<Dimension, Vec<OptionItem>>,
    selections: HashMap<Dimension, Option<OptionId>>,
}

impl EditOptions {
    /// Creates a snapshot with every list empty and nothing selected.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the loaded options of a dimension.
    #[must_use]
    pub fn list(&self, dimension: Dimension) -> &[OptionItem] {
        self.lists.get(&dimension).map_or(&[], Vec::as_slice)
    }

    /// Returns the id selected for a dimension, if the row's display name
    /// resolved to one.
    #[must_use]
    pub fn selection(&self, dimension: Dimension) -> Option<OptionId> {
        self.selections.get(&dimension).copied().flatten()
    }

    /// Looks up an option id by display name within a dimension.
    #[must_use]
    pub fn find_id(&self, dimension: Dimension, name: &str) -> Option<OptionId> {
        self.list(dimension)
            .iter()
            .find(|option| option.name() == name)
            .map(OptionItem::id)
    }

    /// Looks up an option within a dimension by id rendered as text or by
    /// display name, whichever matches first.
    #[must_use]
    pub fn find_option(&self, dimension: Dimension, raw: &str) -> Option<&OptionItem> {
        let trimmed = raw.trim();
        self.list(dimension).iter().find(|option| {
            option.id().to_string() == trimmed || option.name() == trimmed
        })
    }

    /// Replaces a dimension's option list.
    pub fn replace_list(&mut self, dimension: Dimension, options: Vec<OptionItem>) {
        self.lists.insert(dimension, options);
    }

    /// Clears a dimension's option list and selection.
    pub fn clear_list(&mut self, dimension: Dimension) {
        self.lists.insert(dimension, Vec::new());
        self.selections.insert(dimension, None);
    }

    /// Records the selected id for a dimension.
    pub fn set_selection(&mut self, dimension: Dimension, id: Option<OptionId>) {
        self.selections.insert(dimension, id);
    }
}

/// Result of a parent-change cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeOutcome {
    /// The child list was refetched under the new parent scope.
    Applied(Vec<OptionItem>),
    /// A newer parent change superseded this one; nothing was applied.
    Superseded,
}

/// Resolves taxonomy and enumeration options through the gateway,
/// caching each `(dimension, parent)` list until a parent change
/// explicitly invalidates it.
#[derive(Debug)]
pub struct TaxonomyResolver<G> {
    gateway: Arc<G>,
    state: Mutex<ResolverState>,
}

#[derive(Debug, Default)]
struct ResolverState {
    cache: HashMap<(Dimension, Option<OptionId>), Vec<OptionItem>>,
    generations: HashMap<Dimension, u64>,
}

impl ResolverState {
    fn generation(&self, dimension: Dimension) -> u64 {
        self.generations.get(&dimension).copied().unwrap_or(0)
    }

    fn bump(&mut self, dimension: Dimension) {
        let next = self.generation(dimension).wrapping_add(1);
        self.generations.insert(dimension, next);
    }
}

impl<G: TaskGateway> TaxonomyResolver<G> {
    /// Creates a resolver over the given gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(ResolverState::default()),
        }
    }

    fn lock(&self) -> TaxonomyResult<MutexGuard<'_, ResolverState>> {
        self.state.lock().map_err(|_| TaxonomyError::StatePoisoned)
    }

    /// Drops every cached option list, forcing refetches.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::StatePoisoned`] when the cache lock is
    /// poisoned.
    pub fn clear(&self) -> TaxonomyResult<()> {
        let mut state = self.lock()?;
        state.cache.clear();
        Ok(())
    }

    /// Fetches one dimension's option list, serving cache hits without a
    /// gateway round trip. A list fetched under a generation that has
    /// since moved on is returned but not cached.
    async fn fetch_list(
        &self,
        dimension: Dimension,
        parent: Option<OptionId>,
    ) -> TaxonomyResult<Vec<OptionItem>> {
        let (cached, issued) = {
            let state = self.lock()?;
            (
                state.cache.get(&(dimension, parent)).cloned(),
                state.generation(dimension),
            )
        };
        if let Some(list) = cached {
            return Ok(list);
        }
        let fetched = self.gateway.list_options(dimension, parent).await?;
        let mut state = self.lock()?;
        if state.generation(dimension) == issued {
            state.cache.insert((dimension, parent), fetched.clone());
        }
        Ok(fetched)
    }

    /// Resolves every option list and id-equivalent a row needs for its
    /// edit form, as a single consistent snapshot.
    ///
    /// Flat enumerations and categories load concurrently; subcategories
    /// are only requested once the row's category name has resolved to an
    /// id, and technologies only once the subcategory has.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Gateway`] when any fetch fails; nothing
    /// already cached is discarded.
    pub async fn resolve_row(&self, record: &TaskRecord) -> TaxonomyResult<EditOptions> {
        let (categories, statuses, priorities, kinds, levels, sources) = tokio::try_join!(
            self.fetch_list(Dimension::Category, None),
            self.fetch_list(Dimension::Status, None),
            self.fetch_list(Dimension::Priority, None),
            self.fetch_list(Dimension::Kind, None),
            self.fetch_list(Dimension::Level, None),
            self.fetch_list(Dimension::Source, None),
        )?;

        let category_id = find_id(&categories, record.category());
        let subcategories = match category_id {
            Some(scope) => self.fetch_list(Dimension::Subcategory, Some(scope)).await?,
            None => Vec::new(),
        };
        let subcategory_id = find_id(&subcategories, record.subcategory());
        let technologies = match subcategory_id {
            Some(scope) => self.fetch_list(Dimension::Technology, Some(scope)).await?,
            None => Vec::new(),
        };
        let technology_id = find_id(&technologies, record.technology());

        let mut options = EditOptions::empty();
        options.set_selection(Dimension::Category, category_id);
        options.set_selection(Dimension::Subcategory, subcategory_id);
        options.set_selection(Dimension::Technology, technology_id);
        options.set_selection(Dimension::Status, find_id(&statuses, record.status()));
        options.set_selection(Dimension::Priority, find_id(&priorities, record.priority()));
        options.set_selection(Dimension::Kind, find_id(&kinds, record.kind()));
        options.set_selection(Dimension::Level, find_id(&levels, record.level()));
        options.set_selection(Dimension::Source, find_id(&sources, record.source()));
        options.replace_list(Dimension::Category, categories);
        options.replace_list(Dimension::Subcategory, subcategories);
        options.replace_list(Dimension::Technology, technologies);
        options.replace_list(Dimension::Status, statuses);
        options.replace_list(Dimension::Priority, priorities);
        options.replace_list(Dimension::Kind, kinds);
        options.replace_list(Dimension::Level, levels);
        options.replace_list(Dimension::Source, sources);
        Ok(options)
    }

    /// Refetches the dependent option list after a cascade parent changed.
    ///
    /// Deterministic and idempotent: repeated calls with the same argument
    /// yield the same child list. A call superseded by a newer one for the
    /// same level is discarded silently. A `None` parent clears the child
    /// list without touching the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Gateway`] when the fetch fails; previously
    /// loaded lists stay in place.
    pub async fn on_parent_change(
        &self,
        parent: CascadeParent,
        parent_id: Option<OptionId>,
    ) -> TaxonomyResult<CascadeOutcome> {
        let child = parent.child_dimension();
        let issued = {
            let mut state = self.lock()?;
            state.cache.retain(|(dimension, _), _| {
                *dimension != child && Some(*dimension) != child.child()
            });
            state.bump(child);
            if let Some(grandchild) = child.child() {
                state.bump(grandchild);
            }
            state.generation(child)
        };

        let Some(scope) = parent_id else {
            debug!(parent = %parent.dimension(), "cascade cleared without a parent scope");
            return Ok(CascadeOutcome::Applied(Vec::new()));
        };

        let fetched = match self.gateway.list_options(child, Some(scope)).await {
            Ok(list) => list,
            Err(err) => {
                warn!(child = %child, %scope, error = %err, "cascade fetch failed");
                return Err(err.into());
            }
        };

        let mut state = self.lock()?;
        if state.generation(child) != issued {
            debug!(child = %child, %scope, "discarding superseded cascade response");
            return Ok(CascadeOutcome::Superseded);
        }
        state.cache.insert((child, Some(scope)), fetched.clone());
        Ok(CascadeOutcome::Applied(fetched))
    }
}

fn find_id(options: &[OptionItem], name: &str) -> Option<OptionId> {
    options
        .iter()
        .find(|option| option.name() == name)
        .map(OptionItem::id)
}
