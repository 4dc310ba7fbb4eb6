//! In-memory gateway for tests and offline use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, TaskId, TaskRecord, TaskSeed},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult, TaskUpdate},
};
use crate::taxonomy::domain::{Dimension, OptionId, OptionItem};

/// Thread-safe in-memory task gateway with a seedable taxonomy.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<TaskRecord>,
    categories: Vec<OptionItem>,
    subcategories: HashMap<OptionId, Vec<OptionItem>>,
    technologies: HashMap<OptionId, Vec<OptionItem>>,
    flat: HashMap<Dimension, Vec<OptionItem>>,
    next_option_id: i64,
}

impl MemoryState {
    fn mint_option(&mut self, name: &str) -> OptionItem {
        self.next_option_id += 1;
        OptionItem::new(OptionId::new(self.next_option_id), name)
    }

    fn option_name(&self, dimension: Dimension, id: OptionId) -> Option<String> {
        let list: Vec<&OptionItem> = match dimension {
            Dimension::Category => self.categories.iter().collect(),
            Dimension::Subcategory => self.subcategories.values().flatten().collect(),
            Dimension::Technology => self.technologies.values().flatten().collect(),
            flat => self
                .flat
                .get(&flat)
                .map(|l| l.iter().collect())
                .unwrap_or_default(),
        };
        list.iter()
            .find(|option| option.id() == id)
            .map(|option| option.name().to_owned())
    }

    fn resolve_name(
        &self,
        dimension: Dimension,
        id: Option<OptionId>,
    ) -> TaskGatewayResult<String> {
        id.map_or_else(
            || Ok(String::new()),
            |option_id| {
                self.option_name(dimension, option_id)
                    .ok_or(TaskGatewayError::UnknownOption {
                        dimension,
                        id: option_id,
                    })
            },
        )
    }
}

impl InMemoryTaskGateway {
    /// Creates an empty in-memory gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskGatewayResult<std::sync::RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|err| TaskGatewayError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskGatewayResult<std::sync::RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|err| TaskGatewayError::persistence(std::io::Error::other(err.to_string())))
    }

    /// Seeds a category and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the backing lock is poisoned.
    pub fn seed_category(&self, name: &str) -> TaskGatewayResult<OptionId> {
        let mut state = self.write()?;
        let option = state.mint_option(name);
        let id = option.id();
        state.categories.push(option);
        state.subcategories.entry(id).or_default();
        Ok(id)
    }

    /// Seeds a subcategory under an existing category.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::UnknownOption`] when the category does
    /// not exist.
    pub fn seed_subcategory(&self, category: OptionId, name: &str) -> TaskGatewayResult<OptionId> {
        let mut state = self.write()?;
        if !state.categories.iter().any(|option| option.id() == category) {
            return Err(TaskGatewayError::UnknownOption {
                dimension: Dimension::Category,
                id: category,
            });
        }
        let option = state.mint_option(name);
        let id = option.id();
        state
            .subcategories
            .entry(category)
            .or_default()
            .push(option);
        state.technologies.entry(id).or_default();
        Ok(id)
    }

    /// Seeds a technology under an existing subcategory.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::UnknownOption`] when the subcategory
    /// does not exist.
    pub fn seed_technology(
        &self,
        subcategory: OptionId,
        name: &str,
    ) -> TaskGatewayResult<OptionId> {
        let mut state = self.write()?;
        if !state
            .subcategories
            .values()
            .flatten()
            .any(|option| option.id() == subcategory)
        {
            return Err(TaskGatewayError::UnknownOption {
                dimension: Dimension::Subcategory,
                id: subcategory,
            });
        }
        let option = state.mint_option(name);
        let id = option.id();
        state
            .technologies
            .entry(subcategory)
            .or_default()
            .push(option);
        Ok(id)
    }

    /// Seeds options of a flat enumeration dimension.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Rejected`] when the dimension belongs
    /// to the taxonomy cascade.
    pub fn seed_flat(
        &self,
        dimension: Dimension,
        names: &[&str],
    ) -> TaskGatewayResult<Vec<OptionId>> {
        if !Dimension::FLAT.contains(&dimension) {
            return Err(TaskGatewayError::Rejected(format!(
                "{dimension} is not a flat dimension"
            )));
        }
        let mut state = self.write()?;
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let option = state.mint_option(name);
            ids.push(option.id());
            state.flat.entry(dimension).or_default().push(option);
        }
        Ok(ids)
    }

    /// Inserts a pre-built task row, bypassing payload validation.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the backing lock is poisoned.
    pub fn seed_task(&self, record: TaskRecord) -> TaskGatewayResult<()> {
        let mut state = self.write()?;
        state.tasks.push(record);
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_tasks(&self) -> TaskGatewayResult<Vec<TaskRecord>> {
        Ok(self.read()?.tasks.clone())
    }

    async fn create_task(&self, new_task: &NewTask) -> TaskGatewayResult<TaskRecord> {
        let seed = TaskSeed {
            id: TaskId::new(),
            display_id: new_task.display_id.clone(),
            title: new_task.title.clone(),
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
        };
        let record = TaskRecord::from_seed(seed)
            .map_err(|err| TaskGatewayError::Rejected(err.to_string()))?;
        let mut state = self.write()?;
        state.tasks.push(record.clone());
        Ok(record)
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskGatewayResult<TaskRecord> {
        let mut state = self.write()?;
        let position = state
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskGatewayError::NotFound(id))?;

        let seed = TaskSeed {
            id,
            display_id: update.display_id.clone(),
            title: update.title.clone(),
            technology: state.resolve_name(Dimension::Technology, update.technology_id)?,
            subcategory: state.resolve_name(Dimension::Subcategory, update.subcategory_id)?,
            category: state.resolve_name(Dimension::Category, update.category_id)?,
            topics: update.topics.clone(),
            section: update.section.clone(),
            source: state.resolve_name(Dimension::Source, update.source_id)?,
            level: state.resolve_name(Dimension::Level, update.level_id)?,
            kind: state.resolve_name(Dimension::Kind, update.kind_id)?,
            status: state.resolve_name(Dimension::Status, update.status_id)?,
            priority: state.resolve_name(Dimension::Priority, update.priority_id)?,
            progress: update.progress,
            order: update.order,
            estimated_duration: update.estimated_duration,
            actual_duration: update.actual_duration,
            due_date: update.due_date,
            start_date: update.start_date,
            end_date: update.end_date,
            done: update.done,
        };
        let record = TaskRecord::from_seed(seed)
            .map_err(|err| TaskGatewayError::Rejected(err.to_string()))?;
        if let Some(slot) = state.tasks.get_mut(position) {
            *slot = record.clone();
        }
        Ok(record)
    }

    async fn delete_task(&self, id: TaskId) -> TaskGatewayResult<()> {
        let mut state = self.write()?;
        let position = state
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskGatewayError::NotFound(id))?;
        state.tasks.remove(position);
        Ok(())
    }

    async fn list_options(
        &self,
        dimension: Dimension,
        parent: Option<OptionId>,
    ) -> TaskGatewayResult<Vec<OptionItem>> {
        let state = self.read()?;
        match dimension {
            Dimension::Category => Ok(state.categories.clone()),
            Dimension::Subcategory => {
                let scope = parent.ok_or(TaskGatewayError::MissingScope(dimension))?;
                Ok(state.subcategories.get(&scope).cloned().unwrap_or_default())
            }
            Dimension::Technology => {
                let scope = parent.ok_or(TaskGatewayError::MissingScope(dimension))?;
                Ok(state.technologies.get(&scope).cloned().unwrap_or_default())
            }
            flat => Ok(state.flat.get(&flat).cloned().unwrap_or_default()),
        }
    }
}
