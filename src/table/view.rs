//! View derivation: filtering, stable multi-key sorting, pagination, and
//! column visibility.

use super::compare::{SortDirection, cell_value, compare_cells};
use crate::task::domain::{TaskField, TaskRecord};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One sort criterion; priority equals position in the key list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    field: TaskField,
    direction: SortDirection,
}

impl SortKey {
    /// Creates a sort key.
    #[must_use]
    pub const fn new(field: TaskField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Returns the sorted field.
    #[must_use]
    pub const fn field(self) -> TaskField {
        self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(self) -> SortDirection {
        self.direction
    }

    const fn flip(self) -> Self {
        Self::new(self.field, self.direction.flipped())
    }
}

/// Synchronous, pure derivation of the displayed view from a row
/// snapshot.
///
/// Holds the active filter, sort, visibility, and pagination state; never
/// awaits I/O and never mutates the rows it is given.
#[derive(Debug, Clone)]
pub struct TableModel {
    text_filter: String,
    column_filters: HashMap<TaskField, HashSet<String>>,
    sort_keys: Vec<SortKey>,
    hidden_columns: HashSet<TaskField>,
    page_size: usize,
    page_index: usize,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TableModel {
    /// Creates a model with no filters, no sort keys, every column
    /// visible, and the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text_filter: String::new(),
            column_filters: HashMap::new(),
            sort_keys: Vec::new(),
            hidden_columns: HashSet::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 0,
        }
    }

    /// Sets the free-text filter matched case-insensitively against the
    /// title.
    pub fn set_text_filter(&mut self, text: impl Into<String>) {
        self.text_filter = text.into();
        self.page_index = 0;
    }

    /// Restricts a column to a set of accepted display values; an empty
    /// set clears the restriction.
    pub fn set_column_filter(
        &mut self,
        field: TaskField,
        values: impl IntoIterator<Item = String>,
    ) {
        let selected: HashSet<String> = values.into_iter().collect();
        if selected.is_empty() {
            self.column_filters.remove(&field);
        } else {
            self.column_filters.insert(field, selected);
        }
        self.page_index = 0;
    }

    /// Clears the set-membership filter of a column.
    pub fn clear_column_filter(&mut self, field: TaskField) {
        self.column_filters.remove(&field);
        self.page_index = 0;
    }

    /// Plain header click: collapses the sort-key list to this column
    /// ascending, or flips the direction when it is already the sole
    /// active key.
    pub fn toggle_sort(&mut self, field: TaskField) {
        if let [only] = self.sort_keys.as_slice()
            && only.field() == field
        {
            self.sort_keys = vec![only.flip()];
            return;
        }
        self.sort_keys = vec![SortKey::new(field, SortDirection::Ascending)];
    }

    /// Modified header click: appends the column ascending when absent,
    /// or flips its direction in place without reordering other keys.
    pub fn extend_sort(&mut self, field: TaskField) {
        match self.sort_keys.iter_mut().find(|key| key.field() == field) {
            Some(key) => *key = key.flip(),
            None => self
                .sort_keys
                .push(SortKey::new(field, SortDirection::Ascending)),
        }
    }

    /// Returns the active sort keys in priority order.
    #[must_use]
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    /// Shows or hides a column.
    pub fn set_column_visible(&mut self, field: TaskField, visible: bool) {
        if visible {
            self.hidden_columns.remove(&field);
        } else {
            self.hidden_columns.insert(field);
        }
    }

    /// Whether a column is rendered.
    #[must_use]
    pub fn is_column_visible(&self, field: TaskField) -> bool {
        !self.hidden_columns.contains(&field)
    }

    /// Returns the visible columns in canonical order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<TaskField> {
        TaskField::ALL
            .into_iter()
            .filter(|field| self.is_column_visible(*field))
            .collect()
    }

    /// Sets the page size; zero is lifted to one.
    pub const fn set_page_size(&mut self, size: usize) {
        self.page_size = if size == 0 { 1 } else { size };
    }

    /// Moves to the given zero-based page; clamped during derivation.
    pub const fn set_page_index(&mut self, index: usize) {
        self.page_index = index;
    }

    /// Derives the current page from a row snapshot.
    ///
    /// Hidden columns take no part in rendering but are still evaluated
    /// by filters and sort keys.
    #[must_use]
    pub fn page(&self, rows: &[TaskRecord]) -> TableView {
        let mut matching: Vec<TaskRecord> = rows
            .iter()
            .filter(|row| self.matches(row))
            .cloned()
            .collect();
        matching.sort_by(|left, right| self.compare_rows(left, right));

        let total = matching.len();
        let page_count = total.div_ceil(self.page_size);
        let page_index = self.page_index.min(page_count.saturating_sub(1));
        let rows_on_page: Vec<TaskRecord> = matching
            .into_iter()
            .skip(page_index.saturating_mul(self.page_size))
            .take(self.page_size)
            .collect();

        TableView {
            rows: rows_on_page,
            total,
            page_count,
            page_index,
            columns: self.visible_columns(),
        }
    }

    /// A row passes when it matches the text filter and every active
    /// set-membership filter.
    fn matches(&self, row: &TaskRecord) -> bool {
        if !self.text_filter.is_empty() {
            let needle = self.text_filter.to_lowercase();
            if !row.title().to_lowercase().contains(&needle) {
                return false;
            }
        }
        self.column_filters
            .iter()
            .all(|(field, accepted)| accepted.contains(&row.display_value(*field)))
    }

    /// Multi-key comparator: the first key producing a non-equal result
    /// wins; full ties keep the filtered sequence's relative order
    /// through the stable sort.
    fn compare_rows(&self, left: &TaskRecord, right: &TaskRecord) -> Ordering {
        self.sort_keys
            .iter()
            .map(|key| {
                key.direction().orient(compare_cells(
                    &cell_value(left, key.field()),
                    &cell_value(right, key.field()),
                ))
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// One derived page of the table, plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    rows: Vec<TaskRecord>,
    total: usize,
    page_count: usize,
    page_index: usize,
    columns: Vec<TaskField>,
}

impl TableView {
    /// Returns the rows on this page in display order.
    #[must_use]
    pub fn rows(&self) -> &[TaskRecord] {
        &self.rows
    }

    /// Returns the number of rows matching the active filters.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of pages at the current page size.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the effective (clamped) page index.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Returns the visible columns in canonical order.
    #[must_use]
    pub fn columns(&self) -> &[TaskField] {
        &self.columns
    }

    /// Renders the page as cell text, one entry per visible column; a
    /// hidden column contributes no data here.
    #[must_use]
    pub fn rendered_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|field| row.display_value(*field))
                    .collect()
            })
            .collect()
    }
}
