//! Tabular view derivation over the committed row store.
//!
//! [`RowCollection`] keeps the identity-keyed rows; [`TableModel`]
//! derives the filtered, sorted, paginated, column-visible view from a
//! snapshot as a pure function.

mod compare;
mod rows;
mod view;

pub use compare::{CellValue, SortDirection, cell_value, compare_cells};
pub use rows::{RowCollection, RowCollectionError, RowsResult};
pub use view::{DEFAULT_PAGE_SIZE, SortKey, TableModel, TableView};

#[cfg(test)]
mod tests;
