//! Domain model for the classification taxonomy.
//!
//! The taxonomy domain models the category → subcategory → technology
//! hierarchy and the flat enumerations as dimensions whose values are
//! `{id, name}` options, keeping all fetching concerns in the service
//! layer.

mod dimension;
mod option;

pub use dimension::{CascadeParent, Dimension};
pub use option::{OptionId, OptionItem};
