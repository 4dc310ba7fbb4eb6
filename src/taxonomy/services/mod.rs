//! Taxonomy resolution services.

mod resolver;

pub use resolver::{CascadeOutcome, EditOptions, TaxonomyError, TaxonomyResolver, TaxonomyResult};
