//! Classification taxonomy and cascading option resolution.
//!
//! The taxonomy module owns the category → subcategory → technology
//! hierarchy, the flat enumerations, and the resolver that converts
//! between name-based and id-based representations while caching option
//! lists per `(dimension, parent)` scope.
//!
//! - Domain types in [`domain`]
//! - Resolution services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
