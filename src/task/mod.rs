//! Task rows and their persistence boundary.
//!
//! This module models the committed task aggregate, the typed field
//! registry used for inline editing, and the asynchronous gateway the
//! engine commits through. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
