//! Tessera: tabular data-editing engine for task dashboards.
//!
//! The crate owns the data and interaction semantics behind an editable
//! task table: committed rows, view derivation, cascading taxonomy
//! options, and an exclusive inline-edit session, all committed through
//! an asynchronous persistence gateway.
//!
//! # Architecture
//!
//! Tessera follows hexagonal architecture principles:
//!
//! - **Domain**: Pure row, field, and draft logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete gateway implementations (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task rows, the typed field registry, drafts, and the
//!   persistence gateway with its adapters
//! - [`taxonomy`]: Option dimensions and cascading option resolution
//! - [`table`]: The committed row store and pure view derivation
//! - [`session`]: The exclusive edit session and the board facade

pub mod session;
pub mod table;
pub mod task;
pub mod taxonomy;
