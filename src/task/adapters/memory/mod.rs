//! In-memory adapter for the persistence gateway port.

mod gateway;

pub use gateway::InMemoryTaskGateway;
