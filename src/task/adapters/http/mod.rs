//! REST adapter for the persistence gateway port.

mod gateway;
pub mod wire;

pub use gateway::HttpTaskGateway;
