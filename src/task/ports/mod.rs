//! Port contracts for task persistence.
//!
//! Ports define the abstract boundary the editing engine commits through;
//! concrete transports live in the adapters module.

pub mod gateway;

pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult, TaskUpdate};

#[cfg(test)]
pub use gateway::MockTaskGateway;
