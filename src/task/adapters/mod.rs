//! Adapter implementations of the task persistence port.

pub mod http;
pub mod memory;
