//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod decision_logger;
pub mod observer;
pub mod specialist_gateway;
