//! Application layer for ensemble-governor
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, GovernorConfig};
pub use ports::{
    decision_logger::{DecisionLogger, NoDecisionLogger},
    observer::{NoObserver, PipelineObserver},
    specialist_gateway::{SpecialistError, SpecialistGateway, SpecialistRequest},
};
pub use use_cases::dispatch::{DispatchOutcome, Dispatcher};
pub use use_cases::handle_query::HandleQueryUseCase;
pub use use_cases::invoke_specialist::SpecialistClient;
