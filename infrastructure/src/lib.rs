//! Infrastructure layer for ensemble-governor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod specialists;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig};
pub use logging::JsonlDecisionLogger;
#[cfg(feature = "http-specialists")]
pub use specialists::http::HttpSpecialistAdapter;
pub use specialists::{
    TransportAdapter, TransportKind, routing::RoutingSpecialistGateway,
    static_adapter::StaticSpecialistAdapter,
};
