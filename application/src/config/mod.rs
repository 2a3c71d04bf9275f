//! Application-level configuration.
//!
//! - [`ExecutionParams`]: query deadline and cancellation grace
//! - [`GovernorConfig`]: registry plus the ranking, verification and synthesis policies

pub mod execution_params;
pub mod governor_config;

pub use execution_params::{ExecutionParams, MAX_DEADLINE_SPAN, deadline_after};
pub use governor_config::GovernorConfig;
