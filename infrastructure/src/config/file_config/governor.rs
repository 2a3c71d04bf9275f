//! Governor timing configuration from TOML (`[governor]` section)
//!
//! ```toml
//! [governor]
//! default_deadline_ms = 10000
//! cancellation_grace_ms = 50
//! ```

use ensemble_application::ExecutionParams;
use ensemble_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGovernorConfig {
    /// Query budget used when a query carries none
    pub default_deadline_ms: u64,
    /// How long in-flight calls may outlive the deadline
    pub cancellation_grace_ms: u64,
}

impl Default for FileGovernorConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            default_deadline_ms: params.default_deadline.as_millis() as u64,
            cancellation_grace_ms: params.cancellation_grace.as_millis() as u64,
        }
    }
}

impl FileGovernorConfig {
    /// Convert to [`ExecutionParams`]. A zero deadline is an error and falls
    /// back to the built-in default.
    pub fn to_execution_params(&self) -> (ExecutionParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut params = ExecutionParams::default()
            .with_cancellation_grace(Duration::from_millis(self.cancellation_grace_ms));

        if self.default_deadline_ms == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "governor.default_deadline_ms".to_string(),
                    value: "0".to_string(),
                },
                "governor.default_deadline_ms must be greater than 0",
            ));
        } else {
            params = params.with_default_deadline(Duration::from_millis(self.default_deadline_ms));
        }

        (params, issues)
    }
}
