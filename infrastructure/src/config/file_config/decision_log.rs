//! Decision log configuration from TOML (`[decision_log]` section)
//!
//! ```toml
//! [decision_log]
//! path = "~/.local/state/ensemble-governor/decisions.jsonl"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDecisionLogConfig {
    /// JSONL file receiving one record per query; unset disables the log
    pub path: Option<String>,
}

impl FileDecisionLogConfig {
    /// The configured path with a leading `~` expanded to the home directory
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let raw = self.path.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}
