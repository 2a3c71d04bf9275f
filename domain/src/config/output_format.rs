//! Output format value object

use serde::{Deserialize, Serialize};

/// How a query report is rendered for the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Final answer text only (default)
    #[default]
    Answer,
    /// Answer plus evidence trail, failures and verification history
    Full,
    /// The whole report as JSON
    Json,
}
