//! Verification configuration from TOML (`[[verification.checks]]` entries)
//!
//! Checks run in declaration order; an empty list keeps the default
//! verifier (non-empty answer only).
//!
//! ```toml
//! [[verification.checks]]
//! kind = "min_confidence"
//! threshold = 0.2
//!
//! [[verification.checks]]
//! kind = "blocked_terms"
//! terms = ["rm -rf /"]
//! ```

use ensemble_domain::{CheckSpec, ConfigIssue, ConfigIssueCode, Verifier};
use serde::{Deserialize, Serialize};

const VALID_KINDS: &[&str] = &[
    "non_empty",
    "min_confidence",
    "blocked_terms",
    "max_length",
    "reference_terms",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVerificationConfig {
    /// Kept as raw tables so that an unknown kind becomes a reported issue
    /// instead of a hard parse failure.
    pub checks: Vec<toml::Value>,
}

impl FileVerificationConfig {
    pub fn parse_checks(&self) -> (Vec<CheckSpec>, Vec<ConfigIssue>) {
        let mut specs = Vec::new();
        let mut issues = Vec::new();

        for (index, raw) in self.checks.iter().enumerate() {
            let kind = raw
                .get("kind")
                .and_then(|k| k.as_str())
                .unwrap_or("<missing>")
                .to_string();

            match raw.clone().try_into::<CheckSpec>() {
                Ok(spec) => match spec.parameter_error() {
                    None => specs.push(spec),
                    Some(reason) => issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidCheck { index, kind },
                        format!("verification.checks[{}]: {}", index, reason),
                    )),
                },
                Err(e) if !VALID_KINDS.contains(&kind.as_str()) => {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidEnumValue {
                            field: format!("verification.checks[{}].kind", index),
                            value: kind,
                            valid_values: VALID_KINDS.iter().map(|k| k.to_string()).collect(),
                        },
                        format!("verification.checks[{}]: unknown check kind ({})", index, e),
                    ));
                }
                Err(e) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidCheck { index, kind },
                    format!("verification.checks[{}]: {}", index, e),
                )),
            }
        }

        (specs, issues)
    }

    pub fn to_verifier(&self) -> (Verifier, Vec<ConfigIssue>) {
        let (specs, issues) = self.parse_checks();
        let verifier = if specs.is_empty() {
            Verifier::default()
        } else {
            Verifier::from_specs(&specs)
        };
        (verifier, issues)
    }
}
