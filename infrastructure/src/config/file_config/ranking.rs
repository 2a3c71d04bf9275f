//! Ranking configuration from TOML (`[ranking]` section)
//!
//! ```toml
//! [ranking]
//! policy = "priority_first"   # or "weighted_confidence"
//! missing_confidence = 0.5
//! ```

use ensemble_domain::ranking::DEFAULT_MISSING_CONFIDENCE;
use ensemble_domain::{ConfigIssue, ConfigIssueCode, Ranker, ScoringKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRankingConfig {
    pub policy: String,
    /// Confidence assumed for candidates that report none
    pub missing_confidence: f64,
}

impl Default for FileRankingConfig {
    fn default() -> Self {
        Self {
            policy: ScoringKind::default().as_str().to_string(),
            missing_confidence: DEFAULT_MISSING_CONFIDENCE,
        }
    }
}

impl FileRankingConfig {
    /// Parse the policy, falling back to the default with a warning.
    pub fn parse_policy(&self) -> (ScoringKind, Vec<ConfigIssue>) {
        match self.policy.parse::<ScoringKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => (
                ScoringKind::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "ranking.policy".to_string(),
                        value: self.policy.clone(),
                        valid_values: vec![
                            "priority_first".to_string(),
                            "weighted_confidence".to_string(),
                        ],
                    },
                    format!(
                        "ranking.policy: unknown value '{}', falling back to '{}'",
                        self.policy,
                        ScoringKind::default().as_str()
                    ),
                )],
            ),
        }
    }

    pub fn to_ranker(&self) -> (Ranker, Vec<ConfigIssue>) {
        let (kind, mut issues) = self.parse_policy();

        let valid = self.missing_confidence.is_finite()
            && (0.0..=1.0).contains(&self.missing_confidence);
        let missing = if valid {
            self.missing_confidence
        } else {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "ranking.missing_confidence".to_string(),
                    value: self.missing_confidence.to_string(),
                },
                "ranking.missing_confidence must be between 0.0 and 1.0",
            ));
            DEFAULT_MISSING_CONFIDENCE
        };

        (Ranker::new(kind.into_policy(missing)), issues)
    }
}
