//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the domain and
//! application objects exactly once, at startup.

mod decision_log;
mod governor;
mod output;
mod ranking;
mod specialists;
mod synthesis;
mod verification;

pub use decision_log::FileDecisionLogConfig;
pub use governor::FileGovernorConfig;
pub use output::FileOutputConfig;
pub use ranking::FileRankingConfig;
pub use specialists::{FileSpecialistConfig, to_registry};
pub use synthesis::FileSynthesisConfig;
pub use verification::FileVerificationConfig;

use ensemble_application::GovernorConfig;
use ensemble_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The configuration cannot be turned into a working governor
#[derive(Debug, Error)]
#[error("invalid configuration: {}", .issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct ConfigValidationError {
    /// Only the fatal issues
    pub issues: Vec<ConfigIssue>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Deadline settings
    pub governor: FileGovernorConfig,
    /// Scoring policy
    pub ranking: FileRankingConfig,
    /// Response assembly
    pub synthesis: FileSynthesisConfig,
    /// Ordered verification checks
    pub verification: FileVerificationConfig,
    /// The specialist registry
    pub specialists: Vec<FileSpecialistConfig>,
    /// Optional JSONL decision log
    pub decision_log: FileDecisionLogConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Specialist entries and the registry as a whole
    /// 2. Governor deadlines
    /// 3. Ranking policy and missing-confidence default
    /// 4. Synthesis margin and style
    /// 5. Verification check kinds and parameters
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.build().1
    }

    /// Convert into the governor configuration.
    ///
    /// Warnings are dropped here (callers wanting them use [`validate`](Self::validate));
    /// any error fails the conversion.
    pub fn to_governor_config(&self) -> Result<GovernorConfig, ConfigValidationError> {
        let (config, issues) = self.build();
        let errors: Vec<ConfigIssue> = issues.into_iter().filter(|i| i.is_error()).collect();
        match config {
            Some(config) if errors.is_empty() => Ok(config),
            _ => Err(ConfigValidationError { issues: errors }),
        }
    }

    fn build(&self) -> (Option<GovernorConfig>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let (registry, registry_issues) = to_registry(&self.specialists);
        issues.extend(registry_issues);
        let (execution, execution_issues) = self.governor.to_execution_params();
        issues.extend(execution_issues);
        let (ranker, ranking_issues) = self.ranking.to_ranker();
        issues.extend(ranking_issues);
        let (synthesizer, synthesis_issues) = self.synthesis.to_synthesizer();
        issues.extend(synthesis_issues);
        let (verifier, verification_issues) = self.verification.to_verifier();
        issues.extend(verification_issues);

        let config = registry.map(|registry| {
            GovernorConfig::new(registry)
                .with_ranker(ranker)
                .with_verifier(verifier)
                .with_synthesizer(synthesizer)
                .with_execution(execution)
        });
        (config, issues)
    }
}
