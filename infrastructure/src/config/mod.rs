//! Configuration file loading for ensemble-governor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ENSEMBLE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./ensemble.toml` or `./.ensemble.toml`
//! 4. User config: `$XDG_CONFIG_HOME/ensemble-governor/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDecisionLogConfig, FileGovernorConfig,
    FileOutputConfig, FileRankingConfig, FileSpecialistConfig, FileSynthesisConfig,
    FileVerificationConfig,
};
pub use loader::ConfigLoader;
