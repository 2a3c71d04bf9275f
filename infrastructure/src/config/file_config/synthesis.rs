//! Synthesis configuration from TOML (`[synthesis]` section)
//!
//! ```toml
//! [synthesis]
//! closeness_margin = 0.05   # score window for corroborating candidates
//! style = "primary"         # or "annotated"
//! ```

use ensemble_domain::synthesis::DEFAULT_CLOSENESS_MARGIN;
use ensemble_domain::{ConfigIssue, ConfigIssueCode, SynthesisStyle, Synthesizer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSynthesisConfig {
    pub closeness_margin: f64,
    pub style: String,
}

impl Default for FileSynthesisConfig {
    fn default() -> Self {
        Self {
            closeness_margin: DEFAULT_CLOSENESS_MARGIN,
            style: "primary".to_string(),
        }
    }
}

impl FileSynthesisConfig {
    pub fn parse_style(&self) -> (SynthesisStyle, Vec<ConfigIssue>) {
        match self.style.parse::<SynthesisStyle>() {
            Ok(style) => (style, vec![]),
            Err(_) => (
                SynthesisStyle::Primary,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "synthesis.style".to_string(),
                        value: self.style.clone(),
                        valid_values: vec!["primary".to_string(), "annotated".to_string()],
                    },
                    format!(
                        "synthesis.style: unknown value '{}', falling back to 'primary'",
                        self.style
                    ),
                )],
            ),
        }
    }

    pub fn to_synthesizer(&self) -> (Synthesizer, Vec<ConfigIssue>) {
        let (style, mut issues) = self.parse_style();

        let margin = if self.closeness_margin.is_finite() && self.closeness_margin >= 0.0 {
            self.closeness_margin
        } else {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "synthesis.closeness_margin".to_string(),
                    value: self.closeness_margin.to_string(),
                },
                "synthesis.closeness_margin must be a finite, non-negative number",
            ));
            DEFAULT_CLOSENESS_MARGIN
        };

        (Synthesizer::new(margin).with_style(style), issues)
    }
}
