//! Specialist registry from TOML (`[[specialists]]` entries)
//!
//! ```toml
//! [[specialists]]
//! id = "logic"
//! capability = "logic"
//! endpoint = "http://localhost:8101/invoke"
//! timeout_ms = 4000
//! weight = 1.0
//! ```

use ensemble_domain::specialist::DEFAULT_SPECIALIST_TIMEOUT;
use ensemble_domain::{
    ConfigIssue, ConfigIssueCode, SpecialistDescriptor, SpecialistRegistry,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// One raw `[[specialists]]` entry. Every field defaults so that gaps are
/// reported by validation rather than by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpecialistConfig {
    pub id: String,
    pub capability: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub weight: f64,
}

impl Default for FileSpecialistConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            capability: "general".to_string(),
            endpoint: String::new(),
            timeout_ms: DEFAULT_SPECIALIST_TIMEOUT.as_millis() as u64,
            weight: 1.0,
        }
    }
}

impl FileSpecialistConfig {
    /// Everything wrong with this entry on its own
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.id.trim().is_empty() {
            problems.push("id is empty".to_string());
        }
        if self.endpoint.trim().is_empty() {
            problems.push("endpoint is empty".to_string());
        } else if !self.endpoint.contains(':') {
            problems.push(format!("endpoint '{}' has no scheme", self.endpoint));
        }
        if self.timeout_ms == 0 {
            problems.push("timeout_ms must be greater than 0".to_string());
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            problems.push(format!("weight must be a non-negative number, got {}", self.weight));
        }
        problems
    }

    pub fn to_descriptor(&self) -> SpecialistDescriptor {
        SpecialistDescriptor::new(
            self.id.trim(),
            self.capability.as_str(),
            self.endpoint.trim(),
        )
        .with_timeout(Duration::from_millis(self.timeout_ms))
        .with_weight(self.weight)
    }
}

/// Build the registry, reporting every malformed entry.
///
/// Returns `None` when any entry is invalid or the list is empty.
pub fn to_registry(
    specialists: &[FileSpecialistConfig],
) -> (Option<SpecialistRegistry>, Vec<ConfigIssue>) {
    if specialists.is_empty() {
        return (
            None,
            vec![ConfigIssue::error(
                ConfigIssueCode::EmptyRegistry,
                "no [[specialists]] configured",
            )],
        );
    }

    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    for (index, entry) in specialists.iter().enumerate() {
        let label = if entry.id.trim().is_empty() {
            format!("specialists[{}]", index)
        } else {
            entry.id.trim().to_string()
        };
        let mut problems = entry.problems();
        if !entry.id.trim().is_empty() && !seen.insert(entry.id.trim()) {
            problems.push("duplicate id".to_string());
        }
        for problem in problems {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidSpecialist { id: label.clone() },
                format!("specialist '{}': {}", label, problem),
            ));
        }
    }
    if !issues.is_empty() {
        return (None, issues);
    }

    let descriptors = specialists.iter().map(|s| s.to_descriptor()).collect();
    match SpecialistRegistry::new(descriptors) {
        Ok(registry) => (Some(registry), issues),
        Err(e) => (
            None,
            vec![ConfigIssue::error(
                ConfigIssueCode::InvalidSpecialist {
                    id: "specialists".to_string(),
                },
                e.to_string(),
            )],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> (Option<SpecialistRegistry>, Vec<ConfigIssue>) {
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        to_registry(&config.specialists)
    }

    #[test]
    fn test_specialists_deserialize() {
        let (registry, issues) = parse(
            r#"
[[specialists]]
id = "logic"
capability = "Logic"
endpoint = "http://localhost:8101/invoke"
timeout_ms = 4000
weight = 2.0

[[specialists]]
id = "echo"
endpoint = "static:hello"
"#,
        );
        assert!(issues.is_empty());
        let registry = registry.unwrap();
        assert_eq!(registry.len(), 2);

        let logic = registry.iter().next().unwrap();
        assert_eq!(logic.id.as_str(), "logic");
        assert_eq!(logic.capability.as_str(), "logic");
        assert_eq!(logic.timeout, Duration::from_millis(4000));
        assert_eq!(logic.weight, 2.0);

        let echo = registry.iter().nth(1).unwrap();
        assert_eq!(echo.capability.as_str(), "general");
        assert_eq!(echo.timeout, DEFAULT_SPECIALIST_TIMEOUT);
    }

    #[test]
    fn test_empty_registry_is_error() {
        let (registry, issues) = parse("");
        assert!(registry.is_none());
        assert!(matches!(issues[0].code, ConfigIssueCode::EmptyRegistry));
    }

    #[test]
    fn test_every_malformed_entry_is_reported() {
        let (registry, issues) = parse(
            r#"
[[specialists]]
endpoint = "static:x"

[[specialists]]
id = "slowpoke"
endpoint = "static:x"
timeout_ms = 0
weight = -1.0

[[specialists]]
id = "dup"
endpoint = "static:x"

[[specialists]]
id = "dup"
endpoint = "nowhere"
"#,
        );
        assert!(registry.is_none());
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "specialist 'specialists[0]': id is empty",
                "specialist 'slowpoke': timeout_ms must be greater than 0",
                "specialist 'slowpoke': weight must be a non-negative number, got -1",
                "specialist 'dup': endpoint 'nowhere' has no scheme",
                "specialist 'dup': duplicate id",
            ]
        );
    }
}
