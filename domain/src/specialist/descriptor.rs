//! Static specialist configuration entries

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-call timeout when a descriptor does not declare one
pub const DEFAULT_SPECIALIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Unique identifier of a specialist.
///
/// Ordered lexicographically, which the ranker relies on for its final tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialistId(String);

impl SpecialistId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpecialistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SpecialistId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SpecialistId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Capability a specialist declares, e.g. `logic`, `coding`, `strategy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityTag(String);

impl CapabilityTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CapabilityTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Static description of one specialist (registry entry)
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistDescriptor {
    pub id: SpecialistId,
    pub capability: CapabilityTag,
    /// Where the specialist is reached; the scheme selects the transport adapter
    pub endpoint: String,
    /// Upper bound for a single invocation
    pub timeout: Duration,
    /// Priority weight, higher wins ties and scales the default score
    pub weight: f64,
}

impl SpecialistDescriptor {
    pub fn new(
        id: impl Into<SpecialistId>,
        capability: impl Into<CapabilityTag>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            capability: capability.into(),
            endpoint: endpoint.into(),
            timeout: DEFAULT_SPECIALIST_TIMEOUT,
            weight: 1.0,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Endpoint scheme (`http`, `https`, `static`, ...), lowercased
    pub fn scheme(&self) -> Option<String> {
        self.endpoint
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .filter(|s| !s.is_empty())
    }
}
