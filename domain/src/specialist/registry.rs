//! Process-wide specialist registry
//!
//! Built once at startup from configuration and never mutated afterwards.
//! Cloning is cheap (shared slice), so concurrent queries each hold a handle.

use super::descriptor::{CapabilityTag, SpecialistDescriptor, SpecialistId};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Reasons a registry cannot be built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("specialist registry is empty")]
    Empty,

    #[error("specialist id cannot be empty")]
    EmptyId,

    #[error("duplicate specialist id: {0}")]
    DuplicateId(SpecialistId),

    #[error("specialist {0} has a zero timeout")]
    ZeroTimeout(SpecialistId),

    #[error("specialist {id} has invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { id: SpecialistId, weight: f64 },

    #[error("specialist {0} has an empty endpoint")]
    EmptyEndpoint(SpecialistId),
}

/// Immutable, validated set of specialists
#[derive(Debug, Clone)]
pub struct SpecialistRegistry {
    specialists: Arc<[SpecialistDescriptor]>,
}

impl SpecialistRegistry {
    /// Validate and freeze the descriptors. Declaration order is preserved.
    pub fn new(specialists: Vec<SpecialistDescriptor>) -> Result<Self, RegistryError> {
        if specialists.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for d in &specialists {
            if d.id.as_str().trim().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if !seen.insert(d.id.clone()) {
                return Err(RegistryError::DuplicateId(d.id.clone()));
            }
            if d.timeout.is_zero() {
                return Err(RegistryError::ZeroTimeout(d.id.clone()));
            }
            if !d.weight.is_finite() || d.weight < 0.0 {
                return Err(RegistryError::InvalidWeight {
                    id: d.id.clone(),
                    weight: d.weight,
                });
            }
            if d.endpoint.trim().is_empty() {
                return Err(RegistryError::EmptyEndpoint(d.id.clone()));
            }
        }

        Ok(Self {
            specialists: specialists.into(),
        })
    }

    pub fn get(&self, id: &SpecialistId) -> Option<&SpecialistDescriptor> {
        self.specialists.iter().find(|d| &d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialistDescriptor> {
        self.specialists.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SpecialistId> {
        self.specialists.iter().map(|d| &d.id)
    }

    /// Specialists declaring the given capability
    pub fn by_capability<'a>(
        &'a self,
        tag: &'a CapabilityTag,
    ) -> impl Iterator<Item = &'a SpecialistDescriptor> + 'a {
        self.specialists.iter().filter(move |d| &d.capability == tag)
    }

    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    /// Always false for a constructed registry; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }
}
