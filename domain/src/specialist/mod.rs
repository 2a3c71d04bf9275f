//! Specialist subdomain
//!
//! A specialist is an independent answer-generating backend. The governor
//! only knows its static [`SpecialistDescriptor`] (loaded once into the
//! read-only [`SpecialistRegistry`]) and the shape of what it sends back
//! ([`SpecialistReply`]) or how it failed ([`FailureKind`]).

pub mod descriptor;
pub mod failure;
pub mod registry;
pub mod reply;

pub use descriptor::{
    CapabilityTag, DEFAULT_SPECIALIST_TIMEOUT, SpecialistDescriptor, SpecialistId,
};
pub use failure::FailureKind;
pub use registry::{RegistryError, SpecialistRegistry};
pub use reply::{ReplyError, SpecialistReply};
