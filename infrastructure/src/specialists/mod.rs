//! Specialist transports
//!
//! Each [`TransportAdapter`] reaches specialists over one family of endpoint
//! schemes; [`RoutingSpecialistGateway`] picks the adapter per descriptor.

#[cfg(feature = "http-specialists")]
pub mod http;
pub mod routing;
pub mod static_adapter;

use async_trait::async_trait;
use ensemble_application::{SpecialistError, SpecialistRequest};
use ensemble_domain::SpecialistDescriptor;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Static,
    Http,
}

impl TransportKind {
    /// Map an endpoint scheme to the transport that serves it
    pub fn for_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "static" => Some(TransportKind::Static),
            "http" | "https" => Some(TransportKind::Http),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Static => "static",
            TransportKind::Http => "http",
        }
    }
}

#[async_trait]
pub trait TransportAdapter: Send + Sync {
    fn kind(&self) -> TransportKind;

    async fn invoke(
        &self,
        descriptor: &SpecialistDescriptor,
        request: &SpecialistRequest,
    ) -> Result<Value, SpecialistError>;
}
