use super::static_adapter::StaticSpecialistAdapter;
use super::{TransportAdapter, TransportKind};
use async_trait::async_trait;
use ensemble_application::{SpecialistError, SpecialistGateway, SpecialistRequest};
use ensemble_domain::SpecialistDescriptor;
use serde_json::Value;
use std::sync::Arc;

/// Gateway that dispatches each call to the adapter serving the
/// descriptor's endpoint scheme.
pub struct RoutingSpecialistGateway {
    adapters: Vec<Arc<dyn TransportAdapter>>,
}

impl RoutingSpecialistGateway {
    pub fn new(adapters: Vec<Arc<dyn TransportAdapter>>) -> Self {
        Self { adapters }
    }

    /// Static adapter, plus HTTP when the `http-specialists` feature is on
    pub fn with_default_adapters() -> Result<Self, SpecialistError> {
        let mut adapters: Vec<Arc<dyn TransportAdapter>> =
            vec![Arc::new(StaticSpecialistAdapter::new())];
        #[cfg(feature = "http-specialists")]
        adapters.push(Arc::new(super::http::HttpSpecialistAdapter::new()?));
        Ok(Self::new(adapters))
    }

    pub fn kinds(&self) -> Vec<TransportKind> {
        self.adapters.iter().map(|a| a.kind()).collect()
    }

    /// Resolution order:
    ///  1. the endpoint must carry a scheme
    ///  2. the scheme must map to a known transport kind
    ///  3. an adapter of that kind must be registered
    fn resolve(
        &self,
        descriptor: &SpecialistDescriptor,
    ) -> Result<&dyn TransportAdapter, SpecialistError> {
        let unsupported = || SpecialistError::UnsupportedEndpoint(descriptor.endpoint.clone());
        let kind = descriptor
            .scheme()
            .as_deref()
            .and_then(TransportKind::for_scheme)
            .ok_or_else(unsupported)?;
        self.adapters
            .iter()
            .find(|a| a.kind() == kind)
            .map(|a| a.as_ref())
            .ok_or_else(unsupported)
    }
}

#[async_trait]
impl SpecialistGateway for RoutingSpecialistGateway {
    async fn invoke(
        &self,
        descriptor: &SpecialistDescriptor,
        request: &SpecialistRequest,
    ) -> Result<Value, SpecialistError> {
        self.resolve(descriptor)?.invoke(descriptor, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::CorrelationId;
    use serde_json::json;

    struct FakeHttp;

    #[async_trait]
    impl TransportAdapter for FakeHttp {
        fn kind(&self) -> TransportKind {
            TransportKind::Http
        }

        async fn invoke(
            &self,
            descriptor: &SpecialistDescriptor,
            _request: &SpecialistRequest,
        ) -> Result<Value, SpecialistError> {
            Ok(json!({"answer_text": format!("http says hi to {}", descriptor.id)}))
        }
    }

    fn request() -> SpecialistRequest {
        SpecialistRequest {
            query: "q".into(),
            context: None,
            correlation_id: CorrelationId::new("c"),
        }
    }

    fn gateway() -> RoutingSpecialistGateway {
        let adapters: Vec<Arc<dyn TransportAdapter>> =
            vec![Arc::new(StaticSpecialistAdapter::new()), Arc::new(FakeHttp)];
        RoutingSpecialistGateway::new(adapters)
    }

    #[tokio::test]
    async fn static_scheme_routes_to_static_adapter() {
        let descriptor = SpecialistDescriptor::new("s", "general", "static:canned");
        let reply = gateway().invoke(&descriptor, &request()).await.unwrap();
        assert_eq!(reply["answer_text"], "canned");
    }

    #[tokio::test]
    async fn http_and_https_route_to_http_adapter() {
        for endpoint in ["http://localhost:1/x", "HTTPS://example.com/x"] {
            let descriptor = SpecialistDescriptor::new("h", "general", endpoint);
            let reply = gateway().invoke(&descriptor, &request()).await.unwrap();
            assert_eq!(reply["answer_text"], "http says hi to h");
        }
    }

    #[tokio::test]
    async fn unknown_scheme_is_unsupported() {
        let descriptor = SpecialistDescriptor::new("g", "general", "grpc://host:1");
        let err = gateway().invoke(&descriptor, &request()).await.unwrap_err();
        assert!(matches!(err, SpecialistError::UnsupportedEndpoint(e) if e == "grpc://host:1"));
    }

    #[tokio::test]
    async fn missing_adapter_is_unsupported() {
        let adapters: Vec<Arc<dyn TransportAdapter>> =
            vec![Arc::new(StaticSpecialistAdapter::new())];
        let only_static = RoutingSpecialistGateway::new(adapters);
        let descriptor = SpecialistDescriptor::new("h", "general", "http://localhost:1/x");
        let err = only_static.invoke(&descriptor, &request()).await.unwrap_err();
        assert!(matches!(err, SpecialistError::UnsupportedEndpoint(_)));
    }

    #[test]
    fn default_adapters_include_static() {
        let gateway = RoutingSpecialistGateway::with_default_adapters().unwrap();
        assert!(gateway.kinds().contains(&TransportKind::Static));
    }
}
