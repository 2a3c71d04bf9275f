//! In-process specialists with canned replies.
//!
//! Endpoints look like `static:<answer>` or `static:<answer>#<confidence>`.
//! A body starting with `{` is returned verbatim as the JSON reply, which is
//! handy for exercising the schema check.

use super::{TransportAdapter, TransportKind};
use async_trait::async_trait;
use ensemble_application::{SpecialistError, SpecialistRequest};
use ensemble_domain::SpecialistDescriptor;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSpecialistAdapter;

impl StaticSpecialistAdapter {
    pub fn new() -> Self {
        Self
    }

    fn reply_for(endpoint: &str) -> Result<Value, SpecialistError> {
        let body = endpoint
            .split_once(':')
            .map(|(_, body)| body)
            .ok_or_else(|| SpecialistError::UnsupportedEndpoint(endpoint.to_string()))?;

        if body.trim_start().starts_with('{') {
            return serde_json::from_str(body).map_err(|e| SpecialistError::Decode(e.to_string()));
        }

        let (answer, confidence) = match body.rsplit_once('#') {
            Some((answer, raw)) => match raw.trim().parse::<f64>() {
                Ok(c) => (answer, Some(c)),
                Err(_) => (body, None),
            },
            None => (body, None),
        };

        Ok(match confidence {
            Some(c) => json!({"answer_text": answer, "confidence": c}),
            None => json!({"answer_text": answer}),
        })
    }
}

#[async_trait]
impl TransportAdapter for StaticSpecialistAdapter {
    fn kind(&self) -> TransportKind {
        TransportKind::Static
    }

    async fn invoke(
        &self,
        descriptor: &SpecialistDescriptor,
        _request: &SpecialistRequest,
    ) -> Result<Value, SpecialistError> {
        Self::reply_for(&descriptor.endpoint)
    }
}
