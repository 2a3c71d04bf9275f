//! HTTP specialists.
//!
//! POSTs the [`SpecialistRequest`] as JSON to the descriptor's endpoint and
//! hands the JSON body back for schema validation. Timeouts are enforced by
//! the caller; the client only bounds connection setup.

use super::{TransportAdapter, TransportKind};
use async_trait::async_trait;
use ensemble_application::{SpecialistError, SpecialistRequest};
use ensemble_domain::SpecialistDescriptor;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest error body echoed into [`SpecialistError::HttpStatus`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpSpecialistAdapter {
    client: reqwest::Client,
}

impl HttpSpecialistAdapter {
    pub fn new() -> Result<Self, SpecialistError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("ensemble-governor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpecialistError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransportAdapter for HttpSpecialistAdapter {
    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }

    async fn invoke(
        &self,
        descriptor: &SpecialistDescriptor,
        request: &SpecialistRequest,
    ) -> Result<Value, SpecialistError> {
        debug!("POST {} for {}", descriptor.endpoint, descriptor.id);
        let response = self
            .client
            .post(&descriptor.endpoint)
            .header("X-Correlation-Id", request.correlation_id.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpecialistError::Timeout
                } else {
                    SpecialistError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = match body.char_indices().nth(MAX_ERROR_BODY) {
                Some((cut, _)) => format!("{}...", &body[..cut]),
                None => body,
            };
            return Err(SpecialistError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SpecialistError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::CorrelationId;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one HTTP response and returns the raw request it saw
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut seen = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                seen.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&seen);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if seen.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&seen).into_owned()
        });
        (format!("http://{}/invoke", addr), handle)
    }

    fn request() -> SpecialistRequest {
        SpecialistRequest {
            query: "2+2?".into(),
            context: Some(serde_json::json!({"unit": "apples"})),
            correlation_id: CorrelationId::new("corr-9"),
        }
    }

    #[tokio::test]
    async fn test_posts_request_and_returns_body() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"answer_text":"4","confidence":0.9}"#).await;
        let adapter = HttpSpecialistAdapter::new().unwrap();
        let descriptor = SpecialistDescriptor::new("calc", "math", url);

        let reply = adapter.invoke(&descriptor, &request()).await.unwrap();
        assert_eq!(reply["answer_text"], "4");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /invoke"));
        assert!(raw.to_ascii_lowercase().contains("x-correlation-id: corr-9"));
        assert!(raw.contains(r#""query":"2+2?""#));
        assert!(raw.contains(r#""correlation_id":"corr-9""#));
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_status() {
        let (url, _server) = serve_once("HTTP/1.1 503 Service Unavailable", r#"{"error":"busy"}"#).await;
        let adapter = HttpSpecialistAdapter::new().unwrap();
        let descriptor = SpecialistDescriptor::new("calc", "math", url);

        let err = adapter.invoke(&descriptor, &request()).await.unwrap_err();
        match err {
            SpecialistError::HttpStatus { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("busy"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (url, _server) = serve_once("HTTP/1.1 200 OK", "not json").await;
        let adapter = HttpSpecialistAdapter::new().unwrap();
        let descriptor = SpecialistDescriptor::new("calc", "math", url);

        let err = adapter.invoke(&descriptor, &request()).await.unwrap_err();
        assert!(matches!(err, SpecialistError::Decode(_)));
    }
}
