//! reqwest-backed implementation of HttpPort.

use crate::domain::DomainError;
use crate::ports::{HttpMethod, HttpPort, HttpRequest, HttpResponse};
use reqwest::Client;
use tracing::debug;

/// Shared HTTP client for every outbound adapter.
///
/// Timeouts are the client defaults; calls are never cancelled.
pub struct ReqwestHttp {
    client: Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HttpPort for ReqwestHttp {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        debug!(method = ?request.method, url = %request.url, "outbound request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        // reqwest errors embed the full URL; strip it so query-string keys stay out of logs
        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("read body: {}", e.without_url())))?;

        debug!(status, body_len = body.len(), "outbound response");
        Ok(HttpResponse { status, body })
    }
}
