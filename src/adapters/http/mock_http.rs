//! Mock HttpPort for testing without network calls.
//!
//! Answers every request through a caller-supplied responder and records the
//! requests, so tests can assert on call counts and query strings.

use crate::domain::DomainError;
use crate::ports::{HttpPort, HttpRequest, HttpResponse};
use std::sync::Mutex;

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, DomainError> + Send + Sync;

pub struct MockHttp {
    responder: Box<Responder>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockHttp {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse, DomainError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Same JSON response for every request.
    pub fn always_json(status: u16, body: serde_json::Value) -> Self {
        let body = body.to_string();
        Self::new(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    /// Every request fails at the transport level.
    pub fn unreachable() -> Self {
        Self::new(|_| Err(DomainError::Transport("connection refused".to_string())))
    }

    /// Snapshot of recorded requests, oldest first.
    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait::async_trait]
impl HttpPort for MockHttp {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        let result = (self.responder)(&request);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let http = MockHttp::always_json(200, serde_json::json!([]));
        let res = http
            .execute(HttpRequest::get("http://example.test").query("q", "Paris"))
            .await
            .unwrap();

        assert_eq!(res.status, 200);
        assert_eq!(res.body, "[]");
        assert_eq!(http.call_count(), 1);
        assert_eq!(http.calls()[0].query_value("q"), Some("Paris"));
    }

    #[tokio::test]
    async fn test_mock_unreachable() {
        let http = MockHttp::unreachable();
        let err = http
            .execute(HttpRequest::get("http://example.test"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
        assert_eq!(http.call_count(), 1);
    }
}
