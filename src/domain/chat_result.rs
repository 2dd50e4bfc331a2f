//! Tagged result of one chat proxy round trip.

use super::errors::DomainError;
use serde::Serialize;

/// Successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    /// Full upstream response body, for callers that want citations or usage data.
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatFailureKind {
    InvalidRequest,
    Config,
    Transport,
    Upstream,
    ModelNotFound,
    InvalidResponse,
    EmptyGeneration,
    Internal,
}

/// Failed round trip. `status` is the HTTP status the caller should answer with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatFailure {
    pub kind: ChatFailureKind,
    #[serde(skip)]
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Longest slice of an upstream error body carried in `detail`.
const MAX_DETAIL_CHARS: usize = 500;

impl ChatFailure {
    /// Caller sent a body that is not a conversation.
    pub fn invalid_request(error: impl Into<String>) -> Self {
        Self {
            kind: ChatFailureKind::InvalidRequest,
            status: 400,
            error: error.into(),
            detail: None,
        }
    }

    fn internal(kind: ChatFailureKind, error: String, detail: Option<serde_json::Value>) -> Self {
        Self {
            kind,
            status: 500,
            error,
            detail,
        }
    }
}

impl From<DomainError> for ChatFailure {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Config(msg) => Self::internal(ChatFailureKind::Config, msg, None),
            DomainError::Transport(msg) => Self::internal(
                ChatFailureKind::Transport,
                format!("Internal Server Error: {}", msg),
                None,
            ),
            DomainError::Upstream { status, body } => Self {
                kind: ChatFailureKind::Upstream,
                status,
                error: "Failed to communicate with the Gemini API.".to_string(),
                detail: Some(serde_json::Value::String(
                    body.chars().take(MAX_DETAIL_CHARS).collect(),
                )),
            },
            DomainError::ModelNotFound { tried, available } => Self {
                kind: ChatFailureKind::ModelNotFound,
                status: 404,
                error: format!("Model not found: {}", tried.join(", ")),
                detail: Some(serde_json::json!({
                    "tried": tried,
                    "available_models": available,
                })),
            },
            DomainError::EmptyGeneration { finish_reason, raw } => Self::internal(
                ChatFailureKind::EmptyGeneration,
                format!("Model returned no text content. Reason: {}", finish_reason),
                Some(raw),
            ),
            e @ DomainError::InvalidResponse(_) => {
                Self::internal(ChatFailureKind::InvalidResponse, e.to_string(), None)
            }
            e @ (DomainError::Validation(_) | DomainError::Repo(_)) => {
                Self::internal(ChatFailureKind::Internal, e.to_string(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_keeps_status() {
        let failure = ChatFailure::from(DomainError::Upstream {
            status: 429,
            body: "quota".to_string(),
        });
        assert_eq!(failure.kind, ChatFailureKind::Upstream);
        assert_eq!(failure.status, 429);
        assert_eq!(failure.detail, Some(serde_json::json!("quota")));
    }

    #[test]
    fn test_upstream_detail_truncated() {
        let failure = ChatFailure::from(DomainError::Upstream {
            status: 500,
            body: "x".repeat(2000),
        });
        let detail = failure.detail.unwrap();
        assert_eq!(detail.as_str().unwrap().len(), MAX_DETAIL_CHARS);
    }

    #[test]
    fn test_empty_generation_mentions_reason() {
        let failure = ChatFailure::from(DomainError::EmptyGeneration {
            finish_reason: "SAFETY".to_string(),
            raw: serde_json::json!({"candidates": []}),
        });
        assert_eq!(failure.status, 500);
        assert!(failure.error.contains("SAFETY"));
        assert_eq!(failure.detail, Some(serde_json::json!({"candidates": []})));
    }

    #[test]
    fn test_config_is_500_without_detail() {
        let failure = ChatFailure::from(DomainError::Config("missing".into()));
        assert_eq!(failure.kind, ChatFailureKind::Config);
        assert_eq!(failure.status, 500);
        assert!(failure.detail.is_none());
    }

    #[test]
    fn test_serialized_shape_hides_status() {
        let failure = ChatFailure::from(DomainError::Config("missing".into()));
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "config", "error": "missing"}));
    }
}
