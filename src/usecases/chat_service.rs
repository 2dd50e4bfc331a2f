//! Chat proxy use case. Reshapes a caller conversation and forwards it to the LLM.
//!
//! Every path ends in a reply or a structured `ChatFailure`; nothing propagates
//! as an uncaught error.

use crate::domain::{ChatFailure, ChatReply, ConversationMessage, prepare};
use crate::ports::LlmPort;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ChatService {
    llm: Arc<dyn LlmPort>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }

    /// One synchronous round trip: partition by role, call the model, map the outcome.
    pub async fn send(
        &self,
        conversation: &[ConversationMessage],
    ) -> Result<ChatReply, ChatFailure> {
        let prepared = prepare(conversation);
        debug!(
            messages = conversation.len(),
            turns = prepared.turns.len(),
            system_len = prepared.system_instruction.as_ref().map_or(0, String::len),
            "prepared conversation"
        );

        self.llm.generate(&prepared).await.map_err(|e| {
            let failure = ChatFailure::from(e);
            warn!(
                kind = ?failure.kind,
                status = failure.status,
                error = %failure.error,
                "chat request failed"
            );
            failure
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::GeminiAdapter;
    use crate::adapters::http::MockHttp;
    use crate::domain::ChatFailureKind;
    use crate::shared::config::ChatConfig;
    use serde_json::json;

    fn service(http: Arc<MockHttp>, api_key: Option<&str>) -> ChatService {
        let config = ChatConfig {
            api_key: api_key.map(str::to_string),
            api_base: "http://gemini.test/v1beta".to_string(),
            ..ChatConfig::default()
        };
        ChatService::new(Arc::new(GeminiAdapter::new(http, config)))
    }

    fn travel_conversation() -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::assistant("Hi! I'm your AI Travel Assistant."),
            ConversationMessage::system("You are a friendly travel planner."),
            ConversationMessage::system("Use bold for key points."),
            ConversationMessage::user("Where should I go in Japan?"),
        ]
    }

    #[tokio::test]
    async fn test_forwards_reshaped_conversation() {
        let http = Arc::new(MockHttp::always_json(
            200,
            json!({"candidates": [{"content": {"parts": [{"text": "Try **Kyoto**."}]}}]}),
        ));
        let chat = service(http.clone(), Some("key"));

        let reply = chat.send(&travel_conversation()).await.unwrap();

        assert_eq!(reply.text, "Try **Kyoto**.");
        let calls = http.calls();
        assert_eq!(calls.len(), 1);
        let body = calls[0].json.as_ref().unwrap();
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            json!("You are a friendly travel planner.\nUse bold for key points.")
        );
        assert_eq!(
            body["contents"],
            json!([
                {"role": "model", "parts": [{"text": "Hi! I'm your AI Travel Assistant."}]},
                {"role": "user", "parts": [{"text": "Where should I go in Japan?"}]}
            ])
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let http = Arc::new(MockHttp::always_json(200, json!({})));
        let chat = service(http.clone(), None);

        let failure = chat.send(&travel_conversation()).await.unwrap_err();

        assert_eq!(failure.kind, ChatFailureKind::Config);
        assert_eq!(failure.status, 500);
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_status_mirrored() {
        let http = Arc::new(MockHttp::always_json(429, json!({"error": {"code": 429}})));
        let chat = service(http, Some("key"));

        let failure = chat.send(&travel_conversation()).await.unwrap_err();

        assert_eq!(failure.kind, ChatFailureKind::Upstream);
        assert_eq!(failure.status, 429);
    }

    #[tokio::test]
    async fn test_blocked_generation_is_failure_not_empty_text() {
        let http = Arc::new(MockHttp::always_json(
            200,
            json!({"candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]}),
        ));
        let chat = service(http, Some("key"));

        let failure = chat.send(&travel_conversation()).await.unwrap_err();

        assert_eq!(failure.kind, ChatFailureKind::EmptyGeneration);
        assert!(failure.error.contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_structured() {
        let http = Arc::new(MockHttp::unreachable());
        let chat = service(http, Some("key"));

        let failure = chat.send(&travel_conversation()).await.unwrap_err();

        assert_eq!(failure.kind, ChatFailureKind::Transport);
        assert_eq!(failure.status, 500);
    }
}
