//! Gemini adapter for the travel-assistant chat.
//!
//! Implements `LlmPort` against the `generateContent` REST endpoint. One call
//! per conversation; an optional single retry with the alternate model
//! spelling when the model is reported missing.

use crate::domain::{ChatReply, DomainError, ModelTurn, PreparedConversation, TextPart};
use crate::ports::{HttpPort, HttpRequest, HttpResponse, LlmPort};
use crate::shared::config::ChatConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Gemini `generateContent` client.
pub struct GeminiAdapter {
    http: Arc<dyn HttpPort>,
    config: ChatConfig,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `http` - Network capability used for every call
    /// * `config` - Key, model and generation parameters; a missing key is reported per call
    pub fn new(http: Arc<dyn HttpPort>, config: ChatConfig) -> Self {
        Self { http, config }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.api_base, model)
    }

    fn request_body(
        &self,
        conversation: &PreparedConversation,
    ) -> Result<serde_json::Value, DomainError> {
        let request = GenerateContentRequest {
            contents: &conversation.turns,
            system_instruction: conversation
                .system_instruction
                .as_ref()
                .map(|text| SystemInstruction {
                    parts: vec![TextPart { text: text.clone() }],
                }),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
            tools: if self.config.search_grounding {
                vec![serde_json::json!({ "google_search": {} })]
            } else {
                Vec::new()
            },
        };
        serde_json::to_value(&request)
            .map_err(|e| DomainError::Transport(format!("encode request: {}", e)))
    }

    async fn call_model(
        &self,
        model: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, DomainError> {
        let request = HttpRequest::post_json(self.generate_url(model), body).query("key", api_key);
        self.http.execute(request).await
    }

    /// Best-effort listing of model names for error details. Any failure yields an empty list.
    async fn list_models(&self, api_key: &str) -> Vec<String> {
        let request =
            HttpRequest::get(format!("{}/models", self.config.api_base)).query("key", api_key);
        let response = match self.http.execute(request).await {
            Ok(r) if r.is_success() => r,
            Ok(r) => {
                debug!(status = r.status, "model listing returned error");
                return Vec::new();
            }
            Err(e) => {
                debug!(error = %e, "model listing failed");
                return Vec::new();
            }
        };
        serde_json::from_str::<ModelList>(&response.body)
            .map(|list| list.models.into_iter().map(|m| m.name).collect())
            .unwrap_or_default()
    }

    /// Map the HTTP response to a reply: status check, then first candidate's first text part.
    fn parse_response(response: HttpResponse) -> Result<ChatReply, DomainError> {
        if !response.is_success() {
            warn!(status = response.status, body = %response.body, "Gemini API returned error");
            return Err(DomainError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let raw: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| DomainError::InvalidResponse(format!("Failed to parse API response: {}", e)))?;
        let parsed: GenerateContentResponse = serde_json::from_value(raw.clone())
            .map_err(|e| DomainError::InvalidResponse(format!("Unexpected response shape: {}", e)))?;

        let first = parsed.candidates.into_iter().next();
        let text = first
            .as_ref()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
            .filter(|t| !t.is_empty());

        match text {
            Some(text) => Ok(ChatReply { text, raw }),
            None => {
                let finish_reason = first
                    .and_then(|c| c.finish_reason)
                    .unwrap_or_else(|| "UNKNOWN".to_string());
                warn!(finish_reason = %finish_reason, "model returned no text content");
                Err(DomainError::EmptyGeneration { finish_reason, raw })
            }
        }
    }
}

/// Alternate spelling tried once on 404: without a `models/` prefix and lower-cased.
fn alternate_model_name(model: &str) -> Option<String> {
    let alt = model
        .strip_prefix("models/")
        .unwrap_or(model)
        .to_ascii_lowercase();
    (alt != model).then_some(alt)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [ModelTurn],
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
}

#[async_trait::async_trait]
impl LlmPort for GeminiAdapter {
    async fn generate(
        &self,
        conversation: &PreparedConversation,
    ) -> Result<ChatReply, DomainError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::Config("GEMINI_API_KEY not set in environment.".into()))?;

        let model = self.config.model.as_str();
        info!(
            model,
            turns = conversation.turns.len(),
            has_system = conversation.system_instruction.is_some(),
            "sending conversation to Gemini"
        );

        let body = self.request_body(conversation)?;
        let response = self.call_model(model, api_key, body.clone()).await?;

        if response.status == 404 && self.config.model_fallback {
            let mut tried = vec![model.to_string()];
            if let Some(alt) = alternate_model_name(model) {
                warn!(model, alternate = %alt, "model not found; retrying with alternate name");
                let retry = self.call_model(&alt, api_key, body).await?;
                tried.push(alt);
                if retry.status != 404 {
                    return Self::parse_response(retry);
                }
            }
            let available = self.list_models(api_key).await;
            warn!(
                tried = ?tried,
                available = available.len(),
                "model not found upstream"
            );
            return Err(DomainError::ModelNotFound { tried, available });
        }

        let reply = Self::parse_response(response)?;
        info!(text_len = reply.text.len(), "generation complete");
        Ok(reply)
    }
}
